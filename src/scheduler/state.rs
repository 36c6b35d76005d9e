use crate::calendar::MonthKey;
use crate::model::{PersonId, Role, Roster};
use serde::Serialize;

/// Compteurs cumulés par rôle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RoleCounts {
    pub food: u32,
    pub drink: u32,
    pub free: u32,
}

impl RoleCounts {
    pub fn get(&self, role: Role) -> u32 {
        match role {
            Role::Food => self.food,
            Role::Drink => self.drink,
            Role::Free => self.free,
        }
    }

    pub fn bump(&mut self, role: Role) {
        match role {
            Role::Food => self.food += 1,
            Role::Drink => self.drink += 1,
            Role::Free => self.free += 1,
        }
    }

    pub(super) fn drop_one(&mut self, role: Role) {
        match role {
            Role::Food => self.food -= 1,
            Role::Drink => self.drink -= 1,
            Role::Free => self.free -= 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.food + self.drink + self.free
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PersonCounters {
    pub lifetime: RoleCounts,
    /// `Food` reçus dans le mois courant.
    pub month_food: u32,
    /// Dates consécutives sans `Food`, plus les pénalités mensuelles.
    pub hunger: u32,
}

/// État d'équité d'un appel `generate`.
///
/// Créé au début du run, muté une fois par date, rendu avec le planning.
/// Les compteurs sont alignés sur l'ordre du roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FairnessState {
    people: Vec<PersonId>,
    counters: Vec<PersonCounters>,
    processed: usize,
    current_month: Option<MonthKey>,
}

impl FairnessState {
    pub fn new(roster: &Roster) -> Self {
        Self {
            people: roster.people.clone(),
            counters: vec![PersonCounters::default(); roster.len()],
            processed: 0,
            current_month: None,
        }
    }

    pub fn counters(&self) -> &[PersonCounters] {
        &self.counters
    }

    pub fn counters_for(&self, person: &PersonId) -> Option<&PersonCounters> {
        let idx = self.people.iter().position(|p| p == person)?;
        self.counters.get(idx)
    }

    /// Nombre de dates déjà traitées.
    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn current_month(&self) -> Option<MonthKey> {
        self.current_month
    }

    /// Part idéale de `role` après `processed` dates pour une personne.
    pub(super) fn ideal(&self, role_quota: usize) -> f64 {
        (self.processed * role_quota) as f64 / self.people.len() as f64
    }

    /// Bascule sur le mois de `month`. Renvoie les index pénalisés.
    ///
    /// Rien n'est pénalisé au premier passage (pas de mois précédent).
    pub(super) fn enter_month(&mut self, month: MonthKey, penalty: u32) -> Vec<usize> {
        let previous = self.current_month.replace(month);
        let mut penalized = Vec::new();
        match previous {
            Some(prev) if prev != month => {
                for (idx, c) in self.counters.iter_mut().enumerate() {
                    if c.month_food == 0 {
                        c.hunger = c.hunger.saturating_add(penalty);
                        penalized.push(idx);
                    }
                    c.month_food = 0;
                }
            }
            _ => {}
        }
        penalized
    }

    pub(super) fn begin_date(&mut self) {
        self.processed += 1;
    }

    pub(super) fn record(&mut self, idx: usize, role: Role) {
        let c = &mut self.counters[idx];
        c.lifetime.bump(role);
        if role == Role::Food {
            c.month_food += 1;
            c.hunger = 0;
        } else {
            c.hunger = c.hunger.saturating_add(1);
        }
    }

    pub(super) fn counters_mut(&mut self) -> &mut [PersonCounters] {
        &mut self.counters
    }
}
