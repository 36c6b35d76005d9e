use super::state::FairnessState;
use super::types::Tuning;
use super::{util, FairnessStrategy, Generated};
use crate::calendar::MonthKey;
use crate::model::{Assignment, Quotas, Role, Roster};
use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, trace};

/// Glouton par priorité de déficit, avec remise à zéro mensuelle.
///
/// Ne regarde qu'une date à la fois : pas d'optimum global, mais une
/// correction monotone des écarts et une garantie de non-famine mensuelle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeficitPriority {
    pub tuning: Tuning,
}

impl DeficitPriority {
    pub fn new(tuning: Tuning) -> Self {
        Self { tuning }
    }

    /// Traite une date : met à jour `state` et renvoie la partition.
    pub fn step<R: Rng + ?Sized>(
        &self,
        state: &mut FairnessState,
        roster: &Roster,
        date: NaiveDate,
        quotas: &Quotas,
        rng: &mut R,
    ) -> Assignment {
        let t = &self.tuning;
        let month = MonthKey::of(date);
        let penalized = state.enter_month(month, t.month_penalty);
        if !penalized.is_empty() {
            debug!(%month, count = penalized.len(), "monthly penalty applied");
        }
        state.begin_date();

        let ideal_food = state.ideal(quotas.food);
        let mut ranked: Vec<(usize, f64)> = state
            .counters()
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                let deficit = ideal_food - f64::from(c.lifetime.food);
                let fresh = if c.month_food == 0 {
                    t.fresh_month_bonus
                } else {
                    0.0
                };
                let score = t.hunger_weight * f64::from(c.hunger)
                    + t.deficit_weight * deficit
                    + fresh
                    + jitter(rng, t.jitter);
                (idx, score)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        let (food, rest) = ranked.split_at(quotas.food);

        let ideal_drink = state.ideal(quotas.drink);
        let counters = state.counters();
        let mut rest: Vec<(usize, f64)> = rest
            .iter()
            .map(|&(idx, _)| {
                let deficit = ideal_drink - f64::from(counters[idx].lifetime.drink);
                (idx, t.deficit_weight * deficit + jitter(rng, t.jitter))
            })
            .collect();
        rest.sort_by(|a, b| b.1.total_cmp(&a.1));
        let (drink, free) = rest.split_at(quotas.drink);

        let mut assignment = Assignment::new(date);
        for (role, group) in [(Role::Food, food), (Role::Drink, drink), (Role::Free, free)] {
            for &(idx, _) in group {
                state.record(idx, role);
                assignment.team_mut(role).push(roster.people[idx].clone());
            }
        }

        trace!(%date, food = ?assignment.food_team, "date assigned");
        assignment
    }
}

impl FairnessStrategy for DeficitPriority {
    fn name(&self) -> &'static str {
        "deficit-priority"
    }

    fn run<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        dates: &[NaiveDate],
        quotas: &Quotas,
        rng: &mut R,
    ) -> Generated {
        let mut state = FairnessState::new(roster);
        let schedule = dates
            .iter()
            .map(|&date| self.step(&mut state, roster, date, quotas, rng))
            .collect();
        let lifetimes: Vec<_> = state.counters().iter().map(|c| c.lifetime).collect();
        let cost = util::variance_cost(&lifetimes);
        Generated {
            schedule,
            state,
            cost,
        }
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    rng.random::<f64>() * amplitude
}
