use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Identifiant fort pour une personne (son nom, en pratique).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rôle hebdomadaire.
///
/// `Food` est le rôle au plus gros quota, celui que suit la « faim » et la règle
/// mensuelle. `Free` reçoit tout le reste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Food,
    Drink,
    Free,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Food, Role::Drink, Role::Free];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Food => "food",
            Role::Drink => "drink",
            Role::Free => "free",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" | "comida" => Ok(Role::Food),
            "drink" | "bebida" => Ok(Role::Drink),
            "free" | "folga" => Ok(Role::Free),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Quotas par date. La somme doit valoir exactement la taille du roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotas {
    pub food: usize,
    pub drink: usize,
    pub free: usize,
}

impl Default for Quotas {
    fn default() -> Self {
        Self {
            food: 7,
            drink: 3,
            free: 5,
        }
    }
}

impl Quotas {
    pub fn get(&self, role: Role) -> usize {
        match role {
            Role::Food => self.food,
            Role::Drink => self.drink,
            Role::Free => self.free,
        }
    }

    pub fn total(&self) -> usize {
        self.food + self.drink + self.free
    }
}

/// Roster figé pour la durée d'une génération (ordre significatif).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roster {
    pub people: Vec<PersonId>,
}

impl Roster {
    pub fn new(people: Vec<PersonId>) -> Self {
        Self { people }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(names.into_iter().map(PersonId::new).collect())
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &PersonId> {
        self.people.iter()
    }
    pub fn contains(&self, person: &PersonId) -> bool {
        self.people.contains(person)
    }

    /// Renvoie le premier identifiant en double, s'il y en a un.
    pub fn first_duplicate(&self) -> Option<&PersonId> {
        let mut seen = HashSet::with_capacity(self.people.len());
        self.people.iter().find(|p| !seen.insert(*p))
    }
}

/// Escala d'une date : partition complète du roster entre les trois rôles.
///
/// La forme correspond à l'enregistrement persistant (`date` + trois listes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub date: NaiveDate,
    #[serde(default)]
    pub food_team: Vec<PersonId>,
    #[serde(default)]
    pub drink_team: Vec<PersonId>,
    #[serde(default)]
    pub free_team: Vec<PersonId>,
}

impl Assignment {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            food_team: Vec::new(),
            drink_team: Vec::new(),
            free_team: Vec::new(),
        }
    }

    pub fn team(&self, role: Role) -> &[PersonId] {
        match role {
            Role::Food => &self.food_team,
            Role::Drink => &self.drink_team,
            Role::Free => &self.free_team,
        }
    }

    pub fn team_mut(&mut self, role: Role) -> &mut Vec<PersonId> {
        match role {
            Role::Food => &mut self.food_team,
            Role::Drink => &mut self.drink_team,
            Role::Free => &mut self.free_team,
        }
    }

    pub fn role_of(&self, person: &PersonId) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| self.team(*role).contains(person))
    }

    pub fn contains(&self, person: &PersonId) -> bool {
        self.role_of(person).is_some()
    }
}

/// Séquence ordonnée d'escalas, une par date d'entrée.
pub type Schedule = Vec<Assignment>;
