use super::state::RoleCounts;
use super::util;
use crate::model::{Assignment, PersonId, Quotas, Role, Roster};
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    WrongTeamSize {
        role: Role,
        expected: usize,
        actual: usize,
    },
    MissingPerson,
    DuplicateMember,
    UnknownMember,
    DateOutOfOrder,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::WrongTeamSize { .. } => "team_size",
            ViolationKind::MissingPerson => "missing",
            ViolationKind::DuplicateMember => "duplicate",
            ViolationKind::UnknownMember => "unknown",
            ViolationKind::DateOutOfOrder => "order",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub date: NaiveDate,
    pub person: Option<PersonId>,
    pub kind: ViolationKind,
}

/// Vérifie qu'un planning (stocké, importé, édité à la main) reste une
/// partition valide du roster à chaque date.
pub fn detect_violations(
    schedule: &[Assignment],
    roster: &Roster,
    quotas: &Quotas,
) -> Vec<Violation> {
    let mut out = Vec::new();
    let mut previous: Option<NaiveDate> = None;

    for assignment in schedule {
        let date = assignment.date;
        if previous.is_some_and(|p| date < p) {
            out.push(Violation {
                date,
                person: None,
                kind: ViolationKind::DateOutOfOrder,
            });
        }
        previous = Some(date);

        for role in Role::ALL {
            let expected = quotas.get(role);
            let actual = assignment.team(role).len();
            if expected != actual {
                out.push(Violation {
                    date,
                    person: None,
                    kind: ViolationKind::WrongTeamSize {
                        role,
                        expected,
                        actual,
                    },
                });
            }
        }

        let mut seen: HashMap<&PersonId, usize> = HashMap::new();
        for role in Role::ALL {
            for member in assignment.team(role) {
                *seen.entry(member).or_default() += 1;
            }
        }

        let mut members: Vec<(&PersonId, usize)> = seen.into_iter().collect();
        members.sort();
        for (member, count) in members {
            if count > 1 {
                out.push(Violation {
                    date,
                    person: Some(member.clone()),
                    kind: ViolationKind::DuplicateMember,
                });
            }
            if !roster.contains(member) {
                out.push(Violation {
                    date,
                    person: Some(member.clone()),
                    kind: ViolationKind::UnknownMember,
                });
            }
        }

        for person in roster.iter() {
            if !assignment.contains(person) {
                out.push(Violation {
                    date,
                    person: Some(person.clone()),
                    kind: ViolationKind::MissingPerson,
                });
            }
        }
    }

    out
}

/// Bilan d'équité d'un planning complet.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    pub people: Vec<(PersonId, RoleCounts)>,
    /// max − min par rôle.
    pub spread: RoleCounts,
    pub cost: f64,
}

pub fn balance_report(schedule: &[Assignment], roster: &Roster) -> BalanceReport {
    let index = util::index_of(roster);
    let mut counts = vec![RoleCounts::default(); roster.len()];
    for assignment in schedule {
        for role in Role::ALL {
            for member in assignment.team(role) {
                if let Some(&idx) = index.get(member) {
                    counts[idx].bump(role);
                }
            }
        }
    }

    let spread_of = |role: Role| {
        let values = counts.iter().map(|c| c.get(role));
        let max = values.clone().max().unwrap_or(0);
        let min = values.min().unwrap_or(0);
        max - min
    };
    let spread = RoleCounts {
        food: spread_of(Role::Food),
        drink: spread_of(Role::Drink),
        free: spread_of(Role::Free),
    };

    BalanceReport {
        cost: util::variance_cost(&counts),
        people: roster.people.iter().cloned().zip(counts).collect(),
        spread,
    }
}
