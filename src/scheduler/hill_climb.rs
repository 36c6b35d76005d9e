use super::state::{FairnessState, RoleCounts};
use super::types::HillClimbOptions;
use super::{util, FairnessStrategy, Generated};
use crate::model::{Assignment, Quotas, Role, Roster};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Recherche locale sur tout l'horizon : échanges aléatoires gardés
/// seulement s'ils font baisser la variance globale. Aucune notion de mois.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimb {
    pub options: HillClimbOptions,
}

impl HillClimb {
    pub fn new(options: HillClimbOptions) -> Self {
        Self { options }
    }
}

impl FairnessStrategy for HillClimb {
    fn name(&self) -> &'static str {
        "hill-climb"
    }

    fn run<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        dates: &[NaiveDate],
        quotas: &Quotas,
        rng: &mut R,
    ) -> Generated {
        let people = roster.len();
        let slots: Vec<Role> = Role::ALL
            .into_iter()
            .flat_map(|role| std::iter::repeat(role).take(quotas.get(role)))
            .collect();

        // days[d][p] = rôle de la personne p à la date d
        let mut days: Vec<Vec<Role>> = dates
            .iter()
            .map(|_| {
                let mut day = slots.clone();
                day.shuffle(rng);
                day
            })
            .collect();

        let mut counts = vec![RoleCounts::default(); people];
        for day in &days {
            for (idx, role) in day.iter().enumerate() {
                counts[idx].bump(*role);
            }
        }

        let mut cost = util::variance_cost(&counts);
        let initial = cost;
        let mut accepted = 0u32;

        if !days.is_empty() {
            for _ in 0..self.options.iterations {
                let d = rng.random_range(0..days.len());
                let a = rng.random_range(0..people);
                let b = rng.random_range(0..people);
                let (ra, rb) = (days[d][a], days[d][b]);
                if a == b || ra == rb {
                    continue;
                }

                counts[a].drop_one(ra);
                counts[a].bump(rb);
                counts[b].drop_one(rb);
                counts[b].bump(ra);

                let candidate = util::variance_cost(&counts);
                if candidate < cost {
                    days[d].swap(a, b);
                    cost = candidate;
                    accepted += 1;
                } else {
                    counts[a].drop_one(rb);
                    counts[a].bump(ra);
                    counts[b].drop_one(ra);
                    counts[b].bump(rb);
                }
            }
        }
        debug!(initial, cost, accepted, "hill climb finished");

        let mut state = FairnessState::new(roster);
        let mut schedule = Vec::with_capacity(dates.len());
        for (date, day) in dates.iter().zip(&days) {
            state.begin_date();
            let mut assignment = Assignment::new(*date);
            for (idx, role) in day.iter().enumerate() {
                state.counters_mut()[idx].lifetime.bump(*role);
                assignment.team_mut(*role).push(roster.people[idx].clone());
            }
            schedule.push(assignment);
        }

        Generated {
            schedule,
            state,
            cost,
        }
    }
}
