mod audit;
mod deficit;
mod hill_climb;
mod state;
mod types;
mod util;

pub use audit::{balance_report, detect_violations, BalanceReport, Violation, ViolationKind};
pub use deficit::DeficitPriority;
pub use hill_climb::HillClimb;
pub use state::{FairnessState, PersonCounters, RoleCounts};
pub use types::{EngineConfig, HillClimbOptions, SchedError, StrategyKind, Tuning};

use crate::model::{Assignment, Quotas, Roster, Schedule};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Résultat d'un run : le planning, l'état final (diagnostic) et le coût
/// global de variance.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub schedule: Schedule,
    pub state: FairnessState,
    pub cost: f64,
}

/// Stratégie d'équité interchangeable derrière un même contrat.
pub trait FairnessStrategy {
    fn name(&self) -> &'static str;

    /// Exécute la stratégie sur des entrées déjà validées.
    fn run<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        dates: &[NaiveDate],
        quotas: &Quotas,
        rng: &mut R,
    ) -> Generated;

    /// Valide roster, quotas et ordre des dates, puis exécute.
    /// Échoue en bloc : aucun planning partiel.
    fn generate<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        dates: &[NaiveDate],
        quotas: &Quotas,
        rng: &mut R,
    ) -> Result<Generated, SchedError> {
        util::validate_roster(roster, quotas)?;
        util::validate_dates(dates)?;
        Ok(self.run(roster, dates, quotas, rng))
    }
}

/// Scheduler : encapsule une configuration validée du moteur
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: EngineConfig,
}

impl Scheduler {
    pub fn new(config: EngineConfig) -> Result<Self, SchedError> {
        config.tuning.validate()?;
        Ok(Self { config })
    }

    /// Génère avec un `StdRng` initialisé sur `seed` (reproductible).
    pub fn generate(
        &self,
        roster: &Roster,
        dates: &[NaiveDate],
        seed: u64,
    ) -> Result<Generated, SchedError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with_rng(roster, dates, &mut rng)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        dates: &[NaiveDate],
        rng: &mut R,
    ) -> Result<Generated, SchedError> {
        let quotas = &self.config.quotas;
        let generated = match self.config.strategy {
            StrategyKind::DeficitPriority => {
                let strategy = DeficitPriority::new(self.config.tuning);
                info!(
                    strategy = strategy.name(),
                    people = roster.len(),
                    dates = dates.len(),
                    "generating schedule"
                );
                strategy.generate(roster, dates, quotas, rng)?
            }
            StrategyKind::HillClimb => {
                let strategy = HillClimb::new(self.config.hill_climb);
                info!(
                    strategy = strategy.name(),
                    people = roster.len(),
                    dates = dates.len(),
                    "generating schedule"
                );
                strategy.generate(roster, dates, quotas, rng)?
            }
        };
        info!(cost = generated.cost, "schedule generated");
        Ok(generated)
    }

    pub fn detect_violations(&self, schedule: &[Assignment], roster: &Roster) -> Vec<Violation> {
        audit::detect_violations(schedule, roster, &self.config.quotas)
    }
}
