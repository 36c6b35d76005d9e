use crate::model::{Quotas, Role};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

const RESOLUTION_SPAN: i32 = 16;
const RESOLUTION_EPSILON: f64 = 1e-9;

/// Constantes de pondération du score de priorité.
///
/// Seul le comportement qualitatif compte : la faim domine, le déficit corrige,
/// le jitter ne fait que départager les ex-aequo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub hunger_weight: f64,
    pub deficit_weight: f64,
    pub fresh_month_bonus: f64,
    /// Ajouté à la faim de qui n'a eu aucun `Food` sur tout un mois.
    pub month_penalty: u32,
    /// Amplitude max du bruit aléatoire ajouté au score.
    pub jitter: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hunger_weight: 10.0,
            deficit_weight: 5.0,
            fresh_month_bonus: 20.0,
            month_penalty: 50,
            jitter: 1.0,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), SchedError> {
        let weights = [self.hunger_weight, self.deficit_weight, self.fresh_month_bonus];
        if weights.iter().chain([&self.jitter]).any(|w| !w.is_finite() || *w < 0.0) {
            return Err(SchedError::InvalidTuning(
                "weights and jitter must be finite and non-negative",
            ));
        }
        if self.jitter >= self.score_resolution() {
            return Err(SchedError::InvalidTuning(
                "jitter must stay below the smallest achievable score difference",
            ));
        }
        Ok(())
    }

    /// Plus petit écart non nul entre deux scores `Food` :
    /// `|a·hunger + b·deficit + c·bonus|` pour `a, b` entiers bornés et
    /// `c ∈ {-1, 0, 1}`. Infini si tous les poids sont nuls.
    pub fn score_resolution(&self) -> f64 {
        let span = -RESOLUTION_SPAN..=RESOLUTION_SPAN;
        let mut best = f64::INFINITY;
        for a in span.clone() {
            for b in span.clone() {
                for c in -1..=1 {
                    let gap = (f64::from(a) * self.hunger_weight
                        + f64::from(b) * self.deficit_weight
                        + f64::from(c) * self.fresh_month_bonus)
                        .abs();
                    if gap > RESOLUTION_EPSILON && gap < best {
                        best = gap;
                    }
                }
            }
        }
        best
    }
}

/// Options de la recherche locale (hill climbing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimbOptions {
    pub iterations: u32,
}

impl Default for HillClimbOptions {
    fn default() -> Self {
        Self { iterations: 50_000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    DeficitPriority,
    HillClimb,
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deficit" | "deficit-priority" | "greedy" => Ok(StrategyKind::DeficitPriority),
            "hill-climb" | "hillclimb" | "variance" => Ok(StrategyKind::HillClimb),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Configuration complète du moteur
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub quotas: Quotas,
    pub strategy: StrategyKind,
    pub tuning: Tuning,
    pub hill_climb: HillClimbOptions,
}

impl EngineConfig {
    /// Charge une configuration JSON ; les champs absents gardent leur défaut.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: EngineConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.tuning.validate()?;
        Ok(config)
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("roster is empty")]
    EmptyRoster,
    #[error("duplicate person in roster: {0}")]
    DuplicatePerson(String),
    #[error("quotas sum to {quotas} but roster has {roster} people")]
    QuotaMismatch { roster: usize, quotas: usize },
    #[error("quota {quota} for role {role} exceeds roster size {roster}")]
    QuotaExceedsRoster {
        role: Role,
        quota: usize,
        roster: usize,
    },
    #[error("dates out of order at index {index}: {current} comes after {previous}")]
    DatesOutOfOrder {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("invalid tuning: {0}")]
    InvalidTuning(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
