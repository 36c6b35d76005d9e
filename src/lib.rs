#![forbid(unsafe_code)]
//! Escala — planification hebdomadaire équitable de rôles à quotas fixes (sans BD).
//!
//! - Moteur d'équité : glouton par déficit avec règle mensuelle, ou recherche locale.
//! - Aléa injecté et initialisable : même graine, même planning.
//! - Stockage fichier JSON en « insertion si absent » ; import/export CSV.
//! - Dates calendaires naïves ; le rendu localisé reste en dehors du moteur.

pub mod calendar;
pub mod io;
pub mod model;
pub mod notification;
pub mod scheduler;
pub mod storage;
pub mod view;

pub use calendar::{weekly_dates, MonthKey};
pub use model::{Assignment, PersonId, Quotas, Role, Roster, Schedule};
pub use notification::{prepare_reminder, Reminder, ReminderRenderer, TextReminder};
pub use scheduler::{
    balance_report, detect_violations, BalanceReport, DeficitPriority, EngineConfig,
    FairnessState, FairnessStrategy, Generated, HillClimb, HillClimbOptions, SchedError,
    Scheduler, StrategyKind, Tuning, Violation, ViolationKind,
};
pub use storage::{InsertOutcome, JsonStorage, ScheduleStore};
