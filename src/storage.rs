use crate::model::{Assignment, Schedule};
use anyhow::Context;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Résultat d'une insertion « si absent ».
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InsertOutcome {
    pub inserted: usize,
    pub skipped: usize,
}

pub trait ScheduleStore {
    /// Charge le planning stocké, trié par date (vide si rien n'est stocké).
    fn load(&self) -> anyhow::Result<Schedule>;
    /// Insère les escalas dont la date n'est pas encore stockée ; les autres
    /// sont ignorées, jamais écrasées.
    fn insert_if_absent(&self, records: &[Assignment]) -> anyhow::Result<InsertOutcome>;
}

/// Stockage fichier JSON (tableau d'enregistrements par date).
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Sauvegarde de manière atomique.
    fn save(&self, schedule: &[Assignment]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(schedule)?;
        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

impl ScheduleStore for JsonStorage {
    fn load(&self) -> anyhow::Result<Schedule> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let mut schedule: Schedule = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        schedule.sort_by_key(|a| a.date);
        Ok(schedule)
    }

    fn insert_if_absent(&self, records: &[Assignment]) -> anyhow::Result<InsertOutcome> {
        let mut by_date: BTreeMap<NaiveDate, Assignment> =
            self.load()?.into_iter().map(|a| (a.date, a)).collect();

        let mut outcome = InsertOutcome::default();
        for record in records {
            if by_date.contains_key(&record.date) {
                outcome.skipped += 1;
                continue;
            }
            by_date.insert(record.date, record.clone());
            outcome.inserted += 1;
        }

        if outcome.inserted > 0 {
            let merged: Vec<Assignment> = by_date.into_values().collect();
            self.save(&merged)?;
        }
        debug!(
            inserted = outcome.inserted,
            skipped = outcome.skipped,
            path = %self.path.display(),
            "insert if absent"
        );
        Ok(outcome)
    }
}
