use super::state::RoleCounts;
use super::SchedError;
use crate::model::{PersonId, Quotas, Role, Roster};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Refuse toute configuration incohérente avant de toucher à l'état.
pub(super) fn validate_roster(roster: &Roster, quotas: &Quotas) -> Result<(), SchedError> {
    if roster.is_empty() {
        return Err(SchedError::EmptyRoster);
    }
    if let Some(dup) = roster.first_duplicate() {
        return Err(SchedError::DuplicatePerson(dup.as_str().to_string()));
    }
    for role in Role::ALL {
        let quota = quotas.get(role);
        if quota > roster.len() {
            return Err(SchedError::QuotaExceedsRoster {
                role,
                quota,
                roster: roster.len(),
            });
        }
    }
    if quotas.total() != roster.len() {
        return Err(SchedError::QuotaMismatch {
            roster: roster.len(),
            quotas: quotas.total(),
        });
    }
    Ok(())
}

/// Les dates doivent être non décroissantes ; on ne retrie jamais.
pub(super) fn validate_dates(dates: &[NaiveDate]) -> Result<(), SchedError> {
    match dates.windows(2).position(|w| w[1] < w[0]) {
        Some(pos) => Err(SchedError::DatesOutOfOrder {
            index: pos + 1,
            previous: dates[pos],
            current: dates[pos + 1],
        }),
        None => Ok(()),
    }
}

/// Coût global : somme, sur les rôles, des écarts quadratiques à la moyenne.
pub(crate) fn variance_cost(counts: &[RoleCounts]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let n = counts.len() as f64;
    Role::ALL
        .into_iter()
        .map(|role| {
            let mean = counts.iter().map(|c| f64::from(c.get(role))).sum::<f64>() / n;
            counts
                .iter()
                .map(|c| (f64::from(c.get(role)) - mean).powi(2))
                .sum::<f64>()
        })
        .sum()
}

pub(super) fn index_of(roster: &Roster) -> HashMap<&PersonId, usize> {
    roster.iter().enumerate().map(|(i, p)| (p, i)).collect()
}
