use anyhow::{bail, Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mois calendaire, utilisé pour la remise à zéro mensuelle et les filtres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .with_context(|| format!("expected YYYY-MM, got {s}"))?;
        let year: i32 = y.parse().with_context(|| format!("invalid year in {s}"))?;
        let month: u32 = m.parse().with_context(|| format!("invalid month in {s}"))?;
        if !(1..=12).contains(&month) {
            bail!("month out of range: {month}");
        }
        Ok(Self { year, month })
    }
}

/// Toutes les dates tombant sur `weekday` dans `[start, end]`, à 7 jours d'écart.
pub fn weekly_dates(start: NaiveDate, end: NaiveDate, weekday: Weekday) -> Result<Vec<NaiveDate>> {
    if end < start {
        bail!("end date must be on or after start date");
    }

    let offset = (i64::from(weekday.num_days_from_monday())
        - i64::from(start.weekday().num_days_from_monday()))
    .rem_euclid(7);
    let mut current = start
        .checked_add_signed(Duration::days(offset))
        .context("date overflow")?;

    let mut out = Vec::new();
    while current <= end {
        out.push(current);
        current = current
            .checked_add_signed(Duration::days(7))
            .context("date overflow")?;
    }
    Ok(out)
}

/// Parse un jour de semaine (`fri`, `friday`, `sexta`, `5`...).
pub fn parse_weekday(raw: &str) -> Result<Weekday> {
    let lowered = raw.trim().to_ascii_lowercase();
    let day = match lowered.as_str() {
        "1" | "seg" | "segunda" => Weekday::Mon,
        "2" | "ter" | "terca" => Weekday::Tue,
        "3" | "qua" | "quarta" => Weekday::Wed,
        "4" | "qui" | "quinta" => Weekday::Thu,
        "5" | "sex" | "sexta" => Weekday::Fri,
        "6" | "sab" | "sabado" => Weekday::Sat,
        "7" | "dom" | "domingo" => Weekday::Sun,
        other => other
            .parse::<Weekday>()
            .map_err(|_| anyhow::anyhow!("invalid weekday: {raw}"))?,
    };
    Ok(day)
}
