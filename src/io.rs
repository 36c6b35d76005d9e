use crate::model::{Assignment, PersonId, Role, Roster, Schedule};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Import du roster depuis CSV: header `name`, une personne par ligne.
pub fn import_roster_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Roster> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid roster row {} (empty name)", line + 2);
        }
        out.push(PersonId::new(name));
    }
    Ok(Roster::new(out))
}

/// Liste "a,b,c" telle que passée en ligne de commande.
pub fn parse_people_list(raw: &str) -> Roster {
    Roster::from_names(raw.split(',').map(str::trim).filter(|s| !s.is_empty()))
}

/// Export CSV: header `date,food_team,drink_team,free_team`, membres séparés par `;`.
pub fn write_schedule_csv<W: Write>(writer: W, schedule: &[Assignment]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    w.write_record(["date", "food_team", "drink_team", "free_team"])?;
    for a in schedule {
        let date = a.date.to_string();
        let teams = Role::ALL.map(|role| join_members(a.team(role)));
        w.write_record([
            date.as_str(),
            teams[0].as_str(),
            teams[1].as_str(),
            teams[2].as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &[Assignment]) -> anyhow::Result<()> {
    let file = fs::File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_schedule_csv(file, schedule)
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &[Assignment]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

pub fn import_schedule_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Schedule> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let schedule: Schedule =
        serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(schedule)
}

fn join_members(members: &[PersonId]) -> String {
    members
        .iter()
        .map(PersonId::as_str)
        .collect::<Vec<_>>()
        .join(";")
}
