//! Filtres et rendu texte d'un planning (côté présentation).

use crate::calendar::MonthKey;
use crate::model::{Assignment, PersonId, Role};
use chrono::{Datelike, NaiveDate};

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

pub fn filter_by_month(schedule: &[Assignment], month: MonthKey) -> Vec<&Assignment> {
    schedule
        .iter()
        .filter(|a| MonthKey::of(a.date) == month)
        .collect()
}

pub fn filter_by_date(schedule: &[Assignment], date: NaiveDate) -> Vec<&Assignment> {
    schedule.iter().filter(|a| a.date == date).collect()
}

/// Mois distincts, dans l'ordre de première apparition.
pub fn months(schedule: &[Assignment]) -> Vec<MonthKey> {
    let mut out: Vec<MonthKey> = Vec::new();
    for a in schedule {
        let key = MonthKey::of(a.date);
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

/// Escala en vigueur : la première datée d'aujourd'hui ou plus tard.
pub fn current_assignment(schedule: &[Assignment], today: NaiveDate) -> Option<&Assignment> {
    schedule
        .iter()
        .filter(|a| a.date >= today)
        .min_by_key(|a| a.date)
}

pub fn person_history(schedule: &[Assignment], person: &PersonId) -> Vec<(NaiveDate, Role)> {
    schedule
        .iter()
        .filter_map(|a| a.role_of(person).map(|role| (a.date, role)))
        .collect()
}

pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

pub fn days_label(days: i64) -> String {
    match days {
        0 => "Hoje é o dia!".to_string(),
        1 => "Falta 1 dia".to_string(),
        d if d > 1 => format!("Faltam {d} dias"),
        -1 => "Foi ontem".to_string(),
        d => format!("Há {} dias", d.abs()),
    }
}

/// "20 de fevereiro"
pub fn format_date_pt(date: NaiveDate) -> String {
    format!("{} de {}", date.day(), MONTHS_PT[date.month0() as usize])
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Food => "Comida",
        Role::Drink => "Bebida",
        Role::Free => "Folga",
    }
}

/// Carte texte d'une date : en-tête, compte à rebours, puis les trois équipes.
pub fn render_card(assignment: &Assignment, today: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})\n",
        format_date_pt(assignment.date),
        days_label(days_until(assignment.date, today))
    ));
    for role in Role::ALL {
        let team = assignment.team(role);
        let names: Vec<&str> = team.iter().map(PersonId::as_str).collect();
        out.push_str(&format!(
            "  {} ({}): {}\n",
            role_label(role),
            team.len(),
            names.join(", ")
        ));
    }
    out
}
