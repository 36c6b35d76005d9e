use crate::model::{Assignment, PersonId, Role};
use crate::view;
use anyhow::{bail, Result};
use chrono::{Duration, NaiveDate};

/// Représente un rappel généré pour une personne.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub person: PersonId,
    pub date: NaiveDate,
    pub role: Role,
    pub notice_at: NaiveDate,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, WhatsApp, etc.).
pub trait ReminderRenderer {
    fn render(
        &self,
        person: &PersonId,
        assignment: &Assignment,
        role: Role,
        today: NaiveDate,
    ) -> String;
}

/// Gabarit texte simple, en portugais comme le reste de l'escala.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReminder;

impl ReminderRenderer for TextReminder {
    fn render(
        &self,
        person: &PersonId,
        assignment: &Assignment,
        role: Role,
        today: NaiveDate,
    ) -> String {
        let task = match role {
            Role::Food => "levar a comida",
            Role::Drink => "levar a bebida",
            Role::Free => "descansar (folga)",
        };
        format!(
            "Olá {name},\n\nNa sexta {date} você está escalado(a) para {task}.\n{label}.\n",
            name = person,
            date = view::format_date_pt(assignment.date),
            label = view::days_label(view::days_until(assignment.date, today)),
        )
    }
}

/// Prépare un rappel pour la prochaine escala d'une personne.
pub fn prepare_reminder(
    schedule: &[Assignment],
    person: &PersonId,
    days_before: i64,
    today: NaiveDate,
    renderer: &dyn ReminderRenderer,
) -> Result<Reminder> {
    if days_before < 0 {
        bail!("days_before must be positive");
    }

    let Some((assignment, role)) = schedule
        .iter()
        .filter(|a| a.date >= today)
        .filter_map(|a| a.role_of(person).map(|role| (a, role)))
        .min_by_key(|(a, _)| a.date)
    else {
        bail!("no upcoming assignment found for {person}");
    };

    let notice_at = assignment.date - Duration::days(days_before);
    let content = renderer.render(person, assignment, role, today);
    Ok(Reminder {
        person: person.clone(),
        date: assignment.date,
        role,
        notice_at,
        content,
    })
}
