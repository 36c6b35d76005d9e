#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use escala::{
    calendar::{self, MonthKey},
    io,
    model::{PersonId, Roster},
    notification::{prepare_reminder, TextReminder},
    scheduler::{balance_report, EngineConfig, Scheduler, StrategyKind},
    storage::{JsonStorage, ScheduleStore},
    view,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'escala hebdomadaire équitable (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du planning stocké
    #[arg(long, global = true, default_value = "schedule.json")]
    store: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(clap::Args, Debug)]
struct RosterArgs {
    /// CSV avec un header `name`
    #[arg(long)]
    roster_csv: Option<String>,
    /// liste "nom1,nom2,..."
    #[arg(long)]
    people: Option<String>,
}

impl RosterArgs {
    fn load(&self) -> Result<Roster> {
        match (&self.roster_csv, &self.people) {
            (Some(path), _) => io::import_roster_csv(path),
            (None, Some(list)) => Ok(io::parse_people_list(list)),
            (None, None) => bail!("either --roster-csv or --people is required"),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lister les dates hebdomadaires d'une période
    Dates {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long, default_value = "fri")]
        weekday: String,
    },

    /// Générer le planning (seulement si le stockage est vide, sauf --force)
    Generate {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long, default_value = "fri")]
        weekday: String,
        #[command(flatten)]
        roster: RosterArgs,
        /// Graine de l'aléa (aléatoire si absente)
        #[arg(long)]
        seed: Option<u64>,
        /// deficit | hill-climb
        #[arg(long)]
        strategy: Option<StrategyKind>,
        #[arg(long)]
        iterations: Option<u32>,
        /// Configuration JSON du moteur
        #[arg(long)]
        config: Option<String>,
        #[arg(long)]
        food: Option<usize>,
        #[arg(long)]
        drink: Option<usize>,
        #[arg(long)]
        free: Option<usize>,
        /// Complète les dates manquantes même si un planning existe
        #[arg(long)]
        force: bool,
    },

    /// Lister et optionnellement exporter
    List {
        /// YYYY-MM
        #[arg(long)]
        month: Option<MonthKey>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        person: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Afficher l'escala en vigueur
    Current {
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Générer un rappel texte pour une personne
    Notify {
        #[arg(long)]
        person: String,
        #[arg(long, default_value_t = 1)]
        days_before: i64,
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },

    /// Vérifier la validité et l'équilibre du planning stocké
    Check {
        #[command(flatten)]
        roster: RosterArgs,
        #[arg(long)]
        config: Option<String>,
    },
}

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::load_from_file(p),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.store)?;
    let today = || Local::now().date_naive();

    let code = match cli.cmd {
        Commands::Dates {
            start,
            end,
            weekday,
        } => {
            let weekday = calendar::parse_weekday(&weekday)?;
            for d in calendar::weekly_dates(start, end, weekday)? {
                println!("{d}");
            }
            0
        }
        Commands::Generate {
            start,
            end,
            weekday,
            roster,
            seed,
            strategy,
            iterations,
            config,
            food,
            drink,
            free,
            force,
        } => {
            let existing = storage.load()?;
            if !existing.is_empty() && !force {
                println!(
                    "Schedule already stored ({} dates), nothing generated",
                    existing.len()
                );
                return Ok(());
            }

            let mut config = load_config(config.as_deref())?;
            if let Some(kind) = strategy {
                config.strategy = kind;
            }
            if let Some(n) = iterations {
                config.hill_climb.iterations = n;
            }
            config.quotas.food = food.unwrap_or(config.quotas.food);
            config.quotas.drink = drink.unwrap_or(config.quotas.drink);
            config.quotas.free = free.unwrap_or(config.quotas.free);

            let roster = roster.load()?;
            let weekday = calendar::parse_weekday(&weekday)?;
            let dates = calendar::weekly_dates(start, end, weekday)?;
            let seed = seed.unwrap_or_else(rand::random);

            let scheduler = Scheduler::new(config)?;
            let generated = scheduler.generate(&roster, &dates, seed)?;
            let outcome = storage.insert_if_absent(&generated.schedule)?;
            println!(
                "Generated {} dates (seed {seed}, cost {:.2}): {} inserted, {} skipped",
                generated.schedule.len(),
                generated.cost,
                outcome.inserted,
                outcome.skipped
            );
            0
        }
        Commands::List {
            month,
            date,
            person,
            out_json,
            out_csv,
        } => {
            let schedule = storage.load()?;
            let mut selected: Vec<_> = match (month, date) {
                (Some(m), _) => view::filter_by_month(&schedule, m),
                (None, Some(d)) => view::filter_by_date(&schedule, d),
                (None, None) => schedule.iter().collect(),
            };
            if let Some(name) = &person {
                let pid = PersonId::new(name);
                selected.retain(|a| a.contains(&pid));
            }
            let selected: Vec<_> = selected.into_iter().cloned().collect();

            if let Some(path) = out_json {
                io::export_schedule_json(path, &selected)?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &selected)?;
            }
            if selected.is_empty() {
                println!("Nenhuma escala encontrada para o período selecionado.");
            }
            for a in &selected {
                print!("{}", view::render_card(a, today()));
            }
            0
        }
        Commands::Current { today: at } => {
            let schedule = storage.load()?;
            let at = at.unwrap_or_else(today);
            match view::current_assignment(&schedule, at) {
                Some(a) => print!("{}", view::render_card(a, at)),
                None => println!("Nenhuma escala vigente."),
            }
            0
        }
        Commands::Notify {
            person,
            days_before,
            today: at,
            out,
        } => {
            let schedule = storage.load()?;
            let at = at.unwrap_or_else(today);
            let reminder = prepare_reminder(
                &schedule,
                &PersonId::new(&person),
                days_before,
                at,
                &TextReminder,
            )?;
            std::fs::write(&out, &reminder.content).with_context(|| format!("writing {out}"))?;
            println!(
                "Reminder generated for {} ({} on {}) at {}",
                reminder.person, reminder.role, reminder.date, reminder.notice_at
            );
            0
        }
        Commands::Check { roster, config } => {
            let config = load_config(config.as_deref())?;
            let roster = roster.load()?;
            let schedule = storage.load()?;
            let scheduler = Scheduler::new(config)?;

            let violations = scheduler.detect_violations(&schedule, &roster);
            let report = balance_report(&schedule, &roster);
            for (person, counts) in &report.people {
                println!(
                    "{person}: food={} drink={} free={}",
                    counts.food, counts.drink, counts.free
                );
            }
            println!(
                "spread: food={} drink={} free={} (cost {:.2})",
                report.spread.food, report.spread.drink, report.spread.free, report.cost
            );

            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                for v in &violations {
                    let who = v.person.as_ref().map(PersonId::as_str).unwrap_or("-");
                    eprintln!("{} | {} | {}", v.date, who, v.kind.as_str());
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}
