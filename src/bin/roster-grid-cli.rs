#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use roster_grid::{
    config::{load_config_from_file, LayoutConfig},
    filter::{Selection, ShiftFilter},
    io::{self, Normalized},
    layout::layout_window,
    model::ShiftStatus,
    render::{GridRenderer, TextGrid},
    storage::{JsonStorage, Storage},
    summary::Summary,
    ViewMode, ViewWindow,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI du planning de garde : grilles, agrégats, exports
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Instantané JSON du roster (médecins, services, départements, gardes)
    #[arg(long, global = true, default_value = "roster.json")]
    snapshot: String,

    /// Configuration de mise en page (JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Id de service, ou `all`
    #[arg(long)]
    ward: Option<String>,
    /// Id de département, ou `all`
    #[arg(long)]
    department: Option<String>,
    /// Recherche sur le nom du médecin (insensible à la casse)
    #[arg(long, default_value = "")]
    search: String,
}

impl FilterArgs {
    fn to_filter(&self) -> ShiftFilter {
        ShiftFilter {
            ward: Selection::from_arg(self.ward.as_deref()),
            department: Selection::from_arg(self.department.as_deref()),
            search: self.search.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Afficher la grille d'un jour
    Day {
        /// YYYY-MM-DD (défaut : aujourd'hui)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Afficher la semaine (lundi → dimanche) contenant la date
    Week {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Afficher la grille mois contenant la date
    Month {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Agrégats de la fenêtre : total, par statut, médecins distincts
    Summary {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "week")]
        mode: ViewMode,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Exporter la géométrie des créneaux en CSV
    ExportLayout {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "week")]
        mode: ViewMode,
        #[arg(long)]
        out: String,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Importer des gardes depuis un CSV dans l'instantané
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Vérifier la qualité des enregistrements de l'instantané
    Check {
        /// Export JSON du roster normalisé (optionnel)
        #[arg(long)]
        out_json: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let config = match &cli.config {
        Some(path) => load_config_from_file(path)?,
        None => LayoutConfig::default(),
    };
    let storage = JsonStorage::open(&cli.snapshot)?;
    let today = Local::now().date_naive();

    let code = match cli.cmd {
        Commands::Day { date, filter } => {
            let window = window_for(ViewMode::Day, date.unwrap_or(today))?;
            show(&storage, &config, window, &filter)?
        }
        Commands::Week { date, filter } => {
            let window = window_for(ViewMode::Week, date.unwrap_or(today))?;
            show(&storage, &config, window, &filter)?
        }
        Commands::Month { date, filter } => {
            let window = window_for(ViewMode::Month, date.unwrap_or(today))?;
            show(&storage, &config, window, &filter)?
        }
        Commands::Summary { date, mode, filter } => {
            let window = window_for(mode, date.unwrap_or(today))?;
            let normalized = load(&storage, &config)?;
            let roster = &normalized.roster;
            let visible = roster.shifts.iter().filter(|s| window.contains(s.date));
            let outcome = filter.to_filter().apply(roster, visible);
            let summary = Summary::from_shifts(outcome.shifts.iter().copied());
            println!("{window}");
            println!("total: {}", summary.total);
            for status in ShiftStatus::ALL {
                println!("{}: {}", status.as_str().to_lowercase(), summary.count(status));
            }
            println!("doctors: {}", summary.distinct_doctors);
            warn_unresolved(&outcome.unresolved, outcome.excluded_unresolved);
            exit_code(&normalized, outcome.has_warnings())
        }
        Commands::ExportLayout {
            date,
            mode,
            out,
            filter,
        } => {
            let window = window_for(mode, date.unwrap_or(today))?;
            let normalized = load(&storage, &config)?;
            let roster = &normalized.roster;
            let outcome = filter.to_filter().apply(roster, &roster.shifts);
            let layout = layout_window(&window, &outcome.shifts, &config);
            let rows = io::export_layout_csv(&out, &layout)?;
            println!("{rows} slot(s) written to {out}");
            warn_unresolved(&outcome.unresolved, outcome.excluded_unresolved);
            exit_code(&normalized, outcome.has_warnings())
        }
        Commands::ImportShifts { csv } => {
            let records = io::import_shifts_csv(&csv)?;
            let added = records.len();
            let snapshot = storage.append_shifts(records)?;
            println!("{added} record(s) imported into {}", storage.path().display());
            let normalized = io::normalize(&snapshot, &config);
            report_rejected(&normalized);
            exit_code(&normalized, false)
        }
        Commands::Check { out_json } => {
            let normalized = load(&storage, &config)?;
            if let Some(path) = out_json {
                io::export_roster_json(path, &normalized.roster)?;
            }
            if normalized.rejected.is_empty() {
                println!("OK: {} shift(s), no rejected record", normalized.roster.shifts.len());
            }
            exit_code(&normalized, false)
        }
    };

    std::process::exit(code);
}

fn window_for(mode: ViewMode, date: NaiveDate) -> Result<ViewWindow> {
    ViewWindow::containing(mode, date)
        .with_context(|| format!("no {mode} grid around {date}: outside the supported calendar"))
}

fn load(storage: &JsonStorage, config: &LayoutConfig) -> Result<Normalized> {
    let snapshot = storage
        .load()
        .with_context(|| format!("loading snapshot {}", storage.path().display()))?;
    let normalized = io::normalize(&snapshot, config);
    report_rejected(&normalized);
    Ok(normalized)
}

fn show(
    storage: &JsonStorage,
    config: &LayoutConfig,
    window: ViewWindow,
    filter: &FilterArgs,
) -> Result<i32> {
    let normalized = load(storage, config)?;
    let roster = &normalized.roster;
    let outcome = filter.to_filter().apply(roster, &roster.shifts);
    let layout = layout_window(&window, &outcome.shifts, config);
    print!("{}", TextGrid.render(&window, &layout));
    warn_unresolved(&outcome.unresolved, outcome.excluded_unresolved);
    Ok(exit_code(&normalized, outcome.has_warnings()))
}

fn report_rejected(normalized: &Normalized) {
    for r in &normalized.rejected {
        eprintln!(
            "rejected record #{} ({}): {}",
            r.index,
            r.id.as_deref().unwrap_or("-"),
            r.error
        );
    }
}

fn warn_unresolved(unresolved: &[roster_grid::UnresolvedRef], excluded: usize) {
    for r in unresolved {
        eprintln!("warning: {r}");
    }
    if !unresolved.is_empty() {
        eprintln!("warning: {excluded} shift(s) hidden by unresolved filter");
    }
}

// Code 2 = WARNING/INCOMPLETE
fn exit_code(normalized: &Normalized, filter_warnings: bool) -> i32 {
    if normalized.rejected.is_empty() && !filter_warnings {
        0
    } else {
        2
    }
}
