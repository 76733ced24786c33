use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use log::warn;
use uuid::Uuid;

use proposal_engine::io::csv_export::export_schedule_csv;
use proposal_engine::io::file::{load_proposal, load_work_breakdown, save_proposal};
use proposal_engine::io::wbs_csv::import_work_breakdown;
use proposal_engine::model::{NarrativeSections, Proposal, ProposalParams, WorkBreakdown};
use proposal_engine::source::{resolve_phases, FormalBreakdown};

#[derive(Parser)]
#[command(
    name = "proposal-engine",
    version,
    about = "Price and schedule project proposals from a work breakdown"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a proposal from a work-breakdown file (.csv or .json)
    Generate {
        /// Work-breakdown file
        wbs: PathBuf,
        /// Hourly rate in minor currency units (centavos)
        #[arg(long)]
        rate: i64,
        /// First day of work (YYYY-MM-DD); defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Fixed delivery date; omit for an open-ended schedule
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Hours of project work per working day
        #[arg(long, default_value_t = 8.0)]
        hours_per_day: f64,
        /// Where to write the proposal JSON; defaults to the platform data dir
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also export the schedule as semicolon-delimited CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Re-price a saved proposal at a new hourly rate (keeps the version)
    Rate {
        /// Proposal JSON written by `generate`
        proposal: PathBuf,
        /// New hourly rate in minor currency units (centavos)
        #[arg(long)]
        rate: i64,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Generate {
            wbs,
            rate,
            start,
            end,
            hours_per_day,
            out,
            csv,
        } => generate(&wbs, rate, start, end, hours_per_day, out, csv),
        Command::Rate { proposal, rate } => reprice(&proposal, rate),
    }
}

fn generate(
    wbs_path: &Path,
    rate: i64,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    hours_per_day: f64,
    out: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<(), String> {
    // A document that fails to load declines in the source chain; the
    // default phase set still produces a usable proposal.
    let formal = match load_breakdown(wbs_path) {
        Ok(breakdown) => breakdown,
        Err(err) => {
            warn!("could not load '{}': {}", wbs_path.display(), err);
            WorkBreakdown::default()
        }
    };
    let (breakdown, origin) = resolve_phases(&[&FormalBreakdown(formal)]);

    // The clock is read here, at the boundary; the engine only ever sees
    // explicit dates.
    let start_date = start.unwrap_or_else(|| Local::now().date_naive());
    let params = ProposalParams {
        hourly_rate_cents: rate,
        start_date,
        end_date: end,
        hours_per_day,
    };

    let proposal = Proposal::generate(
        Uuid::new_v4(),
        &breakdown,
        origin,
        &params,
        NarrativeSections::default(),
        None,
        Utc::now(),
    )
    .map_err(|e| e.to_string())?;

    print_summary(&proposal);

    let out_path = out.unwrap_or_else(default_out_path);
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    save_proposal(&proposal, &out_path)?;
    println!("Saved proposal to {}", out_path.display());

    if let Some(csv_path) = csv {
        let written = export_schedule_csv(&proposal.schedule, &csv_path)?;
        println!("Exported {} phases to {}", written, csv_path.display());
    }

    Ok(())
}

fn reprice(path: &Path, rate: i64) -> Result<(), String> {
    let proposal = load_proposal(path)?;
    let repriced = proposal.with_rate(rate).map_err(|e| e.to_string())?;
    save_proposal(&repriced, path)?;
    println!(
        "Proposal v{} repriced at {}/h, new total {}",
        repriced.version,
        format_brl(rate),
        format_brl(repriced.investment.total_value_cents),
    );
    Ok(())
}

/// Pick the loader from the file extension: JSON for `.json`, CSV
/// otherwise.
fn load_breakdown(path: &Path) -> Result<WorkBreakdown, String> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_work_breakdown(path),
        _ => {
            let (breakdown, skipped) = import_work_breakdown(path)?;
            if skipped > 0 {
                warn!("{} rows skipped while importing the work breakdown", skipped);
            }
            Ok(breakdown)
        }
    }
}

fn default_out_path() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "ProposalEngine") {
        proj_dirs.data_dir().join("proposal.json")
    } else {
        // Fallback
        PathBuf::from("proposal.json")
    }
}

fn print_summary(proposal: &Proposal) {
    println!(
        "Proposal v{}: {} phases, {} h, {} at {}/h",
        proposal.version,
        proposal.investment.phases.len(),
        proposal.investment.total_hours,
        format_brl(proposal.investment.total_value_cents),
        format_brl(proposal.investment.hourly_rate_cents),
    );
    for (phase, slot) in proposal
        .investment
        .phases
        .iter()
        .zip(&proposal.schedule.phases)
    {
        println!(
            "  {:<28} {} – {}  {:>3} wd  {:>6} h  {}",
            phase.name,
            slot.start_date.format("%d/%m/%Y"),
            slot.end_date.format("%d/%m/%Y"),
            slot.working_days,
            phase.hours,
            format_brl(phase.value_cents),
        );
    }
}

/// Format minor currency units as "R$ 1.234,56".
fn format_brl(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let mut reais = (abs / 100).to_string();
    let centavos = abs % 100;

    let mut grouped = String::new();
    while reais.len() > 3 {
        let split = reais.len() - 3;
        grouped = format!(".{}{}", &reais[split..], grouped);
        reais.truncate(split);
    }
    format!("{sign}R$ {reais}{grouped},{centavos:02}")
}
