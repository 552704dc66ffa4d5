//! Holiday Planner - Main entry point
//!
//! Runs the interactive planner, or one of the non-interactive commands
//! that print catalogs, quotes and itineraries.

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use holiday_planner::app::App;
use holiday_planner::catalog::{CatalogProvider, CatalogQuery, FixtureCatalog};
use holiday_planner::cli::{Cli, Commands};
use holiday_planner::{
    CascadePolicy, Currency, PlannerConfig, PlannerSession, RequestPatch, Step, TripPlan,
    TripRequest,
};

/// Initialize tracing.
///
/// Logs go to `log_file` when given. Otherwise the interactive planner
/// discards them so they cannot corrupt the terminal, and the other
/// commands write to stderr.
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None if interactive => BoxMakeWriter::new(std::io::sink),
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(log_file.is_none() && !interactive),
        )
        .init();
    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let interactive = matches!(cli.command, None | Some(Commands::Plan { .. }));
    init_tracing(cli.log_file.as_deref(), interactive)?;
    info!("Holiday planner starting up");

    let config = match &cli.config {
        Some(path) => PlannerConfig::load_from_file(path)?,
        None => PlannerConfig::default(),
    };
    let currency = config.resolve_currency(cli.currency);
    debug!(%currency, "Configuration loaded");

    match cli.command {
        None => run_planner(&config, currency, None, None, None, None),
        Some(Commands::Plan {
            request,
            destination,
            budget,
            save,
        }) => run_planner(&config, currency, request, destination, budget, save),
        Some(Commands::Catalog {
            destination,
            step,
            budget,
            duration,
            types,
            max_price,
            min_rating,
            sort,
            json,
        }) => {
            let mut request = config.default_request(Local::now().date_naive());
            request = request.apply(
                RequestPatch {
                    destination: Some(destination),
                    budget,
                    duration_days: duration,
                    ..RequestPatch::default()
                }
                .into(),
            );
            let mut query = CatalogQuery::default().with_types(types).sorted_by(sort);
            if let Some(max) = max_price {
                query = query.with_max_price(max);
            }
            if let Some(min) = min_rating {
                query = query.with_min_rating(min);
            }
            print_catalog(&config.catalog()?, &request, step, &query, currency, json)
        }
        Some(Commands::Quote {
            request,
            activities,
            accommodation,
            transportation,
            json,
        }) => {
            let mut session = new_session(&config, TripRequest::load_from_file(&request)?)?;
            for (step, ids) in [
                (Step::Activities, activities),
                (Step::Accommodation, accommodation),
                (Step::Transportation, transportation),
            ] {
                for id in ids {
                    if !session.catalogs().contains(step, &id) {
                        anyhow::bail!(
                            "No {} item '{}' for {}",
                            step,
                            id,
                            session.request().destination
                        );
                    }
                    session.toggle(step, &id);
                }
            }

            let summary = session.cost_summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for line in summary.render(currency) {
                    println!("{}", line);
                }
            }
            Ok(())
        }
        Some(Commands::Itinerary { request, json }) => {
            let session = new_session(&config, TripRequest::load_from_file(&request)?)?;
            let days = session.itinerary();
            if json {
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else {
                for (i, day) in days.iter().enumerate() {
                    println!("Day {:>2}  {}  {}", i + 1, day.date, day.summary());
                }
            }
            Ok(())
        }
        Some(Commands::Validate { request }) => {
            info!("Validating trip request file: {:?}", request);
            match TripRequest::load_from_file(&request).and_then(|r| r.validate().map(|_| r)) {
                Ok(r) => {
                    println!(
                        "✓ Trip request is valid: {} from {} to {}",
                        r.destination, r.start_date, r.end_date
                    );
                    Ok(())
                }
                Err(e) => {
                    error!("Trip request validation failed: {:#}", e);
                    eprintln!("✗ Trip request validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn new_session(config: &PlannerConfig, request: TripRequest) -> Result<PlannerSession> {
    let catalog = config.catalog()?;
    Ok(PlannerSession::new(Box::new(catalog), request)
        .with_policy(CascadePolicy::new(config.refresh)))
}

fn print_catalog(
    catalog: &FixtureCatalog,
    request: &TripRequest,
    step: Option<Step>,
    query: &CatalogQuery,
    currency: Currency,
    json: bool,
) -> Result<()> {
    let steps: Vec<Step> = match step {
        Some(step) => vec![step],
        None => vec![Step::Activities, Step::Accommodation, Step::Transportation],
    };

    let mut out = serde_json::Map::new();
    for step in steps {
        let rows: Vec<(serde_json::Value, String)> = match step {
            Step::Activities => query
                .apply(catalog.activities(request))
                .into_iter()
                .map(|a| {
                    let line = format!(
                        "{:<14} {:<34} {:<12} ★{:.1} {:>9}  {}",
                        a.id,
                        a.name,
                        a.kind,
                        a.rating,
                        currency.format_amount(a.price),
                        a.duration
                    );
                    (serde_json::to_value(&a).unwrap_or_default(), line)
                })
                .collect(),
            Step::Accommodation => query
                .apply(catalog.accommodation(request))
                .into_iter()
                .map(|a| {
                    let line = format!(
                        "{:<14} {:<34} {:<12} ★{:.1} {:>9}  {}/night",
                        a.id,
                        a.name,
                        a.kind,
                        a.rating,
                        currency.format_amount(a.price_per_night * f64::from(a.total_nights)),
                        currency.format_amount(a.price_per_night)
                    );
                    (serde_json::to_value(&a).unwrap_or_default(), line)
                })
                .collect(),
            Step::Transportation => query
                .apply(catalog.transport_catalog(request))
                .into_iter()
                .map(|t| {
                    let line = format!(
                        "{:<20} {:<34} {:<15} {:<10} {:>9}  {} to {}",
                        t.id,
                        t.name,
                        t.kind.as_str(),
                        t.segment.as_deref().unwrap_or("route"),
                        currency.format_amount(t.price),
                        t.from,
                        t.to
                    );
                    (serde_json::to_value(&t).unwrap_or_default(), line)
                })
                .collect(),
        };

        let journey = match step {
            Step::Transportation => catalog.journey_segments(request),
            _ => Vec::new(),
        };

        if json {
            out.insert(
                step.to_string(),
                serde_json::Value::Array(rows.into_iter().map(|(v, _)| v).collect()),
            );
            if !journey.is_empty() {
                out.insert("journeySegments".into(), serde_json::to_value(&journey)?);
            }
        } else {
            println!("{} ({})", step.label(), rows.len());
            for segment in &journey {
                println!("  [{}] {}: {}", segment.id, segment.title, segment.route);
            }
            for (_, line) in rows {
                println!("  {}", line);
            }
            println!();
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}

/// Run the interactive planner
fn run_planner(
    config: &PlannerConfig,
    currency: Currency,
    request_file: Option<PathBuf>,
    destination: Option<String>,
    budget: Option<f64>,
    save: Option<PathBuf>,
) -> Result<()> {
    let base = match request_file {
        Some(path) => TripRequest::load_from_file(&path)?,
        None => config.default_request(Local::now().date_naive()),
    };
    let request = base.apply(
        RequestPatch {
            destination,
            budget,
            ..RequestPatch::default()
        }
        .into(),
    );
    let session = new_session(config, request)?;
    let app = App::new(session, currency, save.clone());

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode().context("Failed to enable raw mode")?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = app.run(&mut terminal);

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    match result? {
        Some(plan) => print_finished_plan(&plan, currency, save.as_deref()),
        None => info!("Planner closed without finishing"),
    }
    Ok(())
}

fn print_finished_plan(plan: &TripPlan, currency: Currency, saved_to: Option<&Path>) {
    println!("Trip to {} ({})", plan.request.destination, plan.theme);
    println!(
        "{} to {}, {} traveller(s)",
        plan.request.start_date,
        plan.request.end_date,
        plan.request.travellers()
    );
    for line in plan.summary.render(currency) {
        println!("  {}", line);
    }
    if let Some(path) = saved_to
        && path.exists()
    {
        println!("Plan saved to {}", path.display());
    }
}
