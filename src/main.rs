use analytics::{DEBT_TO_GDP, ForecastOutcome};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{Config, LogFormat};
use core_types::Metric;
use engine::Snapshot;
use serde::Serialize;
use std::path::PathBuf;

mod render;

/// The main entry point for the DebtPulse fiscal analytics engine.
fn main() -> Result<()> {
    // Optional .env file with DEBTPULSE__* overrides
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let cache = engine::from_config(&config)?;
    // A fiscal source failure stops here, before anything is printed.
    let snapshot = cache
        .get_or_load()
        .context("Failed to build the fiscal snapshot")?;

    if snapshot.uses_fallback_scores() {
        tracing::warn!("Rescue scores are synthetic fallback values, not source data.");
    }

    match cli.command {
        Commands::Scores(args) => handle_scores(&snapshot, &config, args, cli.json),
        Commands::DebtRatio(args) => handle_debt_ratio(&snapshot, &config, args, cli.json),
        Commands::Forecast(args) => handle_forecast(&snapshot, args, cli.json),
        Commands::Overview => handle_overview(&snapshot, &config, cli.json),
        Commands::Countries => handle_countries(&snapshot, cli.json),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sovereign debt risk tiers, Debt-to-GDP ratios and 2025-2030 trend projections.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./debtpulse.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    /// Override the configured console log format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank countries by rescue score with their debt distress tier.
    Scores(ScoresArgs),
    /// List Debt-to-GDP observations within a year window.
    DebtRatio(DebtRatioArgs),
    /// Project a metric for one country over 2025-2030.
    Forecast(ForecastArgs),
    /// Regional key indicators and data availability per country.
    Overview,
    /// List the countries present in the fiscal source.
    Countries,
}

#[derive(Parser)]
struct ScoresArgs {
    /// How many countries to show (defaults to `overview.top_n`).
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Parser)]
struct DebtRatioArgs {
    /// Restrict to a single country.
    #[arg(long)]
    country: Option<String>,

    /// First year to include (defaults to `overview.recent_from`).
    #[arg(long)]
    from: Option<i32>,

    /// Last year to include (defaults to `overview.recent_to`).
    #[arg(long)]
    to: Option<i32>,
}

#[derive(Parser)]
struct ForecastArgs {
    /// Country to project, as spelled in the fiscal source (e.g. "Nigeria").
    #[arg(long)]
    country: String,

    /// Metric to project: "Inflation Rate", "Government Debt", "Nominal GDP" or "Debt_to_GDP".
    #[arg(long, default_value = "Inflation Rate")]
    metric: Metric,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

#[derive(Serialize)]
struct ScoresOutput<'a> {
    is_fallback: bool,
    scores: &'a [core_types::ScoreRecord],
}

fn handle_scores(snapshot: &Snapshot, config: &Config, args: ScoresArgs, json: bool) -> Result<()> {
    let top_n = args.top.unwrap_or(config.overview.top_n);
    let ranked = analytics::top_by_rescue_score(snapshot.scores(), top_n);

    if json {
        return print_json(&ScoresOutput {
            is_fallback: snapshot.uses_fallback_scores(),
            scores: &ranked,
        });
    }

    println!("{}", render::scores_table(&ranked));
    if snapshot.uses_fallback_scores() {
        println!("Note: score source not found; showing built-in fallback scores.");
    }
    Ok(())
}

fn handle_debt_ratio(
    snapshot: &Snapshot,
    config: &Config,
    args: DebtRatioArgs,
    json: bool,
) -> Result<()> {
    if !snapshot.has_debt_to_gdp() {
        anyhow::bail!(
            "Debt-to-GDP is not available: the fiscal source lacks Government Debt or Nominal GDP."
        );
    }

    let from = args.from.unwrap_or(config.overview.recent_from);
    let to = args.to.unwrap_or(config.overview.recent_to);
    let mut observations = analytics::metric_window(snapshot.fiscal(), DEBT_TO_GDP, from, to);
    if let Some(country) = &args.country {
        observations.retain(|o| &o.country == country);
    }

    if json {
        return print_json(&observations);
    }
    println!("{}", render::observations_table(&observations, "Debt to GDP (%)"));
    Ok(())
}

fn handle_forecast(snapshot: &Snapshot, args: ForecastArgs, json: bool) -> Result<()> {
    let outcome = snapshot.forecast(&args.country, args.metric.column());

    if json {
        return print_json(&outcome);
    }

    match &outcome {
        ForecastOutcome::Projected(result) => {
            println!("{}", render::forecast_table(result));
            println!("Trend 2025-2030: {}", result.trend);
        }
        ForecastOutcome::InsufficientData {
            country,
            metric,
            available,
            required,
        } => {
            println!(
                "Insufficient data to forecast {metric} for {country}: \
                 {available} usable years, at least {required} required."
            );
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct OverviewOutput {
    indicator_year: i32,
    average_inflation: Option<f64>,
    scores_are_fallback: bool,
    coverage: Vec<analytics::Coverage>,
}

fn handle_overview(snapshot: &Snapshot, config: &Config, json: bool) -> Result<()> {
    let year = config.overview.indicator_year;
    let overview = OverviewOutput {
        indicator_year: year,
        average_inflation: analytics::mean_for_year(
            snapshot.fiscal(),
            Metric::InflationRate.column(),
            year,
        ),
        scores_are_fallback: snapshot.uses_fallback_scores(),
        coverage: analytics::years_reported(snapshot.fiscal()),
    };

    if json {
        return print_json(&overview);
    }

    match overview.average_inflation {
        Some(avg) => println!("Average regional inflation ({year}): {avg:.1}%"),
        None => println!("Average regional inflation ({year}): no data"),
    }
    println!("{}", render::coverage_table(&overview.coverage));
    Ok(())
}

fn handle_countries(snapshot: &Snapshot, json: bool) -> Result<()> {
    let countries = snapshot.fiscal().countries();
    if json {
        return print_json(&countries);
    }
    for country in countries {
        println!("{country}");
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
