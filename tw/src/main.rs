//! TripWeaver - AI-assisted travel itinerary planner
//!
//! CLI entry point: no subcommand launches the interactive TUI, `plan`
//! runs one batch generation and prints the result.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use tripweaver::cli::{Cli, Command, OutputFormat};
use tripweaver::config::Config;
use tripweaver::domain::{BudgetTier, Itinerary, TravelerProfile, TripRequest};
use tripweaver::llm::create_client;
use tripweaver::planner::Planner;
use tripweaver::tui;

/// Set up file-based logging
///
/// Logs go to a file, never stdout: the TUI owns the terminal.
fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripweaver")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = match cli_log_level.map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("tripweaver.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(has_subcommand = cli.command.is_some(), "main: dispatching");
    match cli.command {
        Some(Command::Plan {
            destination,
            days,
            starting_point,
            budget,
            travelers,
            interests,
            format,
        }) => {
            cmd_plan(
                &config,
                destination,
                days,
                starting_point,
                budget,
                travelers,
                interests,
                format,
            )
            .await
        }
        None => cmd_tui(&config).await,
    }
}

/// Launch the interactive TUI
async fn cmd_tui(config: &Config) -> Result<()> {
    config.validate()?;
    let client = create_client(&config.llm)?;
    let planner = Arc::new(Planner::new(client));
    tui::run(planner).await
}

/// Run one batch generation and print the itinerary
#[allow(clippy::too_many_arguments)]
async fn cmd_plan(
    config: &Config,
    destination: String,
    days: u8,
    starting_point: Option<String>,
    budget: BudgetTier,
    travelers: TravelerProfile,
    interests: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    config.validate()?;

    let trip = TripRequest {
        destination,
        starting_point,
        days,
        budget,
        travelers,
        interests,
    };
    // Form-boundary validation: the planner assumes a valid request
    trip.validate()?;

    let client = create_client(&config.llm)?;
    let planner = Planner::new(client);

    eprintln!("{}", format!("Generating a {}-day {} itinerary…", trip.days, trip.destination).dimmed());

    match planner.generate(&trip).await {
        Ok(itinerary) => {
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&itinerary)?);
                }
                OutputFormat::Text => print_itinerary(&itinerary),
            }
            Ok(())
        }
        Err(e) => {
            // Cause stays in the log; the user gets the generic message
            warn!(error = %e, "cmd_plan: generation failed");
            eprintln!("{}", e.user_message().red());
            std::process::exit(1);
        }
    }
}

/// Print an itinerary as colored text
fn print_itinerary(itinerary: &Itinerary) {
    println!("{}", itinerary.trip_title.cyan().bold());
    let mut subtitle = vec![itinerary.destination.clone()];
    if !itinerary.duration.is_empty() {
        subtitle.push(itinerary.duration.clone());
    }
    if !itinerary.budget_level.is_empty() {
        subtitle.push(itinerary.budget_level.clone());
    }
    println!("{}", subtitle.join(" · ").dimmed());
    if !itinerary.overall_vibe.is_empty() {
        println!("{}", itinerary.overall_vibe.italic());
    }

    for plan in &itinerary.days {
        println!();
        println!("{}", format!("Day {} — {}", plan.day, plan.title).yellow().bold());
        if !plan.summary.is_empty() {
            println!("  {}", plan.summary.dimmed());
        }
        for activity in &plan.activities {
            if let Some(distance) = &activity.distance_from_previous {
                println!("      {}", format!("↓ {}", distance).dimmed());
            }
            println!(
                "  {:<9} {} {}",
                activity.time,
                activity.location.bold(),
                format!("[{}]", activity.category).magenta()
            );
            println!("            {}", activity.description);
            if let Some(notes) = &activity.notes {
                println!("            {}", notes.italic());
            }
            if let Some(url) = &activity.search_url {
                println!("            {}", format!("ref: {}", url).blue());
            }
            if let Some(url) = &activity.maps_url {
                println!("            {}", format!("map: {}", url).blue());
            }
        }
    }
}
