//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::{BudgetTier, TravelerProfile};

/// TripWeaver - AI-assisted travel itinerary planner
#[derive(Parser)]
#[command(
    name = "tripweaver",
    about = "Generate multi-day travel itineraries with an interactive timeline",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (none launches the interactive TUI)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate one itinerary and print it (batch mode)
    Plan {
        /// Trip destination
        destination: String,

        /// Trip length in days (1-14)
        #[arg(short, long, default_value = "3")]
        days: u8,

        /// Starting point for day 1 distances
        #[arg(short = 'f', long = "from")]
        starting_point: Option<String>,

        /// Budget level
        #[arg(short, long, value_enum, default_value_t = BudgetTier::Moderate)]
        budget: BudgetTier,

        /// Traveler profile
        #[arg(short, long, value_enum, default_value_t = TravelerProfile::Solo)]
        travelers: TravelerProfile,

        /// Interests and preferences, free text
        #[arg(short, long)]
        interests: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for batch mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text
    Text,
    /// Raw itinerary JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_launches_tui() {
        let cli = Cli::try_parse_from(["tw"]).expect("bare invocation parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_plan_defaults() {
        let cli = Cli::try_parse_from(["tw", "plan", "Kyoto"]).expect("plan parses");
        match cli.command {
            Some(Command::Plan {
                destination,
                days,
                budget,
                travelers,
                format,
                ..
            }) => {
                assert_eq!(destination, "Kyoto");
                assert_eq!(days, 3);
                assert_eq!(budget, BudgetTier::Moderate);
                assert_eq!(travelers, TravelerProfile::Solo);
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_plan_full_flags() {
        let cli = Cli::try_parse_from([
            "tw", "plan", "Kyoto", "--days", "5", "--from", "Kyoto Station", "--budget", "luxury", "--travelers",
            "couple", "--interests", "food", "--format", "json",
        ])
        .expect("plan with flags parses");
        match cli.command {
            Some(Command::Plan {
                days,
                starting_point,
                budget,
                format,
                ..
            }) => {
                assert_eq!(days, 5);
                assert_eq!(starting_point.as_deref(), Some("Kyoto Station"));
                assert_eq!(budget, BudgetTier::Luxury);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
