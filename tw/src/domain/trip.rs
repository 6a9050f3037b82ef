//! Trip request types - the user's input to itinerary generation
//!
//! A TripRequest is validated once at the form/CLI boundary and is
//! immutable after submission. The generation pipeline assumes it is
//! well-formed and never re-validates.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum trip length in days
pub const MIN_DAYS: u8 = 1;

/// Maximum trip length in days
pub const MAX_DAYS: u8 = 14;

/// Spending level for the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum BudgetTier {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl BudgetTier {
    /// All tiers in cycling order for the form selector
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::Moderate, BudgetTier::Luxury];
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetTier::Budget => write!(f, "Budget"),
            BudgetTier::Moderate => write!(f, "Moderate"),
            BudgetTier::Luxury => write!(f, "Luxury"),
        }
    }
}

/// Who is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum TravelerProfile {
    #[default]
    Solo,
    Couple,
    Family,
    Friends,
}

impl TravelerProfile {
    /// All profiles in cycling order for the form selector
    pub const ALL: [TravelerProfile; 4] = [
        TravelerProfile::Solo,
        TravelerProfile::Couple,
        TravelerProfile::Family,
        TravelerProfile::Friends,
    ];
}

impl fmt::Display for TravelerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelerProfile::Solo => write!(f, "Solo"),
            TravelerProfile::Couple => write!(f, "Couple"),
            TravelerProfile::Family => write!(f, "Family"),
            TravelerProfile::Friends => write!(f, "Friends"),
        }
    }
}

/// Errors from TripRequest validation at the form boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TripRequestError {
    #[error("destination must not be empty")]
    EmptyDestination,

    #[error("trip length must be between {MIN_DAYS} and {MAX_DAYS} days, got {0}")]
    DaysOutOfRange(u8),
}

/// User-supplied trip parameters
///
/// Created on form submission, consumed once by the planner, then
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Where the trip goes (required, non-empty)
    pub destination: String,

    /// Where day 1 starts from, used for the first distance estimate
    pub starting_point: Option<String>,

    /// Trip length in days (1-14)
    pub days: u8,

    /// Spending level
    pub budget: BudgetTier,

    /// Traveler profile
    pub travelers: TravelerProfile,

    /// Free-text interests and preferences
    pub interests: Option<String>,
}

impl TripRequest {
    /// Validate form-boundary invariants
    ///
    /// The generation pipeline relies on this having been called before
    /// submission; it never throws for a request that passed here.
    pub fn validate(&self) -> Result<(), TripRequestError> {
        if self.destination.trim().is_empty() {
            return Err(TripRequestError::EmptyDestination);
        }
        if !(MIN_DAYS..=MAX_DAYS).contains(&self.days) {
            return Err(TripRequestError::DaysOutOfRange(self.days));
        }
        Ok(())
    }
}
