//! Itinerary domain model - the structured output of generation
//!
//! Field names follow the wire contract of the generation service
//! (camelCase, `type` for the activity category). The category enum is
//! closed: an unrecognized value on the wire fails deserialization
//! instead of defaulting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity category - closed set, validated at the wire boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Food,
    Sightseeing,
    Relaxation,
    Adventure,
    Transit,
}

impl ActivityCategory {
    /// Wire names of all categories, in schema order
    pub const WIRE_NAMES: [&'static str; 5] = ["food", "sightseeing", "relaxation", "adventure", "transit"];
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityCategory::Food => "food",
            ActivityCategory::Sightseeing => "sightseeing",
            ActivityCategory::Relaxation => "relaxation",
            ActivityCategory::Adventure => "adventure",
            ActivityCategory::Transit => "transit",
        };
        write!(f, "{}", name)
    }
}

/// A single scheduled activity within a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Display time label ("09:00", "Afternoon"), not a strict timestamp
    pub time: String,

    /// Where the activity happens
    pub location: String,

    /// What the activity is
    pub description: String,

    /// Free-form tips from the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Category from the closed set
    #[serde(rename = "type")]
    pub category: ActivityCategory,

    /// Reference/official URL for the activity
    #[serde(rename = "searchUrl", default, skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,

    /// Maps lookup URL for the location
    #[serde(rename = "mapsUrl", default, skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,

    /// Travel estimate from the previous activity, free-form ("2km / 15m walk")
    #[serde(rename = "distanceFromPrevious", default, skip_serializing_if = "Option::is_none")]
    pub distance_from_previous: Option<String>,
}

/// One day of the itinerary with its ordered activities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day number, unique within an itinerary
    pub day: u32,

    /// Day headline
    pub title: String,

    /// Short narrative summary of the day
    #[serde(default)]
    pub summary: String,

    /// Activities in chronological order
    pub activities: Vec<Activity>,
}

/// A complete generated itinerary
///
/// Built atomically by the response interpreter - a parse failure
/// discards the whole attempt, so an Itinerary is never partially
/// populated. `duration`, `budget_level` and `overall_vibe` are
/// tolerated missing on the wire so both known response shapes
/// validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Trip destination
    pub destination: String,

    /// Generated trip headline
    #[serde(rename = "tripTitle")]
    pub trip_title: String,

    /// Display string for the trip length ("3 Days")
    #[serde(default)]
    pub duration: String,

    /// Display string for the budget level
    #[serde(rename = "budgetLevel", default)]
    pub budget_level: String,

    /// One-line mood description for the whole trip
    #[serde(rename = "overallVibe", default)]
    pub overall_vibe: String,

    /// Where day 1 starts from, when the request supplied one
    #[serde(rename = "startingLocation", default, skip_serializing_if = "Option::is_none")]
    pub starting_location: Option<String>,

    /// Day plans in day order, non-empty after interpretation
    pub days: Vec<DayPlan>,
}

impl Itinerary {
    /// Day number of the first day plan, used to seed the expanded view
    pub fn first_day(&self) -> Option<u32> {
        self.days.first().map(|d| d.day)
    }

    /// Look up a day plan by its day number
    pub fn day(&self, day: u32) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_rejects_unknown_value() {
        let result: Result<ActivityCategory, _> = serde_json::from_str("\"shopping\"");
        assert!(result.is_err(), "unknown category must fail, not default");
    }

    #[test]
    fn test_category_wire_names_round_trip() {
        for name in ActivityCategory::WIRE_NAMES {
            let cat: ActivityCategory =
                serde_json::from_str(&format!("\"{}\"", name)).expect("known category must parse");
            assert_eq!(cat.to_string(), name);
        }
    }

    #[test]
    fn test_activity_optional_fields_default_to_none() {
        let json = r#"{
            "time": "09:00",
            "location": "Nishiki Market",
            "description": "Breakfast stalls",
            "type": "food"
        }"#;
        let activity: Activity = serde_json::from_str(json).expect("minimal activity must parse");
        assert_eq!(activity.category, ActivityCategory::Food);
        assert!(activity.notes.is_none());
        assert!(activity.search_url.is_none());
        assert!(activity.maps_url.is_none());
        assert!(activity.distance_from_previous.is_none());
    }

    #[test]
    fn test_itinerary_tolerates_missing_display_fields() {
        let json = r#"{
            "destination": "Kyoto",
            "tripTitle": "Kyoto in Three Days",
            "days": [
                {"day": 1, "title": "Arrival", "activities": []}
            ]
        }"#;
        let itinerary: Itinerary = serde_json::from_str(json).expect("lean shape must parse");
        assert_eq!(itinerary.duration, "");
        assert_eq!(itinerary.budget_level, "");
        assert!(itinerary.starting_location.is_none());
        assert_eq!(itinerary.first_day(), Some(1));
    }

    #[test]
    fn test_itinerary_missing_title_fails() {
        let json = r#"{"destination": "Kyoto", "days": []}"#;
        let result: Result<Itinerary, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
