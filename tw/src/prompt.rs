//! Generation request building
//!
//! Turns a validated TripRequest into the instruction text plus the
//! formal response schema sent to the generation service. Pure
//! transformation, no side effects, infallible for any request that
//! passed form validation.

use serde_json::{Value, json};
use tracing::debug;

use crate::domain::{ActivityCategory, TripRequest};

/// An opaque generation request: instruction text plus output schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Natural-language instruction for the model
    pub instruction: String,

    /// Formal JSON schema the response must conform to
    pub response_schema: Value,
}

/// Build the generation request for a trip
pub fn build_request(trip: &TripRequest) -> GenerationRequest {
    debug!(destination = %trip.destination, days = trip.days, "build_request: called");
    GenerationRequest {
        instruction: build_instruction(trip),
        response_schema: response_schema(),
    }
}

/// Compose the instruction text
///
/// Carries the formatting directives the response contract depends on:
/// reference and maps URLs per activity, distance estimates between
/// consecutive activities, and the closed category set.
fn build_instruction(trip: &TripRequest) -> String {
    let mut instruction = format!(
        "Create a detailed {days}-day travel itinerary for {destination}",
        days = trip.days,
        destination = trip.destination,
    );
    if let Some(start) = &trip.starting_point {
        instruction.push_str(&format!(", starting from {}", start));
    }
    instruction.push_str(".\n");
    instruction.push_str(&format!("The traveler profile is: {}.\n", trip.travelers));
    instruction.push_str(&format!("Budget level: {}.\n", trip.budget));
    if let Some(interests) = &trip.interests {
        instruction.push_str(&format!("Interests/Preferences: {}.\n", interests));
    }

    instruction.push_str("\nCRITICAL REQUIREMENTS:\n");
    instruction.push_str(
        "1. For each activity, provide a valid search URL or official website URL in the 'searchUrl' field.\n",
    );
    instruction.push_str("2. Provide a maps search URL for each location in the 'mapsUrl' field.\n");
    match &trip.starting_point {
        Some(start) => {
            instruction.push_str(&format!(
                "3. Estimate the 'distanceFromPrevious' (e.g., \"2km / 15m walk\") between consecutive activities. \
                 The first activity of Day 1 should measure distance from the starting point: {}.\n",
                start
            ));
        }
        None => {
            instruction.push_str(
                "3. Estimate the 'distanceFromPrevious' (e.g., \"2km / 15m walk\") between consecutive activities.\n",
            );
        }
    }
    instruction.push_str("4. Ensure all locations are real and links are relevant.\n");
    instruction.push_str(&format!(
        "5. Assign each activity a type from: {}.\n",
        ActivityCategory::WIRE_NAMES.join(", ")
    ));

    instruction
}

/// The formal response schema in the generation service's schema dialect
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "destination": { "type": "STRING" },
            "tripTitle": { "type": "STRING" },
            "duration": { "type": "STRING" },
            "budgetLevel": { "type": "STRING" },
            "overallVibe": { "type": "STRING" },
            "startingLocation": { "type": "STRING" },
            "days": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "INTEGER" },
                        "title": { "type": "STRING" },
                        "summary": { "type": "STRING" },
                        "activities": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "time": { "type": "STRING" },
                                    "location": { "type": "STRING" },
                                    "description": { "type": "STRING" },
                                    "notes": { "type": "STRING" },
                                    "type": { "type": "STRING", "enum": ActivityCategory::WIRE_NAMES },
                                    "searchUrl": { "type": "STRING" },
                                    "mapsUrl": { "type": "STRING" },
                                    "distanceFromPrevious": { "type": "STRING" }
                                },
                                "required": ["time", "location", "description", "type"]
                            }
                        }
                    },
                    "required": ["day", "title", "activities"]
                }
            }
        },
        "required": ["destination", "tripTitle", "days", "startingLocation"]
    })
}
