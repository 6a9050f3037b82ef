//! Generation orchestrator
//!
//! The single async operation that turns a TripRequest into a typed
//! Itinerary: build the request, call the generation service, interpret
//! the raw text. Every failure mode collapses into one generic
//! user-facing message; the concrete cause goes to the log only, so
//! credential and implementation details never reach the screen.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{Itinerary, TripRequest};
use crate::interpreter::{self, InterpretError};
use crate::llm::{GenerativeClient, LlmError};
use crate::prompt;

/// Generic message shown to the user for any generation failure
pub const GENERATION_FAILED_MESSAGE: &str =
    "Itinerary generation failed. Check your API key and connection, then try again.";

/// Why a generation attempt failed
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("generation service call failed: {0}")]
    Service(#[from] LlmError),

    #[error("generation service returned an empty response")]
    EmptyResponse,

    #[error("generation response rejected: {0}")]
    Schema(#[from] InterpretError),
}

impl PlanError {
    /// The single user-facing message all failure modes collapse to
    pub fn user_message(&self) -> &'static str {
        GENERATION_FAILED_MESSAGE
    }
}

/// Itinerary generation orchestrator
///
/// At most one generation should be in flight per user action; the
/// caller owns the in-flight flag and re-submission gating.
pub struct Planner {
    client: Arc<dyn GenerativeClient>,
}

impl Planner {
    /// Create a planner over a generation client
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self { client }
    }

    /// Generate a full itinerary for the given trip
    ///
    /// The trip is assumed valid (form-boundary validation). No
    /// automatic retries: a failure requires explicit re-submission.
    pub async fn generate(&self, trip: &TripRequest) -> Result<Itinerary, PlanError> {
        debug!(destination = %trip.destination, days = trip.days, "generate: called");

        let request = prompt::build_request(trip);
        let raw = self.client.generate(&request).await.map_err(|e| {
            warn!(error = %e, "generate: service call failed");
            PlanError::Service(e)
        })?;

        if raw.trim().is_empty() {
            warn!("generate: service returned empty text");
            return Err(PlanError::EmptyResponse);
        }

        let itinerary = interpreter::interpret(&raw).map_err(|e| {
            warn!(error = %e, raw_len = raw.len(), "generate: response rejected");
            PlanError::Schema(e)
        })?;

        info!(
            destination = %itinerary.destination,
            days = itinerary.days.len(),
            "generate: itinerary ready"
        );
        Ok(itinerary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetTier, TravelerProfile};
    use crate::llm::client::mock::MockGenerativeClient;

    fn kyoto() -> TripRequest {
        TripRequest {
            destination: "Kyoto".to_string(),
            starting_point: None,
            days: 3,
            budget: BudgetTier::Moderate,
            travelers: TravelerProfile::Couple,
            interests: Some("food".to_string()),
        }
    }

    fn valid_response() -> String {
        r#"{
            "destination": "Kyoto",
            "tripTitle": "Kyoto in Three Days",
            "days": [
                {"day": 1, "title": "Higashiyama", "activities": []},
                {"day": 2, "title": "Arashiyama", "activities": []},
                {"day": 3, "title": "Fushimi", "activities": []}
            ]
        }"#
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_success() {
        let client = Arc::new(MockGenerativeClient::new(vec![Ok(valid_response())]));
        let planner = Planner::new(client.clone());

        let itinerary = planner.generate(&kyoto()).await.expect("generation succeeds");
        assert_eq!(itinerary.days.len(), 3);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_service_failure() {
        let client = Arc::new(MockGenerativeClient::new(vec![Err(LlmError::ApiError {
            status: 401,
            message: "bad key".to_string(),
        })]));
        let planner = Planner::new(client);

        let err = planner.generate(&kyoto()).await.expect_err("service failure surfaces");
        assert!(matches!(err, PlanError::Service(_)));
        assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_empty_response() {
        let client = Arc::new(MockGenerativeClient::new(vec![Ok("   \n".to_string())]));
        let planner = Planner::new(client);

        let err = planner.generate(&kyoto()).await.expect_err("empty response fails");
        assert!(matches!(err, PlanError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_generate_prose_only_response() {
        let client = Arc::new(MockGenerativeClient::new(vec![Ok(
            "I cannot help with that.".to_string()
        )]));
        let planner = Planner::new(client);

        let err = planner.generate(&kyoto()).await.expect_err("prose-only response fails");
        assert!(matches!(err, PlanError::Schema(InterpretError::NoJson)));
        assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
    }
}
