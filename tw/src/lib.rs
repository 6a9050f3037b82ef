//! TripWeaver - AI-assisted travel itinerary planner
//!
//! Bridges an unstructured generative output to a structured domain
//! model: a trip request becomes an instruction plus a formal response
//! schema, the service's raw text is extracted and validated into a
//! typed [`domain::Itinerary`], and the TUI renders it as a collapsible
//! day-by-day timeline with distance annotations and per-day notes.
//!
//! # Modules
//!
//! - [`domain`] - TripRequest and Itinerary entities
//! - [`prompt`] - generation request building (instruction + schema)
//! - [`interpreter`] - raw text to validated Itinerary
//! - [`planner`] - the generation orchestrator and failure taxonomy
//! - [`llm`] - GenerativeClient trait and Gemini implementation
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//! - [`tui`] - interactive timeline UI

pub mod cli;
pub mod config;
pub mod domain;
pub mod interpreter;
pub mod llm;
pub mod planner;
pub mod prompt;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, LlmConfig};
pub use domain::{Activity, ActivityCategory, BudgetTier, DayPlan, Itinerary, TravelerProfile, TripRequest};
pub use interpreter::{InterpretError, extract_json_span, interpret};
pub use llm::{GeminiClient, GenerativeClient, LlmError, create_client};
pub use planner::{GENERATION_FAILED_MESSAGE, PlanError, Planner};
pub use prompt::{GenerationRequest, build_request};
