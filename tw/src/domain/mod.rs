//! Domain types for trip requests and generated itineraries

mod itinerary;
mod trip;

pub use itinerary::{Activity, ActivityCategory, DayPlan, Itinerary};
pub use trip::{BudgetTier, MAX_DAYS, MIN_DAYS, TravelerProfile, TripRequest, TripRequestError};
