//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.
//!
//! Per-day open/closed and note-editing flags are ephemeral view state,
//! kept in a map keyed by day number, separate from the immutable
//! Itinerary. Resets and re-generation discard one without touching the
//! other.

use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use crate::domain::{BudgetTier, Itinerary, TravelerProfile, TripRequest, TripRequestError};
use crate::planner::PlanError;

/// Fun words for the generation status indicator
pub const PLANNING_WORDS: &[&str] = &[
    "Charting",
    "Plotting",
    "Mapping",
    "Scouting",
    "Routing",
    "Wandering",
    "Packing",
    "Navigating",
];

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Trip parameter entry form (initial screen)
    #[default]
    Form,
    /// Generation in flight
    Generating,
    /// Rendered itinerary timeline
    Itinerary,
    /// Generic failure message
    Error,
}

/// Form fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Destination,
    StartingPoint,
    Days,
    Budget,
    Travelers,
    Interests,
}

impl FormField {
    /// Get the next field in the focus cycle
    pub fn next(self) -> Self {
        match self {
            Self::Destination => Self::StartingPoint,
            Self::StartingPoint => Self::Days,
            Self::Days => Self::Budget,
            Self::Budget => Self::Travelers,
            Self::Travelers => Self::Interests,
            Self::Interests => Self::Destination,
        }
    }

    /// Get the previous field in the focus cycle
    pub fn prev(self) -> Self {
        match self {
            Self::Destination => Self::Interests,
            Self::StartingPoint => Self::Destination,
            Self::Days => Self::StartingPoint,
            Self::Budget => Self::Days,
            Self::Travelers => Self::Budget,
            Self::Interests => Self::Travelers,
        }
    }

    /// Whether this field takes free text input
    pub fn is_text(self) -> bool {
        matches!(self, Self::Destination | Self::StartingPoint | Self::Interests)
    }
}

/// Trip entry form state
///
/// Stays pre-filled across failed attempts so the user only has to
/// re-submit, never re-type.
#[derive(Debug, Clone)]
pub struct FormState {
    pub destination: String,
    pub starting_point: String,
    pub days: u8,
    pub budget: BudgetTier,
    pub travelers: TravelerProfile,
    pub interests: String,
    /// Which field has focus
    pub focus: FormField,
    /// Inline validation message
    pub error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            destination: String::new(),
            starting_point: String::new(),
            days: 3,
            budget: BudgetTier::default(),
            travelers: TravelerProfile::default(),
            interests: String::new(),
            focus: FormField::default(),
            error: None,
        }
    }
}

impl FormState {
    /// Build and validate a TripRequest from the current form contents
    ///
    /// Empty optional fields become None. This is the form-boundary
    /// validation the generation pipeline relies on.
    pub fn to_request(&self) -> Result<TripRequest, TripRequestError> {
        let request = TripRequest {
            destination: self.destination.trim().to_string(),
            starting_point: non_empty(&self.starting_point),
            days: self.days,
            budget: self.budget,
            travelers: self.travelers,
            interests: non_empty(&self.interests),
        };
        request.validate()?;
        Ok(request)
    }

    /// Mutable reference to the focused text buffer, if the focused
    /// field is a text field
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Destination => Some(&mut self.destination),
            FormField::StartingPoint => Some(&mut self.starting_point),
            FormField::Interests => Some(&mut self.interests),
            _ => None,
        }
    }

    /// Cycle the focused selector field forward or backward
    pub fn cycle_selector(&mut self, forward: bool) {
        match self.focus {
            FormField::Days => {
                self.days = if forward {
                    (self.days + 1).min(crate::domain::MAX_DAYS)
                } else {
                    self.days.saturating_sub(1).max(crate::domain::MIN_DAYS)
                };
            }
            FormField::Budget => {
                self.budget = cycle(&BudgetTier::ALL, self.budget, forward);
            }
            FormField::Travelers => {
                self.travelers = cycle(&TravelerProfile::ALL, self.travelers, forward);
            }
            _ => {}
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let len = all.len();
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    all[next]
}

/// Ephemeral view state for one rendered day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayState {
    /// Whether the day section is expanded
    pub open: bool,
    /// Free-text note buffer (session-only, never persisted)
    pub note: String,
    /// Whether the note buffer is shown as an editable input
    pub editing: bool,
}

/// View state for a rendered itinerary
///
/// Owns the Itinerary it renders; replaced wholesale on reset or
/// re-generation.
#[derive(Debug, Clone)]
pub struct ItineraryState {
    /// The immutable itinerary being displayed
    pub itinerary: Itinerary,
    /// Per-day view state, keyed by day number
    days: BTreeMap<u32, DayState>,
    /// Index of the selected day within `itinerary.days`
    pub selected: usize,
}

impl ItineraryState {
    /// Create view state for an itinerary, with the first day expanded
    pub fn new(itinerary: Itinerary) -> Self {
        let mut days: BTreeMap<u32, DayState> = itinerary.days.iter().map(|d| (d.day, DayState::default())).collect();
        if let Some(first) = itinerary.first_day() {
            if let Some(state) = days.get_mut(&first) {
                state.open = true;
            }
        }
        Self {
            itinerary,
            days,
            selected: 0,
        }
    }

    /// Toggle a day section open or closed (self-inverse)
    pub fn toggle_day(&mut self, day: u32) {
        if let Some(state) = self.days.get_mut(&day) {
            state.open = !state.open;
            debug!(day, open = state.open, "toggle_day");
        }
    }

    /// Replace a day's note buffer
    pub fn edit_note(&mut self, day: u32, text: impl Into<String>) {
        if let Some(state) = self.days.get_mut(&day) {
            state.note = text.into();
        }
    }

    /// Flip a day's note buffer between editable and read-only
    pub fn toggle_editing(&mut self, day: u32) {
        if let Some(state) = self.days.get_mut(&day) {
            state.editing = !state.editing;
            debug!(day, editing = state.editing, "toggle_editing");
        }
    }

    /// View state for a day number
    pub fn day_state(&self, day: u32) -> Option<&DayState> {
        self.days.get(&day)
    }

    /// Day numbers currently expanded, in ascending order
    pub fn open_days(&self) -> Vec<u32> {
        self.days.iter().filter(|(_, s)| s.open).map(|(d, _)| *d).collect()
    }

    /// Day number of the selected day
    pub fn selected_day(&self) -> Option<u32> {
        self.itinerary.days.get(self.selected).map(|d| d.day)
    }

    /// Day number currently in note-editing mode, if any
    pub fn editing_day(&self) -> Option<u32> {
        self.days.iter().find(|(_, s)| s.editing).map(|(d, _)| *d)
    }

    /// Move selection to the next day
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.itinerary.days.len() {
            self.selected += 1;
        }
    }

    /// Move selection to the previous day
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Append a character to a day's note buffer
    pub fn push_note_char(&mut self, day: u32, ch: char) {
        if let Some(state) = self.days.get_mut(&day) {
            state.note.push(ch);
        }
    }

    /// Remove the last character from a day's note buffer
    pub fn pop_note_char(&mut self, day: u32) {
        if let Some(state) = self.days.get_mut(&day) {
            state.note.pop();
        }
    }
}

/// Action requested by key handling, picked up by the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Submit a trip for generation
    Generate(TripRequest),
}

/// Top-level application state
#[derive(Debug)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,
    /// Trip entry form (pre-filled across attempts)
    pub form: FormState,
    /// Currently displayed itinerary, if any
    pub itinerary: Option<ItineraryState>,
    /// Whether a generation call is outstanding (gates re-submission)
    pub in_flight: bool,
    /// UI session counter; outcomes from a stale session are discarded
    session: u64,
    /// User-facing error message for the Error screen
    pub error: Option<String>,
    /// Spinner word shown while generating
    pub planning_word: &'static str,
    /// Set when the user asked to exit
    pub should_quit: bool,
    /// Action for the runner to pick up
    pending_action: Option<PendingAction>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create the initial application state (blank form)
    pub fn new() -> Self {
        Self {
            screen: Screen::Form,
            form: FormState::default(),
            itinerary: None,
            in_flight: false,
            session: 0,
            error: None,
            planning_word: PLANNING_WORDS[0],
            should_quit: false,
            pending_action: None,
        }
    }

    /// Current session counter
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Take the pending action, leaving None
    pub fn take_pending_action(&mut self) -> Option<PendingAction> {
        self.pending_action.take()
    }

    /// Queue an action for the runner
    pub fn request(&mut self, action: PendingAction) {
        self.pending_action = Some(action);
    }

    /// Mark a generation as started and return its session id
    ///
    /// Bumps the session so any outcome still in flight from before
    /// can no longer be applied.
    pub fn begin_generation(&mut self) -> u64 {
        self.session += 1;
        self.in_flight = true;
        self.screen = Screen::Generating;
        self.planning_word = PLANNING_WORDS.choose(&mut rand::rng()).copied().unwrap_or(PLANNING_WORDS[0]);
        debug!(session = self.session, "begin_generation");
        self.session
    }

    /// Apply a generation outcome if it belongs to the current session
    ///
    /// Stale outcomes (the user reset or resubmitted while the call was
    /// outstanding) are discarded entirely - neither success nor
    /// failure from a stale call may touch current state.
    pub fn apply_outcome(&mut self, session: u64, result: Result<Itinerary, PlanError>) {
        if session != self.session {
            debug!(session, current = self.session, "apply_outcome: stale outcome discarded");
            return;
        }

        self.in_flight = false;
        match result {
            Ok(itinerary) => {
                debug!(days = itinerary.days.len(), "apply_outcome: itinerary ready");
                self.itinerary = Some(ItineraryState::new(itinerary));
                self.error = None;
                self.screen = Screen::Itinerary;
            }
            Err(e) => {
                // Cause goes to the log only; the screen gets the
                // generic message so credentials never leak.
                warn!(error = %e, "apply_outcome: generation failed");
                self.error = Some(e.user_message().to_string());
                self.screen = Screen::Error;
            }
        }
    }

    /// Discard the itinerary and all day/note state, back to the form
    ///
    /// Explicit user action only. The form stays pre-filled. Any
    /// outstanding generation becomes stale via the session bump.
    pub fn reset(&mut self) {
        debug!("reset");
        self.session += 1;
        self.in_flight = false;
        self.itinerary = None;
        self.error = None;
        self.form.error = None;
        self.screen = Screen::Form;
    }

    /// Dismiss the error screen, keeping the pre-filled form
    pub fn dismiss_error(&mut self) {
        self.error = None;
        self.screen = Screen::Form;
    }
}
