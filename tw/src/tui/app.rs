//! TUI application - event handling and state transitions
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::state::{AppState, PendingAction, Screen};

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl-C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.state.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Generating => self.handle_generating_key(key),
            Screen::Itinerary => self.handle_itinerary_key(key),
            Screen::Error => self.handle_error_key(key),
        }

        self.state.should_quit
    }

    /// Keys on the trip entry form
    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.should_quit = true;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.state.form.focus = self.state.form.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.form.focus = self.state.form.focus.prev();
            }
            KeyCode::Left => {
                self.state.form.cycle_selector(false);
            }
            KeyCode::Right => {
                self.state.form.cycle_selector(true);
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            KeyCode::Backspace => {
                if let Some(text) = self.state.form.focused_text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(ch) => {
                if self.state.form.focus.is_text() {
                    if let Some(text) = self.state.form.focused_text_mut() {
                        text.push(ch);
                    }
                } else {
                    // Selector fields also respond to +/- and digits
                    match ch {
                        '+' => self.state.form.cycle_selector(true),
                        '-' => self.state.form.cycle_selector(false),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    /// Validate the form and queue a generation request
    ///
    /// Re-submission is gated on the in-flight flag: at most one
    /// generation call is outstanding per session.
    fn submit_form(&mut self) {
        if self.state.in_flight {
            debug!("submit_form: generation already in flight, ignoring");
            return;
        }
        match self.state.form.to_request() {
            Ok(request) => {
                self.state.form.error = None;
                self.state.request(PendingAction::Generate(request));
            }
            Err(e) => {
                debug!(error = %e, "submit_form: validation failed");
                self.state.form.error = Some(e.to_string());
            }
        }
    }

    /// Keys while a generation call is outstanding
    ///
    /// Esc abandons the attempt: the session bump in reset() makes the
    /// eventual outcome stale so it can never land on the form screen.
    fn handle_generating_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.reset();
            }
            KeyCode::Char('q') => {
                self.state.should_quit = true;
            }
            _ => {}
        }
    }

    /// Keys on the itinerary timeline
    fn handle_itinerary_key(&mut self, key: KeyEvent) {
        // Note editing captures all input except its own exit keys
        let editing_day = self.state.itinerary.as_ref().and_then(|it| it.editing_day());
        if let Some(day) = editing_day {
            self.handle_note_key(day, key);
            return;
        }

        let Some(it) = self.state.itinerary.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => it.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => it.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(day) = it.selected_day() {
                    it.toggle_day(day);
                }
            }
            KeyCode::Char('e') => {
                if let Some(day) = it.selected_day() {
                    // Editing a collapsed day would be invisible
                    if !it.day_state(day).map(|s| s.open).unwrap_or(false) {
                        it.toggle_day(day);
                    }
                    it.toggle_editing(day);
                }
            }
            KeyCode::Char('n') => {
                self.state.reset();
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state.should_quit = true;
            }
            _ => {}
        }
    }

    /// Keys while editing a day note
    fn handle_note_key(&mut self, day: u32, key: KeyEvent) {
        let Some(it) = self.state.itinerary.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Enter => it.toggle_editing(day),
            KeyCode::Backspace => it.pop_note_char(day),
            KeyCode::Char(ch) => it.push_note_char(day, ch),
            _ => {}
        }
    }

    /// Keys on the error screen
    fn handle_error_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.state.dismiss_error();
            }
            KeyCode::Char('q') => {
                self.state.should_quit = true;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayPlan, Itinerary};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_itinerary(day_numbers: &[u32]) -> App {
        let itinerary = Itinerary {
            destination: "Kyoto".to_string(),
            trip_title: "Kyoto Trip".to_string(),
            duration: String::new(),
            budget_level: String::new(),
            overall_vibe: String::new(),
            starting_location: None,
            days: day_numbers
                .iter()
                .map(|&day| DayPlan {
                    day,
                    title: format!("Day {}", day),
                    summary: String::new(),
                    activities: vec![],
                })
                .collect(),
        };
        let mut app = App::new();
        let session = app.state_mut().begin_generation();
        app.state_mut().apply_outcome(session, Ok(itinerary));
        app
    }

    #[test]
    fn test_typing_fills_destination() {
        let mut app = App::new();
        for ch in "Kyoto".chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        assert_eq!(app.state().form.destination, "Kyoto");

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.state().form.destination, "Kyot");
    }

    #[test]
    fn test_submit_valid_form_queues_generation() {
        let mut app = App::new();
        for ch in "Kyoto".chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        app.handle_key(key(KeyCode::Enter));

        let action = app.state_mut().take_pending_action();
        assert!(matches!(action, Some(PendingAction::Generate(_))));
    }

    #[test]
    fn test_submit_empty_form_sets_inline_error() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Enter));

        assert!(app.state().form.error.is_some());
        assert!(app.state_mut().take_pending_action().is_none());
    }

    #[test]
    fn test_submit_ignored_while_in_flight() {
        let mut app = App::new();
        for ch in "Kyoto".chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        app.state_mut().begin_generation();
        // Force back to the form screen without clearing in_flight
        app.state_mut().screen = Screen::Form;

        app.handle_key(key(KeyCode::Enter));
        assert!(app.state_mut().take_pending_action().is_none());
    }

    #[test]
    fn test_enter_toggles_selected_day() {
        let mut app = app_with_itinerary(&[1, 2, 3]);
        assert_eq!(app.state().screen, Screen::Itinerary);

        // Day 1 starts open; toggling the selected (first) day closes it
        app.handle_key(key(KeyCode::Enter));
        let open = app.state().itinerary.as_ref().unwrap().open_days();
        assert!(open.is_empty());

        app.handle_key(key(KeyCode::Enter));
        let open = app.state().itinerary.as_ref().unwrap().open_days();
        assert_eq!(open, vec![1]);
    }

    #[test]
    fn test_note_editing_flow() {
        let mut app = app_with_itinerary(&[1, 2]);

        app.handle_key(key(KeyCode::Char('e')));
        for ch in "cash".chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        app.handle_key(key(KeyCode::Esc));

        let it = app.state().itinerary.as_ref().unwrap();
        assert_eq!(it.day_state(1).unwrap().note, "cash");
        assert!(!it.day_state(1).unwrap().editing);
    }

    #[test]
    fn test_edit_key_opens_collapsed_day() {
        let mut app = app_with_itinerary(&[1, 2]);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('e')));

        let it = app.state().itinerary.as_ref().unwrap();
        assert!(it.day_state(2).unwrap().open);
        assert!(it.day_state(2).unwrap().editing);
    }

    #[test]
    fn test_new_plan_resets_to_form() {
        let mut app = app_with_itinerary(&[1]);
        app.handle_key(key(KeyCode::Char('n')));

        assert_eq!(app.state().screen, Screen::Form);
        assert!(app.state().itinerary.is_none());
    }

    #[test]
    fn test_error_screen_dismisses_to_prefilled_form() {
        let mut app = App::new();
        for ch in "Kyoto".chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        let session = app.state_mut().begin_generation();
        app.state_mut()
            .apply_outcome(session, Err(crate::planner::PlanError::EmptyResponse));
        assert_eq!(app.state().screen, Screen::Error);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state().screen, Screen::Form);
        assert_eq!(app.state().form.destination, "Kyoto");
        assert!(!app.state().in_flight);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = App::new();
        let quit = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(quit);
    }
}
