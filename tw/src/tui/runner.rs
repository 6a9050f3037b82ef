//! TUI Runner - main loop that owns the terminal
//!
//! The TuiRunner is responsible for:
//! - Dispatching terminal events to App for handling
//! - Spawning the single background generation task per submission
//! - Delivering generation outcomes back to the state, session-checked
//! - Rendering at ~30 FPS

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::Itinerary;
use crate::planner::{PlanError, Planner};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::PendingAction;
use super::views;

/// Result from the background generation task, tagged with the session
/// it was spawned under so stale results can be discarded
#[derive(Debug)]
struct GenerationOutcome {
    session: u64,
    result: Result<Itinerary, PlanError>,
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Generation orchestrator
    planner: Arc<Planner>,
    /// Event handler
    event_handler: EventHandler,
    /// Receiver for the outstanding generation outcome
    outcome_rx: Option<mpsc::Receiver<GenerationOutcome>>,
    /// Handle to the background generation task
    task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    /// Create a new TuiRunner
    pub fn new(terminal: Tui, planner: Arc<Planner>) -> Self {
        debug!("TuiRunner::new: called");
        Self {
            app: App::new(),
            terminal,
            planner,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            outcome_rx: None,
            task: None,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            match self.event_handler.next().await? {
                Event::Tick => {
                    self.poll_outcome();
                }
                Event::Key(key_event) => {
                    if self.app.handle_key(key_event) {
                        break;
                    }
                }
                Event::Resize(_, _) => {
                    // Redraw happens at the top of the loop
                }
            }

            self.dispatch_pending();

            if self.app.state().should_quit {
                break;
            }
        }

        if let Some(task) = self.task.take() {
            // Abandon the in-flight call; no cancellation is supported
            task.abort();
        }

        Ok(())
    }

    /// Start a background generation if the app queued one
    fn dispatch_pending(&mut self) {
        let Some(PendingAction::Generate(trip)) = self.app.state_mut().take_pending_action() else {
            return;
        };

        let session = self.app.state_mut().begin_generation();
        debug!(session, destination = %trip.destination, "dispatch_pending: spawning generation task");

        let (tx, rx) = mpsc::channel(1);
        let planner = Arc::clone(&self.planner);
        let task = tokio::spawn(async move {
            let result = planner.generate(&trip).await;
            // Receiver may be gone if the user reset and resubmitted
            let _ = tx.send(GenerationOutcome { session, result }).await;
        });

        // Replacing a previous receiver drops it, which discards any
        // outcome from an abandoned session
        self.outcome_rx = Some(rx);
        self.task = Some(task);
    }

    /// Poll the outcome channel and apply a finished generation
    fn poll_outcome(&mut self) {
        let Some(rx) = self.outcome_rx.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(outcome) => {
                self.outcome_rx = None;
                self.task = None;
                self.app.state_mut().apply_outcome(outcome.session, outcome.result);
            }
            Err(mpsc::error::TryRecvError::Empty) => {}
            Err(mpsc::error::TryRecvError::Disconnected) => {
                // Task died without sending (panic); surface the
                // generic failure path rather than hanging forever
                warn!("poll_outcome: generation task ended without an outcome");
                self.outcome_rx = None;
                self.task = None;
                let session = self.app.state().session();
                self.app
                    .state_mut()
                    .apply_outcome(session, Err(PlanError::EmptyResponse));
            }
        }
    }
}
