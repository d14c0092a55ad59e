use std::sync::Arc;

use crate::action::Action;
use crate::clock::Clock;
use crate::config::Config;
use crate::database::{Database, RankingEntry};
use crate::session::{Session, SessionError};
use crate::view::{RankingRow, View};

/// Whether to keep reading input after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the session of the one user at the terminal, and connects it
/// to the ranking store and the screen.
///
/// Every action is handled to completion before the next one is read,
/// and the screen is rebuilt from scratch after each of them.
pub struct Controller {
    config: Config,
    db: Arc<dyn Database>,
    clock: Arc<dyn Clock>,
    session: Session,

    /// One line of feedback for the most recent action.
    message: Option<String>,
}

impl Controller {
    pub fn new(config: Config, db: Arc<dyn Database>, clock: Arc<dyn Clock>) -> Controller {
        Controller {
            config,
            db,
            clock,
            session: Session::new(),
            message: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Replace the feedback line, f.e. to report input that could
    /// not be parsed.
    pub fn notify<S: Into<String>>(&mut self, message: S) {
        self.message = Some(message.into());
    }

    pub async fn on_action(&mut self, action: Action) -> Flow {
        log::debug!("action: {:?}", &action);
        self.message = None;

        use Action::*;
        match action {
            ToggleStartStop => {
                let now = self.clock.now_millis();
                self.session.toggle_start_stop(now);
            }
            Accept => self.on_accept().await,
            Decline => {
                if self.session.decline().is_err() {
                    self.notify("There is no stopped time to decline.");
                }
            }
            SetUsername(username) => {
                self.session.set_username(username);
            }
            Refresh => {}
            Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    async fn on_accept(&mut self) {
        match self.session.accept(&*self.db).await {
            Ok(_) => {
                self.notify("Time recorded! Your time was added to the rankings.");
            }
            Err(SessionError::NothingToSubmit) => {
                self.notify("Stop the timer before accepting a time.");
            }
            Err(SessionError::Database(err)) => {
                log::error!("failed to record time: {}", err);
                self.notify(format!("Could not record your time: {}", err));
            }
            Err(SessionError::RankUnavailable(err)) => {
                log::warn!("recorded time, but failed to look up rank: {}", err);
                self.notify(format!(
                    "Time recorded! Your ranking position could not be loaded: {}",
                    err
                ));
            }
        }
    }

    /// Query the current leaderboard, and render the screen.
    ///
    /// If the store is unavailable, the leaderboard is shown empty,
    /// and the error replaces the feedback line.
    pub async fn render(&self) -> String {
        let mut message = self.message.clone();

        let entries: Vec<RankingEntry> = match self.db.top_n(self.config.top_n).await {
            Ok(entries) => entries,
            Err(err) => {
                log::error!("failed to load rankings: {}", err);
                message = Some(format!("Could not load rankings: {}", err));
                vec![]
            }
        };
        let nb_entries = match self.db.nb_entries().await {
            Ok(nb) => Some(nb),
            Err(err) => {
                log::warn!("failed to count rankings: {}", err);
                None
            }
        };

        let now = self.clock.now_millis();
        let view = View {
            title: &self.config.title,
            username: self.session.username(),
            top_n: self.config.top_n,
            rankings: RankingRow::from_entries(&entries),
            nb_entries,
            timer: self.session.display(now),
            running: self.session.is_running(),
            can_submit: self.session.can_submit(),
            message: message.as_deref(),
            last_user_rank: self.session.last_user_rank(),
        };
        view.render()
    }
}
