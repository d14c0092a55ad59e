use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::{Database, DatabaseError};
use crate::timer::{format_display, Stopwatch, TimerPhase};

/// Possible errors when accepting or declining a time.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Accept and decline need a stopped, non-zero time.
    #[error("there is no stopped time to submit")]
    NothingToSubmit,

    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// The time was recorded, but its rank could not be looked up.
    /// Accepting again would submit the same time twice.
    #[error("time recorded, but its ranking position could not be loaded: {0}")]
    RankUnavailable(DatabaseError),
}

/// The state of one user's interaction: what they typed as username,
/// their stopwatch, and the rank of their last accepted time.
///
/// The last rank is only ever overwritten by the next accepted time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    username: String,
    stopwatch: Stopwatch,
    last_user_rank: Option<usize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username<S: Into<String>>(&mut self, username: S) {
        self.username = username.into();
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn phase(&self) -> TimerPhase {
        self.stopwatch.phase()
    }

    pub fn is_running(&self) -> bool {
        self.stopwatch.is_running()
    }

    /// `True` if the current time can be accepted or declined.
    pub fn can_submit(&self) -> bool {
        self.stopwatch.can_submit()
    }

    /// The rank of the most recently accepted time, or `None` if no time
    /// was accepted in this session.
    pub fn last_user_rank(&self) -> Option<usize> {
        self.last_user_rank
    }

    pub fn toggle_start_stop(&mut self, now_millis: i64) {
        self.stopwatch.toggle_start_stop(now_millis);
        log::debug!(
            "stopwatch {:?} at {}",
            self.stopwatch.phase(),
            self.stopwatch.display(now_millis)
        );
    }

    pub fn current_elapsed_millis(&self, now_millis: i64) -> u64 {
        self.stopwatch.current_elapsed_millis(now_millis)
    }

    pub fn display(&self, now_millis: i64) -> String {
        self.stopwatch.display(now_millis)
    }

    /// Submit the stopped time under the current username, then look up
    /// and remember that user's rank.
    ///
    /// The stopwatch keeps its time. Empty usernames are submitted as well.
    /// The returned rank is a snapshot, that is not updated when other
    /// times are submitted later.
    pub async fn accept(&mut self, db: &dyn Database) -> Result<Option<usize>, SessionError> {
        let time = format_display(self.submittable_millis()?);
        db.insert(&self.username, &time).await?;
        log::info!("accepted time {} for '{}'", time, self.username);

        let rank = db
            .rank_of(&self.username)
            .await
            .map_err(SessionError::RankUnavailable)?;
        self.last_user_rank = rank;
        Ok(rank)
    }

    /// Discard the stopped time without touching the store.
    pub fn decline(&mut self) -> Result<(), SessionError> {
        let millis = self.submittable_millis()?;
        log::info!("declined time {}", format_display(millis));
        self.stopwatch.reset();
        Ok(())
    }

    fn submittable_millis(&self) -> Result<u64, SessionError> {
        match self.stopwatch.stopped_millis() {
            Some(millis) if millis > 0 => Ok(millis),
            _ => Err(SessionError::NothingToSubmit),
        }
    }
}
