use async_trait::async_trait;

use crate::database::Result;

/// The number of entries shown on the leaderboard, unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

/// One submitted time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankingEntry {
    /// Auto-incremented row ID, assigned by the store.
    pub id: i64,

    /// The name this time was submitted under. Can be empty, and is not
    /// unique: users can submit as many times as they like.
    pub username: String,

    /// The submitted time in the `SS.mmm` format, f.e. `"07.250"`.
    ///
    /// Stored as text, and ranked by comparing the text, which only matches
    /// the numeric order because both fields are zero-padded.
    pub time: String,
}

#[async_trait]
pub trait RankingQueries: Send + Sync {
    /// Create the `rankings` table if it does not exist yet.
    ///
    /// This is idempotent, and should run once at startup.
    async fn migrate(&self) -> Result<()>;

    /// Append a submission, and return its ID.
    ///
    /// # Note
    /// The time text is stored as-is: this function does not check that
    /// it is formatted as `SS.mmm`.
    async fn insert(&self, username: &str, time: &str) -> Result<i64>;

    /// Return at most `limit` entries, sorted from best to worse.
    ///
    /// Entries are ordered by their time text; submissions with the same
    /// time keep their insertion order.
    async fn top_n(&self, limit: usize) -> Result<Vec<RankingEntry>>;

    /// Return the 1-based position of the specified user's best entry
    /// in the ranking of all entries, or `None` if they have not submitted
    /// any time yet.
    async fn rank_of(&self, username: &str) -> Result<Option<usize>>;

    /// Return the number of submissions.
    async fn nb_entries(&self) -> Result<i64>;

    /// Return the top ten entries.
    async fn top_ten(&self) -> Result<Vec<RankingEntry>> {
        self.top_n(DEFAULT_TOP_N).await
    }
}
