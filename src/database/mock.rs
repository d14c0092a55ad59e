use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::database::api::{RankingEntry, RankingQueries};
use crate::database::{DatabaseError, Result};

/// In-memory store that ranks entries the same way as the SQLite store.
#[derive(Default)]
pub struct MockDatabase {
    entries: Mutex<Vec<RankingEntry>>,
    unavailable: AtomicBool,
    rank_unavailable: AtomicBool,
    count_unavailable: AtomicBool,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// While switched off, every query fails with `DatabaseError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// While switched off, only `rank_of` fails.
    pub fn set_rank_unavailable(&self, unavailable: bool) {
        self.rank_unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// While switched off, only `nb_entries` fails.
    pub fn set_count_unavailable(&self, unavailable: bool) {
        self.count_unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> Vec<RankingEntry> {
        self.entries.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        Self::check_switch(&self.unavailable)
    }

    fn check_switch(switch: &AtomicBool) -> Result<()> {
        if switch.load(Ordering::SeqCst) {
            Err(DatabaseError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn ranked(&self) -> Vec<RankingEntry> {
        let mut entries = self.entries();
        entries.sort_by(|a, b| a.time.cmp(&b.time).then(a.id.cmp(&b.id)));
        entries
    }
}

#[async_trait]
impl RankingQueries for MockDatabase {
    async fn migrate(&self) -> Result<()> {
        self.check()
    }

    async fn insert(&self, username: &str, time: &str) -> Result<i64> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let id = entries.len() as i64 + 1;
        entries.push(RankingEntry {
            id,
            username: username.to_string(),
            time: time.to_string(),
        });
        Ok(id)
    }

    async fn top_n(&self, limit: usize) -> Result<Vec<RankingEntry>> {
        self.check()?;
        Ok(self.ranked().into_iter().take(limit).collect())
    }

    async fn rank_of(&self, username: &str) -> Result<Option<usize>> {
        self.check()?;
        Self::check_switch(&self.rank_unavailable)?;
        Ok(self
            .ranked()
            .iter()
            .position(|e| e.username == username)
            .map(|idx| idx + 1))
    }

    async fn nb_entries(&self) -> Result<i64> {
        self.check()?;
        Self::check_switch(&self.count_unavailable)?;
        Ok(self.entries.lock().unwrap().len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rank_of_reports_best_entry() {
        let db = MockDatabase::new();
        db.insert("a", "03.000").await.unwrap();
        db.insert("b", "01.000").await.unwrap();
        db.insert("a", "00.500").await.unwrap();

        assert_eq!(Some(1), db.rank_of("a").await.unwrap());
        assert_eq!(Some(2), db.rank_of("b").await.unwrap());
        assert_eq!(None, db.rank_of("c").await.unwrap());
    }

    #[tokio::test]
    async fn test_unavailable() {
        let db = MockDatabase::new();
        db.set_unavailable(true);
        assert!(matches!(
            db.insert("a", "00.100").await,
            Err(DatabaseError::Unavailable)
        ));
        db.set_unavailable(false);
        assert_eq!(0, db.nb_entries().await.unwrap());
    }
}
