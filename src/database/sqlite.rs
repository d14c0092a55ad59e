use std::convert::TryFrom;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::database::api::{RankingEntry, RankingQueries};
use crate::database::Result;

/// The only table, which is also the on-disk contract: existing database
/// files created with this schema remain usable.
const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS rankings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL,
        time TEXT NOT NULL
    )
"#;

/// `RankingQueries` implementation backed by a SQLite file.
///
/// Every query opens its own connection on the blocking thread pool,
/// and closes it when done. No transaction spans more than one statement.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        SqliteStore { path: path.into() }
    }

    /// The location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.clone();
        let res = tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            f(&conn)
        })
        .await?;
        Ok(res?)
    }
}

#[async_trait]
impl RankingQueries for SqliteStore {
    async fn migrate(&self) -> Result<()> {
        log::debug!("ensure 'rankings' table exists");
        self.with_conn(|conn| conn.execute_batch(SCHEMA)).await
    }

    async fn insert(&self, username: &str, time: &str) -> Result<i64> {
        let username = username.to_string();
        let time = time.to_string();
        let id = self
            .with_conn(move |conn| {
                let stmt = r#"
                    INSERT INTO rankings
                        (username, time)
                    VALUES
                        (?1, ?2)
                "#;
                conn.execute(stmt, params![username, time])?;
                Ok(conn.last_insert_rowid())
            })
            .await?;
        log::debug!("inserted ranking entry {}", id);
        Ok(id)
    }

    async fn top_n(&self, limit: usize) -> Result<Vec<RankingEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            let stmt = r#"
                SELECT id, username, time
                FROM rankings
                ORDER BY time ASC, id ASC
                LIMIT ?1
            "#;
            let mut stmt = conn.prepare(stmt)?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok(RankingEntry {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    time: row.get(2)?,
                })
            })?;
            rows.collect()
        })
        .await
    }

    async fn rank_of(&self, username: &str) -> Result<Option<usize>> {
        let username = username.to_string();
        let pos: Option<i64> = self
            .with_conn(move |conn| {
                // Positions are row numbers, so equal times still get
                // distinct positions. The first match is the user's best.
                let stmt = r#"
                    SELECT r.pos
                    FROM (
                        SELECT
                            username,
                            ROW_NUMBER () OVER (
                                ORDER BY time ASC, id ASC
                            ) pos
                        FROM rankings
                    ) r
                    WHERE r.username = ?1
                    ORDER BY r.pos ASC
                    LIMIT 1
                "#;
                conn.query_row(stmt, params![username], |row| row.get(0))
                    .optional()
            })
            .await?;
        Ok(pos.map(|pos| pos as usize))
    }

    async fn nb_entries(&self) -> Result<i64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM rankings", params![], |row| row.get(0))
        })
        .await
    }
}
