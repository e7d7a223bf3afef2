//! SQLite-backed friends and leaderboard store

use rusqlite::{params, Connection, ErrorCode};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::social::error::{SocialError, SocialResult};
use crate::social::types::{AccountabilityMetrics, Friend, LeaderboardEntry};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS friends (
    email TEXT PRIMARY KEY,
    name  TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS leaderboard (
    user_name    TEXT PRIMARY KEY,
    points       INTEGER NOT NULL,
    days_late    INTEGER NOT NULL,
    total_amount REAL NOT NULL
);
";

/// Friends and leaderboard persistence
///
/// Every statement is a single short query, so a mutex around one
/// connection is enough for the API's handlers.
pub struct SocialStore {
    conn: Mutex<Connection>,
}

impl SocialStore {
    /// Open (or create) the database at `path`; `:memory:` opens a private
    /// in-memory database.
    pub fn open(path: &str) -> SocialResult<Self> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Connection::open(path)?
        };

        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path, "Social store opened");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> SocialResult<Self> {
        Self::open(":memory:")
    }

    fn conn(&self) -> SocialResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| SocialError::Lock(e.to_string()))
    }

    pub fn add_friend(&self, friend: &Friend) -> SocialResult<()> {
        friend.validate()?;

        let result = self.conn()?.execute(
            "INSERT INTO friends (email, name) VALUES (?1, ?2)",
            params![friend.email, friend.name],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(SocialError::DuplicateFriend(friend.email.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a friend by email, returning how many rows were deleted
    pub fn remove_friend(&self, email: &str) -> SocialResult<usize> {
        let removed = self
            .conn()?
            .execute("DELETE FROM friends WHERE email = ?1", params![email])?;
        Ok(removed)
    }

    pub fn list_friends(&self) -> SocialResult<Vec<Friend>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT name, email FROM friends ORDER BY name")?;
        let friends = stmt
            .query_map([], |row| {
                Ok(Friend {
                    name: row.get(0)?,
                    email: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(friends)
    }

    /// Insert or replace a user's metrics
    pub fn upsert_metrics(&self, entry: &LeaderboardEntry) -> SocialResult<()> {
        entry.validate()?;

        let m = &entry.metrics;
        self.conn()?.execute(
            "INSERT INTO leaderboard (user_name, points, days_late, total_amount)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_name) DO UPDATE SET
                points = excluded.points,
                days_late = excluded.days_late,
                total_amount = excluded.total_amount",
            params![entry.user, m.points, m.days_late, m.total_amount],
        )?;
        Ok(())
    }

    /// Leaderboard ordered by points, highest first
    pub fn leaderboard(&self) -> SocialResult<Vec<LeaderboardEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT user_name, points, days_late, total_amount
             FROM leaderboard ORDER BY points DESC, user_name ASC",
        )?;
        let entries = stmt
            .query_map([], |row| {
                Ok(LeaderboardEntry {
                    user: row.get(0)?,
                    metrics: AccountabilityMetrics {
                        points: row.get(1)?,
                        days_late: row.get(2)?,
                        total_amount: row.get(3)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Cheap query used by the readiness probe
    pub fn ping(&self) -> bool {
        self.conn()
            .and_then(|conn| {
                conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                    .map_err(SocialError::from)
            })
            .is_ok()
    }
}
