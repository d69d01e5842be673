//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the whole application state as one JSON blob under a single
//!   storage slot.
//! - Keep SQL and encoding details inside the persistence boundary.
//!
//! # Invariants
//! - There is exactly one snapshot slot; every save overwrites it.
//! - Load never fails on blob content: a blob that does not decode is
//!   logged and treated as absent.

use crate::db::DbError;
use crate::model::app_state::AppState;
use log::warn;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

const SNAPSHOT_SLOT: &str = "state";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The in-memory state could not be encoded to JSON.
    Encode(serde_json::Error),
    /// The connection is missing the snapshot schema.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode state snapshot: {err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Load/save contract for whole-state snapshots.
///
/// The store is generic over this trait so tests can substitute failing or
/// in-memory implementations.
pub trait SnapshotRepository {
    /// Returns the persisted state, or `None` when no usable snapshot
    /// exists.
    fn load(&self) -> RepoResult<Option<AppState>>;
    /// Overwrites the snapshot with the given state.
    fn save(&mut self, state: &AppState) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository over a migrated connection.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, "snapshots")? {
            return Err(RepoError::MissingRequiredTable("snapshots"));
        }
        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load(&self) -> RepoResult<Option<AppState>> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM snapshots WHERE slot = ?1;")?;
        let mut rows = stmt.query([SNAPSHOT_SLOT])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let body: String = row.get("body")?;

        match serde_json::from_str(&body) {
            Ok(state) => Ok(Some(state)),
            Err(err) => {
                // Corrupt or schema-mismatched blob: discard and start
                // fresh rather than surfacing an error.
                warn!("event=snapshot_load module=repo status=discarded error={err}");
                Ok(None)
            }
        }
    }

    fn save(&mut self, state: &AppState) -> RepoResult<()> {
        let body = serde_json::to_string(state)?;
        self.conn.execute(
            "INSERT INTO snapshots (slot, body, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(slot) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at;",
            params![SNAPSHOT_SLOT, body],
        )?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
