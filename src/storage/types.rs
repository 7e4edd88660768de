use thiserror::Error;

/// Failures opening or migrating the state database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Another board process holds the SQLite lock.
    #[error("Another instance of tldr-board appears to be running. Please close it and try again.")]
    InstanceLocked,

    #[error("Database migration failed: {0}")]
    Migration(String),

    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

/// Lowercased message fragments SQLite uses for lock contention.
const LOCK_MESSAGES: &[&str] = &[
    "database is locked",
    "database table is locked",
    "sqlite_busy",
    "sqlite_locked",
    "unable to open database file",
];

/// SQLITE_BUSY, SQLITE_LOCKED, SQLITE_CANTOPEN.
const LOCK_CODES: &[i32] = &[5, 6, 14];

fn is_lock_error(err: &sqlx::Error) -> bool {
    let code = err
        .as_database_error()
        .and_then(|e| e.code())
        .and_then(|code| code.parse::<i32>().ok());
    // Extended result codes carry the primary code in the low byte
    if code.is_some_and(|code| LOCK_CODES.contains(&(code & 0xff))) {
        return true;
    }
    let message = err.to_string().to_lowercase();
    LOCK_MESSAGES.iter().any(|m| message.contains(m))
}

impl DatabaseError {
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if is_lock_error(&err) {
            DatabaseError::InstanceLocked
        } else {
            DatabaseError::Other(err)
        }
    }

    /// Like [`Self::from_sqlx`], but other failures are reported as a migration error.
    pub(crate) fn from_migration(err: sqlx::Error) -> Self {
        if is_lock_error(&err) {
            DatabaseError::InstanceLocked
        } else {
            DatabaseError::Migration(err.to_string())
        }
    }
}
