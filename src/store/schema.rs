//! Catalog schema
//!
//! Four tables: `jokes`, `categories`, `joke_categories` and `votes`.
//! Creation is idempotent and runs in a single transaction, so opening an
//! already-initialized store is a no-op.

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use super::errors::{CatalogError, CatalogResult};

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS jokes (
        id INTEGER PRIMARY KEY,
        text TEXT NOT NULL,
        likes INTEGER NOT NULL DEFAULT 0 CHECK (likes >= 0),
        dislikes INTEGER NOT NULL DEFAULT 0 CHECK (dislikes >= 0)
    );
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS joke_categories (
        joke_id INTEGER NOT NULL,
        category_id INTEGER NOT NULL,
        PRIMARY KEY (joke_id, category_id),
        FOREIGN KEY (joke_id) REFERENCES jokes(id) ON DELETE CASCADE,
        FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE CASCADE
    );
    CREATE TABLE IF NOT EXISTS votes (
        id INTEGER PRIMARY KEY,
        joke_id INTEGER NOT NULL,
        type TEXT NOT NULL CHECK (type IN ('like', 'dislike')),
        FOREIGN KEY (joke_id) REFERENCES jokes(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_joke_categories_category
        ON joke_categories(category_id);
    CREATE INDEX IF NOT EXISTS idx_votes_joke ON votes(joke_id);
";

/// Opens (or creates) a file-backed catalog database.
pub fn open_database(path: &Path) -> CatalogResult<Connection> {
    ensure_parent_dir(path)?;
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
    let mut conn = Connection::open_with_flags(path, flags)?;
    apply_pragmas(&conn)?;
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    initialize_schema(&mut conn)?;
    Ok(conn)
}

/// Opens an additional read connection on an initialized catalog file.
///
/// Under WAL, readers see the last committed snapshot and never wait on the
/// writer.
pub fn open_reader(path: &Path) -> CatalogResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE;
    let conn = Connection::open_with_flags(path, flags)?;
    apply_pragmas(&conn)?;
    conn.execute_batch("PRAGMA query_only = ON;")?;
    Ok(conn)
}

/// Opens a private in-memory catalog database.
pub fn open_in_memory() -> CatalogResult<Connection> {
    let mut conn = Connection::open_in_memory()?;
    apply_pragmas(&conn)?;
    initialize_schema(&mut conn)?;
    Ok(conn)
}

/// Foreign keys are off by default in SQLite and must be enabled per connection.
fn apply_pragmas(conn: &Connection) -> CatalogResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

/// Creates any missing tables and indexes.
pub fn initialize_schema(conn: &mut Connection) -> CatalogResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA)?;
    tx.commit()?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> CatalogResult<()> {
    if path.as_os_str().is_empty() {
        return Err(CatalogError::Storage(
            "database path must not be empty".to_string(),
        ));
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| CatalogError::Storage(format!("cannot create {}: {}", parent.display(), e))),
        _ => Ok(()),
    }
}
