//! Catalog data access operations
//!
//! [`JokeStore`] is the injected handle every request handler works through.
//! Each public method is one independent operation. Operations that issue
//! more than one statement run inside a single transaction: the transaction
//! commits on success and rolls back when dropped on an early `?` return.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use tracing::debug;

use super::errors::{is_unique_violation, CatalogError, CatalogResult};
use super::model::{Category, CreatedJoke, Joke, JokeLink, VoteReceipt, VoteTally, VoteType};
use super::schema;

/// Reader connections opened by [`JokeStore::open`].
pub const DEFAULT_READ_CONNECTIONS: usize = 4;

const JOKES_IN_CATEGORY: &str = "FROM jokes \
     JOIN joke_categories ON jokes.id = joke_categories.joke_id \
     JOIN categories ON joke_categories.category_id = categories.id \
     WHERE categories.name = ?";

/// SQLite-backed joke catalog.
///
/// A file-backed store holds one writer connection and a pool of read-only
/// connections. The file runs in WAL mode, so readers work from the last
/// committed snapshot while a write is in flight, and concurrent writers are
/// queued by SQLite's own locking. Cloning is cheap; clones share the pool.
#[derive(Clone)]
pub struct JokeStore {
    writer: Arc<Mutex<Connection>>,
    readers: Arc<Vec<Mutex<Connection>>>,
    read_cursor: Arc<AtomicUsize>,
}

impl std::fmt::Debug for JokeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JokeStore")
            .field("read_connections", &self.readers.len())
            .finish_non_exhaustive()
    }
}

impl JokeStore {
    /// Opens (or creates) the catalog file at `path` and ensures the schema.
    pub fn open(path: impl AsRef<Path>) -> CatalogResult<Self> {
        Self::open_with_readers(path, DEFAULT_READ_CONNECTIONS)
    }

    /// Opens the catalog file with `read_connections` pooled readers.
    ///
    /// Zero readers routes every read through the writer connection.
    pub fn open_with_readers(
        path: impl AsRef<Path>,
        read_connections: usize,
    ) -> CatalogResult<Self> {
        let path = path.as_ref();
        let writer = schema::open_database(path)?;
        let readers = (0..read_connections)
            .map(|_| schema::open_reader(path).map(Mutex::new))
            .collect::<CatalogResult<Vec<_>>>()?;
        debug!(path = %path.display(), read_connections, "catalog opened");
        Ok(Self::from_connections(writer, readers))
    }

    /// Opens an isolated in-memory catalog.
    ///
    /// A private in-memory database cannot be shared between connections, so
    /// reads and writes use the one connection.
    pub fn open_in_memory() -> CatalogResult<Self> {
        let conn = schema::open_in_memory()?;
        Ok(Self::from_connections(conn, Vec::new()))
    }

    fn from_connections(writer: Connection, readers: Vec<Mutex<Connection>>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            readers: Arc::new(readers),
            read_cursor: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn write_connection(&self) -> CatalogResult<MutexGuard<'_, Connection>> {
        self.writer.lock().map_err(|_| poisoned())
    }

    /// Picks a reader round-robin, preferring an idle one.
    fn read_connection(&self) -> CatalogResult<MutexGuard<'_, Connection>> {
        let len = self.readers.len();
        if len == 0 {
            return self.write_connection();
        }
        let start = self.read_cursor.fetch_add(1, Ordering::Relaxed) % len;
        for step in 0..len {
            match self.readers[(start + step) % len].try_lock() {
                Ok(guard) => return Ok(guard),
                Err(TryLockError::WouldBlock) => continue,
                Err(TryLockError::Poisoned(_)) => return Err(poisoned()),
            }
        }
        self.readers[start].lock().map_err(|_| poisoned())
    }

    /// Cheap round trip used by health checks.
    pub fn readiness(&self) -> CatalogResult<()> {
        let conn = self.read_connection()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    // ==================
    // Reads
    // ==================

    /// One joke chosen uniformly from all jokes, or `None` if there are none.
    pub fn random_joke(&self) -> CatalogResult<Option<Joke>> {
        let mut conn = self.read_connection()?;
        pick_random_joke(&mut conn, "FROM jokes", &[])
    }

    /// One joke chosen uniformly from those linked to `category`.
    ///
    /// An unknown category is indistinguishable from an empty one.
    pub fn random_joke_in_category(&self, category: &str) -> CatalogResult<Option<Joke>> {
        let mut conn = self.read_connection()?;
        pick_random_joke(&mut conn, JOKES_IN_CATEGORY, &[&category])
    }

    /// All categories in insertion order.
    pub fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let conn = self.read_connection()?;
        let mut stmt = conn.prepare_cached("SELECT id, name FROM categories ORDER BY id")?;
        let categories = stmt
            .query_map([], Category::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// All jokes linked to `category`, ordered by id.
    pub fn jokes_in_category(&self, category: &str) -> CatalogResult<Vec<Joke>> {
        let conn = self.read_connection()?;
        let sql = format!(
            "SELECT {} {} ORDER BY jokes.id",
            Joke::COLUMNS,
            JOKES_IN_CATEGORY
        );
        let mut stmt = conn.prepare_cached(&sql)?;
        let jokes = stmt
            .query_map(params![category], Joke::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(jokes)
    }

    pub fn joke_by_id(&self, id: i64) -> CatalogResult<Joke> {
        let conn = self.read_connection()?;
        let sql = format!("SELECT {} FROM jokes WHERE id = ?1", Joke::COLUMNS);
        conn.query_row(&sql, params![id], Joke::from_row)
            .optional()?
            .ok_or_else(CatalogError::joke_not_found)
    }

    /// Like/dislike counts recomputed from the vote log.
    pub fn vote_tally(&self, joke_id: i64) -> CatalogResult<VoteTally> {
        let mut conn = self.read_connection()?;
        let tx = conn.transaction()?;
        if !joke_exists(&tx, joke_id)? {
            return Err(CatalogError::joke_not_found());
        }
        let (likes, dislikes) = tx.query_row(
            "SELECT COALESCE(SUM(type = 'like'), 0), COALESCE(SUM(type = 'dislike'), 0) \
             FROM votes WHERE joke_id = ?1",
            params![joke_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        tx.commit()?;
        Ok(VoteTally {
            joke_id,
            likes,
            dislikes,
        })
    }

    // ==================
    // Writes
    // ==================

    /// Creates a category. Names are unique; a duplicate is a conflict.
    pub fn create_category(&self, name: &str) -> CatalogResult<Category> {
        if name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "Category name is required".to_string(),
            ));
        }

        let conn = self.write_connection()?;
        match conn.execute("INSERT INTO categories (name) VALUES (?1)", params![name]) {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(CatalogError::Conflict(format!(
                    "Category '{}' already exists",
                    name
                )))
            }
            Err(e) => return Err(e.into()),
        }

        let category = Category {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
        };
        debug!(category_id = category.id, name, "category created");
        Ok(category)
    }

    /// Inserts a joke and links it to an existing category.
    ///
    /// The category is resolved first; nothing is written when it is absent.
    pub fn create_joke_in_category(&self, category: &str, text: &str) -> CatalogResult<CreatedJoke> {
        if text.trim().is_empty() {
            return Err(CatalogError::Validation("Joke text is required".to_string()));
        }

        let mut conn = self.write_connection()?;
        let tx = conn.transaction()?;

        let category_id =
            category_id(&tx, category)?.ok_or_else(CatalogError::category_not_found)?;

        tx.execute("INSERT INTO jokes (text) VALUES (?1)", params![text])?;
        let joke_id = tx.last_insert_rowid();
        tx.execute(
            "INSERT INTO joke_categories (joke_id, category_id) VALUES (?1, ?2)",
            params![joke_id, category_id],
        )?;
        tx.commit()?;

        debug!(joke_id, category, "joke created");
        Ok(CreatedJoke {
            id: joke_id,
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    /// Links an existing joke to an existing category.
    pub fn link_joke_to_category(&self, joke_id: i64, category: &str) -> CatalogResult<JokeLink> {
        let mut conn = self.write_connection()?;
        let tx = conn.transaction()?;

        let category_id =
            category_id(&tx, category)?.ok_or_else(CatalogError::category_not_found)?;
        if !joke_exists(&tx, joke_id)? {
            return Err(CatalogError::joke_not_found());
        }

        match tx.execute(
            "INSERT INTO joke_categories (joke_id, category_id) VALUES (?1, ?2)",
            params![joke_id, category_id],
        ) {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(CatalogError::Conflict(
                    "Joke already belongs to the category".to_string(),
                ))
            }
            Err(e) => return Err(e.into()),
        }
        tx.commit()?;

        debug!(joke_id, category, "joke linked to category");
        Ok(JokeLink {
            joke_id,
            category: category.to_string(),
        })
    }

    /// Applies one vote: increments the counter in place and appends to the
    /// vote log, atomically.
    pub fn vote(&self, joke_id: i64, vote: VoteType) -> CatalogResult<VoteReceipt> {
        let mut conn = self.write_connection()?;
        let tx = conn.transaction()?;

        let column = vote.counter_column();
        let changed = tx.execute(
            &format!("UPDATE jokes SET {column} = {column} + 1 WHERE id = ?1"),
            params![joke_id],
        )?;
        if changed == 0 {
            return Err(CatalogError::joke_not_found());
        }
        tx.execute(
            "INSERT INTO votes (joke_id, type) VALUES (?1, ?2)",
            params![joke_id, vote.as_str()],
        )?;
        tx.commit()?;

        debug!(joke_id, vote = vote.as_str(), "vote recorded");
        Ok(VoteReceipt::new(joke_id, vote))
    }
}

fn poisoned() -> CatalogError {
    CatalogError::Storage("connection mutex poisoned".to_string())
}

fn category_id(conn: &Connection, name: &str) -> CatalogResult<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM categories WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

fn joke_exists(conn: &Connection, id: i64) -> CatalogResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM jokes WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Counts the qualifying rows, then fetches the one at a uniformly drawn
/// offset. Both statements share a read transaction so they see one snapshot.
fn pick_random_joke(
    conn: &mut Connection,
    from_where: &str,
    args: &[&dyn ToSql],
) -> CatalogResult<Option<Joke>> {
    let tx = conn.transaction()?;

    let count: i64 = tx.query_row(&format!("SELECT COUNT(*) {}", from_where), args, |row| {
        row.get(0)
    })?;
    if count == 0 {
        return Ok(None);
    }

    let offset = rand::thread_rng().gen_range(0..count);
    let mut pick_args: Vec<&dyn ToSql> = args.to_vec();
    pick_args.push(&offset);

    let sql = format!(
        "SELECT {} {} ORDER BY jokes.id LIMIT 1 OFFSET ?",
        Joke::COLUMNS,
        from_where
    );
    let joke = tx
        .query_row(&sql, pick_args.as_slice(), Joke::from_row)
        .optional()?;
    tx.commit()?;
    Ok(joke)
}
