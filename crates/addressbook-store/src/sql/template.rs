use crate::error::{Result, StoreError};
use crate::sql::provider::ConnectionProvider;
use rusqlite::{Connection, Row, Statement};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedKeys {
    Return,
    Ignore,
}

/// Binder for statements without placeholders.
pub fn no_params(_stmt: &mut Statement<'_>) -> rusqlite::Result<()> {
    Ok(())
}

/// A prepared statement together with the connection it was prepared on.
pub struct Prepared<'conn> {
    stmt: Statement<'conn>,
    conn: &'conn Connection,
    keys: GeneratedKeys,
    inserts: bool,
}

impl<'conn> Prepared<'conn> {
    pub fn statement(&mut self) -> &mut Statement<'conn> {
        &mut self.stmt
    }

    /// Runs the statement and returns the keys it generated, if requested.
    ///
    /// Only `INSERT`/`REPLACE` statements generate keys. SQLite assigns
    /// consecutive rowids within one insert, so the keys end at the last
    /// inserted rowid.
    pub fn execute_update(&mut self) -> rusqlite::Result<Option<Vec<i64>>> {
        let affected = self.stmt.raw_execute()?;
        match self.keys {
            GeneratedKeys::Ignore => Ok(None),
            GeneratedKeys::Return if affected == 0 || !self.inserts => Ok(Some(Vec::new())),
            GeneratedKeys::Return => {
                let last = self.conn.last_insert_rowid();
                let first = last - affected as i64 + 1;
                Ok(Some((first..=last).collect()))
            }
        }
    }
}

fn is_insert(sql: &str) -> bool {
    let keyword = sql
        .trim_start()
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or_default();
    keyword.eq_ignore_ascii_case("insert") || keyword.eq_ignore_ascii_case("replace")
}

struct ConnectionGuard<'p, P: ConnectionProvider> {
    provider: &'p P,
    conn: Option<Connection>,
}

impl<'p, P: ConnectionProvider> ConnectionGuard<'p, P> {
    fn acquire(provider: &'p P) -> Result<Self> {
        let conn = provider.acquire()?;
        Ok(Self {
            provider,
            conn: Some(conn),
        })
    }
}

impl<P: ConnectionProvider> Drop for ConnectionGuard<'_, P> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.provider.release(conn);
        }
    }
}

/// Runs SQL against connections from `P`, releasing them on every path.
///
/// Driver errors come back as [`StoreError::Sql`] once the statement and
/// connection have been released. Nothing is retried.
pub struct SqlTemplate<P> {
    provider: P,
}

impl<P: ConnectionProvider> SqlTemplate<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let guard = ConnectionGuard::acquire(&self.provider)?;
        let conn = guard.conn.as_ref().ok_or(StoreError::ConnectionBusy)?;
        f(conn)
    }

    pub fn execute<T, B, F>(&self, sql: &str, keys: GeneratedKeys, bind: B, process: F) -> Result<T>
    where
        B: FnOnce(&mut Statement<'_>) -> rusqlite::Result<()>,
        F: FnOnce(&mut Prepared<'_>) -> rusqlite::Result<T>,
    {
        debug!(sql, "executing statement");
        self.with_connection(|conn| {
            let stmt = conn.prepare(sql)?;
            let mut prepared = Prepared {
                stmt,
                conn,
                keys,
                inserts: is_insert(sql),
            };
            bind(&mut prepared.stmt)?;
            let result = process(&mut prepared)?;
            Ok(result)
        })
        .inspect_err(|err| debug!(sql, error = %err, "statement failed"))
    }

    pub fn query<T, B, M>(&self, sql: &str, bind: B, mut map_row: M) -> Result<Vec<T>>
    where
        B: FnOnce(&mut Statement<'_>) -> rusqlite::Result<()>,
        M: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.execute(sql, GeneratedKeys::Ignore, bind, |prepared| {
            let mut rows = prepared.statement().raw_query();
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(map_row(row)?);
            }
            Ok(items)
        })
    }

    pub fn query_one<T, B, M>(&self, sql: &str, bind: B, map_row: M) -> Result<Option<T>>
    where
        B: FnOnce(&mut Statement<'_>) -> rusqlite::Result<()>,
        M: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        Ok(self.query(sql, bind, map_row)?.into_iter().next())
    }

    /// Runs a statement that returns no rows. With [`GeneratedKeys::Return`]
    /// the generated keys are collected (empty for statements that insert
    /// nothing), otherwise `None` is returned.
    pub fn update<B>(&self, sql: &str, keys: GeneratedKeys, bind: B) -> Result<Option<Vec<i64>>>
    where
        B: FnOnce(&mut Statement<'_>) -> rusqlite::Result<()>,
    {
        self.execute(sql, keys, bind, |prepared| prepared.execute_update())
    }

    pub fn insert_returning_key<B>(&self, sql: &str, bind: B) -> Result<i64>
    where
        B: FnOnce(&mut Statement<'_>) -> rusqlite::Result<()>,
    {
        self.update(sql, GeneratedKeys::Return, bind)?
            .and_then(|keys| keys.last().copied())
            .ok_or(StoreError::MissingGeneratedKey)
    }
}
