//! Per-operation execution against the live connection.
//!
//! Each handler takes the connection mutex for the duration of one
//! operation; the guard's drop releases it on every exit path. Update and
//! delete commit their own transaction before returning. Database failures
//! never propagate raw past the dispatcher: select and update report them
//! upward to be caught at the `execute()` boundary, delete and drop catch
//! them per target and continue.

use rusqlite::{types::Value, Connection, ToSql};
use tracing::debug;

use crate::{compose::Statement, criteria::SyncMode, error::QueryError};

pub(crate) mod delete;
pub(crate) mod drop;
pub(crate) mod select;
pub(crate) mod update;

/// Borrows bound values as `ToSql` trait objects for statement execution.
pub(crate) fn to_sql_refs(params: &[Value]) -> Vec<&dyn ToSql> {
    params.iter().map(|v| v as &dyn ToSql).collect()
}

pub(crate) fn compilation(err: rusqlite::Error) -> QueryError {
    QueryError::Compilation(err.to_string())
}

/// The `Fetch` synchronization strategy: pre-fetch the rowids a bulk update
/// or delete is about to touch so callers can reconcile in-memory state.
/// The other modes rely on the statement's change count or skip the probe.
pub(crate) fn sync_probe(
    conn: &Connection,
    table: &str,
    stmt: &Statement,
    mode: SyncMode,
) -> Result<(), QueryError> {
    if mode != SyncMode::Fetch {
        return Ok(());
    }

    let mut params = Vec::new();
    let mut sql = format!("SELECT rowid FROM {}", table);
    if let Some(where_sql) = stmt.where_clause(&mut params) {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }

    let mut prepared = conn.prepare(&sql)?;
    let rowids: Vec<i64> = prepared
        .query_map(to_sql_refs(&params).as_slice(), |row| row.get(0))?
        .filter_map(Result::ok)
        .collect();
    debug!(
        "synchronize=fetch: {} affected rowids in {}: {:?}",
        rowids.len(),
        table,
        rowids
    );
    Ok(())
}
