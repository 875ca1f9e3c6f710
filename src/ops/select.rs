//! The select handler.

use std::sync::{Arc, Mutex};

use rusqlite::{types::Value, Connection};
use tracing::info;

use crate::{
    compose::Statement,
    error::QueryError,
    ops::{compilation, to_sql_refs},
    request::Outcome,
    traits::FromRow,
};

/// Executes the composed statement. With `exists` set, the database
/// evaluates existence and the outcome is a plain boolean; otherwise the
/// complete matched row set is returned, with no implicit limit or
/// pagination.
pub(crate) fn run(
    db: &Arc<Mutex<Connection>>,
    stmt: &Statement,
    exists: bool,
) -> Result<Outcome, QueryError> {
    let conn = db.lock()?;

    if exists {
        let (sql, params) = stmt.build_exists();
        let mut prepared = conn.prepare(&sql).map_err(compilation)?;
        let found: bool = prepared.query_row(to_sql_refs(&params).as_slice(), |row| row.get(0))?;
        Ok(Outcome::Done(found))
    } else {
        let (sql, params) = stmt.build_select();
        let mut prepared = conn.prepare(&sql).map_err(compilation)?;
        let width = prepared.column_count();
        let rows = prepared
            .query_map(to_sql_refs(&params).as_slice(), |row| {
                (0..width)
                    .map(|idx| row.get::<_, Value>(idx))
                    .collect::<rusqlite::Result<Vec<Value>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        info!("{} rows selected", rows.len());
        Ok(Outcome::Rows(rows))
    }
}

/// Typed variant of the select path: maps each row through [`FromRow`].
pub(crate) fn fetch_as<E: FromRow>(
    db: &Arc<Mutex<Connection>>,
    stmt: &Statement,
) -> Result<Vec<E>, QueryError> {
    let conn = db.lock()?;
    let (sql, params) = stmt.build_select();
    let mut prepared = conn.prepare(&sql).map_err(compilation)?;
    let rows = prepared
        .query_map(to_sql_refs(&params).as_slice(), E::from_row)?
        .collect::<rusqlite::Result<Vec<E>>>()?;
    Ok(rows)
}
