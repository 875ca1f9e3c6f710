//! The update handler.

use std::sync::{Arc, Mutex};

use rusqlite::{types::Value, Connection};
use tracing::info;

use crate::{
    compose::Statement,
    criteria::SyncMode,
    error::QueryError,
    ops::{compilation, sync_probe, to_sql_refs},
    request::Outcome,
};

/// Builds an UPDATE scoped to the base statement's filter condition, runs
/// it inside its own transaction, and commits.
///
/// Returns true iff at least one row was affected. Zero matched rows is a
/// valid outcome, reported as false with an informational log line.
pub(crate) fn run(
    db: &Arc<Mutex<Connection>>,
    stmt: &Statement,
    table: &str,
    updates: &[(String, Value)],
    mode: SyncMode,
) -> Result<Outcome, QueryError> {
    if updates.is_empty() {
        return Err(QueryError::MissingUpdateValues);
    }
    // An UPDATE with no rendered filter condition would write every row in
    // the table; join-only criteria do not scope an update.
    if !stmt.scopes_rows() {
        return Err(QueryError::MissingCriteria);
    }

    let mut params = Vec::new();
    let sets: Vec<String> = updates
        .iter()
        .map(|(column, value)| {
            params.push(value.clone());
            format!("{} = ?", column)
        })
        .collect();

    let mut sql = format!("UPDATE {} SET {}", table, sets.join(", "));
    if let Some(where_sql) = stmt.where_clause(&mut params) {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }

    let mut conn = db.lock()?;
    sync_probe(&conn, table, stmt, mode)?;

    let tx = conn.transaction()?;
    let affected = {
        let mut prepared = tx.prepare(&sql).map_err(compilation)?;
        prepared.execute(to_sql_refs(&params).as_slice())?
    };
    tx.commit()?;

    if affected >= 1 {
        info!("{} rows were updated successfully", affected);
        Ok(Outcome::Done(true))
    } else {
        info!("no rows were updated; check the provided filters and values");
        Ok(Outcome::Done(false))
    }
}
