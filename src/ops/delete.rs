//! The delete handler.
//!
//! Iterates the selection: mapped entities are deleted row by row so their
//! cascade rules apply; raw tables get one bulk DELETE with the same filter
//! condition. A failure on one target is logged and does not stop the
//! remaining targets.

use std::sync::{Arc, Mutex};

use rusqlite::{params, types::Value, Connection};
use tracing::{info, warn};

use crate::{
    compose::Statement,
    criteria::SyncMode,
    error::QueryError,
    ops::{compilation, sync_probe, to_sql_refs},
    request::Outcome,
    selection::{EntityDef, Target},
};

pub(crate) fn run(
    db: &Arc<Mutex<Connection>>,
    stmt: &Statement,
    selection: &[Target],
    mode: SyncMode,
) -> Result<Outcome, QueryError> {
    // Without a rendered filter condition the statements below would hit
    // every row in each target; join-only criteria do not scope a delete.
    if !stmt.scopes_rows() {
        return Err(QueryError::MissingCriteria);
    }

    let mut conn = db.lock()?;
    let mut total = 0usize;

    for target in selection {
        let deleted = match target {
            Target::Entity(def) => delete_entity_rows(&mut conn, def, stmt),
            Target::Table(name) => delete_table_rows(&mut conn, name, stmt, mode),
        };
        match deleted {
            Ok(count) => total += count,
            Err(err) => warn!("delete failed for {}: {}", target.table_name(), err),
        }
    }

    // The aggregate result reflects the entire selection, so the check runs
    // only after every target has been processed.
    if total > 0 {
        info!("total of {} rows were deleted", total);
        Ok(Outcome::Done(true))
    } else {
        info!("no rows were deleted; check the filters or selection");
        Ok(Outcome::Done(false))
    }
}

/// Loads the matching primary keys, then deletes each row individually
/// inside one transaction, cascading to dependent rows first.
fn delete_entity_rows(
    conn: &mut Connection,
    def: &EntityDef,
    stmt: &Statement,
) -> Result<usize, QueryError> {
    let mut params = Vec::new();
    let mut sql = format!("SELECT {} FROM {}", def.primary_key, def.table);
    if let Some(where_sql) = stmt.where_clause(&mut params) {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }

    let keys: Vec<Value> = {
        let mut prepared = conn.prepare(&sql).map_err(compilation)?;
        let keys = prepared
            .query_map(to_sql_refs(&params).as_slice(), |row| {
                row.get::<_, Value>(0)
            })?
            .collect::<rusqlite::Result<Vec<Value>>>()?;
        keys
    };

    if keys.is_empty() {
        info!("no rows matched the filter for entity {}", def.table);
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for key in &keys {
        for cascade in def.cascades {
            tx.execute(
                &format!(
                    "DELETE FROM {} WHERE {} = ?",
                    cascade.table, cascade.foreign_key
                ),
                params![key],
            )?;
        }
        tx.execute(
            &format!("DELETE FROM {} WHERE {} = ?", def.table, def.primary_key),
            params![key],
        )?;
    }
    tx.commit()?;

    info!("deleted {} rows from {}", keys.len(), def.table);
    Ok(keys.len())
}

/// Issues a single bulk DELETE against a raw table handle.
fn delete_table_rows(
    conn: &mut Connection,
    table: &str,
    stmt: &Statement,
    mode: SyncMode,
) -> Result<usize, QueryError> {
    sync_probe(conn, table, stmt, mode)?;

    let mut params = Vec::new();
    let mut sql = format!("DELETE FROM {}", table);
    if let Some(where_sql) = stmt.where_clause(&mut params) {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }

    let tx = conn.transaction()?;
    let affected = {
        let mut prepared = tx.prepare(&sql).map_err(compilation)?;
        prepared.execute(to_sql_refs(&params).as_slice())?
    };
    tx.commit()?;

    if affected > 0 {
        info!("deleted {} rows from {}", affected, table);
    } else {
        info!("no rows matched the filter for table {}", table);
    }
    Ok(affected)
}
