//! The drop handler.
//!
//! Iterates the selection unconditionally, ignoring filter and join
//! criteria. Targets without a schema handle are skipped with a warning.
//! Valid targets are dropped only when their backing table still exists;
//! an already-absent table is a logged no-op. Per-target failures are
//! caught and logged, and the operation reports success once the whole
//! selection has been processed, even when nothing was dropped.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::{info, warn};

use crate::{error::QueryError, request::Outcome, selection::Target};

pub(crate) fn run(db: &Arc<Mutex<Connection>>, selection: &[Target]) -> Result<Outcome, QueryError> {
    let conn = db.lock()?;
    let mut dropped = 0usize;

    for target in selection {
        let Some(def) = target.schema() else {
            warn!(
                "skipping selection without a schema handle: {}",
                target.table_name()
            );
            continue;
        };

        match table_exists(&conn, def.table) {
            Ok(false) => {
                info!("table {} is already absent; skipping drop", def.table);
                continue;
            }
            Err(err) => {
                warn!("could not check table {}: {}", def.table, err);
                continue;
            }
            Ok(true) => {}
        }

        info!("attempting to drop table {}", def.table);
        match conn.execute(&format!("DROP TABLE {}", def.table), []) {
            Ok(_) => dropped += 1,
            Err(err) => warn!("error while dropping table {}: {}", def.table, err),
        }
    }

    info!("{}/{} tables were dropped", dropped, selection.len());

    // Final release step: discard any statements still cached against the
    // dropped tables.
    conn.flush_prepared_statement_cache();
    Ok(Outcome::Done(true))
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
    )?;
    Ok(stmt.query_row([name], |row| row.get(0))?)
}
