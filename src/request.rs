//! The operation dispatcher.
//!
//! [`QueryRequest`] is the crate's surface: one constructible unit of work
//! taking a connection handle, a method, a selection, and optional
//! parameters, with a single `execute()` entry point. Validation happens
//! before any database interaction; every failure is caught at the
//! `execute()` boundary, logged, and surfaced as a false outcome — callers
//! never see a raw database fault. One execution attempt per call, no
//! retries.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use rusqlite::{types::Value, Connection};
use tracing::{error, info};

use crate::{
    compose::Statement,
    criteria::QueryParams,
    error::QueryError,
    ops,
    selection::Target,
    traits::FromRow,
};

/// The requested operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Select,
    Update,
    Delete,
    Drop,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Select => "select",
            Method::Update => "update",
            Method::Delete => "delete",
            Method::Drop => "drop",
        }
    }
}

impl FromStr for Method {
    type Err = QueryError;

    /// Parses a mode token; unrecognized modes are a usage error and no
    /// execution is attempted. Past this boundary the enum makes an invalid
    /// mode unrepresentable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Method::Select),
            "update" => Ok(Method::Update),
            "delete" => Ok(Method::Delete),
            "drop" => Ok(Method::Drop),
            other => Err(QueryError::InvalidMethod(other.to_string())),
        }
    }
}

/// The normalized result contract: a plain success flag (update, delete,
/// drop, and the exists path of select) or the complete matched row set.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Done(bool),
    Rows(Vec<Vec<Value>>),
}

impl Outcome {
    /// True for any non-failed outcome: a true flag or a row set (possibly
    /// empty).
    pub fn is_success(&self) -> bool {
        match self {
            Outcome::Done(flag) => *flag,
            Outcome::Rows(_) => true,
        }
    }

    /// The row set, when this outcome carries one.
    pub fn rows(&self) -> Option<&[Vec<Value>]> {
        match self {
            Outcome::Rows(rows) => Some(rows),
            Outcome::Done(_) => None,
        }
    }
}

/// A composed unit of work: method, selection, and optional criteria,
/// executed once against the injected connection.
pub struct QueryRequest {
    db: Arc<Mutex<Connection>>,
    method: Method,
    selection: Vec<Target>,
    params: Option<QueryParams>,
}

impl QueryRequest {
    pub fn new(
        db: Arc<Mutex<Connection>>,
        method: Method,
        selection: Vec<Target>,
        params: Option<QueryParams>,
    ) -> Self {
        Self {
            db,
            method,
            selection,
            params,
        }
    }

    /// Validates, dispatches, and normalizes the result.
    ///
    /// Usage errors and database failures alike are logged here and
    /// reported as `Outcome::Done(false)`; zero matched rows is not a
    /// failure and is reported by the handlers themselves.
    pub fn execute(&self) -> Outcome {
        match self.run() {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("{} query failed: {}", self.method.as_str(), err);
                Outcome::Done(false)
            }
        }
    }

    fn run(&self) -> Result<Outcome, QueryError> {
        if self.selection.is_empty() {
            return Err(QueryError::EmptySelection);
        }

        // Drop operates unconditionally on the selection; criteria are
        // ignored and the composer is not involved.
        if self.method == Method::Drop {
            info!("performing tables deletion...");
            return ops::drop::run(&self.db, &self.selection);
        }

        let params = self
            .params
            .as_ref()
            .filter(|p| p.has_criteria())
            .ok_or(QueryError::MissingCriteria)?;

        let stmt = Statement::compose(&self.selection, params)?;

        match self.method {
            Method::Select => {
                info!("performing selection...");
                ops::select::run(&self.db, &stmt, params.exists)
            }
            Method::Update => {
                info!("performing values update...");
                ops::update::run(
                    &self.db,
                    &stmt,
                    self.selection[0].table_name(),
                    &params.updated_values,
                    params.synchronize,
                )
            }
            Method::Delete => {
                info!("performing rows deletion...");
                ops::delete::run(&self.db, &stmt, &self.selection, params.synchronize)
            }
            Method::Drop => unreachable!("drop is dispatched before composition"),
        }
    }

    /// Typed select: maps the composed statement's rows through
    /// [`FromRow`]. Only valid for the select method.
    pub fn fetch_as<E: FromRow>(&self) -> Result<Vec<E>, QueryError> {
        if self.method != Method::Select {
            return Err(QueryError::InvalidMethod(self.method.as_str().to_string()));
        }
        if self.selection.is_empty() {
            return Err(QueryError::EmptySelection);
        }
        let params = self
            .params
            .as_ref()
            .filter(|p| p.has_criteria())
            .ok_or(QueryError::MissingCriteria)?;
        let stmt = Statement::compose(&self.selection, params)?;
        ops::select::fetch_as(&self.db, &stmt)
    }
}
