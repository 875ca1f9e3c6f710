//! Error types for polyquery.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while validating, composing, or executing a query.
///
/// Usage errors are detected before any database interaction. Zero matched
/// or affected rows is never an error; it surfaces as a false outcome.
#[derive(Error, Diagnostic, Debug)]
pub enum QueryError {
    #[error("Invalid query method: {0}")]
    #[diagnostic(
        code(polyquery::usage::method),
        help("Use one of 'select', 'update', 'delete' or 'drop'")
    )]
    InvalidMethod(String),

    #[error("No tables or entities selected for querying")]
    #[diagnostic(
        code(polyquery::usage::selection),
        help("Provide at least one entity or raw table target")
    )]
    EmptySelection,

    #[error("No parameters for the database query were provided")]
    #[diagnostic(
        code(polyquery::usage::criteria),
        help("Select, update and delete require filter or join criteria; only drop runs without them")
    )]
    MissingCriteria,

    #[error("No values provided for updating columns")]
    #[diagnostic(
        code(polyquery::usage::update_values),
        help("Call QueryParams::set for every column the update should write")
    )]
    MissingUpdateValues,

    #[error("Malformed join specification: {0}")]
    #[diagnostic(
        code(polyquery::usage::join),
        help("Joins are (target, condition) pairs; a select_from override must name at least one source")
    )]
    MalformedJoin(String),

    #[error("Statement compilation failed: {0}")]
    #[diagnostic(code(polyquery::compile))]
    Compilation(String),

    #[error("Statement execution failed: {0}")]
    #[diagnostic(code(polyquery::execute))]
    Execution(#[from] rusqlite::Error),

    #[error("Database connection failed: {0}")]
    #[diagnostic(
        code(polyquery::connection),
        help("Check that the database file exists and is accessible")
    )]
    Connection(String),

    #[error("Thread lock poison error")]
    #[diagnostic(code(polyquery::poison))]
    PoisonError,
}

impl<T> From<std::sync::PoisonError<T>> for QueryError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::PoisonError
    }
}

/// Result type alias for polyquery operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
