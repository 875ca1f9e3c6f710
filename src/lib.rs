//! A multifunctional query facade over SQLite.
//!
//! Declare entities or raw table handles, compose filter/join/order
//! criteria, and dispatch select, update, delete, or drop through a single
//! [`QueryRequest`] that normalizes every result to a boolean or a row set.

pub mod connection;
pub mod criteria;
pub mod error;
pub mod expr;
pub mod helpers;
pub mod macros;
pub mod request;
pub mod selection;
pub mod traits;

mod compose;
mod ops;

pub use connection::{ConnectionConfig, Database};
pub use criteria::{FilterParams, JoinParams, OrderByParams, QueryParams, SyncMode};
pub use error::{QueryError, QueryResult};
pub use helpers::*;
pub use request::{Method, Outcome, QueryRequest};
pub use selection::{Cascade, EntityDef, Target};
pub use traits::FromRow;
