//! Core traits that power query composition.
//!
//! - [`Expression`] builds SQL predicate fragments with bound parameters.
//! - [`FromRow`] converts database rows into Rust types for the typed
//!   select path.

use rusqlite::{types::Value, Row};

use crate::expr::ops::{BinaryOp, ColumnEq, InOp, LikeOp, LogicalOp, NullOp};

/// A trait for types that can be rendered as SQL expressions.
///
/// Implementors include [`crate::expr::Col`] (a table column) and the
/// compound operators in [`crate::expr::ops`]. When `to_sql` is called, the
/// expression appends its bound values to `params` and returns a SQL
/// fragment with `?` placeholders.
///
/// # Example
///
/// ```rust
/// use polyquery::expr::Col;
/// use polyquery::traits::Expression as _;
///
/// let col = Col::<String>::new("username");
/// let expr = col.eq("anthony".to_string());
/// let mut params = vec![];
/// let sql = expr.to_sql(&mut params); // "username = ?"
/// ```
pub trait Expression: Sized {
    /// Renders this expression as a SQL fragment, pushing bound values onto
    /// `params` in placeholder order.
    fn to_sql(&self, params: &mut Vec<Value>) -> String;

    /// Creates a SQL `=` condition against a bound value.
    fn eq<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "=", value.into())
    }

    /// Creates a SQL `!=` condition.
    fn ne<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "!=", value.into())
    }

    /// Creates a SQL `>` condition.
    fn gt<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, ">", value.into())
    }

    /// Creates a SQL `<` condition.
    fn lt<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "<", value.into())
    }

    /// Creates a SQL `>=` condition.
    fn gte<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, ">=", value.into())
    }

    /// Creates a SQL `<=` condition.
    fn lte<T: Into<Value>>(self, value: T) -> BinaryOp<Self> {
        BinaryOp::new(self, "<=", value.into())
    }

    /// Creates a SQL `LIKE` condition with the pattern wrapped in `%`.
    fn like(self, pattern: impl Into<String>) -> LikeOp<Self> {
        LikeOp::new(self, pattern.into(), false)
    }

    /// Creates a case-insensitive `LIKE` condition.
    fn ilike(self, pattern: impl Into<String>) -> LikeOp<Self> {
        LikeOp::new(self, pattern.into(), true)
    }

    /// Creates a SQL `IN` condition.
    fn in_<T, I>(self, values: I) -> InOp<Self>
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter().map(|v| v.into()).collect();
        InOp::new(self, values, false)
    }

    /// Creates a SQL `NOT IN` condition.
    fn not_in<T, I>(self, values: I) -> InOp<Self>
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter().map(|v| v.into()).collect();
        InOp::new(self, values, true)
    }

    /// Creates a SQL `IS NULL` condition.
    fn null(self) -> NullOp<Self> {
        NullOp::new(self, true)
    }

    /// Creates a SQL `IS NOT NULL` condition.
    fn not_null(self) -> NullOp<Self> {
        NullOp::new(self, false)
    }

    /// Compares this expression against another expression rather than a
    /// bound value. This is the building block for JOIN conditions,
    /// e.g. `users.id = posts.user_id`.
    fn matches<E: Expression>(self, other: E) -> ColumnEq<Self, E> {
        ColumnEq::new(self, other)
    }

    /// Combines two expressions with `AND`.
    fn and<E: Expression>(self, other: E) -> LogicalOp<Self, E> {
        LogicalOp::new(self, other, "AND")
    }

    /// Combines two expressions with `OR`.
    fn or<E: Expression>(self, other: E) -> LogicalOp<Self, E> {
        LogicalOp::new(self, other, "OR")
    }
}

/// A trait for types that can be constructed from a SQLite row.
///
/// Used by the typed select path ([`crate::QueryRequest::fetch_as`]) to map
/// query results into entity structs.
///
/// # Example
///
/// ```rust
/// use polyquery::FromRow;
///
/// struct User {
///     id: i64,
///     username: String,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
///         Ok(User {
///             id: row.get("id")?,
///             username: row.get("username")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
