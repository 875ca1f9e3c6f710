//! Typed database column references.
//!
//! `Col<T>` ties a column name to a Rust type `T` so filters and update
//! payloads stay readable at the call site. It implements [`Expression`],
//! so a column can appear directly in predicates and join conditions.

use std::marker::PhantomData;

use rusqlite::types::Value;

use crate::traits::Expression;

/// A typed reference to a database column.
///
/// The type parameter `T` documents the expected Rust type when reading the
/// column; it is not enforced at runtime, so keep `FromRow` implementations
/// in sync with the schema.
///
/// # Example
///
/// ```rust
/// use polyquery::expr::Col;
/// const USERNAME: Col<String> = Col::new("username");
/// ```
#[derive(Clone, Copy)]
pub struct Col<T> {
    pub name: &'static str,
    pub is_json: bool,
    _type: PhantomData<T>,
}

impl<T> Col<T> {
    /// Creates a new column reference for the given database column name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            is_json: false,
            _type: PhantomData,
        }
    }

    /// Marks this column as JSON so SELECT projections read it back as text.
    pub const fn json(name: &'static str) -> Self {
        Self {
            name,
            is_json: true,
            _type: PhantomData,
        }
    }

    /// The projection expression for this column.
    pub fn select_expr(&self) -> String {
        if self.is_json {
            format!("json({}) AS {}", self.name, self.name)
        } else {
            self.name.to_string()
        }
    }
}

impl<T> Expression for Col<T> {
    fn to_sql(&self, _params: &mut Vec<Value>) -> String {
        self.name.to_string()
    }
}
