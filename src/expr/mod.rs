//! Expression types for building SQL conditions.
//!
//! This module contains the building blocks of filter predicates and join
//! conditions.

pub mod column;
pub mod ops;

pub use column::Col;
