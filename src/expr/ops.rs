//! SQL expression operators.
//!
//! Compound expressions like `col = ?`, `col LIKE ?`, or `a.id = b.a_id`.
//! Each implements [`Expression`] and recursively renders SQL fragments,
//! pushing bound values in placeholder order.

use rusqlite::types::Value;

use crate::traits::Expression;

/// A binary comparison against a bound value (`=`, `>`, `<=`, ...).
pub struct BinaryOp<L> {
    left: L,
    op: &'static str,
    right: Value,
}

impl<L> BinaryOp<L> {
    pub fn new(left: L, op: &'static str, right: Value) -> Self {
        Self { left, op, right }
    }
}

impl<L: Expression> Expression for BinaryOp<L> {
    fn to_sql(&self, params: &mut Vec<Value>) -> String {
        let left_sql = self.left.to_sql(params);
        params.push(self.right.clone());
        format!("{} {} ?", left_sql, self.op)
    }
}

/// A comparison between two expressions, with no bound value.
///
/// Used for JOIN conditions where both sides are columns.
pub struct ColumnEq<L, R> {
    left: L,
    right: R,
}

impl<L, R> ColumnEq<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L: Expression, R: Expression> Expression for ColumnEq<L, R> {
    fn to_sql(&self, params: &mut Vec<Value>) -> String {
        let left_sql = self.left.to_sql(params);
        let right_sql = self.right.to_sql(params);
        format!("{} = {}", left_sql, right_sql)
    }
}

/// A `LIKE` or case-insensitive `LIKE` pattern match.
pub struct LikeOp<L> {
    left: L,
    pattern: String,
    case_insensitive: bool,
}

impl<L> LikeOp<L> {
    pub const fn new(left: L, pattern: String, case_insensitive: bool) -> Self {
        Self {
            left,
            pattern,
            case_insensitive,
        }
    }
}

impl<L: Expression> Expression for LikeOp<L> {
    fn to_sql(&self, params: &mut Vec<Value>) -> String {
        let left_sql = self.left.to_sql(params);
        params.push(format!("%{}%", self.pattern).into());
        if self.case_insensitive {
            format!("LOWER({}) LIKE LOWER(?)", left_sql)
        } else {
            format!("{} LIKE ?", left_sql)
        }
    }
}

/// An `IN` or `NOT IN` clause.
pub struct InOp<L> {
    left: L,
    values: Vec<Value>,
    negated: bool,
}

impl<L> InOp<L> {
    pub fn new(left: L, values: Vec<Value>, negated: bool) -> Self {
        Self {
            left,
            values,
            negated,
        }
    }
}

impl<L: Expression> Expression for InOp<L> {
    fn to_sql(&self, params: &mut Vec<Value>) -> String {
        let left_sql = self.left.to_sql(params);
        let placeholders = vec!["?"; self.values.len()].join(", ");
        for v in &self.values {
            params.push(v.clone());
        }
        let op = if self.negated { "NOT IN" } else { "IN" };
        format!("{} {} ({})", left_sql, op, placeholders)
    }
}

/// An `IS NULL` or `IS NOT NULL` check.
pub struct NullOp<L> {
    left: L,
    is_null: bool,
}

impl<L> NullOp<L> {
    pub fn new(left: L, is_null: bool) -> Self {
        Self { left, is_null }
    }
}

impl<L: Expression> Expression for NullOp<L> {
    fn to_sql(&self, params: &mut Vec<Value>) -> String {
        let left_sql = self.left.to_sql(params);
        let op = if self.is_null {
            "IS NULL"
        } else {
            "IS NOT NULL"
        };
        format!("{} {}", left_sql, op)
    }
}

/// Two expressions combined with `AND` or `OR`, parenthesized.
pub struct LogicalOp<L, R> {
    left: L,
    right: R,
    op: &'static str,
}

impl<L, R> LogicalOp<L, R> {
    pub fn new(left: L, right: R, op: &'static str) -> Self {
        Self { left, right, op }
    }
}

impl<L: Expression, R: Expression> Expression for LogicalOp<L, R> {
    fn to_sql(&self, params: &mut Vec<Value>) -> String {
        let left_sql = self.left.to_sql(params);
        let right_sql = self.right.to_sql(params);
        format!("({} {} {})", left_sql, self.op, right_sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Col;

    #[test]
    fn binary_op_binds_value() {
        let expr = Col::<i64>::new("age").gte(18);
        let mut params = vec![];
        assert_eq!(expr.to_sql(&mut params), "age >= ?");
        assert_eq!(params, vec![Value::Integer(18)]);
    }

    #[test]
    fn column_eq_binds_nothing() {
        let expr = Col::<i64>::new("users.id").matches(Col::<i64>::new("posts.user_id"));
        let mut params = vec![];
        assert_eq!(expr.to_sql(&mut params), "users.id = posts.user_id");
        assert!(params.is_empty());
    }

    #[test]
    fn logical_op_parenthesizes() {
        let expr = Col::<i64>::new("age")
            .lt(18)
            .or(Col::<i64>::new("age").gt(65));
        let mut params = vec![];
        assert_eq!(expr.to_sql(&mut params), "(age < ? OR age > ?)");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn in_op_expands_placeholders() {
        let expr = Col::<String>::new("category").in_(["a".to_string(), "b".to_string()]);
        let mut params = vec![];
        assert_eq!(expr.to_sql(&mut params), "category IN (?, ?)");
        assert_eq!(params.len(), 2);
    }
}
