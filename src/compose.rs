//! The statement composer.
//!
//! Builds the base retrieval statement from a selection and a
//! [`QueryParams`], applying criteria in a fixed order: filters (the
//! disjunction group, then the conjunction group, then each independent
//! expression), joins in listed order (honoring a `select_from` override),
//! then ordering. Composition only produces statement text and bound
//! parameters; it never touches the database.
//!
//! The composed WHERE clause is reusable: update and delete render it again
//! against their own statements, the same way the original select's filter
//! condition scopes them.

use rusqlite::types::Value;

use crate::{criteria::QueryParams, error::QueryError, selection::Target};

pub(crate) struct Statement<'a> {
    selection: &'a [Target],
    params: &'a QueryParams,
}

impl<'a> Statement<'a> {
    /// Validates the criteria and captures them for rendering.
    ///
    /// A `select_from` override that names no sources is a composition
    /// error; it aborts before any join is applied.
    pub fn compose(selection: &'a [Target], params: &'a QueryParams) -> Result<Self, QueryError> {
        if let Some(join) = &params.join {
            if join.select_from.as_ref().is_some_and(|sources| sources.is_empty()) {
                return Err(QueryError::MalformedJoin(
                    "select_from override names no sources".to_string(),
                ));
            }
        }
        Ok(Self { selection, params })
    }

    /// `table.*` per selection target, in selection order.
    fn projection(&self) -> String {
        self.selection
            .iter()
            .map(|t| format!("{}.*", t.table_name()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// FROM sources: the `select_from` override when given, otherwise the
    /// selection tables.
    fn from_clause(&self) -> String {
        let tables: Vec<&str> = match self.params.join.as_ref().and_then(|j| j.select_from.as_ref())
        {
            Some(sources) => sources.iter().map(Target::table_name).collect(),
            None => self.selection.iter().map(Target::table_name).collect(),
        };
        tables.join(", ")
    }

    /// Renders the JOIN clauses in listed order, binding any condition
    /// parameters.
    fn join_clause(&self, params: &mut Vec<Value>) -> String {
        let Some(join) = &self.params.join else {
            return String::new();
        };
        let mut sql = String::new();
        for (target, condition) in &join.expressions {
            sql.push_str(&format!(
                " JOIN {} ON {}",
                target.table_name(),
                condition(params)
            ));
        }
        sql
    }

    /// Whether the filter criteria render a WHERE clause. Join conditions
    /// scope a select's row set but cannot scope an update or delete, so
    /// those handlers refuse to run when this is false.
    pub fn scopes_rows(&self) -> bool {
        self.params.filter.as_ref().is_some_and(|f| !f.is_empty())
    }

    /// Renders the WHERE clause from the filter criteria, or `None` when no
    /// filters apply.
    ///
    /// Group order is fixed: the disjunction group, then the conjunction
    /// group, then each independent expression, all joined with AND.
    pub fn where_clause(&self, params: &mut Vec<Value>) -> Option<String> {
        let filter = self.params.filter.as_ref()?;
        let mut groups = Vec::new();

        if !filter.or_.is_empty() {
            let parts: Vec<String> = filter.or_.iter().map(|p| p(params)).collect();
            groups.push(format!("({})", parts.join(" OR ")));
        }
        if !filter.and_.is_empty() {
            let parts: Vec<String> = filter.and_.iter().map(|p| p(params)).collect();
            groups.push(format!("({})", parts.join(" AND ")));
        }
        for expression in &filter.expressions {
            groups.push(expression(params));
        }

        if groups.is_empty() {
            None
        } else {
            Some(groups.join(" AND "))
        }
    }

    /// Builds the full retrieval statement.
    pub fn build_select(&self) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let mut sql = format!("SELECT {} FROM {}", self.projection(), self.from_clause());

        sql.push_str(&self.join_clause(&mut params));

        if let Some(where_sql) = self.where_clause(&mut params) {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if let Some(order) = &self.params.order_by {
            if !order.expressions.is_empty() {
                sql.push_str(" ORDER BY ");
                sql.push_str(&order.render());
            }
        }

        (sql, params)
    }

    /// Builds an existence probe over the same criteria.
    pub fn build_exists(&self) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let mut inner = format!("SELECT 1 FROM {}", self.from_clause());

        inner.push_str(&self.join_clause(&mut params));

        if let Some(where_sql) = self.where_clause(&mut params) {
            inner.push_str(" WHERE ");
            inner.push_str(&where_sql);
        }

        (format!("SELECT EXISTS ({})", inner), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        criteria::{FilterParams, JoinParams, OrderByParams},
        expr::Col,
        traits::Expression as _,
    };

    const USERS: Target = Target::Table("users");
    const POSTS: Target = Target::Table("posts");

    const AGE: Col<i64> = Col::new("age");
    const NAME: Col<String> = Col::new("username");

    #[test]
    fn filter_groups_render_in_fixed_order() {
        let params = QueryParams::new().filter(
            FilterParams::new()
                .expr(AGE.not_null())
                .or_(NAME.eq("a".to_string()))
                .or_(NAME.eq("b".to_string()))
                .and_(AGE.gt(10))
                .and_(AGE.lt(90)),
        );
        let stmt = Statement::compose(&[USERS], &params).unwrap();
        let (sql, bound) = stmt.build_select();

        assert_eq!(
            sql,
            "SELECT users.* FROM users WHERE (username = ? OR username = ?) \
             AND (age > ? AND age < ?) AND age IS NOT NULL"
        );
        assert_eq!(bound.len(), 4);
    }

    #[test]
    fn join_uses_select_from_override() {
        let params = QueryParams::new()
            .filter(FilterParams::new().expr(AGE.gt(0)))
            .join(
                JoinParams::new()
                    .select_from(vec![USERS])
                    .on(POSTS, Col::<i64>::new("users.id").matches(Col::<i64>::new("posts.user_id"))),
            )
            .order_by(OrderByParams::new().by(Col::<i64>::new("users.id"), false));
        let stmt = Statement::compose(&[USERS, POSTS], &params).unwrap();
        let (sql, bound) = stmt.build_select();

        assert_eq!(
            sql,
            "SELECT users.*, posts.* FROM users JOIN posts ON users.id = posts.user_id \
             WHERE age > ? ORDER BY users.id ASC"
        );
        assert_eq!(bound, vec![rusqlite::types::Value::Integer(0)]);
    }

    #[test]
    fn empty_select_from_is_a_composition_error() {
        let params = QueryParams::new().join(JoinParams::new().select_from(vec![]).on(
            POSTS,
            Col::<i64>::new("users.id").matches(Col::<i64>::new("posts.user_id")),
        ));
        let result = Statement::compose(&[USERS], &params);
        assert!(matches!(result, Err(QueryError::MalformedJoin(_))));
    }

    #[test]
    fn exists_probe_wraps_the_same_criteria() {
        let params = QueryParams::new().filter(FilterParams::new().expr(NAME.eq("a".to_string())));
        let stmt = Statement::compose(&[USERS], &params).unwrap();
        let (sql, bound) = stmt.build_exists();

        assert_eq!(sql, "SELECT EXISTS (SELECT 1 FROM users WHERE username = ?)");
        assert_eq!(bound.len(), 1);
    }

    #[test]
    fn order_by_preserves_listed_order() {
        let params = QueryParams::new()
            .filter(FilterParams::new().expr(AGE.gt(0)))
            .order_by(OrderByParams::new().by(AGE, true).by(NAME, false));
        let stmt = Statement::compose(&[USERS], &params).unwrap();
        let (sql, _) = stmt.build_select();

        assert!(sql.ends_with("ORDER BY age DESC, username ASC"));
    }
}
