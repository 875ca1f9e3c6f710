//! The criteria model: value structures describing what a query applies.
//!
//! Every field is optional; absence means "not applied". Composition logic
//! short-circuits on absent sub-structures, so an empty [`QueryParams`]
//! carries no criteria at all. Predicates are stored as boxed closures that
//! render SQL and push bound parameters, so the same criteria can be
//! rendered into a select, an exists probe, and the WHERE clause of an
//! update or delete.

use rusqlite::types::Value;

use crate::{expr::Col, selection::Target, traits::Expression};

/// A stored predicate: renders a SQL fragment and appends its bound values.
pub(crate) type Predicate = Box<dyn Fn(&mut Vec<Value>) -> String>;

fn predicate(expr: impl Expression + 'static) -> Predicate {
    Box::new(move |params| expr.to_sql(params))
}

/// Filter criteria, combined additively: the disjunction group, the
/// conjunction group, and each independent expression are all ANDed into
/// the final WHERE clause.
#[derive(Default)]
pub struct FilterParams {
    pub(crate) or_: Vec<Predicate>,
    pub(crate) and_: Vec<Predicate>,
    pub(crate) expressions: Vec<Predicate>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate to the disjunction group (`a OR b OR ...`).
    pub fn or_(mut self, expr: impl Expression + 'static) -> Self {
        self.or_.push(predicate(expr));
        self
    }

    /// Adds a predicate to the conjunction group (`a AND b AND ...`).
    pub fn and_(mut self, expr: impl Expression + 'static) -> Self {
        self.and_.push(predicate(expr));
        self
    }

    /// Adds an independent conjunctive predicate.
    pub fn expr(mut self, expr: impl Expression + 'static) -> Self {
        self.expressions.push(predicate(expr));
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.or_.is_empty() && self.and_.is_empty() && self.expressions.is_empty()
    }
}

/// Join criteria: ordered `(target, condition)` pairs plus an optional
/// explicit source list overriding the default FROM inference.
#[derive(Default)]
pub struct JoinParams {
    pub(crate) expressions: Vec<(Target, Predicate)>,
    pub(crate) select_from: Option<Vec<Target>>,
}

impl JoinParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a join against `target` on `condition`. Joins are applied in
    /// the order they are added.
    pub fn on(mut self, target: Target, condition: impl Expression + 'static) -> Self {
        self.expressions.push((target, predicate(condition)));
        self
    }

    /// Overrides the FROM sources instead of deriving them from the
    /// selection.
    pub fn select_from(mut self, sources: Vec<Target>) -> Self {
        self.select_from = Some(sources);
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.expressions.is_empty() && self.select_from.is_none()
    }
}

/// An ORDER BY entry.
pub(crate) struct OrderClause {
    pub column: String,
    pub desc: bool,
}

/// Ordering criteria, applied in listed order; the first entry has the
/// highest precedence.
#[derive(Default)]
pub struct OrderByParams {
    pub(crate) expressions: Vec<OrderClause>,
}

impl OrderByParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sort expression.
    pub fn by<T>(mut self, col: Col<T>, desc: bool) -> Self {
        self.expressions.push(OrderClause {
            column: col.name.to_string(),
            desc,
        });
        self
    }

    pub(crate) fn render(&self) -> String {
        self.expressions
            .iter()
            .map(|o| format!("{} {}", o.column, if o.desc { "DESC" } else { "ASC" }))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Strategy for reconciling caller-side state with rows changed by a bulk
/// update or delete.
///
/// There is no ORM session here, so `Fetch` pre-fetches the affected rowids
/// and reports them through the log stream before the statement runs;
/// `Auto` and `Evaluate` rely on the statement's change count; `Disabled`
/// skips the probe entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    Auto,
    Fetch,
    Evaluate,
    #[default]
    Disabled,
}

/// Aggregate query parameters consumed once per request.
///
/// `updated_values` must be non-empty when the operation is update; its
/// absence is a usage error, not a no-op.
#[derive(Default)]
pub struct QueryParams {
    pub(crate) filter: Option<FilterParams>,
    pub(crate) exists: bool,
    pub(crate) join: Option<JoinParams>,
    pub(crate) synchronize: SyncMode,
    pub(crate) updated_values: Vec<(String, Value)>,
    pub(crate) order_by: Option<OrderByParams>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: FilterParams) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Makes a select yield only existence, not rows.
    pub fn exists(mut self) -> Self {
        self.exists = true;
        self
    }

    pub fn join(mut self, join: JoinParams) -> Self {
        self.join = Some(join);
        self
    }

    pub fn synchronize(mut self, mode: SyncMode) -> Self {
        self.synchronize = mode;
        self
    }

    /// Adds a column/value pair to the update payload.
    pub fn set<T, V: Into<Value>>(mut self, col: Col<T>, value: V) -> Self {
        self.updated_values.push((col.name.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, order: OrderByParams) -> Self {
        self.order_by = Some(order);
        self
    }

    /// Whether any filter or join criteria are present. Select, update and
    /// delete reject requests without them.
    pub(crate) fn has_criteria(&self) -> bool {
        self.filter.as_ref().is_some_and(|f| !f.is_empty())
            || self.join.as_ref().is_some_and(|j| !j.is_empty())
    }
}
