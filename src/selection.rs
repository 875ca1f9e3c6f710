//! Query targets: mapped entities and raw table handles.
//!
//! A selection is an ordered list of [`Target`]s. The two kinds behave
//! differently under delete (row-by-row with cascades vs. one bulk
//! statement) and drop (only entities carry a schema handle).

/// A single query target.
///
/// The kind is decided once, here, rather than inspected repeatedly inside
/// the operation handlers.
#[derive(Clone, Copy, Debug)]
pub enum Target {
    /// A mapped entity with a declared schema and cascade rules.
    Entity(&'static EntityDef),
    /// A schema-level table reference with no associated mapped type.
    Table(&'static str),
}

impl Target {
    /// The backing table name, used for statement text and log lines.
    pub fn table_name(&self) -> &'static str {
        match self {
            Target::Entity(def) => def.table,
            Target::Table(name) => name,
        }
    }

    /// The entity definition, when this target is a mapped entity.
    ///
    /// Raw table handles return `None`; drop skips them with a warning.
    pub(crate) fn schema(&self) -> Option<&'static EntityDef> {
        match self {
            Target::Entity(def) => Some(def),
            Target::Table(_) => None,
        }
    }
}

/// Declaration of a mapped entity: table name, primary key, the DDL that
/// creates its backing table, and the cascade rules applied by entity-level
/// deletes.
///
/// Usually generated by [`crate::define_entity!`].
#[derive(Debug)]
pub struct EntityDef {
    pub table: &'static str,
    pub primary_key: &'static str,
    pub schema: &'static str,
    pub cascades: &'static [Cascade],
}

/// A relationship cascade: rows in `table` whose `foreign_key` references a
/// deleted entity row are deleted along with it.
#[derive(Debug)]
pub struct Cascade {
    pub table: &'static str,
    pub foreign_key: &'static str,
}
