//! Macros for defining entity schemas.
//!
//! [`define_entity!`] generates a module with the table name, an
//! [`crate::EntityDef`] carrying the schema handle and cascade rules, and
//! typed column constants.

/// Defines a module with an entity definition and typed column constants.
///
/// # Syntax
///
/// ```ignore
/// define_entity!(
///     users {
///         table: "users",
///         primary_key: "id",
///         schema: "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY, username TEXT)",
///         cascades: [("posts", "user_id")],
///         columns: {
///             ID: i64 => "id",
///             USERNAME: String => "username"
///         }
///     }
/// );
/// ```
///
/// The `cascades` list is optional. The expansion provides:
///
/// - `users::TABLE` — the table name
/// - `users::DEF` — an `EntityDef` usable as `Target::Entity(&users::DEF)`
/// - one `Col<T>` constant per column
///
/// `Vec<T>` and `Option<Vec<T>>` column types are detected as JSON columns
/// and read back as text for [`crate::helpers::from_optional_json`].
#[macro_export]
macro_rules! define_entity {
    (
        $entity:ident {
            table: $table:literal,
            primary_key: $pk:literal,
            schema: $schema:expr,
            columns: {
                $($col_name:ident: $col_type:ty => $db_col:literal),* $(,)?
            }
        }
    ) => {
        $crate::define_entity!(
            $entity {
                table: $table,
                primary_key: $pk,
                schema: $schema,
                cascades: [],
                columns: {
                    $($col_name: $col_type => $db_col),*
                }
            }
        );
    };
    (
        $entity:ident {
            table: $table:literal,
            primary_key: $pk:literal,
            schema: $schema:expr,
            cascades: [$(($cascade_table:literal, $foreign_key:literal)),* $(,)?],
            columns: {
                $($col_name:ident: $col_type:ty => $db_col:literal),* $(,)?
            }
        }
    ) => {
        pub mod $entity {
            pub const TABLE: &str = $table;

            pub const DEF: $crate::selection::EntityDef = $crate::selection::EntityDef {
                table: $table,
                primary_key: $pk,
                schema: $schema,
                cascades: &[
                    $($crate::selection::Cascade {
                        table: $cascade_table,
                        foreign_key: $foreign_key,
                    }),*
                ],
            };

            $(
                $crate::define_column!($col_name, $col_type, $db_col);
            )*
        }
    };
}

#[macro_export]
macro_rules! define_column {
    // JSON detection - Vec<T>
    ($name:ident, Vec<$inner:ty>, $db_col:literal) => {
        pub const $name: $crate::expr::Col<String> = $crate::expr::Col::json($db_col);
    };

    // JSON detection - Option<Vec<T>>
    ($name:ident, Option<Vec<$inner:ty>>, $db_col:literal) => {
        pub const $name: $crate::expr::Col<Option<String>> = $crate::expr::Col::json($db_col);
    };

    // Optional regular types
    ($name:ident, Option<$inner:ty>, $db_col:literal) => {
        pub const $name: $crate::expr::Col<Option<$inner>> = $crate::expr::Col::new($db_col);
    };

    // Regular types (fallback)
    ($name:ident, $type:ty, $db_col:literal) => {
        pub const $name: $crate::expr::Col<$type> = $crate::expr::Col::new($db_col);
    };
}
