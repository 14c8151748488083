//! Query renderer
//!
//! Renders a translated [`ListQuery`] onto parameter-bound SQL. Field names
//! are resolved through a static per-entity [`EntitySchema`]; only the
//! schema's column names are ever written into the SQL text, every value
//! travels as a bound parameter.

use shared::query::{CompareOp, Filter, FilterValue, ID_FIELD, ListQuery, PageWindow, SortKey};
use sqlx::query_builder::Separated;
use sqlx::{QueryBuilder, Sqlite};

use super::repository::{RepoError, RepoResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
}

/// Public field name mapped to its column
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: ColumnKind,
}

impl Field {
    pub const fn text(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            kind: ColumnKind::Text,
        }
    }

    pub const fn integer(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            kind: ColumnKind::Integer,
        }
    }
}

/// Field whitelist of one table
#[derive(Debug)]
pub struct EntitySchema {
    pub table: &'static str,
    pub fields: &'static [Field],
}

impl EntitySchema {
    /// Resolve a public field name
    pub fn field(&self, name: &str) -> RepoResult<&Field> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| RepoError::InvalidQuery(format!("Unknown field: {name}")))
    }

    /// Check every field a list query mentions, before any SQL is built
    pub fn check(&self, query: &ListQuery) -> RepoResult<()> {
        for condition in query.filter.conditions() {
            self.field(&condition.field)?;
        }
        for key in &query.sort {
            self.field(&key.field)?;
        }
        for name in query.projection.fields() {
            self.field(name)?;
        }
        Ok(())
    }
}

/// Start `SELECT <columns> FROM <table>` for the schema's table
pub fn select_from(schema: &EntitySchema, columns: &str) -> QueryBuilder<'static, Sqlite> {
    QueryBuilder::new(format!("SELECT {columns} FROM {}", schema.table))
}

/// Value converted to the column's type
#[derive(Debug, Clone, PartialEq)]
enum Bound {
    Text(String),
    Integer(i64),
}

impl Bound {
    fn convert(field: &Field, raw: &str) -> RepoResult<Self> {
        match field.kind {
            ColumnKind::Text => Ok(Bound::Text(raw.to_string())),
            ColumnKind::Integer => raw.trim().parse::<i64>().map(Bound::Integer).map_err(|_| {
                RepoError::InvalidQuery(format!("Invalid value for {}: {raw}", field.name))
            }),
        }
    }

    fn push(self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Bound::Text(v) => builder.push_bind(v),
            Bound::Integer(v) => builder.push_bind(v),
        };
    }

    fn push_separated(self, separated: &mut Separated<'_, '_, Sqlite, &'static str>) {
        match self {
            Bound::Text(v) => separated.push_bind(v),
            Bound::Integer(v) => separated.push_bind(v),
        };
    }
}

/// Append ` WHERE ... AND ...` (nothing for an empty filter)
pub fn push_filter(
    builder: &mut QueryBuilder<'_, Sqlite>,
    schema: &EntitySchema,
    filter: &Filter,
) -> RepoResult<()> {
    for (i, condition) in filter.conditions().iter().enumerate() {
        let field = schema.field(&condition.field)?;
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(field.column);

        match (condition.op, &condition.value) {
            (CompareOp::In, value) => {
                let values = match value {
                    FilterValue::Single(v) => std::slice::from_ref(v),
                    FilterValue::List(vs) => vs.as_slice(),
                };
                if values.is_empty() {
                    return Err(RepoError::InvalidQuery(format!(
                        "Empty value list for {}",
                        field.name
                    )));
                }
                let bound = values
                    .iter()
                    .map(|v| Bound::convert(field, v))
                    .collect::<RepoResult<Vec<_>>>()?;

                builder.push(" IN (");
                let mut separated = builder.separated(", ");
                for value in bound {
                    value.push_separated(&mut separated);
                }
                separated.push_unseparated(")");
            }
            (op, FilterValue::Single(raw)) => {
                let value = Bound::convert(field, raw)?;
                builder.push(" ").push(op.sql()).push(" ");
                value.push(builder);
            }
            (_, FilterValue::List(_)) => {
                return Err(RepoError::InvalidQuery(format!(
                    "Only [in] accepts a list of values ({})",
                    field.name
                )));
            }
        }
    }
    Ok(())
}

/// Append ` ORDER BY ...`, with `id` ascending as the final tiebreaker
pub fn push_order_by(
    builder: &mut QueryBuilder<'_, Sqlite>,
    schema: &EntitySchema,
    sort: &[SortKey],
) -> RepoResult<()> {
    let mut terms = Vec::with_capacity(sort.len() + 1);
    for key in sort {
        let field = schema.field(&key.field)?;
        terms.push(format!("{} {}", field.column, key.direction.sql()));
    }
    if !sort.iter().any(|k| k.field == ID_FIELD) {
        let id = schema.field(ID_FIELD)?;
        terms.push(format!("{} ASC", id.column));
    }

    builder.push(" ORDER BY ").push(terms.join(", "));
    Ok(())
}

/// Append ` LIMIT ? OFFSET ?` for the page window
pub fn push_window(builder: &mut QueryBuilder<'_, Sqlite>, window: PageWindow) {
    let offset = i64::try_from(window.start_index()).unwrap_or(i64::MAX);
    builder
        .push(" LIMIT ")
        .push_bind(i64::from(window.limit))
        .push(" OFFSET ")
        .push_bind(offset);
}
