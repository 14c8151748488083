//! Typed filter expressions
//!
//! Query-string keys of the form `field` or `field[op]` become [`Condition`]s.
//! Operators are a closed enum; nothing from the query string is ever spliced
//! into a store query as text except field names, which the store checks
//! against its own whitelist.

use serde::{Deserialize, Serialize};

use super::QueryError;

/// Comparison operator of a single filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl CompareOp {
    /// Parse the bracketed verb of `field[verb]`
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    /// SQL comparison token
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::In => "IN",
        }
    }
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(String),
    List(Vec<String>),
}

/// `field op value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub op: CompareOp,
    pub value: FilterValue,
}

/// Conjunction of conditions (all must hold)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter with a single equality condition
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut filter = Self::new();
        filter.conditions.push(Condition {
            field: field.into(),
            op: CompareOp::Eq,
            value: FilterValue::Single(value.into()),
        });
        filter
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Add one raw `key=value` pair from the query string.
    ///
    /// `in` conditions on the same field accumulate into one list, so
    /// `a[in]=x,y` and `a[in]=x&a[in]=y` are equivalent.
    pub fn push_param(&mut self, key: &str, raw: &str) -> Result<(), QueryError> {
        let (field, op) = parse_key(key)?;

        if op == CompareOp::In {
            let items = split_list(raw);
            if let Some(existing) = self
                .conditions
                .iter_mut()
                .find(|c| c.field == field && c.op == CompareOp::In)
            {
                if let FilterValue::List(values) = &mut existing.value {
                    values.extend(items);
                }
                return Ok(());
            }
            if items.is_empty() {
                return Err(QueryError::EmptyList(field.to_string()));
            }
            self.conditions.push(Condition {
                field: field.to_string(),
                op,
                value: FilterValue::List(items),
            });
            return Ok(());
        }

        self.conditions.push(Condition {
            field: field.to_string(),
            op,
            value: FilterValue::Single(raw.to_string()),
        });
        Ok(())
    }
}

/// Split `field[verb]` into its parts; a bare `field` is an equality test.
fn parse_key(key: &str) -> Result<(&str, CompareOp), QueryError> {
    let Some(open) = key.find('[') else {
        if key.is_empty() || key.contains(']') {
            return Err(QueryError::MalformedKey(key.to_string()));
        }
        return Ok((key, CompareOp::Eq));
    };

    let field = &key[..open];
    let rest = &key[open + 1..];
    let verb = rest
        .strip_suffix(']')
        .filter(|v| !v.is_empty() && !v.contains('[') && !v.contains(']'))
        .ok_or_else(|| QueryError::MalformedKey(key.to_string()))?;
    if field.is_empty() {
        return Err(QueryError::MalformedKey(key.to_string()));
    }

    let op = CompareOp::from_verb(verb).ok_or_else(|| QueryError::UnsupportedOperator {
        field: field.to_string(),
        op: verb.to_string(),
    })?;
    Ok((field, op))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
