//! Field projection parsed from `select=a,b,c`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::QueryError;

/// Field that survives every projection
pub const ID_FIELD: &str = "id";

/// Which fields of each record are returned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    All,
    /// Only these fields (plus `id`)
    Include(Vec<String>),
    /// Every field except these
    Exclude(Vec<String>),
}

impl Projection {
    /// Parse `a,b,c` (inclusion) or `-a,-b` (exclusion).
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let mut include = Vec::new();
        let mut exclude = Vec::new();

        for segment in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match segment.strip_prefix('-') {
                Some(field) => {
                    let field = field.trim();
                    if field.is_empty() {
                        return Err(QueryError::MalformedKey(segment.to_string()));
                    }
                    push_unique(&mut exclude, field);
                }
                None => push_unique(&mut include, segment),
            }
        }

        match (include.is_empty(), exclude.is_empty()) {
            (true, true) => Ok(Self::All),
            (false, true) => Ok(Self::Include(include)),
            (true, false) => Ok(Self::Exclude(exclude)),
            (false, false) => Err(QueryError::MixedProjection),
        }
    }

    /// Field names mentioned by the projection
    pub fn fields(&self) -> &[String] {
        match self {
            Self::All => &[],
            Self::Include(fields) | Self::Exclude(fields) => fields.as_slice(),
        }
    }

    /// Apply to one serialized record. Non-object values pass through.
    pub fn apply(&self, record: Value) -> Value {
        let Value::Object(mut object) = record else {
            return record;
        };

        match self {
            Self::All => Value::Object(object),
            Self::Include(fields) => {
                let mut projected = Map::new();
                if let Some(id) = object.remove(ID_FIELD) {
                    projected.insert(ID_FIELD.to_string(), id);
                }
                for field in fields {
                    if let Some(value) = object.remove(field) {
                        projected.insert(field.clone(), value);
                    }
                }
                Value::Object(projected)
            }
            Self::Exclude(fields) => {
                for field in fields.iter().filter(|f| f.as_str() != ID_FIELD) {
                    object.remove(field);
                }
                Value::Object(object)
            }
        }
    }
}

fn push_unique(fields: &mut Vec<String>, field: &str) {
    if !fields.iter().any(|f| f == field) {
        fields.push(field.to_string());
    }
}
