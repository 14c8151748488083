//! Sort keys parsed from `sort=a,-b`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Parse a comma list of sort keys; a leading `-` means descending.
///
/// Blank segments are skipped. Returns an empty list when nothing usable is
/// left, so the caller can apply its default.
pub fn parse_sort(raw: &str) -> Vec<SortKey> {
    raw.split(',')
        .map(str::trim)
        .filter_map(|segment| match segment.strip_prefix('-') {
            Some(field) if !field.trim().is_empty() => Some(SortKey::desc(field.trim())),
            Some(_) => None,
            None if !segment.is_empty() => Some(SortKey::asc(segment)),
            None => None,
        })
        .collect()
}
