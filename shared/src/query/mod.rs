//! Query translator for list endpoints
//!
//! Turns the raw query-string pairs of a list request into a [`ListQuery`]:
//! a typed [`Filter`], a sort order, a [`Projection`] and a [`PageWindow`].
//! Translation is pure; the store decides which field names exist.
//!
//! ```
//! use shared::query::{CompareOp, ListQuery};
//!
//! let pairs = vec![
//!     ("postalcode[gte]".to_string(), "10000".to_string()),
//!     ("sort".to_string(), "name".to_string()),
//!     ("page".to_string(), "2".to_string()),
//! ];
//! let query = ListQuery::from_pairs(&pairs).unwrap();
//! assert_eq!(query.filter.conditions()[0].op, CompareOp::Gte);
//! assert_eq!(query.window.page, 2);
//! ```

mod filter;
mod pagination;
mod projection;
mod sort;

pub use filter::{CompareOp, Condition, Filter, FilterValue};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, PageLink, PageWindow, Pagination};
pub use projection::{ID_FIELD, Projection};
pub use sort::{SortDirection, SortKey, parse_sort};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// Keys that control the query instead of filtering it
pub const RESERVED_KEYS: [&str; 4] = ["select", "sort", "page", "limit"];

/// Sort applied when the request has none
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Malformed query parameter: {0}")]
    MalformedKey(String),

    #[error("Unsupported operator '{op}' on field '{field}'")]
    UnsupportedOperator { field: String, op: String },

    #[error("Empty value list for {0}[in]")]
    EmptyList(String),

    #[error("Cannot mix inclusion and exclusion in select")]
    MixedProjection,
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::invalid_request(err.to_string())
    }
}

/// Fully translated list request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub filter: Filter,
    pub sort: Vec<SortKey>,
    pub projection: Projection,
    pub window: PageWindow,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            sort: vec![SortKey::desc(DEFAULT_SORT_FIELD)],
            projection: Projection::All,
            window: PageWindow::default(),
        }
    }
}

impl ListQuery {
    /// Translate raw query-string pairs.
    ///
    /// Reserved keys never reach the filter. When a reserved key repeats, the
    /// last occurrence wins.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, QueryError> {
        let reserved = |name: &str| {
            pairs
                .iter()
                .rev()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        let mut filter = Filter::new();
        for (key, value) in pairs
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
        {
            filter.push_param(key, value)?;
        }

        let sort = reserved("sort").map(parse_sort).unwrap_or_default();
        let sort = if sort.is_empty() {
            vec![SortKey::desc(DEFAULT_SORT_FIELD)]
        } else {
            sort
        };

        let projection = match reserved("select") {
            Some(raw) => Projection::parse(raw)?,
            None => Projection::All,
        };

        Ok(Self {
            filter,
            sort,
            projection,
            window: PageWindow::parse(reserved("page"), reserved("limit")),
        })
    }
}
