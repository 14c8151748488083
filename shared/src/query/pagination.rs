//! Page window arithmetic and next/prev links

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 25;

/// `page`/`limit` pair selecting `[start_index, start_index + limit)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageWindow {
    /// Permissive parse: anything that is not a positive integer falls back
    /// to the default for that parameter.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: page.and_then(parse_positive).unwrap_or(DEFAULT_PAGE),
            limit: limit.and_then(parse_positive).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn start_index(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.limit)
    }

    pub fn end_index(&self) -> u64 {
        u64::from(self.page) * u64::from(self.limit)
    }
}

/// Leading-digits integer parse: `"12abc"` is 12, `"abc"`, `"0"` and `"-3"`
/// are rejected. Values beyond `u32::MAX` saturate.
fn parse_positive(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: &str = &unsigned[..unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len())];
    if digits.is_empty() {
        return None;
    }

    // only overflow can fail here, digits are all ASCII
    let value = digits
        .parse::<u64>()
        .unwrap_or(u64::MAX)
        .min(u64::from(u32::MAX));
    u32::try_from(value).ok().filter(|v| *v > 0)
}

/// Link to an adjacent page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub page: u32,
    pub limit: u32,
}

/// Pagination block of a list response; serializes as `{}` when both links
/// are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageLink>,
}

impl Pagination {
    /// `next` iff `end_index < total`, `prev` iff `start_index > 0`
    pub fn for_window(window: PageWindow, total: u64) -> Self {
        let next = (window.end_index() < total).then(|| PageLink {
            page: window.page.saturating_add(1),
            limit: window.limit,
        });
        let prev = (window.start_index() > 0).then(|| PageLink {
            page: window.page - 1,
            limit: window.limit,
        });
        Self { next, prev }
    }
}
