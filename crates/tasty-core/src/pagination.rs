//! Offset/limit pagination shared by every list endpoint

use crate::error::{Result, TastyError};
use serde::Deserialize;

/// Limit used when a list endpoint is called without one
pub const DEFAULT_LIMIT: usize = 100;

/// Validated offset/limit window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }

    /// Build a page from raw query values, rejecting negative numbers
    pub fn from_params(
        skip: Option<i64>,
        limit: Option<i64>,
        default_limit: usize,
    ) -> Result<Self> {
        let skip = non_negative("skip", skip.unwrap_or(0))?;
        let limit = match limit {
            Some(limit) => non_negative("limit", limit)?,
            None => default_limit,
        };
        Ok(Self { skip, limit })
    }

    /// Window of `items`: `min(limit, max(0, len - skip))` elements in order
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.skip.min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }

    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIMIT)
    }
}

fn non_negative(field: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        TastyError::validation(format!("{} must be greater than or equal to 0", field))
    })
}

/// Raw `skip` / `limit` query values
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Raw common list parameters: free-text `q` plus paging
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommonParams {
    pub q: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Validated common list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonQuery {
    pub q: Option<String>,
    pub page: Page,
}

impl CommonQuery {
    pub fn from_params(params: CommonParams, default_limit: usize) -> Result<Self> {
        let page = Page::from_params(params.skip, params.limit, default_limit)?;
        let q = params
            .q
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        Ok(Self { q, page })
    }

    /// `q` wrapped for a SQL `LIKE ... ESCAPE '\'` substring match.
    /// Wildcards typed by the client match literally.
    pub fn like_pattern(&self) -> Option<String> {
        self.q.as_ref().map(|q| {
            let mut pattern = String::with_capacity(q.len() + 2);
            pattern.push('%');
            for c in q.chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}
