//! Keyword search demo rules

use crate::error::{Result, TastyError};
use crate::pagination::Page;
use serde::Deserialize;
use tasty_types::SearchResponse;

pub const MIN_QUERY_CHARS: usize = 3;
pub const MAX_QUERY_CHARS: usize = 50;
pub const DEFAULT_SEARCH_LIMIT: i64 = 5;
pub const MAX_SEARCH_LIMIT: i64 = 100;
/// Size of the generated result set
pub const RESULT_COUNT: usize = 100;

/// Raw search query values
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub q: String,
    pub page: Page,
}

impl SearchRequest {
    pub fn from_params(params: SearchParams) -> Result<Self> {
        let q = params
            .q
            .ok_or_else(|| TastyError::validation("q is required"))?;
        let chars = q.chars().count();
        if !(MIN_QUERY_CHARS..=MAX_QUERY_CHARS).contains(&chars) {
            return Err(TastyError::validation(format!(
                "q must be between {} and {} characters",
                MIN_QUERY_CHARS, MAX_QUERY_CHARS
            )));
        }

        let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(TastyError::validation(format!(
                "limit must be between 1 and {}",
                MAX_SEARCH_LIMIT
            )));
        }
        let page = Page::from_params(params.offset, Some(limit), 0)
            .map_err(|_| TastyError::validation("offset must be greater than or equal to 0"))?;

        Ok(Self { q, page })
    }

    pub fn run(&self) -> SearchResponse {
        let all: Vec<String> = (1..=RESULT_COUNT)
            .map(|i| format!("{}_result_{}", self.q, i))
            .collect();

        SearchResponse {
            query: self.q.clone(),
            limit: self.page.limit,
            offset: self.page.skip,
            results: self.page.slice(&all).to_vec(),
            message: "search succeeded".to_string(),
        }
    }
}
