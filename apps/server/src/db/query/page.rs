//! Pagination resolution
//!
//! Parses free-text `page` and `size` parameters into a bounded
//! `PageRequest`. Blank inputs fall back to configured defaults;
//! malformed or out-of-range inputs fail fast with a validation error
//! naming the problem.

use crate::config::PagingConfig;
use crate::{Error, Result};

/// Validated 1-based pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Resolve raw text inputs against the configured bounds.
    pub fn resolve(
        page_text: Option<&str>,
        size_text: Option<&str>,
        paging: &PagingConfig,
    ) -> Result<Self> {
        let page = match non_blank(page_text) {
            None => 1,
            Some(raw) => {
                let parsed: i64 = raw.parse().map_err(|_| {
                    Error::Validation("page and size must be unsigned numbers".to_string())
                })?;
                if parsed <= 0 {
                    return Err(Error::Validation(
                        "page should be greater than zero".to_string(),
                    ));
                }
                u32::try_from(parsed).map_err(|_| {
                    Error::Validation("page should be greater than zero".to_string())
                })?
            }
        };

        let size = match non_blank(size_text) {
            None => paging.default_size,
            Some(raw) => {
                let parsed: i64 = raw.parse().map_err(|_| {
                    Error::Validation("page and size must be unsigned numbers".to_string())
                })?;
                if parsed <= 0 || parsed > i64::from(paging.max_size) {
                    return Err(Error::Validation(format!(
                        "size must be between 1 and {}",
                        paging.max_size
                    )));
                }
                parsed as u32
            }
        };

        Ok(Self { page, size })
    }

    /// SQL offset for this window.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.size)
    }

    /// SQL limit for this window.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

fn non_blank(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}
