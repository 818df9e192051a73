//! Query execution engine
//!
//! Runs the three queries behind a search in a fixed order: total count
//! first, then the aggregate, then the page of records when the count
//! warrants it. Each storage call runs under the configured query
//! deadline so a slow database surfaces as a technical error instead of a
//! hung request.
//!
//! The three queries do not share a transaction. A record written between
//! the count and the page fetch can make `total` and `data` diverge
//! slightly under concurrent writes; reads stay lock-free by accepting
//! that.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::builder::DeviceQuery;
use super::envelope::ResultEnvelope;
use super::page::PageRequest;
use super::sort::SortSpec;
use crate::db::traits::DeviceStore;
use crate::{Error, Result};

pub struct DeviceQueryEngine {
    store: Arc<dyn DeviceStore>,
    query_timeout: Duration,
}

impl DeviceQueryEngine {
    pub fn new(store: Arc<dyn DeviceStore>, query_timeout: Duration) -> Self {
        Self {
            store,
            query_timeout,
        }
    }

    /// Execute a resolved search and assemble the result envelope.
    ///
    /// Lookup queries (an identifier is active) that match nothing are a
    /// not-found error naming the identifier; listing queries that match
    /// nothing return an empty envelope.
    pub async fn execute(
        &self,
        query: &DeviceQuery,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> Result<ResultEnvelope> {
        let total = self
            .with_deadline("count", self.store.count(query))
            .await?
            .unwrap_or(0);
        debug!(total, "resolved match count");

        if total <= 0 {
            if let (Some(kind), Some(value)) = (query.identifier.kind(), query.identifier.value()) {
                return Err(Error::DeviceNotFound {
                    identifier: kind.display_name().to_string(),
                    value: value.to_string(),
                });
            }
        }

        // The aggregate runs even for an empty listing so the envelope
        // always carries per-state counts over the filter scope.
        let aggregate = self
            .with_deadline("aggregate", self.store.fetch_aggregate(query))
            .await?;

        let data = if total > 0 {
            self.with_deadline("page", self.store.fetch_page(query, sort, page))
                .await?
        } else {
            Vec::new()
        };

        Ok(ResultEnvelope::new(page, total, aggregate, data))
    }

    async fn with_deadline<T>(
        &self,
        stage: &str,
        future: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.query_timeout, future).await {
            Ok(result) => result,
            Err(_) => Err(Error::Technical(format!(
                "{stage} query exceeded the {:?} deadline",
                self.query_timeout
            ))),
        }
    }
}
