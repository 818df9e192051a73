//! Device search service
//!
//! Orchestrates one search request: waits out any data refresh in
//! progress, resolves the raw parameters into validated filters for the
//! requested API revision, and hands the result to the query engine.
//! Revisions ignore the filter dimensions they do not support rather
//! than rejecting them.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::config::PagingConfig;
use crate::db::query::builder::DeviceQuery;
use crate::db::query::engine::DeviceQueryEngine;
use crate::db::query::envelope::ResultEnvelope;
use crate::db::query::filter::{ContainsFilter, RangeFilter};
use crate::db::query::identifier::IdentifierFilter;
use crate::db::query::page::PageRequest;
use crate::db::query::params::RawSearchParams;
use crate::db::query::revision::ApiRevision;
use crate::db::query::sort::SortSpec;
use crate::db::{DeviceStore, RefreshGate};
use crate::Result;

pub struct DeviceQueryService {
    engine: DeviceQueryEngine,
    gate: RefreshGate,
    paging: PagingConfig,
}

impl DeviceQueryService {
    pub fn new(
        store: Arc<dyn DeviceStore>,
        gate: RefreshGate,
        paging: PagingConfig,
        query_timeout: Duration,
    ) -> Self {
        Self {
            engine: DeviceQueryEngine::new(store, query_timeout),
            gate,
            paging,
        }
    }

    /// Run a search for one API revision.
    #[instrument(skip(self, params, revision), fields(revision = revision.as_str()))]
    pub async fn search(
        &self,
        revision: ApiRevision,
        params: &RawSearchParams,
    ) -> Result<ResultEnvelope> {
        self.gate.wait_ready().await;

        let identifier = IdentifierFilter::resolve(&params.identifier_candidates(), revision)?;
        let page = PageRequest::resolve(
            params.page.as_deref(),
            params.size.as_deref(),
            &self.paging,
        )?;
        let sort = SortSpec::resolve(
            params.sortby.as_deref(),
            params.orderby.as_deref(),
            revision,
            identifier.kind(),
        )?;

        let contains = if revision.supports_contains() {
            ContainsFilter::from_lists(&params.contains_fields(), &params.contains_values())?
        } else {
            ContainsFilter::default()
        };
        let range = if revision.supports_range() {
            RangeFilter::from_lists(&params.range_fields(), &params.range_values())?
        } else {
            RangeFilter::default()
        };

        debug!(
            identifier = ?identifier.kind(),
            contains_terms = contains.terms.len(),
            range_terms = range.terms.len(),
            page = page.page,
            size = page.size,
            "resolved search"
        );

        let query = DeviceQuery {
            identifier,
            contains,
            range,
        };
        self.engine.execute(&query, &sort, &page).await
    }
}
