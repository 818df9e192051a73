//! Storage abstraction for device record queries.
//!
//! The engine talks to storage through this trait so tests can substitute
//! an in-memory store for Postgres.

use async_trait::async_trait;

use crate::db::query::builder::DeviceQuery;
use crate::db::query::page::PageRequest;
use crate::db::query::sort::SortSpec;
use crate::models::{DeviceFactoryRecord, StateAggregate};
use crate::Result;

#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Count the records matching the query. `None` means the backing
    /// store produced no count row at all, which the engine treats the
    /// same as zero matches.
    async fn count(&self, query: &DeviceQuery) -> Result<Option<i64>>;

    /// Fetch one page of matching records in the requested order.
    async fn fetch_page(
        &self,
        query: &DeviceQuery,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> Result<Vec<DeviceFactoryRecord>>;

    /// Fetch the per-state aggregate over the full match set.
    async fn fetch_aggregate(&self, query: &DeviceQuery) -> Result<StateAggregate>;
}
