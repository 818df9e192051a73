//! Postgres-backed device record store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::trace;

use crate::db::query::builder::{BindValue, DeviceQuery};
use crate::db::query::page::PageRequest;
use crate::db::query::sort::SortSpec;
use crate::db::traits::DeviceStore;
use crate::models::{DeviceFactoryRecord, StateAggregate};
use crate::Result;

pub struct PostgresDeviceStore {
    pool: PgPool,
}

impl PostgresDeviceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceStore for PostgresDeviceStore {
    async fn count(&self, query: &DeviceQuery) -> Result<Option<i64>> {
        let (sql, bind_values) = query.build_count_sql();
        trace!(%sql, "executing count query");

        let mut query_builder = sqlx::query_scalar::<_, i64>(&sql);
        for value in &bind_values {
            query_builder = match value {
                BindValue::Text(v) => query_builder.bind(v),
                BindValue::Int(v) => query_builder.bind(v),
            };
        }

        let total = query_builder.fetch_optional(&self.pool).await?;
        Ok(total)
    }

    async fn fetch_page(
        &self,
        query: &DeviceQuery,
        sort: &SortSpec,
        page: &PageRequest,
    ) -> Result<Vec<DeviceFactoryRecord>> {
        let (sql, bind_values) = query.build_page_sql(sort, page);
        trace!(%sql, "executing page query");

        let mut query_builder = sqlx::query_as::<_, DeviceFactoryRecord>(&sql);
        for value in &bind_values {
            query_builder = match value {
                BindValue::Text(v) => query_builder.bind(v),
                BindValue::Int(v) => query_builder.bind(v),
            };
        }

        let records = query_builder.fetch_all(&self.pool).await?;
        Ok(records)
    }

    async fn fetch_aggregate(&self, query: &DeviceQuery) -> Result<StateAggregate> {
        let (sql, bind_values) = query.build_aggregate_sql();
        trace!(%sql, "executing aggregate query");

        let mut query_builder = sqlx::query_as::<_, (String, i64)>(&sql);
        for value in &bind_values {
            query_builder = match value {
                BindValue::Text(v) => query_builder.bind(v),
                BindValue::Int(v) => query_builder.bind(v),
            };
        }

        let rows = query_builder.fetch_all(&self.pool).await?;
        let mut aggregate = StateAggregate::default();
        for (state, count) in rows {
            aggregate.add_row(&state, count);
        }
        Ok(aggregate)
    }
}
