//! Result envelope assembly
//!
//! Every successful search responds with the same envelope shape: the
//! echoed pagination window, the total match count, the per-state
//! aggregate, and the page of records.

use serde::Serialize;

use super::page::PageRequest;
use crate::models::{DeviceFactoryRecord, StateAggregate};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    pub page: u32,
    pub size: u32,
    pub total: i64,
    pub aggregate: StateAggregate,
    pub data: Vec<DeviceFactoryRecord>,
}

impl ResultEnvelope {
    pub fn new(
        page: &PageRequest,
        total: i64,
        aggregate: StateAggregate,
        data: Vec<DeviceFactoryRecord>,
    ) -> Self {
        Self {
            page: page.page,
            size: page.size,
            total,
            aggregate,
            data,
        }
    }

}
