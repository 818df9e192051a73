//! End-to-end tests for the search service over an in-memory store.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use funkwerk::config::PagingConfig;
use funkwerk::db::query::builder::DeviceQuery;
use funkwerk::db::query::identifier::IdentifierFilter;
use funkwerk::db::query::page::PageRequest;
use funkwerk::db::query::params::RawSearchParams;
use funkwerk::db::query::revision::ApiRevision;
use funkwerk::db::query::sort::SortSpec;
use funkwerk::db::{DeviceStore, RefreshGate};
use funkwerk::models::{DeviceFactoryRecord, StateAggregate};
use funkwerk::services::DeviceQueryService;
use funkwerk::{Error, Result};

/// In-memory store with scripted responses. Captures the queries it
/// receives so tests can assert on the resolved filters.
#[derive(Default)]
struct MockStore {
    count: Option<i64>,
    records: Vec<DeviceFactoryRecord>,
    aggregate: StateAggregate,
    seen: Mutex<Vec<DeviceQuery>>,
}

impl MockStore {
    fn with_count(count: Option<i64>) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    fn last_query(&self) -> DeviceQuery {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl DeviceStore for MockStore {
    async fn count(&self, query: &DeviceQuery) -> Result<Option<i64>> {
        self.seen.lock().unwrap().push(query.clone());
        Ok(self.count)
    }

    async fn fetch_page(
        &self,
        _query: &DeviceQuery,
        _sort: &SortSpec,
        page: &PageRequest,
    ) -> Result<Vec<DeviceFactoryRecord>> {
        let take = page.size as usize;
        Ok(self.records.iter().take(take).cloned().collect())
    }

    async fn fetch_aggregate(&self, _query: &DeviceQuery) -> Result<StateAggregate> {
        Ok(self.aggregate)
    }
}

fn record(id: i64, imei: &str) -> DeviceFactoryRecord {
    DeviceFactoryRecord {
        id,
        imei: imei.to_string(),
        serial_number: format!("SN{id:06}"),
        iccid: None,
        ssid: None,
        bssid: None,
        msisdn: None,
        imsi: None,
        platform_version: Some("2.4.1".to_string()),
        model: Some("TCU-4".to_string()),
        manufacturing_date: Utc.timestamp_millis_opt(1500).single(),
        record_date: Utc.timestamp_millis_opt(1500).single(),
        created_date: Utc.timestamp_millis_opt(1500).single(),
        lifecycle_state: "ACTIVE".to_string(),
        factory_admin: None,
        package_serial_number: None,
        device_type: Some("TCU".to_string()),
        device_id: None,
        vin: None,
    }
}

fn service(store: MockStore) -> (DeviceQueryService, Arc<MockStore>) {
    service_with_gate(store, RefreshGate::new())
}

fn service_with_gate(store: MockStore, gate: RefreshGate) -> (DeviceQueryService, Arc<MockStore>) {
    let store = Arc::new(store);
    let paging = PagingConfig {
        default_size: 20,
        max_size: 100,
    };
    let service = DeviceQueryService::new(
        store.clone(),
        gate,
        paging,
        Duration::from_secs(5),
    );
    (service, store)
}

#[tokio::test]
async fn imei_lookup_returns_full_total_with_a_one_record_page() {
    let mut store = MockStore::with_count(Some(10));
    store.records = (1..=10).map(|id| record(id, "9900008624711007")).collect();
    store.aggregate = StateAggregate {
        active: 10,
        ..StateAggregate::default()
    };
    let (service, store) = service(store);

    let params = RawSearchParams {
        imei: Some("9900008624711007".to_string()),
        size: Some("1".to_string()),
        ..RawSearchParams::default()
    };
    let envelope = service.search(ApiRevision::V1, &params).await.unwrap();

    assert_eq!(envelope.total, 10);
    assert_eq!(envelope.page, 1);
    assert_eq!(envelope.size, 1);
    assert_eq!(envelope.data.len(), 1);
    assert_eq!(envelope.aggregate.active, 10);
    assert_eq!(
        store.last_query().identifier,
        IdentifierFilter::Imei("9900008624711007".to_string())
    );
}

#[tokio::test]
async fn listing_with_no_matches_is_an_empty_envelope_not_an_error() {
    let (service, _) = service(MockStore::with_count(Some(0)));

    let envelope = service
        .search(ApiRevision::V1, &RawSearchParams::default())
        .await
        .unwrap();

    assert_eq!(envelope.total, 0);
    assert!(envelope.data.is_empty());
    assert_eq!(envelope.aggregate, StateAggregate::default());
}

#[tokio::test]
async fn identifier_lookup_with_null_count_is_not_found() {
    let (service, _) = service(MockStore::with_count(None));

    let params = RawSearchParams {
        serialnumber: Some("1007".to_string()),
        ..RawSearchParams::default()
    };
    let err = service.search(ApiRevision::V1, &params).await.unwrap_err();

    assert!(matches!(err, Error::DeviceNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "No device record found for serial number '1007'"
    );
}

#[tokio::test]
async fn negative_page_is_rejected_before_any_query_runs() {
    let (service, store) = service(MockStore::with_count(Some(5)));

    let params = RawSearchParams {
        page: Some("-1".to_string()),
        ..RawSearchParams::default()
    };
    let err = service.search(ApiRevision::V1, &params).await.unwrap_err();

    assert!(err.to_string().contains("page should be greater than zero"));
    assert!(store.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_sort_field_error_enumerates_accepted_values() {
    let (service, _) = service(MockStore::with_count(Some(5)));

    let params = RawSearchParams {
        sortby: Some("imei1".to_string()),
        ..RawSearchParams::default()
    };
    let err = service.search(ApiRevision::V1, &params).await.unwrap_err();
    let message = err.to_string();

    assert!(message.contains("imei1"));
    assert!(message.contains("serialNumber"));
}

#[tokio::test]
async fn v3_range_window_reaches_the_store_with_inclusive_bounds() {
    let mut store = MockStore::with_count(Some(1));
    store.records = vec![record(1, "990000862471")];
    let (service, store) = service(store);

    let params = RawSearchParams {
        rangefields: Some("recordDate".to_string()),
        rangevalues: Some("1000_2000".to_string()),
        ..RawSearchParams::default()
    };
    let envelope = service.search(ApiRevision::V3, &params).await.unwrap();
    assert_eq!(envelope.total, 1);

    let query = store.last_query();
    assert_eq!(query.range.terms.len(), 1);
    assert_eq!(query.range.terms[0].start_ms, 1000);
    assert_eq!(query.range.terms[0].end_ms, 2000);
}

#[tokio::test]
async fn v1_ignores_contains_and_range_parameters() {
    let (service, store) = service(MockStore::with_count(Some(3)));

    // "password" would be rejected on v2/v3; v1 never reads the lists.
    let params = RawSearchParams {
        containslikefields: Some("password".to_string()),
        containslikevalues: Some("secret".to_string()),
        rangefields: Some("recordDate".to_string()),
        rangevalues: Some("1_2".to_string()),
        ..RawSearchParams::default()
    };
    service.search(ApiRevision::V1, &params).await.unwrap();

    let query = store.last_query();
    assert!(query.contains.is_empty());
    assert!(query.range.is_empty());
}

#[tokio::test]
async fn v2_accepts_contains_but_ignores_ranges() {
    let (service, store) = service(MockStore::with_count(Some(3)));

    let params = RawSearchParams {
        containslikefields: Some("model".to_string()),
        containslikevalues: Some("TCU".to_string()),
        rangefields: Some("recordDate".to_string()),
        rangevalues: Some("1_2".to_string()),
        ..RawSearchParams::default()
    };
    service.search(ApiRevision::V2, &params).await.unwrap();

    let query = store.last_query();
    assert_eq!(query.contains.terms.len(), 1);
    assert!(query.range.is_empty());
}

#[tokio::test]
async fn device_id_lookup_requires_v3() {
    let (service, store) = service(MockStore::with_count(Some(1)));

    let params = RawSearchParams {
        deviceid: Some("DEV4711".to_string()),
        ..RawSearchParams::default()
    };

    service.search(ApiRevision::V2, &params).await.unwrap();
    assert_eq!(store.last_query().identifier, IdentifierFilter::None);

    service.search(ApiRevision::V3, &params).await.unwrap();
    assert_eq!(
        store.last_query().identifier,
        IdentifierFilter::DeviceId("DEV4711".to_string())
    );
}

/// Store whose count never completes, for exercising the query deadline.
struct StalledStore;

#[async_trait]
impl DeviceStore for StalledStore {
    async fn count(&self, _query: &DeviceQuery) -> Result<Option<i64>> {
        std::future::pending().await
    }

    async fn fetch_page(
        &self,
        _query: &DeviceQuery,
        _sort: &SortSpec,
        _page: &PageRequest,
    ) -> Result<Vec<DeviceFactoryRecord>> {
        Ok(Vec::new())
    }

    async fn fetch_aggregate(&self, _query: &DeviceQuery) -> Result<StateAggregate> {
        Ok(StateAggregate::default())
    }
}

#[tokio::test]
async fn a_stalled_query_surfaces_as_a_technical_error() {
    let paging = PagingConfig {
        default_size: 20,
        max_size: 100,
    };
    let service = DeviceQueryService::new(
        Arc::new(StalledStore),
        RefreshGate::new(),
        paging,
        Duration::from_millis(50),
    );

    let err = service
        .search(ApiRevision::V1, &RawSearchParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Technical(_)));
    assert!(err.to_string().contains("deadline"));
}

#[tokio::test]
async fn searches_wait_for_an_in_flight_refresh() {
    let gate = RefreshGate::new();
    gate.begin_refresh();
    let (service, _) = service_with_gate(MockStore::with_count(Some(0)), gate.clone());
    let service = Arc::new(service);

    let search = {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .search(ApiRevision::V1, &RawSearchParams::default())
                .await
        })
    };

    tokio::task::yield_now().await;
    assert!(!search.is_finished());

    gate.finish_refresh();
    let envelope = search.await.unwrap().unwrap();
    assert_eq!(envelope.total, 0);
}
