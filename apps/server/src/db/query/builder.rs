//! SQL query builder for device record searches.
//!
//! Builds the three query shapes the engine needs from one validated
//! filter set:
//! - page query (sort, limit, offset)
//! - total count query
//! - per-state aggregate query
//!
//! All three share the identical WHERE clause so total, aggregate, and
//! page data stay consistent with each other. Caller-supplied values
//! travel exclusively as bind parameters; column names come from the
//! fixed lookup tables in the resolver modules.

use super::filter::{ContainsFilter, RangeFilter};
use super::identifier::IdentifierFilter;
use super::page::PageRequest;
use super::sort::{SortSpec, DEFAULT_SORT_COLUMN};

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Int(i64),
}

/// Record columns selected by the page query, including the joined
/// association columns.
const RECORD_COLUMNS: &str = "r.id, r.imei, r.serial_number, r.iccid, r.ssid, r.bssid, \
     r.msisdn, r.imsi, r.platform_version, r.model, r.manufacturing_date, \
     r.record_date, r.created_date, r.lifecycle_state, r.factory_admin, \
     r.package_serial_number, r.device_type, da.device_id, da.vin";

const FROM_CLAUSE: &str =
    " FROM device_factory_record r LEFT JOIN device_association da ON da.imei = r.imei";

/// A fully validated filter set, shared verbatim by the count, aggregate,
/// and page queries.
#[derive(Debug, Clone, Default)]
pub struct DeviceQuery {
    pub identifier: IdentifierFilter,
    pub contains: ContainsFilter,
    pub range: RangeFilter,
}

impl DeviceQuery {
    pub fn with_identifier(identifier: IdentifierFilter) -> Self {
        Self {
            identifier,
            ..Self::default()
        }
    }

    /// Build the paged record query.
    pub fn build_page_sql(&self, sort: &SortSpec, page: &PageRequest) -> (String, Vec<BindValue>) {
        let mut sql = format!("SELECT {RECORD_COLUMNS}{FROM_CLAUSE}");
        let mut bind_params = Vec::new();
        self.push_where(&mut sql, &mut bind_params);

        sql.push_str(" ORDER BY ");
        sql.push_str(sort.column);
        sql.push(' ');
        sql.push_str(sort.direction.as_sql());
        // Deterministic ordering when sorting on non-unique columns.
        if sort.column != DEFAULT_SORT_COLUMN {
            sql.push_str(", r.id ASC");
        }

        sql.push_str(&format!(" LIMIT {} OFFSET {}", page.limit(), page.offset()));
        (sql, bind_params)
    }

    /// Build the unpaginated total-count query.
    pub fn build_count_sql(&self) -> (String, Vec<BindValue>) {
        let mut sql = format!("SELECT COUNT(*){FROM_CLAUSE}");
        let mut bind_params = Vec::new();
        self.push_where(&mut sql, &mut bind_params);
        (sql, bind_params)
    }

    /// Build the per-state aggregate query over the same filter scope.
    pub fn build_aggregate_sql(&self) -> (String, Vec<BindValue>) {
        let mut sql = format!("SELECT r.lifecycle_state, COUNT(*){FROM_CLAUSE}");
        let mut bind_params = Vec::new();
        self.push_where(&mut sql, &mut bind_params);
        sql.push_str(" GROUP BY r.lifecycle_state");
        (sql, bind_params)
    }

    fn push_where(&self, sql: &mut String, bind_params: &mut Vec<BindValue>) {
        let mut clauses = Vec::new();

        match &self.identifier {
            IdentifierFilter::Imei(v) => {
                let idx = push_text(bind_params, v.clone());
                clauses.push(format!("r.imei = ${idx}"));
            }
            IdentifierFilter::SerialNumber(v) => {
                let idx = push_text(bind_params, v.clone());
                clauses.push(format!("r.serial_number = ${idx}"));
            }
            IdentifierFilter::DeviceId(v) => {
                let idx = push_text(bind_params, v.clone());
                clauses.push(format!("da.device_id = ${idx}"));
            }
            IdentifierFilter::Vin(v) => {
                let idx = push_text(bind_params, v.clone());
                clauses.push(format!("da.vin = ${idx}"));
            }
            IdentifierFilter::State(v) => {
                let idx = push_text(bind_params, v.clone());
                clauses.push(format!("upper(r.lifecycle_state) = ${idx}"));
            }
            IdentifierFilter::None => {}
        }

        for term in &self.contains.terms {
            let idx = push_text(bind_params, format!("%{}%", term.needle));
            clauses.push(format!("{} LIKE ${idx}", term.column));
        }

        for term in &self.range.terms {
            let start_idx = push_int(bind_params, term.start_ms);
            let end_idx = push_int(bind_params, term.end_ms);
            clauses.push(format!(
                "{} BETWEEN to_timestamp(${start_idx} / 1000.0) AND to_timestamp(${end_idx} / 1000.0)",
                term.column
            ));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
    }
}

fn push_text(bind_params: &mut Vec<BindValue>, value: String) -> usize {
    bind_params.push(BindValue::Text(value));
    bind_params.len()
}

fn push_int(bind_params: &mut Vec<BindValue>, value: i64) -> usize {
    bind_params.push(BindValue::Int(value));
    bind_params.len()
}
