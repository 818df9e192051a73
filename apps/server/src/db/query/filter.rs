//! Contains and range filter construction
//!
//! Two optional filter dimensions layered on top of the identifier
//! filter:
//! - contains: substring match over text columns
//!   (`column LIKE '%value%'` with the value carried as a bind parameter)
//! - range: inclusive `<start>_<end>` epoch-millisecond windows against
//!   timestamp columns
//!
//! Both arrive as comma-separated parallel field/value lists. Lists of
//! differing length (or empty lists) yield an empty filter rather than an
//! error, matching the established endpoint behavior. Field names are
//! resolved through fixed column tables so caller input never reaches the
//! SQL text.

use crate::{Error, Result};

/// Text columns addressable by contains filters, keyed by logical name.
const CONTAINS_FIELDS: &[(&str, &str)] = &[
    ("imei", "r.imei"),
    ("serialNumber", "r.serial_number"),
    ("iccid", "r.iccid"),
    ("ssid", "r.ssid"),
    ("bssid", "r.bssid"),
    ("msisdn", "r.msisdn"),
    ("imsi", "r.imsi"),
    ("platformVersion", "r.platform_version"),
    ("model", "r.model"),
    ("state", "r.lifecycle_state"),
    ("factoryAdmin", "r.factory_admin"),
    ("packageSerialNumber", "r.package_serial_number"),
    ("deviceType", "r.device_type"),
];

/// Timestamp columns addressable by range filters.
const RANGE_FIELDS: &[(&str, &str)] = &[
    ("manufacturingDate", "r.manufacturing_date"),
    ("recordDate", "r.record_date"),
    ("createdDate", "r.created_date"),
];

fn lookup(table: &[(&str, &'static str)], field: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(logical, _)| logical.eq_ignore_ascii_case(field))
        .map(|(_, column)| *column)
}

fn enumerate(table: &[(&str, &str)]) -> String {
    table
        .iter()
        .map(|(logical, _)| *logical)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One substring-match term: a resolved column and the raw needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainsTerm {
    pub column: &'static str,
    pub needle: String,
}

/// Conjunction of substring-match terms; empty means no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainsFilter {
    pub terms: Vec<ContainsTerm>,
}

impl ContainsFilter {
    /// Build from parallel field/value lists.
    ///
    /// Mismatched lengths or empty lists produce the empty filter. An
    /// unknown field name is rejected so it cannot silently select the
    /// wrong column.
    pub fn from_lists(fields: &[String], values: &[String]) -> Result<Self> {
        if fields.is_empty() || fields.len() != values.len() {
            return Ok(Self::default());
        }

        let mut terms = Vec::with_capacity(fields.len());
        for (field, value) in fields.iter().zip(values) {
            let Some(column) = lookup(CONTAINS_FIELDS, field) else {
                return Err(Error::Validation(format!(
                    "containslikefields '{field}' is not searchable; accepted values: {}",
                    enumerate(CONTAINS_FIELDS)
                )));
            };
            terms.push(ContainsTerm {
                column,
                needle: value.clone(),
            });
        }
        Ok(Self { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// One inclusive timestamp window over a resolved column, bounds in
/// epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTerm {
    pub column: &'static str,
    pub start_ms: i64,
    pub end_ms: i64,
}

/// Conjunction of timestamp windows; empty means no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeFilter {
    pub terms: Vec<RangeTerm>,
}

impl RangeFilter {
    /// Build from parallel field/value lists; values are `<start>_<end>`
    /// epoch-millisecond pairs.
    ///
    /// Mismatched lengths produce the empty filter, and a value without
    /// exactly one underscore (or with non-numeric bounds) is skipped
    /// silently. Unknown field names are rejected.
    pub fn from_lists(fields: &[String], values: &[String]) -> Result<Self> {
        if fields.is_empty() || fields.len() != values.len() {
            return Ok(Self::default());
        }

        let mut terms = Vec::with_capacity(fields.len());
        for (field, value) in fields.iter().zip(values) {
            let Some(column) = lookup(RANGE_FIELDS, field) else {
                return Err(Error::Validation(format!(
                    "rangefields '{field}' is not searchable; accepted values: {}",
                    enumerate(RANGE_FIELDS)
                )));
            };
            let Some((start, end)) = parse_window(value) else {
                continue;
            };
            terms.push(RangeTerm {
                column,
                start_ms: start,
                end_ms: end,
            });
        }
        Ok(Self { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn parse_window(value: &str) -> Option<(i64, i64)> {
    let mut parts = value.split('_');
    let start = parts.next()?.trim().parse().ok()?;
    let end = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn equal_length_lists_build_one_term_per_pair() {
        let filter = ContainsFilter::from_lists(
            &strings(&["imei", "model"]),
            &strings(&["990000", "TCU-4"]),
        )
        .unwrap();
        assert_eq!(filter.terms.len(), 2);
        assert_eq!(filter.terms[0].column, "r.imei");
        assert_eq!(filter.terms[1].needle, "TCU-4");
    }

    #[test]
    fn mismatched_lengths_produce_the_empty_filter() {
        let filter =
            ContainsFilter::from_lists(&strings(&["imei", "model"]), &strings(&["990000"]))
                .unwrap();
        assert!(filter.is_empty());

        let filter = RangeFilter::from_lists(&strings(&["recordDate"]), &[]).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn empty_lists_produce_the_empty_filter() {
        assert!(ContainsFilter::from_lists(&[], &[]).unwrap().is_empty());
        assert!(RangeFilter::from_lists(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn unknown_contains_field_is_rejected_with_accepted_values() {
        let err = ContainsFilter::from_lists(&strings(&["password"]), &strings(&["x"]))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("password"));
        assert!(message.contains("serialNumber"));
    }

    #[test]
    fn contains_field_names_match_case_insensitively() {
        let filter =
            ContainsFilter::from_lists(&strings(&["SERIALNUMBER"]), &strings(&["1007"])).unwrap();
        assert_eq!(filter.terms[0].column, "r.serial_number");
    }

    #[test]
    fn range_window_parses_start_and_end_milliseconds() {
        let filter =
            RangeFilter::from_lists(&strings(&["recordDate"]), &strings(&["1000_2000"])).unwrap();
        assert_eq!(
            filter.terms,
            vec![RangeTerm {
                column: "r.record_date",
                start_ms: 1000,
                end_ms: 2000,
            }]
        );
    }

    #[test]
    fn malformed_range_values_are_skipped_silently() {
        let filter = RangeFilter::from_lists(
            &strings(&["recordDate", "createdDate", "manufacturingDate"]),
            &strings(&["1000", "1_2_3", "abc_def"]),
        )
        .unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn unknown_range_field_is_rejected() {
        let err =
            RangeFilter::from_lists(&strings(&["imei"]), &strings(&["1_2"])).unwrap_err();
        assert!(err.to_string().contains("rangefields"));
    }
}
