//! Raw search query parameters
//!
//! The wire-level shape shared by every search endpoint. Everything
//! arrives as free text; the resolver modules turn it into validated
//! filters. Revisions that do not support a parameter simply never read
//! it.

use serde::Deserialize;

use super::identifier::IdentifierCandidates;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchParams {
    pub imei: Option<String>,
    pub serialnumber: Option<String>,
    pub deviceid: Option<String>,
    pub vin: Option<String>,
    pub state: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
    pub sortby: Option<String>,
    pub orderby: Option<String>,
    pub containslikefields: Option<String>,
    pub containslikevalues: Option<String>,
    pub rangefields: Option<String>,
    pub rangevalues: Option<String>,
}

impl RawSearchParams {
    pub fn identifier_candidates(&self) -> IdentifierCandidates {
        IdentifierCandidates {
            imei: self.imei.clone(),
            serial_number: self.serialnumber.clone(),
            device_id: self.deviceid.clone(),
            vin: self.vin.clone(),
            state: self.state.clone(),
        }
    }

    pub fn contains_fields(&self) -> Vec<String> {
        split_csv(self.containslikefields.as_deref())
    }

    pub fn contains_values(&self) -> Vec<String> {
        split_csv(self.containslikevalues.as_deref())
    }

    pub fn range_fields(&self) -> Vec<String> {
        split_csv(self.rangefields.as_deref())
    }

    pub fn range_values(&self) -> Vec<String> {
        split_csv(self.rangevalues.as_deref())
    }
}

/// Split a comma-separated list, trimming entries and dropping blanks.
fn split_csv(input: Option<&str>) -> Vec<String> {
    input
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_lists_are_trimmed_and_blank_entries_dropped() {
        let params = RawSearchParams {
            containslikefields: Some(" imei , model ,, ".to_string()),
            ..RawSearchParams::default()
        };
        assert_eq!(params.contains_fields(), vec!["imei", "model"]);
    }

    #[test]
    fn absent_lists_are_empty() {
        let params = RawSearchParams::default();
        assert!(params.range_fields().is_empty());
        assert!(params.range_values().is_empty());
    }
}
