//! Sort specification resolution
//!
//! Maps a caller-supplied logical sort field and direction onto a physical
//! column through a fixed allow-list keyed by (API revision, identifier
//! kind). Free-form column names never reach the SQL layer.

use super::identifier::IdentifierKind;
use super::revision::ApiRevision;
use crate::{Error, Result};

/// Default sort applied when the caller specifies nothing: primary key
/// ascending.
pub const DEFAULT_SORT_COLUMN: &str = "r.id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Resolved sort specification: a physical column and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: DEFAULT_SORT_COLUMN,
            direction: SortDirection::Asc,
        }
    }
}

/// Logical sort fields accepted on every search endpoint.
const BASE_SORT_FIELDS: &[(&str, &str)] = &[
    ("imei", "r.imei"),
    ("serialNumber", "r.serial_number"),
    ("model", "r.model"),
    ("deviceType", "r.device_type"),
    ("state", "r.lifecycle_state"),
    ("manufacturingDate", "r.manufacturing_date"),
    ("recordDate", "r.record_date"),
    ("createdDate", "r.created_date"),
];

/// Extra sort field available when v3 resolves by device id: the joined
/// association column.
const DEVICE_ID_SORT_FIELD: (&str, &str) = ("deviceId", "da.device_id");

fn allowed_fields(
    revision: ApiRevision,
    identifier: Option<IdentifierKind>,
) -> Vec<(&'static str, &'static str)> {
    let mut fields = BASE_SORT_FIELDS.to_vec();
    if revision == ApiRevision::V3 && identifier == Some(IdentifierKind::DeviceId) {
        fields.push(DEVICE_ID_SORT_FIELD);
    }
    fields
}

impl SortSpec {
    /// Resolve the caller's `sortby`/`orderby` inputs.
    ///
    /// Both absent means the default primary-key sort. A present field must
    /// case-insensitively match the allow-list for this (revision,
    /// identifier kind); a present direction must be `asc` or `desc`.
    pub fn resolve(
        sort_by: Option<&str>,
        order_by: Option<&str>,
        revision: ApiRevision,
        identifier: Option<IdentifierKind>,
    ) -> Result<Self> {
        let sort_by = non_blank(sort_by);
        let order_by = non_blank(order_by);

        let direction = match order_by {
            None => SortDirection::Asc,
            Some(raw) if raw.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(raw) if raw.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(raw) => {
                return Err(Error::Validation(format!(
                    "orderby '{raw}' is not supported; use 'asc' or 'desc'"
                )));
            }
        };

        let Some(field) = sort_by else {
            return Ok(Self {
                column: DEFAULT_SORT_COLUMN,
                direction,
            });
        };

        let fields = allowed_fields(revision, identifier);
        match fields
            .iter()
            .find(|(logical, _)| logical.eq_ignore_ascii_case(field))
        {
            Some((_, column)) => Ok(Self {
                column,
                direction,
            }),
            None => {
                let accepted = fields
                    .iter()
                    .map(|(logical, _)| *logical)
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(Error::Validation(format!(
                    "sortby '{field}' is not supported; accepted values: {accepted}"
                )))
            }
        }
    }
}

fn non_blank(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}
