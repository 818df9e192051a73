//! API revision capability table
//!
//! The three device-search revisions share one resolution pipeline and
//! differ only in the filter dimensions they accept:
//! - v1: exact identifier match (IMEI, serial number, state)
//! - v2: v1 plus substring ("contains") filters
//! - v3: v2 plus timestamp range filters, device id / VIN identifiers,
//!   and a `deviceId` sort key when resolving by device id
//!
//! Identifier precedence is explicit here rather than being an accident
//! of parameter-checking order: the first non-blank candidate in the
//! revision's precedence slice wins.

use super::identifier::IdentifierKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRevision {
    V1,
    V2,
    V3,
}

impl ApiRevision {
    /// Identifier candidates this revision accepts, in precedence order.
    pub fn identifier_precedence(self) -> &'static [IdentifierKind] {
        match self {
            Self::V1 | Self::V2 => &[
                IdentifierKind::Imei,
                IdentifierKind::SerialNumber,
                IdentifierKind::State,
            ],
            Self::V3 => &[
                IdentifierKind::Imei,
                IdentifierKind::SerialNumber,
                IdentifierKind::DeviceId,
                IdentifierKind::Vin,
                IdentifierKind::State,
            ],
        }
    }

    pub fn supports_contains(self) -> bool {
        matches!(self, Self::V2 | Self::V3)
    }

    pub fn supports_range(self) -> bool {
        matches!(self, Self::V3)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }
}
