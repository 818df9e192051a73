//! Identifier filter resolution
//!
//! A search request may name a device by IMEI, serial number, device id,
//! VIN, or lifecycle state. At most one identifier drives the query: the
//! first non-blank candidate in the revision's precedence order wins and
//! the rest are ignored. All candidates blank means listing mode.
//!
//! Format validation happens here, before any query is issued.

use super::revision::ApiRevision;
use crate::models::LifecycleState;
use crate::{Error, Result};

/// The logical identifier dimensions a caller can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Imei,
    SerialNumber,
    DeviceId,
    Vin,
    State,
}

impl IdentifierKind {
    /// Human-readable name used in error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Imei => "IMEI",
            Self::SerialNumber => "serial number",
            Self::DeviceId => "device id",
            Self::Vin => "VIN",
            Self::State => "state",
        }
    }

}

/// Raw identifier candidates extracted from the request, any subset of
/// which may be present or blank.
#[derive(Debug, Clone, Default)]
pub struct IdentifierCandidates {
    pub imei: Option<String>,
    pub serial_number: Option<String>,
    pub device_id: Option<String>,
    pub vin: Option<String>,
    pub state: Option<String>,
}

impl IdentifierCandidates {
    fn get(&self, kind: IdentifierKind) -> Option<&str> {
        let raw = match kind {
            IdentifierKind::Imei => self.imei.as_deref(),
            IdentifierKind::SerialNumber => self.serial_number.as_deref(),
            IdentifierKind::DeviceId => self.device_id.as_deref(),
            IdentifierKind::Vin => self.vin.as_deref(),
            IdentifierKind::State => self.state.as_deref(),
        };
        raw.map(str::trim).filter(|s| !s.is_empty())
    }
}

/// The single active identifier filter, or `None` for listing mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierFilter {
    Imei(String),
    SerialNumber(String),
    DeviceId(String),
    Vin(String),
    State(String),
    None,
}

impl Default for IdentifierFilter {
    fn default() -> Self {
        Self::None
    }
}

impl IdentifierFilter {
    /// Resolve the active identifier for a revision.
    ///
    /// Walks the revision's precedence order and takes the first non-blank
    /// candidate; validates its format. All blank means listing mode.
    pub fn resolve(candidates: &IdentifierCandidates, revision: ApiRevision) -> Result<Self> {
        for &kind in revision.identifier_precedence() {
            if let Some(value) = candidates.get(kind) {
                return Self::validated(kind, value);
            }
        }
        Ok(Self::None)
    }

    fn validated(kind: IdentifierKind, value: &str) -> Result<Self> {
        match kind {
            IdentifierKind::Imei => {
                if value.len() < 3 || !value.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::Validation(
                        "imei must be numeric with at least 3 digits".to_string(),
                    ));
                }
                Ok(Self::Imei(value.to_string()))
            }
            IdentifierKind::SerialNumber => {
                if value.len() < 3 || !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
                    return Err(Error::Validation(
                        "serialnumber must be alphanumeric with at least 3 characters".to_string(),
                    ));
                }
                Ok(Self::SerialNumber(value.to_string()))
            }
            IdentifierKind::DeviceId => {
                if value.len() < 3 || !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
                    return Err(Error::Validation(
                        "deviceid must be alphanumeric with at least 3 characters".to_string(),
                    ));
                }
                Ok(Self::DeviceId(value.to_string()))
            }
            IdentifierKind::Vin => {
                if value.len() != 17 || !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
                    return Err(Error::Validation(
                        "vin must be exactly 17 alphanumeric characters".to_string(),
                    ));
                }
                Ok(Self::Vin(value.to_string()))
            }
            IdentifierKind::State => match LifecycleState::parse(value) {
                Some(state) => Ok(Self::State(state.as_str().to_string())),
                None => {
                    let accepted = LifecycleState::ALL
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    Err(Error::Validation(format!(
                        "state '{value}' is not a known lifecycle state; accepted values: {accepted}"
                    )))
                }
            },
        }
    }

    /// The active identifier dimension, if any.
    pub fn kind(&self) -> Option<IdentifierKind> {
        match self {
            Self::Imei(_) => Some(IdentifierKind::Imei),
            Self::SerialNumber(_) => Some(IdentifierKind::SerialNumber),
            Self::DeviceId(_) => Some(IdentifierKind::DeviceId),
            Self::Vin(_) => Some(IdentifierKind::Vin),
            Self::State(_) => Some(IdentifierKind::State),
            Self::None => None,
        }
    }

    /// True in lookup mode, false in listing mode.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Imei(v)
            | Self::SerialNumber(v)
            | Self::DeviceId(v)
            | Self::Vin(v)
            | Self::State(v) => Some(v),
            Self::None => None,
        }
    }
}
