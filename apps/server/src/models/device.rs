//! Device factory records and lifecycle state
//!
//! `DeviceFactoryRecord` is an immutable read snapshot produced by queries;
//! the registry core never mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Factory-provisioned identity record for a single telematics device.
///
/// `device_id` and `vin` are populated only when the record is joined with
/// vehicle association data; factory-fresh devices carry neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFactoryRecord {
    pub id: i64,
    pub imei: String,
    pub serial_number: String,
    pub iccid: Option<String>,
    pub ssid: Option<String>,
    pub bssid: Option<String>,
    pub msisdn: Option<String>,
    pub imsi: Option<String>,
    pub platform_version: Option<String>,
    pub model: Option<String>,
    pub manufacturing_date: Option<DateTime<Utc>>,
    pub record_date: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
    /// Stored as text; values beyond the four well-known states are
    /// carried through untouched.
    pub lifecycle_state: String,
    pub factory_admin: Option<String>,
    pub package_serial_number: Option<String>,
    pub device_type: Option<String>,
    pub device_id: Option<String>,
    pub vin: Option<String>,
}

/// Well-known lifecycle states of a device record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Provisioned,
    Active,
    Faulty,
    Stolen,
}

impl LifecycleState {
    pub const ALL: [LifecycleState; 4] = [
        Self::Provisioned,
        Self::Active,
        Self::Faulty,
        Self::Stolen,
    ];

    /// Parse a state name case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "PROVISIONED" => Some(Self::Provisioned),
            "ACTIVE" => Some(Self::Active),
            "FAULTY" => Some(Self::Faulty),
            "STOLEN" => Some(Self::Stolen),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Provisioned => "PROVISIONED",
            Self::Active => "ACTIVE",
            Self::Faulty => "FAULTY",
            Self::Stolen => "STOLEN",
        }
    }
}

/// Per-state record counts computed over the same filter scope as the
/// page query, independent of pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateAggregate {
    pub provisioned: i64,
    pub active: i64,
    pub faulty: i64,
    pub stolen: i64,
}

impl StateAggregate {
    /// Fold a (state name, count) row into the aggregate. Rows with
    /// unknown state names are ignored.
    pub fn add_row(&mut self, state: &str, count: i64) {
        match LifecycleState::parse(state) {
            Some(LifecycleState::Provisioned) => self.provisioned += count,
            Some(LifecycleState::Active) => self.active += count,
            Some(LifecycleState::Faulty) => self.faulty += count,
            Some(LifecycleState::Stolen) => self.stolen += count,
            None => {}
        }
    }

    pub fn total(&self) -> i64 {
        self.provisioned + self.active + self.faulty + self.stolen
    }
}
