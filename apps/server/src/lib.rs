//! Funkwerk device registry - Rust implementation
//!
//! An HTTP service that manages factory-provisioned identity records for
//! telematics devices:
//! - Identifier lookup by IMEI, serial number, device id, VIN, or lifecycle state
//! - Paginated, sorted listings with substring and timestamp-range filters
//! - Per-state aggregate counts consistent with the active filter
//! - Three additive API revisions (v1 exact match, v2 contains, v3 ranges)

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
