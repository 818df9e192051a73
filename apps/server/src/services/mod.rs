//! Service layer orchestrating request handling over the storage layer.

pub mod device;

pub use device::DeviceQueryService;
