//! Domain models - read-side snapshots of device registry data

pub mod device;

pub use device::{DeviceFactoryRecord, LifecycleState, StateAggregate};
