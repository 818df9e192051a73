//! Database layer: pool management, the storage trait, the Postgres
//! store, and the query machinery.

pub mod pool;
pub mod query;
pub mod store;
pub mod traits;

pub use pool::{build_pool, RefreshGate};
pub use store::PostgresDeviceStore;
pub use traits::DeviceStore;
