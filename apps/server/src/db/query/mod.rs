//! Search query resolution and execution.
//!
//! A raw request passes through the resolver modules in order:
//! identifier, pagination, sort, then the contains and range filters.
//! The builder turns the validated set into SQL, and the engine runs it
//! against the store and assembles the envelope.

pub mod builder;
pub mod engine;
pub mod envelope;
pub mod filter;
pub mod identifier;
pub mod page;
pub mod params;
pub mod revision;
pub mod sort;
