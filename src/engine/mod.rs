//! Field resolution engine and query executor
//!
//! This is the algorithmic heart of the crate: a depth-first walk of the
//! caller's selection tree that resolves each field through the resolver
//! table, recurses into object and list fields, and packages partial data
//! plus path-qualified errors into a result envelope.

mod envelope;
mod executor;
mod walk;

pub use envelope::{ErrorRecord, ResultEnvelope};
pub use executor::QueryExecutor;
