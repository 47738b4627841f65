//! HTTP server assembly and exposure
//!
//! The exposure is a thin bridge: decoding requests into structured query
//! triples and encoding result envelopes back out. All resolution logic
//! lives in [`crate::engine`].

pub mod builder;
pub mod exposure;

pub use builder::ServerBuilder;
pub use exposure::QueryExposure;
