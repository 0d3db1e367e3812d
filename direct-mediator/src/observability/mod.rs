//! Observability support: canonical event names and field formatting.
//!
//! The crate emits `tracing` events and never installs a global subscriber;
//! binaries and tests own one-time subscriber initialization at process
//! boundaries.

pub mod events;
pub mod fields;
