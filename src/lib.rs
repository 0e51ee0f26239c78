//! chainkit: fixed-bucket integer tables with sorted separate chaining.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod table;
