//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Wire Model
//! - Inbound request fields keep the public HTTP contract's Italian keys
//! - `SinkOutcome` serializes exactly as downstream consumers already parse it:
//!   `{service, status, error?}`

mod config;
mod error;
mod outcome;
mod report;
mod sink;

pub use config::*;
pub use error::*;
pub use outcome::*;
pub use report::*;
pub use sink::*;
