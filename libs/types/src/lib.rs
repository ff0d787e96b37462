//! Types library for the NBBO tick store
//!
//! This library provides the record model and the packed timestamp codec
//! shared by the storage engine, the analytics pipeline and the tooling.
//!
//! # Modules
//! - `ids`: Identifiers (Symbol, BatchId)
//! - `timestamp`: Packed `HHMMSSnnnnnnnnn` codec and civil time projection
//! - `session`: Regular trading hours window and calendar seam
//! - `tick`: The NBBO tick record
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod timestamp;
pub mod session;
pub mod tick;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::timestamp::*;
    pub use crate::session::*;
    pub use crate::tick::*;
    pub use crate::errors::*;
}
