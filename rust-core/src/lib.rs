//! Lattice enumeration library
//!
//! This library canonicalizes local configurations (an occupation event placed in a
//! periodic configuration) and enumerates the symmetrically distinct ways of tiling a
//! motif configuration into larger supercells.

pub mod config;
pub mod configuration;
pub mod enumerate;
pub mod error;
pub mod lattice;
pub mod local_configuration;
pub mod occ_events;
pub mod symmetries;

pub use error::EnumError;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, EnumError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
