// Constants

// Supercell enumeration defaults
pub const DEFAULT_DIRS: &str = "abc"; // Lattice vectors enumerated over
pub const DEFAULT_MIN_VOLUME: usize = 1;

// Canonicalization defaults (cell-invariant group, event occupation applied)
pub const DEFAULT_IN_CANONICAL_POS: bool = true;
pub const DEFAULT_IN_CANONICAL_SUPERCELL: bool = false;
pub const DEFAULT_APPLY_EVENT_OCCUPATION: bool = true;

// Logging
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const VERBOSE_LOG_FILTER: &str = "debug";
