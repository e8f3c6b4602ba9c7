//! Error types shared by every module of the crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnumError {
    #[error("LocalConfiguration objects must share the same event symmetry info")]
    ContextMismatch,

    #[error("Supercell mismatch: {0}")]
    SupercellMismatch(String),

    #[error("Prim mismatch: {0}")]
    PrimMismatch(String),

    #[error("in_canonical_supercell=true requires in_canonical_pos=true")]
    InvalidEquivalenceGroup,

    #[error(
        "Position ({unitcell_index}, {equivalent_index}) out of range: \
         {n_unitcells} unit cells, {n_equivalents} equivalent events"
    )]
    PositionOutOfRange {
        unitcell_index: usize,
        equivalent_index: usize,
        n_unitcells: usize,
        n_equivalents: usize,
    },

    #[error("Event is not equivalent to any event in the orbit of the prototype event")]
    EventNotInOrbit,

    #[error("Transformation matrix is singular")]
    SingularMatrix,

    #[error("Motif supercell does not tile the target supercell")]
    NotASuperlattice,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
