// Lattice module: prim structure, integer lattice algebra and supercells
// This module provides the periodic structures that configurations and events live on

// ======================== MODULE DECLARATIONS ========================
pub mod integer_matrix;
pub mod lattice_construction;
pub mod lattice_types;
pub mod prim;
pub mod supercell;
pub mod supercell_enum;
pub mod unitcellcoord;


// ======================== INTEGER MATRICES ========================
pub use integer_matrix::{
    MatrixKey,                      // type - row-major [i64; 9], ordering and lookup key of a lattice
    hermite_normal_form,            // fn(m: &Matrix3<i64>) -> Result<Matrix3<i64>> - lower-triangular HNF
    integer_quotient,               // fn(lhs, rhs) -> Option<Matrix3<i64>> - N with lhs * N == rhs
    determinant,                    // fn(m: &Matrix3<i64>) -> i64
};

// ======================== PRIM ========================
pub use lattice_types::Bravais2D;  // enum - 2D Bravais lattice types (Square, Hexagonal, Rectangular, CenteredRectangular, Oblique)
pub use prim::{
    Prim,                           // struct - basis sites and factor group
    PrimData,                       // struct - serialized form {basis, factor_group}
    Site,                           // struct - allowed occupants of a basis site
};
// Prim impl methods:
//   new(basis: Vec<Site>, factor_group: Vec<SymOp>) -> Result<Self> - validates basis permutations
//   factor_group_op(&self, index) -> Result<&SymOp>
//   point_group(&self) -> Vec<Matrix3<i64>>                         - distinct point operations

pub use unitcellcoord::{
    UnitCell,                       // type - Vector3<i64> unit cell translation
    UnitCellCoord,                  // struct - (sublattice, unitcell), serialized as [b, i, j, k]
};

// ======================== PRIM CONSTRUCTION UTILITIES ========================
pub use lattice_construction::{
    square_prim,                    // fn(occupants) -> Result<Arc<Prim>> - D4 point group
    rectangular_prim,               // fn(occupants) -> Result<Arc<Prim>> - D2 point group
    hexagonal_prim,                 // fn(occupants) -> Result<Arc<Prim>> - D6 point group
    oblique_prim,                   // fn(occupants) -> Result<Arc<Prim>> - C2 point group
    centered_rectangular_prim,      // fn(occupants) -> Result<Arc<Prim>> - D2 point group, primitive setting
    simple_cubic_prim,              // fn(occupants) -> Result<Arc<Prim>> - Oh point group
    identity_prim,                  // fn(occupants) -> Result<Arc<Prim>> - trivial factor group
    bravais_2d_prim,                // fn(bravais, occupants) -> Result<Arc<Prim>>
    single_site_prim,               // fn(occupants, point_group) -> Result<Arc<Prim>>
};

// ======================== SUPERCELLS ========================
pub use supercell::{
    Supercell,                      // struct - HNF transformation matrix, unit cell and site indexing
    SupercellSymInfo,               // struct - factor group indices and site permutations
    SupercellSet,                   // struct - shared registry with idempotent add
};
// Supercell impl methods:
//   new(prim: Arc<Prim>, transformation_matrix: Matrix3<i64>) -> Result<Self>
//   unitcell_index(&self, unitcell) -> usize / unitcell(&self, index) -> UnitCell
//   linear_index(&self, site) -> usize / site(&self, index) -> UnitCellCoord
//   is_superlattice_of(&self, other: &Supercell) -> bool
//   image_transformation_matrix(&self, op: &SymOp) -> Matrix3<i64>

pub use supercell_enum::{
    SupercellEnum,                  // struct - canonical supercells by volume
    SupercellEnumIter,              // struct - lazy iterator, one volume at a time
    SupercellEnumParams,            // struct - {min, max, unit_cell, dirs, diagonal_only, fixed_shape}
};
