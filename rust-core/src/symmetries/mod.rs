// Symmetries module: prim factor group operations and supercell symmetry operations

// ======================== MODULE DECLARATIONS ========================
pub mod point_groups;
pub mod supercell_sym_op;
pub mod symmetry_operations;


// ======================== SYMMETRY OPERATIONS ========================
pub use symmetry_operations::{
    SymOp,                          // struct - integer point matrix with basis permutation and unit cell shifts
    SymOpData,                      // struct - row-major serialized form
};
// SymOp impl methods:
//   from_point(point: Matrix3<i64>, n_basis: usize) -> Self         - point operation fixing every basis site
//   apply(&self, site: &UnitCellCoord) -> UnitCellCoord
//   is_identity(&self) -> bool

pub use supercell_sym_op::SupercellSymOp; // struct - supercell factor group op followed by a translation
// SupercellSymOp impl methods:
//   all(supercell: &Arc<Supercell>) -> impl Iterator<Item = SupercellSymOp> - translation-major
//   permute_index(&self, linear_index) -> usize                     - new[s] == old[permute_index(s)]
//   prim_op(&self) -> &SymOp / translation(&self) -> UnitCell

// ======================== POINT GROUP GENERATORS ========================
pub use point_groups::{
    generate_point_group_2d,        // fn(bravais: &Bravais2D) -> Vec<Matrix3<i64>>
    generate_cubic_operations,      // fn() -> Vec<Matrix3<i64>> - Oh, 48 operations
    generate_group,                 // fn(generators: &[Matrix3<i64>]) -> Vec<Matrix3<i64>> - closure under multiplication
};
