// Configuration module: site occupations of a supercell and their canonical forms
// This module provides the configuration type used by local configurations and the enumerator

// ======================== MODULE DECLARATIONS ========================
pub mod canonical_form;
pub mod configuration;

// Test modules
mod _tests_configuration;

// ======================== CONFIGURATION ========================
pub use configuration::{
    Configuration,                  // struct - occupation vector of a supercell, ordered by (supercell, occupation)
    ConfigurationData,              // struct - serialized form {transformation_matrix_to_supercell, occupation}
    copy_configuration,             // fn(motif: &Configuration, supercell: &Arc<Supercell>) -> Result<Configuration> - tiles a motif
};
// Configuration impl methods:
//   new(supercell, occupation) -> Result<Self>                      - validates length and allowed occupants
//   with_default_occupation(supercell) -> Self                      - all sites hold occupant 0
//   copy_apply(&self, op: &SupercellSymOp) -> Result<Configuration>  - applies a supercell symmetry operation
//   copy_apply_prim_op(&self, index, set) -> Result<Configuration>  - applies a prim op, moving to the image supercell
//   set_occ / set_occupation                                        - validated occupation assignment
//   to_data / from_data                                             - structured (de)serialization

// ======================== CANONICAL FORMS ========================
pub use canonical_form::{
    make_canonical_configuration,   // fn(config, in_canonical_supercell, set) -> Result<Configuration> - greatest equivalent
    is_canonical_configuration,     // fn(config, in_canonical_supercell) -> Result<bool>
    make_invariant_subgroup,        // fn(config) -> Vec<SupercellSymOp> - operations leaving config unchanged
    make_equivalent_supercells,     // fn(supercell, set) -> Result<Vec<Arc<Supercell>>> - distinct images under the factor group
    make_canonical_supercell,       // fn(supercell, set) -> Result<Arc<Supercell>> - greatest equivalent supercell
    is_canonical_supercell,         // fn(supercell) -> bool
    to_canonical_supercell_op_index, // fn(supercell) -> usize - first prim op reaching the canonical supercell
};
