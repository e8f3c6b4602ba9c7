// Enumeration module: symmetrically distinct super configurations of a motif

// ======================== MODULE DECLARATIONS ========================
pub mod super_config_enum;


// ======================== SUPER CONFIGURATION ENUMERATION ========================
pub use super_config_enum::{
    SuperConfigEnum,                // struct - enumerator over a prim with an optional shared SupercellSet
    SuperConfigIter,                // struct - lazy iterator with a per-call registry of canonical forms
};
// SuperConfigEnum impl methods:
//   new(prim, supercell_set) -> Result<Self>
//   by_supercell(&self, motif, params: &SupercellEnumParams) -> Result<SuperConfigIter>
//   by_supercell_list(&self, motif, supercells: Vec<Arc<Supercell>>) -> Result<SuperConfigIter>
