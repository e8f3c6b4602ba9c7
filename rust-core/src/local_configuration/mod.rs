// Local configuration module: an event placed in a periodic configuration
// This module provides event position bookkeeping, the local configuration entity,
// its shared-context collection, and canonicalization under three equivalence groups

// ======================== MODULE DECLARATIONS ========================
pub mod canonical;
pub mod event_supercell_info;
pub mod event_sym_info;
pub mod local_configuration;
pub mod local_configuration_list;

mod _tests_local_configuration;
mod _tests_local_configuration_list;

// ======================== EVENT POSITION MODEL ========================
pub use event_sym_info::{
    OccEventPrimSymInfo,            // struct - orbit of a prototype event, generating ops and phenomenal clusters
    OccEventSymInfo,                // struct - shared event-type context with a lazy per-supercell cache
    OccEventSymInfoData,            // struct - serialized form {prototype_event, equivalents_info}
    EquivalentsInfo,                // struct - {phenomenal_clusters, equivalent_generating_op_indices}
    SymInfoId,                      // struct - identity token compared by local configurations
};
// OccEventSymInfo impl methods:
//   init(prim, prototype_event, phenomenal_clusters, op_indices) -> Result<Arc<Self>>
//   get_event_supercell_info(&self, supercell: &Arc<Supercell>) -> Result<Arc<OccEventSupercellSymInfo>>
//   deep_copy(&self) -> Arc<Self>                                   - distinct context, same orbit
//   to_data / from_data                                             - prototype event and equivalents info only

pub use event_supercell_info::{
    OccEventSupercellSymInfo,       // struct - event <-> position conversion within one supercell
    Position,                       // struct - (unitcell_index, equivalent_index), serialized as [i, j]
};
// OccEventSupercellSymInfo impl methods:
//   coordinate(&self, event: &OccEvent) -> Result<Position>
//   event(&self, pos: &Position) -> Result<OccEvent>
//   copy_apply_supercell_symop(&self, op, event) -> Result<OccEvent>
//   apply_event_occupation(&self, pos, configuration) -> Result<Configuration>
//   event_invariant_ops(&self, pos) -> Result<Vec<SupercellSymOp>>

// ======================== LOCAL CONFIGURATIONS ========================
pub use local_configuration::{
    LocalConfiguration,             // struct - (configuration, pos, shared event symmetry context)
    LocalConfigurationData,         // struct - serialized form {configuration, pos}
};
// LocalConfiguration impl methods:
//   new(configuration, pos, event_info) -> Result<Self>             - validates prim and position range
//   from_event(configuration, event, event_info) -> Result<Self>
//   event(&self) -> Result<OccEvent>                                - recomputed from pos
//   apply(&self, op: &SupercellSymOp) -> Result<LocalConfiguration>
//   apply_factor_group_op(&self, index, set) -> Result<LocalConfiguration>
//   try_eq / try_cmp                                                - fail with ContextMismatch across contexts

pub use local_configuration_list::{
    LocalConfigurationList,         // struct - ordered list sharing one event symmetry context
    LocalConfigurationListData,     // struct - {prototype_event, equivalents_info, local_configurations}
};

// ======================== CANONICALIZATION ========================
pub use canonical::{
    CanonicalOptions,               // struct - {in_canonical_pos, in_canonical_supercell, apply_event_occupation}
    make_canonical_local_configuration, // fn(initial, options, set) -> Result<LocalConfiguration>
    is_canonical_local_configuration,   // fn(local_configuration, options) -> Result<bool>
};
