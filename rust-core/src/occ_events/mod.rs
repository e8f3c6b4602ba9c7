// Occupation events: located transitions between occupation states on a cluster of sites

// ======================== MODULE DECLARATIONS ========================
pub mod occ_event;


// ======================== OCCUPATION EVENTS ========================
pub use occ_event::{
    OccEvent,                       // struct - sites with initial and final occupation
    OccEventData,                   // struct - serialized form {sites, initial_occupation, final_occupation}
};
// OccEvent impl methods:
//   new(sites, initial_occupation, final_occupation) -> Result<Self>
//   translated(&self, translation: &UnitCell) -> OccEvent
//   copy_apply(&self, op: &SymOp) -> OccEvent                       - image under a prim factor group op
//   reversed(&self) -> OccEvent                                     - swaps initial and final occupation
//   standardized(&self) -> OccEvent                                 - sorted sites, lesser direction
//   prim_periodic_normalized(&self) -> OccEvent                     - standardized, first site in origin cell
