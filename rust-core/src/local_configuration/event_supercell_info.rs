use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::configuration::configuration::Configuration;
use crate::error::EnumError;
use crate::lattice::supercell::Supercell;
use crate::local_configuration::event_sym_info::OccEventPrimSymInfo;
use crate::occ_events::occ_event::OccEvent;
use crate::symmetries::supercell_sym_op::SupercellSymOp;
use crate::Result;

/// Location of an event in a supercell: which translation of which orbit member.
///
/// Serialized as `[unitcell_index, equivalent_index]`. Only meaningful together with the
/// [`OccEventSupercellSymInfo`] it was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    pub unitcell_index: usize,
    pub equivalent_index: usize,
}

impl Position {
    pub fn new(unitcell_index: usize, equivalent_index: usize) -> Self {
        Self {
            unitcell_index,
            equivalent_index,
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((unitcell_index, equivalent_index): (usize, usize)) -> Self {
        Self::new(unitcell_index, equivalent_index)
    }
}

impl From<Position> for (usize, usize) {
    fn from(pos: Position) -> Self {
        (pos.unitcell_index, pos.equivalent_index)
    }
}

/// Event symmetry context of one supercell.
#[derive(Debug)]
pub struct OccEventSupercellSymInfo {
    supercell: Arc<Supercell>,
    prim_info: Arc<OccEventPrimSymInfo>,
}

impl OccEventSupercellSymInfo {
    pub fn new(supercell: Arc<Supercell>, prim_info: Arc<OccEventPrimSymInfo>) -> Self {
        Self {
            supercell,
            prim_info,
        }
    }

    pub fn supercell(&self) -> &Arc<Supercell> {
        &self.supercell
    }

    pub fn prim_info(&self) -> &Arc<OccEventPrimSymInfo> {
        &self.prim_info
    }

    pub fn n_unitcells(&self) -> usize {
        self.supercell.volume()
    }

    pub fn n_equivalents(&self) -> usize {
        self.prim_info.n_equivalents()
    }

    /// Number of distinct positions in the supercell
    pub fn n_positions(&self) -> usize {
        self.n_unitcells() * self.n_equivalents()
    }

    pub fn check_pos(&self, pos: &Position) -> Result<()> {
        if pos.unitcell_index >= self.n_unitcells() || pos.equivalent_index >= self.n_equivalents()
        {
            return Err(EnumError::PositionOutOfRange {
                unitcell_index: pos.unitcell_index,
                equivalent_index: pos.equivalent_index,
                n_unitcells: self.n_unitcells(),
                n_equivalents: self.n_equivalents(),
            });
        }
        Ok(())
    }

    /// Position of `event`, which may be located in any periodic image of the supercell.
    pub fn coordinate(&self, event: &OccEvent) -> Result<Position> {
        let standardized = event.standardized();
        let equivalent_index = self.prim_info.equivalent_index(&standardized)?;
        let reference = &self.prim_info.events()[equivalent_index];
        let translation = standardized.sites()[0].unitcell() - reference.sites()[0].unitcell();
        Ok(Position::new(
            self.supercell.unitcell_index(&translation),
            equivalent_index,
        ))
    }

    /// Event at `pos`, standardized, with its translation inside the supercell.
    pub fn event(&self, pos: &Position) -> Result<OccEvent> {
        self.check_pos(pos)?;
        let translation = self.supercell.unitcell(pos.unitcell_index);
        Ok(self.prim_info.events()[pos.equivalent_index].translated(&translation))
    }

    /// Image of `event` under a symmetry operation of this supercell, standardized.
    pub fn copy_apply_supercell_symop(
        &self,
        op: &SupercellSymOp,
        event: &OccEvent,
    ) -> Result<OccEvent> {
        self.check_op(op)?;
        Ok(event
            .copy_apply(op.prim_op())
            .translated(&op.translation())
            .standardized())
    }

    /// Position reached from `pos` by a symmetry operation of this supercell.
    pub fn apply_to_pos(&self, op: &SupercellSymOp, pos: &Position) -> Result<Position> {
        let event = self.event(pos)?;
        self.coordinate(&self.copy_apply_supercell_symop(op, &event)?)
    }

    /// Copy of `configuration` with the event's initial occupation on the event sites.
    pub fn apply_event_occupation(
        &self,
        pos: &Position,
        configuration: &Configuration,
    ) -> Result<Configuration> {
        if configuration.supercell() != &self.supercell {
            return Err(EnumError::SupercellMismatch(
                "configuration is not in the supercell of the event supercell info".into(),
            ));
        }
        let event = self.event(pos)?;
        let mut result = configuration.clone();
        for (site, &value) in event.sites().iter().zip(event.initial_occupation()) {
            result.set_occ(self.supercell.linear_index(site), value)?;
        }
        Ok(result)
    }

    /// Supercell operations that map the event at `pos` onto itself.
    pub fn event_invariant_ops(&self, pos: &Position) -> Result<Vec<SupercellSymOp>> {
        let event = self.event(pos)?;
        let mut invariant = Vec::new();
        for op in SupercellSymOp::all(&self.supercell) {
            if self.coordinate(&self.copy_apply_supercell_symop(&op, &event)?)? == *pos {
                invariant.push(op);
            }
        }
        Ok(invariant)
    }

    fn check_op(&self, op: &SupercellSymOp) -> Result<()> {
        if op.supercell() != &self.supercell {
            return Err(EnumError::SupercellMismatch(
                "symmetry operation is for a different supercell than the event supercell info"
                    .into(),
            ));
        }
        Ok(())
    }
}
