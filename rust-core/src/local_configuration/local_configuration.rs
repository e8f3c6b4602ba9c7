use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::configuration::configuration::{Configuration, ConfigurationData};
use crate::error::EnumError;
use crate::lattice::supercell::{Supercell, SupercellSet};
use crate::local_configuration::event_supercell_info::{OccEventSupercellSymInfo, Position};
use crate::local_configuration::event_sym_info::OccEventSymInfo;
use crate::occ_events::occ_event::OccEvent;
use crate::symmetries::supercell_sym_op::SupercellSymOp;
use crate::Result;

/// A configuration together with the position of an event in its supercell.
///
/// Owns its configuration; the event symmetry contexts are shared. Cloning copies the
/// configuration and position and shares the contexts.
///
/// There is no `PartialEq`/`Ord`: comparison is only defined between local
/// configurations sharing the same [`OccEventSymInfo`], see [`try_eq`](Self::try_eq)
/// and [`try_cmp`](Self::try_cmp).
#[derive(Debug, Clone)]
pub struct LocalConfiguration {
    configuration: Configuration,
    pos: Position,
    event_info: Arc<OccEventSymInfo>,
    event_supercell_info: Arc<OccEventSupercellSymInfo>,
}

impl LocalConfiguration {
    pub fn new(
        configuration: Configuration,
        pos: Position,
        event_info: &Arc<OccEventSymInfo>,
    ) -> Result<Self> {
        let event_supercell_info = event_info.get_event_supercell_info(configuration.supercell())?;
        event_supercell_info.check_pos(&pos)?;
        Ok(Self {
            configuration,
            pos,
            event_info: event_info.clone(),
            event_supercell_info,
        })
    }

    /// Locate `event` in the configuration's supercell.
    pub fn from_event(
        configuration: Configuration,
        event: &OccEvent,
        event_info: &Arc<OccEventSymInfo>,
    ) -> Result<Self> {
        let event_supercell_info = event_info.get_event_supercell_info(configuration.supercell())?;
        let pos = event_supercell_info.coordinate(event)?;
        Ok(Self {
            configuration,
            pos,
            event_info: event_info.clone(),
            event_supercell_info,
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn supercell(&self) -> &Arc<Supercell> {
        self.configuration.supercell()
    }

    pub fn event_info(&self) -> &Arc<OccEventSymInfo> {
        &self.event_info
    }

    pub fn event_supercell_info(&self) -> &Arc<OccEventSupercellSymInfo> {
        &self.event_supercell_info
    }

    /// The event at `pos`, recomputed on every call
    pub fn event(&self) -> Result<OccEvent> {
        self.event_supercell_info.event(&self.pos)
    }

    /// Image under a symmetry operation of the configuration's supercell: the
    /// configuration and the event move together.
    pub fn apply(&self, op: &SupercellSymOp) -> Result<LocalConfiguration> {
        let configuration = self.configuration.copy_apply(op)?;
        let event = self
            .event_supercell_info
            .copy_apply_supercell_symop(op, &self.event()?)?;
        let pos = self.event_supercell_info.coordinate(&event)?;
        Ok(Self {
            configuration,
            pos,
            event_info: self.event_info.clone(),
            event_supercell_info: self.event_supercell_info.clone(),
        })
    }

    /// Image under a prim factor group operation, expressed in the image supercell.
    pub fn apply_factor_group_op(
        &self,
        prim_factor_group_index: usize,
        supercell_set: Option<&SupercellSet>,
    ) -> Result<LocalConfiguration> {
        let op = self.event_info.prim().factor_group_op(prim_factor_group_index)?;
        let configuration = self
            .configuration
            .copy_apply_prim_op(prim_factor_group_index, supercell_set)?;
        let event = self.event()?.copy_apply(op).standardized();
        Self::from_event(configuration, &event, &self.event_info)
    }

    /// Copy with the event's initial occupation written on the event sites
    pub fn with_event_occupation(&self) -> Result<LocalConfiguration> {
        let configuration = self
            .event_supercell_info
            .apply_event_occupation(&self.pos, &self.configuration)?;
        Ok(Self {
            configuration,
            ..self.clone()
        })
    }

    /// Supercell operations that keep the event position
    pub fn event_invariant_ops(&self) -> Result<Vec<SupercellSymOp>> {
        self.event_supercell_info.event_invariant_ops(&self.pos)
    }

    /// Equal positions and equal configurations.
    pub fn try_eq(&self, other: &LocalConfiguration) -> Result<bool> {
        self.check_same_context(other)?;
        Ok(self.pos == other.pos && self.configuration == other.configuration)
    }

    /// Position first, then configuration.
    pub fn try_cmp(&self, other: &LocalConfiguration) -> Result<Ordering> {
        self.check_same_context(other)?;
        Ok(self.order_cmp(other))
    }

    pub(crate) fn order_cmp(&self, other: &LocalConfiguration) -> Ordering {
        self.pos
            .cmp(&other.pos)
            .then_with(|| self.configuration.cmp(&other.configuration))
    }

    pub fn check_same_context(&self, other: &LocalConfiguration) -> Result<()> {
        if self.event_info.id() != other.event_info.id() {
            return Err(EnumError::ContextMismatch);
        }
        Ok(())
    }

    pub fn to_data(&self) -> LocalConfigurationData {
        LocalConfigurationData {
            configuration: self.configuration.to_data(),
            pos: self.pos,
        }
    }

    pub fn from_data(
        data: &LocalConfigurationData,
        event_info: &Arc<OccEventSymInfo>,
        supercell_set: &SupercellSet,
    ) -> Result<Self> {
        if !Arc::ptr_eq(supercell_set.prim(), event_info.prim()) {
            return Err(EnumError::PrimMismatch(
                "SupercellSet and event symmetry info belong to different prims".into(),
            ));
        }
        let configuration = Configuration::from_data(&data.configuration, supercell_set)?;
        Self::new(configuration, data.pos, event_info)
    }
}

/// Serialized form of [`LocalConfiguration`]; the event symmetry info is serialized once
/// by the owning [`LocalConfigurationList`](crate::local_configuration::LocalConfigurationList).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfigurationData {
    pub configuration: ConfigurationData,
    pub pos: Position,
}
