use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::configuration::configuration::Configuration;
use crate::error::EnumError;
use crate::lattice::prim::Prim;
use crate::lattice::supercell::SupercellSet;
use crate::local_configuration::event_sym_info::{
    EquivalentsInfo, OccEventSymInfo, OccEventSymInfoData,
};
use crate::local_configuration::local_configuration::{LocalConfiguration, LocalConfigurationData};
use crate::occ_events::occ_event::OccEvent;
use crate::Result;

/// Ordered list of local configurations that all share one [`OccEventSymInfo`].
///
/// Every insertion checks the shared context; an entity from another context, even a
/// structurally identical one, is rejected with [`EnumError::ContextMismatch`].
#[derive(Debug, Clone)]
pub struct LocalConfigurationList {
    event_info: Arc<OccEventSymInfo>,
    local_configurations: Vec<LocalConfiguration>,
}

impl LocalConfigurationList {
    pub fn new(
        event_info: Arc<OccEventSymInfo>,
        local_configurations: Vec<LocalConfiguration>,
    ) -> Result<Self> {
        let list = Self {
            event_info,
            local_configurations: Vec::new(),
        };
        for local_configuration in &local_configurations {
            list.check(local_configuration)?;
        }
        Ok(Self {
            local_configurations,
            ..list
        })
    }

    pub fn event_info(&self) -> &Arc<OccEventSymInfo> {
        &self.event_info
    }

    /// Build a local configuration in this list's context, without inserting it.
    pub fn as_local_configuration(
        &self,
        event: &OccEvent,
        configuration: Configuration,
    ) -> Result<LocalConfiguration> {
        LocalConfiguration::from_event(configuration, event, &self.event_info)
    }

    pub fn len(&self) -> usize {
        self.local_configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local_configurations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LocalConfiguration> {
        self.local_configurations.get(index)
    }

    pub fn set(&mut self, index: usize, local_configuration: LocalConfiguration) -> Result<()> {
        self.check(&local_configuration)?;
        let len = self.local_configurations.len();
        let slot = self
            .local_configurations
            .get_mut(index)
            .ok_or(EnumError::IndexOutOfRange { index, len })?;
        *slot = local_configuration;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<LocalConfiguration> {
        let len = self.local_configurations.len();
        if index >= len {
            return Err(EnumError::IndexOutOfRange { index, len });
        }
        Ok(self.local_configurations.remove(index))
    }

    pub fn append(&mut self, local_configuration: LocalConfiguration) -> Result<()> {
        self.check(&local_configuration)?;
        self.local_configurations.push(local_configuration);
        Ok(())
    }

    pub fn contains(&self, local_configuration: &LocalConfiguration) -> Result<bool> {
        Ok(self.index(local_configuration)?.is_some())
    }

    /// Index of the first element equal to `local_configuration`
    pub fn index(&self, local_configuration: &LocalConfiguration) -> Result<Option<usize>> {
        self.check(local_configuration)?;
        Ok(self
            .local_configurations
            .iter()
            .position(|x| x.order_cmp(local_configuration).is_eq()))
    }

    /// Stable sort by position, then configuration
    pub fn sort(&mut self) {
        self.local_configurations.sort_by(|a, b| a.order_cmp(b));
    }

    pub fn clear(&mut self) {
        self.local_configurations.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocalConfiguration> {
        self.local_configurations.iter()
    }

    pub fn to_data(&self) -> LocalConfigurationListData {
        let OccEventSymInfoData {
            prototype_event,
            equivalents_info,
        } = self.event_info.to_data();
        LocalConfigurationListData {
            prototype_event,
            equivalents_info,
            local_configurations: self.iter().map(LocalConfiguration::to_data).collect(),
        }
    }

    /// Reconstruct with a new event symmetry context for `prim`, sharing supercells
    /// through `supercell_set`.
    pub fn from_data(
        data: &LocalConfigurationListData,
        prim: &Arc<Prim>,
        supercell_set: &SupercellSet,
    ) -> Result<Self> {
        if !Arc::ptr_eq(supercell_set.prim(), prim) {
            return Err(EnumError::PrimMismatch(
                "SupercellSet belongs to a different prim".into(),
            ));
        }
        let event_info = OccEventSymInfo::from_data(
            &OccEventSymInfoData {
                prototype_event: data.prototype_event.clone(),
                equivalents_info: data.equivalents_info.clone(),
            },
            prim.clone(),
        )?;
        let local_configurations = data
            .local_configurations
            .iter()
            .map(|x| LocalConfiguration::from_data(x, &event_info, supercell_set))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            event_info,
            local_configurations,
        })
    }

    fn check(&self, local_configuration: &LocalConfiguration) -> Result<()> {
        if local_configuration.event_info().id() != self.event_info.id() {
            return Err(EnumError::ContextMismatch);
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a LocalConfigurationList {
    type Item = &'a LocalConfiguration;
    type IntoIter = std::slice::Iter<'a, LocalConfiguration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serialized form of [`LocalConfigurationList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfigurationListData {
    pub prototype_event: OccEvent,
    pub equivalents_info: EquivalentsInfo,
    pub local_configurations: Vec<LocalConfigurationData>,
}
