use serde::{Deserialize, Serialize};

use crate::error::EnumError;
use crate::lattice::prim::Prim;
use crate::lattice::unitcellcoord::{UnitCell, UnitCellCoord};
use crate::symmetries::symmetry_operations::SymOp;
use crate::Result;

/// An occupation event: the occupants on a cluster of sites change from
/// `initial_occupation` to `final_occupation`.
///
/// Ordering compares sites, then initial occupation, then final occupation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "OccEventData", into = "OccEventData")]
pub struct OccEvent {
    sites: Vec<UnitCellCoord>,
    initial_occupation: Vec<usize>,
    final_occupation: Vec<usize>,
}

impl OccEvent {
    pub fn new(
        sites: Vec<UnitCellCoord>,
        initial_occupation: Vec<usize>,
        final_occupation: Vec<usize>,
    ) -> Result<Self> {
        if sites.is_empty() {
            return Err(EnumError::InvalidArgument("event has no sites".into()));
        }
        if initial_occupation.len() != sites.len() || final_occupation.len() != sites.len() {
            return Err(EnumError::InvalidArgument(format!(
                "event has {} sites but {} initial and {} final occupation values",
                sites.len(),
                initial_occupation.len(),
                final_occupation.len()
            )));
        }
        Ok(Self {
            sites,
            initial_occupation,
            final_occupation,
        })
    }

    pub fn sites(&self) -> &[UnitCellCoord] {
        &self.sites
    }

    pub fn initial_occupation(&self) -> &[usize] {
        &self.initial_occupation
    }

    pub fn final_occupation(&self) -> &[usize] {
        &self.final_occupation
    }

    pub fn size(&self) -> usize {
        self.sites.len()
    }

    /// Check every site and occupation against a prim.
    pub fn validate(&self, prim: &Prim) -> Result<()> {
        for (i, site) in self.sites.iter().enumerate() {
            prim.check_occupant(site, self.initial_occupation[i])?;
            prim.check_occupant(site, self.final_occupation[i])?;
        }
        Ok(())
    }

    /// The same event in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            sites: self.sites.clone(),
            initial_occupation: self.final_occupation.clone(),
            final_occupation: self.initial_occupation.clone(),
        }
    }

    pub fn translated(&self, translation: &UnitCell) -> Self {
        Self {
            sites: self.sites.iter().map(|s| s.translated(translation)).collect(),
            initial_occupation: self.initial_occupation.clone(),
            final_occupation: self.final_occupation.clone(),
        }
    }

    /// Image under a prim factor group operation. Occupation values move with their sites.
    pub fn copy_apply(&self, op: &SymOp) -> Self {
        Self {
            sites: self.sites.iter().map(|s| op.apply(s)).collect(),
            initial_occupation: self.initial_occupation.clone(),
            final_occupation: self.final_occupation.clone(),
        }
    }

    /// Sites sorted (occupations follow), then the lesser of the event and its reverse.
    ///
    /// Two events describe the same physical event exactly when their standardized
    /// forms are equal.
    pub fn standardized(&self) -> Self {
        let mut entries: Vec<(UnitCellCoord, usize, usize)> = self
            .sites
            .iter()
            .zip(&self.initial_occupation)
            .zip(&self.final_occupation)
            .map(|((site, &initial), &fin)| (*site, initial, fin))
            .collect();
        entries.sort();
        let forward = Self {
            sites: entries.iter().map(|e| e.0).collect(),
            initial_occupation: entries.iter().map(|e| e.1).collect(),
            final_occupation: entries.iter().map(|e| e.2).collect(),
        };
        let reverse = forward.reversed();
        if reverse < forward {
            reverse
        } else {
            forward
        }
    }

    /// Standardized, then translated so the first site is in the origin unit cell.
    ///
    /// Equal for exactly the events related by a lattice translation.
    pub fn prim_periodic_normalized(&self) -> Self {
        let standardized = self.standardized();
        let origin = -standardized.sites[0].unitcell();
        standardized.translated(&origin)
    }

    /// Sites of the event, sorted
    pub fn cluster(&self) -> Vec<UnitCellCoord> {
        let mut sites = self.sites.clone();
        sites.sort();
        sites
    }
}

/// Serialized form of [`OccEvent`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccEventData {
    pub sites: Vec<UnitCellCoord>,
    pub initial_occupation: Vec<usize>,
    pub final_occupation: Vec<usize>,
}

impl TryFrom<OccEventData> for OccEvent {
    type Error = EnumError;

    fn try_from(data: OccEventData) -> Result<Self> {
        OccEvent::new(data.sites, data.initial_occupation, data.final_occupation)
    }
}

impl From<OccEvent> for OccEventData {
    fn from(event: OccEvent) -> Self {
        OccEventData {
            sites: event.sites,
            initial_occupation: event.initial_occupation,
            final_occupation: event.final_occupation,
        }
    }
}
