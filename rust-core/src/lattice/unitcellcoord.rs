use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Integer unit cell translation, in units of the prim lattice vectors.
pub type UnitCell = Vector3<i64>;

/// A site in the infinite crystal: sublattice index plus unit cell.
///
/// Serialized as `[b, i, j, k]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct UnitCellCoord {
    pub sublattice: usize,
    pub unitcell: [i64; 3],
}

impl UnitCellCoord {
    pub fn new(sublattice: usize, unitcell: UnitCell) -> Self {
        Self {
            sublattice,
            unitcell: [unitcell.x, unitcell.y, unitcell.z],
        }
    }

    pub fn unitcell(&self) -> UnitCell {
        Vector3::new(self.unitcell[0], self.unitcell[1], self.unitcell[2])
    }

    /// Copy translated by `translation`.
    pub fn translated(&self, translation: &UnitCell) -> Self {
        Self::new(self.sublattice, self.unitcell() + translation)
    }
}

impl TryFrom<Vec<i64>> for UnitCellCoord {
    type Error = String;

    fn try_from(value: Vec<i64>) -> Result<Self, Self::Error> {
        if value.len() != 4 {
            return Err(format!(
                "UnitCellCoord must have 4 entries [b, i, j, k], got {}",
                value.len()
            ));
        }
        if value[0] < 0 {
            return Err(format!("negative sublattice index: {}", value[0]));
        }
        Ok(Self {
            sublattice: value[0] as usize,
            unitcell: [value[1], value[2], value[3]],
        })
    }
}

impl From<UnitCellCoord> for Vec<i64> {
    fn from(value: UnitCellCoord) -> Self {
        vec![
            value.sublattice as i64,
            value.unitcell[0],
            value.unitcell[1],
            value.unitcell[2],
        ]
    }
}
