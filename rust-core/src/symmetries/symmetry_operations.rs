use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::lattice::integer_matrix::{from_rows, to_rows};
use crate::lattice::unitcellcoord::{UnitCell, UnitCellCoord};

/// A prim factor group operation, represented by its action on integral site coordinates.
///
/// A site `(b, u)` maps to `(sublattice_after[b], point * u + unitcell_shift[b])`, where
/// `point` is the point operation expressed in fractional coordinates of the prim lattice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SymOpData", into = "SymOpData")]
pub struct SymOp {
    /// Integer rotation matrix in fractional coordinates, determinant ±1
    pub point: Matrix3<i64>,
    /// Sublattice each basis site is mapped onto
    pub sublattice_after: Vec<usize>,
    /// Unit cell shift picked up by each basis site
    pub unitcell_shift: Vec<UnitCell>,
}

impl SymOp {
    /// Create a new symmetry operation
    pub fn new(
        point: Matrix3<i64>,
        sublattice_after: Vec<usize>,
        unitcell_shift: Vec<UnitCell>,
    ) -> Self {
        Self {
            point,
            sublattice_after,
            unitcell_shift,
        }
    }

    /// Point operation acting on a prim with `n_basis` sites that map onto themselves
    pub fn from_point(point: Matrix3<i64>, n_basis: usize) -> Self {
        Self {
            point,
            sublattice_after: (0..n_basis).collect(),
            unitcell_shift: vec![Vector3::zeros(); n_basis],
        }
    }

    /// Create identity operation
    pub fn identity(n_basis: usize) -> Self {
        Self::from_point(Matrix3::identity(), n_basis)
    }

    /// Apply symmetry operation to a site
    pub fn apply(&self, site: &UnitCellCoord) -> UnitCellCoord {
        let b = site.sublattice;
        UnitCellCoord::new(
            self.sublattice_after[b],
            self.point * site.unitcell() + self.unitcell_shift[b],
        )
    }

    /// Number of basis sites this operation is defined for
    pub fn n_basis(&self) -> usize {
        self.sublattice_after.len()
    }

    /// Check if this is the identity operation
    pub fn is_identity(&self) -> bool {
        self.point == Matrix3::identity()
            && self.sublattice_after.iter().enumerate().all(|(i, b)| i == *b)
            && self.unitcell_shift.iter().all(|s| *s == Vector3::zeros())
    }
}

/// Row-major serialized form of [`SymOp`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymOpData {
    pub point: [[i64; 3]; 3],
    pub sublattice_after: Vec<usize>,
    pub unitcell_shift: Vec<[i64; 3]>,
}

impl From<SymOpData> for SymOp {
    fn from(data: SymOpData) -> Self {
        SymOp {
            point: from_rows(&data.point),
            sublattice_after: data.sublattice_after,
            unitcell_shift: data
                .unitcell_shift
                .iter()
                .map(|s| Vector3::new(s[0], s[1], s[2]))
                .collect(),
        }
    }
}

impl From<SymOp> for SymOpData {
    fn from(op: SymOp) -> Self {
        SymOpData {
            point: to_rows(&op.point),
            sublattice_after: op.sublattice_after,
            unitcell_shift: op.unitcell_shift.iter().map(|s| [s.x, s.y, s.z]).collect(),
        }
    }
}
