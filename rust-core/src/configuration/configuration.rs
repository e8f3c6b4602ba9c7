use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::EnumError;
use crate::lattice::integer_matrix::from_rows;
use crate::lattice::supercell::{make_supercell, Supercell, SupercellSet};
use crate::symmetries::supercell_sym_op::SupercellSymOp;
use crate::Result;

/// Site occupation of a supercell.
///
/// `occupation[l]` indexes into the allowed occupants of the sublattice of site `l`.
/// Ordering compares the supercell first, then the occupation vector lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Configuration {
    supercell: Arc<Supercell>,
    occupation: Vec<usize>,
}

impl Configuration {
    pub fn new(supercell: Arc<Supercell>, occupation: Vec<usize>) -> Result<Self> {
        check_occupation(&supercell, &occupation)?;
        Ok(Self {
            supercell,
            occupation,
        })
    }

    /// Every site holds its first allowed occupant.
    pub fn with_default_occupation(supercell: Arc<Supercell>) -> Self {
        let occupation = vec![0; supercell.n_sites()];
        Self {
            supercell,
            occupation,
        }
    }

    pub fn supercell(&self) -> &Arc<Supercell> {
        &self.supercell
    }

    pub fn occupation(&self) -> &[usize] {
        &self.occupation
    }

    pub fn occ(&self, linear_index: usize) -> Result<usize> {
        self.occupation
            .get(linear_index)
            .copied()
            .ok_or(EnumError::IndexOutOfRange {
                index: linear_index,
                len: self.occupation.len(),
            })
    }

    pub fn set_occ(&mut self, linear_index: usize, value: usize) -> Result<()> {
        let len = self.occupation.len();
        if linear_index >= len {
            return Err(EnumError::IndexOutOfRange {
                index: linear_index,
                len,
            });
        }
        let n_occupants =
            self.supercell.prim().basis()[self.supercell.sublattice(linear_index)].n_occupants();
        if value >= n_occupants {
            return Err(EnumError::InvalidConfiguration(format!(
                "occupation {} not allowed on site {} ({} occupants)",
                value, linear_index, n_occupants
            )));
        }
        self.occupation[linear_index] = value;
        Ok(())
    }

    /// Replace the whole occupation vector.
    pub fn set_occupation(&mut self, occupation: Vec<usize>) -> Result<()> {
        check_occupation(&self.supercell, &occupation)?;
        self.occupation = occupation;
        Ok(())
    }

    /// Copy transformed by a symmetry operation of the same supercell.
    pub fn copy_apply(&self, op: &SupercellSymOp) -> Result<Configuration> {
        if op.supercell() != &self.supercell {
            return Err(EnumError::SupercellMismatch(
                "symmetry operation is for a different supercell than the configuration".into(),
            ));
        }
        Ok(self.apply_unchecked(op))
    }

    pub(crate) fn apply_unchecked(&self, op: &SupercellSymOp) -> Configuration {
        let occupation = (0..self.occupation.len())
            .map(|l| self.occupation[op.permute_index(l)])
            .collect();
        Configuration {
            supercell: self.supercell.clone(),
            occupation,
        }
    }

    /// Copy transformed by a prim factor group operation, expressed in the image
    /// supercell of that operation.
    pub fn copy_apply_prim_op(
        &self,
        prim_factor_group_index: usize,
        supercell_set: Option<&SupercellSet>,
    ) -> Result<Configuration> {
        let prim = self.supercell.prim();
        let op = prim.factor_group_op(prim_factor_group_index)?;
        if let Some(set) = supercell_set {
            check_set_prim(set, &self.supercell)?;
        }
        let image = make_supercell(
            prim,
            self.supercell.image_transformation_matrix(op),
            supercell_set,
        );
        let mut occupation = vec![0; image.n_sites()];
        for (l, &value) in self.occupation.iter().enumerate() {
            let after = image.linear_index(&op.apply(&self.supercell.site(l)));
            occupation[after] = value;
        }
        Ok(Configuration {
            supercell: image,
            occupation,
        })
    }

    pub fn to_data(&self) -> ConfigurationData {
        ConfigurationData {
            transformation_matrix_to_supercell: self.supercell.transformation_matrix_rows(),
            occupation: self.occupation.clone(),
        }
    }

    /// Reconstruct from data, sharing supercells through `supercell_set`.
    pub fn from_data(data: &ConfigurationData, supercell_set: &SupercellSet) -> Result<Self> {
        let supercell =
            supercell_set.add(&from_rows(&data.transformation_matrix_to_supercell))?;
        Configuration::new(supercell, data.occupation.clone())
    }
}

/// Tile `motif` into `supercell`, which must be a superlattice of the motif's supercell.
pub fn copy_configuration(
    motif: &Configuration,
    supercell: &Arc<Supercell>,
) -> Result<Configuration> {
    if !Arc::ptr_eq(motif.supercell.prim(), supercell.prim()) {
        return Err(EnumError::PrimMismatch(
            "motif and supercell belong to different prims".into(),
        ));
    }
    if !supercell.is_superlattice_of(&motif.supercell) {
        return Err(EnumError::NotASuperlattice);
    }
    let occupation = (0..supercell.n_sites())
        .map(|l| motif.occupation[motif.supercell.linear_index(&supercell.site(l))])
        .collect();
    Ok(Configuration {
        supercell: supercell.clone(),
        occupation,
    })
}

fn check_occupation(supercell: &Supercell, occupation: &[usize]) -> Result<()> {
    if occupation.len() != supercell.n_sites() {
        return Err(EnumError::InvalidConfiguration(format!(
            "occupation has {} values, supercell has {} sites",
            occupation.len(),
            supercell.n_sites()
        )));
    }
    let basis = supercell.prim().basis();
    for (l, &value) in occupation.iter().enumerate() {
        let n_occupants = basis[supercell.sublattice(l)].n_occupants();
        if value >= n_occupants {
            return Err(EnumError::InvalidConfiguration(format!(
                "occupation {} not allowed on site {} ({} occupants)",
                value, l, n_occupants
            )));
        }
    }
    Ok(())
}

pub(crate) fn check_set_prim(set: &SupercellSet, supercell: &Supercell) -> Result<()> {
    if !Arc::ptr_eq(set.prim(), supercell.prim()) {
        return Err(EnumError::PrimMismatch(
            "SupercellSet belongs to a different prim".into(),
        ));
    }
    Ok(())
}

/// Serialized form of [`Configuration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationData {
    pub transformation_matrix_to_supercell: [[i64; 3]; 3],
    pub occupation: Vec<usize>,
}
