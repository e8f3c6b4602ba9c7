use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::error::EnumError;
use crate::lattice::integer_matrix::is_unimodular;
use crate::lattice::unitcellcoord::UnitCellCoord;
use crate::symmetries::symmetry_operations::SymOp;
use crate::Result;

/// A basis site of the prim and the occupants allowed on it.
///
/// Occupation values used throughout the crate are indices into `occupants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub occupants: Vec<String>,
}

impl Site {
    pub fn new<S: AsRef<str>>(occupants: &[S]) -> Self {
        Self {
            occupants: occupants.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    pub fn n_occupants(&self) -> usize {
        self.occupants.len()
    }
}

/// The primitive periodic structure: basis sites and the crystal factor group.
///
/// The factor group is given, never computed here; every operation must be a
/// permutation of the basis compatible with the allowed occupants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PrimData", into = "PrimData")]
pub struct Prim {
    basis: Vec<Site>,
    factor_group: Vec<SymOp>,
}

impl Prim {
    pub fn new(basis: Vec<Site>, factor_group: Vec<SymOp>) -> Result<Self> {
        validate_prim(&basis, &factor_group)?;
        Ok(Self {
            basis,
            factor_group,
        })
    }

    pub fn basis(&self) -> &[Site] {
        &self.basis
    }

    pub fn n_basis(&self) -> usize {
        self.basis.len()
    }

    pub fn factor_group(&self) -> &[SymOp] {
        &self.factor_group
    }

    /// Factor group operation by index
    pub fn factor_group_op(&self, index: usize) -> Result<&SymOp> {
        self.factor_group
            .get(index)
            .ok_or(EnumError::IndexOutOfRange {
                index,
                len: self.factor_group.len(),
            })
    }

    /// Distinct point operations of the factor group, in factor group order.
    pub fn point_group(&self) -> Vec<Matrix3<i64>> {
        let mut point_group: Vec<Matrix3<i64>> = Vec::new();
        for op in &self.factor_group {
            if !point_group.contains(&op.point) {
                point_group.push(op.point);
            }
        }
        point_group
    }

    /// Check that a site exists and `occupation` is allowed on it.
    pub fn check_occupant(&self, site: &UnitCellCoord, occupation: usize) -> Result<()> {
        let basis_site = self.basis.get(site.sublattice).ok_or_else(|| {
            EnumError::InvalidArgument(format!(
                "sublattice index {} out of range for a prim with {} basis sites",
                site.sublattice,
                self.basis.len()
            ))
        })?;
        if occupation >= basis_site.n_occupants() {
            return Err(EnumError::InvalidArgument(format!(
                "occupation {} not allowed on sublattice {} ({} occupants)",
                occupation,
                site.sublattice,
                basis_site.n_occupants()
            )));
        }
        Ok(())
    }
}

fn validate_prim(basis: &[Site], factor_group: &[SymOp]) -> Result<()> {
    if basis.is_empty() {
        return Err(EnumError::InvalidArgument("prim basis is empty".into()));
    }
    if let Some(b) = basis.iter().position(|site| site.occupants.is_empty()) {
        return Err(EnumError::InvalidArgument(format!(
            "basis site {} has no allowed occupants",
            b
        )));
    }
    if !factor_group.iter().any(SymOp::is_identity) {
        return Err(EnumError::InvalidArgument(
            "factor group must contain the identity operation".into(),
        ));
    }
    for (i, op) in factor_group.iter().enumerate() {
        if op.n_basis() != basis.len() || op.unitcell_shift.len() != basis.len() {
            return Err(EnumError::InvalidArgument(format!(
                "factor group op {} is defined for {} basis sites, prim has {}",
                i,
                op.n_basis(),
                basis.len()
            )));
        }
        if !is_unimodular(&op.point) {
            return Err(EnumError::InvalidArgument(format!(
                "factor group op {} point matrix is not unimodular",
                i
            )));
        }
        let mut seen = vec![false; basis.len()];
        for (b, &b_after) in op.sublattice_after.iter().enumerate() {
            if b_after >= basis.len() || seen[b_after] {
                return Err(EnumError::InvalidArgument(format!(
                    "factor group op {} does not permute the basis",
                    i
                )));
            }
            seen[b_after] = true;
            if basis[b].occupants != basis[b_after].occupants {
                return Err(EnumError::InvalidArgument(format!(
                    "factor group op {} maps sublattice {} onto sublattice {} with different occupants",
                    i, b, b_after
                )));
            }
        }
    }
    Ok(())
}

/// Serialized form of [`Prim`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimData {
    pub basis: Vec<Site>,
    pub factor_group: Vec<SymOp>,
}

impl TryFrom<PrimData> for Prim {
    type Error = EnumError;

    fn try_from(data: PrimData) -> Result<Self> {
        Prim::new(data.basis, data.factor_group)
    }
}

impl From<Prim> for PrimData {
    fn from(prim: Prim) -> Self {
        PrimData {
            basis: prim.basis,
            factor_group: prim.factor_group,
        }
    }
}
