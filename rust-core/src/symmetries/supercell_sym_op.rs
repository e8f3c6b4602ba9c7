use std::sync::Arc;

use crate::error::EnumError;
use crate::lattice::supercell::Supercell;
use crate::lattice::unitcellcoord::{UnitCell, UnitCellCoord};
use crate::symmetries::symmetry_operations::SymOp;
use crate::Result;

/// A supercell symmetry operation: a supercell factor group operation followed by a
/// translation within the supercell.
///
/// Operations of one supercell are numbered translation-major:
/// `index = translation_index * factor_group_size + factor_group_index`.
#[derive(Debug, Clone)]
pub struct SupercellSymOp {
    supercell: Arc<Supercell>,
    factor_group_index: usize,
    translation_index: usize,
}

impl SupercellSymOp {
    pub fn new(
        supercell: Arc<Supercell>,
        factor_group_index: usize,
        translation_index: usize,
    ) -> Result<Self> {
        let n_fg = supercell.sym_info().factor_group.len();
        if factor_group_index >= n_fg {
            return Err(EnumError::IndexOutOfRange {
                index: factor_group_index,
                len: n_fg,
            });
        }
        if translation_index >= supercell.volume() {
            return Err(EnumError::IndexOutOfRange {
                index: translation_index,
                len: supercell.volume(),
            });
        }
        Ok(Self {
            supercell,
            factor_group_index,
            translation_index,
        })
    }

    /// Identity operation of a supercell
    pub fn identity(supercell: &Arc<Supercell>) -> Self {
        let factor_group_index = supercell
            .sym_info()
            .factor_group
            .iter()
            .position(|&i| supercell.prim().factor_group()[i].is_identity())
            .unwrap_or(0);
        Self {
            supercell: supercell.clone(),
            factor_group_index,
            translation_index: 0,
        }
    }

    /// Every supercell symmetry operation, translation-major
    pub fn all(supercell: &Arc<Supercell>) -> impl Iterator<Item = SupercellSymOp> {
        let supercell = supercell.clone();
        let n_fg = supercell.sym_info().factor_group.len();
        let n_total = n_fg * supercell.volume();
        (0..n_total).map(move |index| Self {
            supercell: supercell.clone(),
            factor_group_index: index % n_fg,
            translation_index: index / n_fg,
        })
    }

    /// Pure translations of a supercell
    pub fn translations(supercell: &Arc<Supercell>) -> impl Iterator<Item = SupercellSymOp> {
        let identity = Self::identity(supercell);
        (0..supercell.volume()).map(move |translation_index| Self {
            translation_index,
            ..identity.clone()
        })
    }

    pub fn supercell(&self) -> &Arc<Supercell> {
        &self.supercell
    }

    /// Index into the supercell factor group
    pub fn factor_group_index(&self) -> usize {
        self.factor_group_index
    }

    /// Index into the prim factor group
    pub fn prim_factor_group_index(&self) -> usize {
        self.supercell.sym_info().factor_group[self.factor_group_index]
    }

    pub fn translation_index(&self) -> usize {
        self.translation_index
    }

    /// Translation-major operation index
    pub fn index(&self) -> usize {
        self.translation_index * self.supercell.sym_info().factor_group.len()
            + self.factor_group_index
    }

    pub fn prim_op(&self) -> &SymOp {
        &self.supercell.prim().factor_group()[self.prim_factor_group_index()]
    }

    pub fn translation(&self) -> UnitCell {
        self.supercell.unitcell(self.translation_index)
    }

    /// Site index whose value moves to `linear_index` under this operation
    pub fn permute_index(&self, linear_index: usize) -> usize {
        let sym_info = self.supercell.sym_info();
        let translated = sym_info.translation_permutations[self.translation_index][linear_index];
        sym_info.factor_group_permutations[self.factor_group_index][translated]
    }

    /// Apply to a site of the infinite crystal (not brought within the supercell)
    pub fn apply(&self, site: &UnitCellCoord) -> UnitCellCoord {
        self.prim_op().apply(site).translated(&self.translation())
    }
}
