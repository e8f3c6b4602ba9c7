use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use nalgebra::{Matrix3, Vector3};
use parking_lot::RwLock;

use crate::error::EnumError;
use crate::lattice::integer_matrix::{
    hermite_normal_form, integer_quotient, matrix_key, reduce_to_hnf, to_rows, MatrixKey,
};
use crate::lattice::prim::Prim;
use crate::lattice::unitcellcoord::{UnitCell, UnitCellCoord};
use crate::symmetries::symmetry_operations::SymOp;
use crate::Result;

/// A periodic cell made of `volume` prim unit cells.
///
/// The supercell lattice vectors are the columns of `prim_lattice * T`, where `T` is kept
/// in lower-triangular Hermite normal form. With
///
/// ```text
///     | a 0 0 |
/// T = | b c 0 |
///     | d e f |
/// ```
///
/// every unit cell inside the supercell is brought into the box `0 <= i < a`,
/// `0 <= j < c`, `0 <= k < f` and indexed as `(i * c + j) * f + k`. Sites are indexed
/// sublattice-major: `b * volume + unitcell_index`.
#[derive(Debug)]
pub struct Supercell {
    prim: Arc<Prim>,
    transformation_matrix: Matrix3<i64>,
    key: MatrixKey,
    volume: usize,
    sym_info: SupercellSymInfo,
}

impl Supercell {
    /// Create a supercell from any nonsingular transformation matrix.
    pub fn new(prim: Arc<Prim>, transformation_matrix: Matrix3<i64>) -> Result<Self> {
        let hnf = hermite_normal_form(&transformation_matrix)?;
        Ok(Self::from_hnf(prim, hnf))
    }

    /// Build from a matrix already in Hermite normal form.
    pub(crate) fn from_hnf(prim: Arc<Prim>, hnf: Matrix3<i64>) -> Self {
        let volume = (hnf[(0, 0)] * hnf[(1, 1)] * hnf[(2, 2)]) as usize;
        let mut supercell = Self {
            prim,
            transformation_matrix: hnf,
            key: matrix_key(&hnf),
            volume,
            sym_info: SupercellSymInfo::default(),
        };
        supercell.sym_info = SupercellSymInfo::new(&supercell);
        debug!(
            "Constructed supercell {:?} (volume {}, {} factor group ops)",
            supercell.key,
            volume,
            supercell.sym_info.factor_group.len()
        );
        supercell
    }

    pub fn prim(&self) -> &Arc<Prim> {
        &self.prim
    }

    /// Transformation matrix in Hermite normal form
    pub fn transformation_matrix(&self) -> &Matrix3<i64> {
        &self.transformation_matrix
    }

    /// Row-major transformation matrix, the supercell's identity within a prim
    pub fn key(&self) -> &MatrixKey {
        &self.key
    }

    pub fn volume(&self) -> usize {
        self.volume
    }

    pub fn n_sites(&self) -> usize {
        self.volume * self.prim.n_basis()
    }

    pub fn sym_info(&self) -> &SupercellSymInfo {
        &self.sym_info
    }

    /// Translate `unitcell` by supercell lattice vectors into the indexing box.
    pub fn bring_within(&self, unitcell: &UnitCell) -> UnitCell {
        let h = &self.transformation_matrix;
        let mut u = *unitcell;
        for axis in 0..3 {
            let n = u[axis].div_euclid(h[(axis, axis)]);
            if n != 0 {
                let column: Vector3<i64> = h.column(axis).into_owned();
                u -= column * n;
            }
        }
        u
    }

    /// Index of the unit cell equivalent to `unitcell` within this supercell
    pub fn unitcell_index(&self, unitcell: &UnitCell) -> usize {
        let u = self.bring_within(unitcell);
        let c = self.transformation_matrix[(1, 1)];
        let f = self.transformation_matrix[(2, 2)];
        ((u.x * c + u.y) * f + u.z) as usize
    }

    /// Unit cell for an index in `0..volume`
    pub fn unitcell(&self, unitcell_index: usize) -> UnitCell {
        let c = self.transformation_matrix[(1, 1)] as usize;
        let f = self.transformation_matrix[(2, 2)] as usize;
        Vector3::new(
            (unitcell_index / (c * f)) as i64,
            ((unitcell_index / f) % c) as i64,
            (unitcell_index % f) as i64,
        )
    }

    /// Linear site index of `site`, after bringing it within the supercell
    pub fn linear_index(&self, site: &UnitCellCoord) -> usize {
        site.sublattice * self.volume + self.unitcell_index(&site.unitcell())
    }

    /// Site for a linear index in `0..n_sites`
    pub fn site(&self, linear_index: usize) -> UnitCellCoord {
        UnitCellCoord::new(
            linear_index / self.volume,
            self.unitcell(linear_index % self.volume),
        )
    }

    /// Sublattice of a linear site index
    pub fn sublattice(&self, linear_index: usize) -> usize {
        linear_index / self.volume
    }

    /// Hermite normal form of the supercell obtained by applying `op` to this one.
    pub fn image_transformation_matrix(&self, op: &SymOp) -> Matrix3<i64> {
        reduce_to_hnf(&(op.point * self.transformation_matrix))
    }

    /// True if every lattice point of `self` is a lattice point of `other`.
    pub fn is_superlattice_of(&self, other: &Supercell) -> bool {
        Arc::ptr_eq(&self.prim, &other.prim)
            && integer_quotient(&other.transformation_matrix, &self.transformation_matrix)
                .is_some()
    }

    /// Row-major transformation matrix, as serialized
    pub fn transformation_matrix_rows(&self) -> [[i64; 3]; 3] {
        to_rows(&self.transformation_matrix)
    }
}

impl PartialEq for Supercell {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.prim, &other.prim) && self.key == other.key
    }
}

impl Eq for Supercell {}

impl PartialOrd for Supercell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Supercell {
    /// Volume first, then the row-major transformation matrix.
    fn cmp(&self, other: &Self) -> Ordering {
        self.volume
            .cmp(&other.volume)
            .then_with(|| self.key.cmp(&other.key))
            .then_with(|| {
                (Arc::as_ptr(&self.prim) as usize).cmp(&(Arc::as_ptr(&other.prim) as usize))
            })
    }
}

/// Supercell symmetry data as site permutations.
///
/// Permutations follow the convention `new_occupation[s] == occupation[perm[s]]`.
#[derive(Debug, Clone, Default)]
pub struct SupercellSymInfo {
    /// Indices of the prim factor group operations that leave the supercell lattice invariant
    pub factor_group: Vec<usize>,
    /// One permutation per supercell factor group operation
    pub factor_group_permutations: Vec<Vec<usize>>,
    /// One permutation per translation, indexed by unit cell index
    pub translation_permutations: Vec<Vec<usize>>,
}

impl SupercellSymInfo {
    fn new(supercell: &Supercell) -> Self {
        let prim = supercell.prim();
        let n_sites = supercell.n_sites();

        let factor_group: Vec<usize> = prim
            .factor_group()
            .iter()
            .enumerate()
            .filter(|(_, op)| {
                supercell.image_transformation_matrix(op) == supercell.transformation_matrix
            })
            .map(|(i, _)| i)
            .collect();

        let factor_group_permutations = factor_group
            .iter()
            .map(|&i| {
                let op = &prim.factor_group()[i];
                let mut perm = vec![0; n_sites];
                for l in 0..n_sites {
                    let after = supercell.linear_index(&op.apply(&supercell.site(l)));
                    perm[after] = l;
                }
                perm
            })
            .collect();

        let translation_permutations = (0..supercell.volume())
            .map(|t| {
                let translation = supercell.unitcell(t);
                (0..n_sites)
                    .map(|l| supercell.linear_index(&supercell.site(l).translated(&-translation)))
                    .collect()
            })
            .collect();

        Self {
            factor_group,
            factor_group_permutations,
            translation_permutations,
        }
    }
}

/// Shared registry of supercells of one prim, keyed by transformation matrix.
///
/// Insertion is idempotent: adding an existing lattice returns the stored `Arc`.
#[derive(Debug)]
pub struct SupercellSet {
    prim: Arc<Prim>,
    supercells: RwLock<BTreeMap<MatrixKey, Arc<Supercell>>>,
}

impl SupercellSet {
    pub fn new(prim: Arc<Prim>) -> Self {
        Self {
            prim,
            supercells: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn prim(&self) -> &Arc<Prim> {
        &self.prim
    }

    /// Get or construct the supercell with the given transformation matrix.
    pub fn add(&self, transformation_matrix: &Matrix3<i64>) -> Result<Arc<Supercell>> {
        let hnf = hermite_normal_form(transformation_matrix)?;
        Ok(self.add_hnf(hnf))
    }

    /// Insert an existing supercell; returns the registered equivalent.
    pub fn add_supercell(&self, supercell: &Arc<Supercell>) -> Result<Arc<Supercell>> {
        if !Arc::ptr_eq(supercell.prim(), &self.prim) {
            return Err(EnumError::PrimMismatch(
                "supercell does not belong to the prim of this SupercellSet".into(),
            ));
        }
        let mut supercells = self.supercells.write();
        Ok(supercells
            .entry(*supercell.key())
            .or_insert_with(|| supercell.clone())
            .clone())
    }

    pub(crate) fn add_hnf(&self, hnf: Matrix3<i64>) -> Arc<Supercell> {
        let key = matrix_key(&hnf);
        if let Some(existing) = self.supercells.read().get(&key) {
            return existing.clone();
        }
        let supercell = Arc::new(Supercell::from_hnf(self.prim.clone(), hnf));
        let mut supercells = self.supercells.write();
        supercells.entry(key).or_insert(supercell).clone()
    }

    pub fn get(&self, transformation_matrix: &Matrix3<i64>) -> Option<Arc<Supercell>> {
        let hnf = hermite_normal_form(transformation_matrix).ok()?;
        self.supercells.read().get(&matrix_key(&hnf)).cloned()
    }

    pub fn len(&self) -> usize {
        self.supercells.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.supercells.read().is_empty()
    }

    /// Registered supercells in transformation matrix order
    pub fn supercells(&self) -> Vec<Arc<Supercell>> {
        self.supercells.read().values().cloned().collect()
    }
}

/// Supercell for an HNF, through the registry when one is supplied.
pub(crate) fn make_supercell(
    prim: &Arc<Prim>,
    hnf: Matrix3<i64>,
    supercell_set: Option<&SupercellSet>,
) -> Arc<Supercell> {
    match supercell_set {
        Some(set) => set.add_hnf(hnf),
        None => Arc::new(Supercell::from_hnf(prim.clone(), hnf)),
    }
}
