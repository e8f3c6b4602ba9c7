use std::collections::VecDeque;
use std::sync::Arc;

use log::debug;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_DIRS, DEFAULT_MIN_VOLUME};
use crate::error::EnumError;
use crate::lattice::integer_matrix::{
    determinant, from_rows, integer_quotient, matrix_key, reduce_to_hnf, to_rows,
};
use crate::lattice::prim::Prim;
use crate::lattice::supercell::{make_supercell, Supercell, SupercellSet};
use crate::Result;

/// Parameters of a supercell enumeration by volume.
///
/// Volumes are in units of `unit_cell`, and the enumerated supercells have
/// transformation matrices `unit_cell * H` with `H` in Hermite normal form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupercellEnumParams {
    pub min: usize,
    pub max: usize,
    pub unit_cell: [[i64; 3]; 3],
    pub dirs: String,
    pub diagonal_only: bool,
    pub fixed_shape: bool,
}

impl SupercellEnumParams {
    pub fn new(max: usize) -> Self {
        Self {
            min: DEFAULT_MIN_VOLUME,
            max,
            unit_cell: to_rows(&Matrix3::identity()),
            dirs: DEFAULT_DIRS.to_string(),
            diagonal_only: false,
            fixed_shape: false,
        }
    }

    pub fn with_min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    pub fn with_unit_cell(mut self, unit_cell: Matrix3<i64>) -> Self {
        self.unit_cell = to_rows(&unit_cell);
        self
    }

    pub fn with_dirs(mut self, dirs: &str) -> Self {
        self.dirs = dirs.to_string();
        self
    }

    pub fn with_diagonal_only(mut self, diagonal_only: bool) -> Self {
        self.diagonal_only = diagonal_only;
        self
    }

    pub fn with_fixed_shape(mut self, fixed_shape: bool) -> Self {
        self.fixed_shape = fixed_shape;
        self
    }

    pub fn unit_cell_matrix(&self) -> Matrix3<i64> {
        from_rows(&self.unit_cell)
    }

    /// Which lattice vectors of the unit cell are enumerated over
    pub fn enumerated_dirs(&self) -> Result<[bool; 3]> {
        if self.dirs.is_empty() {
            return Err(EnumError::InvalidArgument("dirs must not be empty".into()));
        }
        let mut enumerated = [false; 3];
        for c in self.dirs.chars() {
            let axis = match c {
                'a' => 0,
                'b' => 1,
                'c' => 2,
                other => {
                    return Err(EnumError::InvalidArgument(format!(
                        "dirs may only contain 'a', 'b' and 'c', got '{}'",
                        other
                    )))
                }
            };
            if enumerated[axis] {
                return Err(EnumError::InvalidArgument(format!(
                    "dirs contains '{}' more than once",
                    c
                )));
            }
            enumerated[axis] = true;
        }
        Ok(enumerated)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min < 1 {
            return Err(EnumError::InvalidArgument("min volume must be at least 1".into()));
        }
        if determinant(&self.unit_cell_matrix()) == 0 {
            return Err(EnumError::SingularMatrix);
        }
        self.enumerated_dirs()?;
        Ok(())
    }
}

/// Enumerates the symmetrically distinct supercells of a prim, volume by volume.
pub struct SupercellEnum {
    prim: Arc<Prim>,
    supercell_set: Option<Arc<SupercellSet>>,
}

impl SupercellEnum {
    pub fn new(prim: Arc<Prim>, supercell_set: Option<Arc<SupercellSet>>) -> Result<Self> {
        if let Some(set) = &supercell_set {
            if !Arc::ptr_eq(set.prim(), &prim) {
                return Err(EnumError::PrimMismatch(
                    "SupercellSet belongs to a different prim".into(),
                ));
            }
        }
        Ok(Self {
            prim,
            supercell_set,
        })
    }

    /// Lazily yield one canonical supercell per symmetry-distinct lattice, by
    /// increasing volume.
    pub fn by_volume(&self, params: &SupercellEnumParams) -> Result<SupercellEnumIter> {
        params.validate()?;
        let unit_cell = params.unit_cell_matrix();
        let enumerated = params.enumerated_dirs()?;

        // Point operations that map the unit cell lattice onto itself, as integer
        // matrices acting on unit cell coordinates
        let unit_cell_ops = self
            .prim
            .point_group()
            .iter()
            .filter_map(|point| integer_quotient(&unit_cell, &(point * unit_cell)))
            .collect();

        Ok(SupercellEnumIter {
            prim: self.prim.clone(),
            supercell_set: self.supercell_set.clone(),
            unit_cell,
            unit_cell_ops,
            enumerated,
            diagonal_only: params.diagonal_only,
            fixed_shape: params.fixed_shape,
            volume: params.min,
            max_volume: params.max,
            pending: VecDeque::new(),
        })
    }
}

/// Iterator returned by [`SupercellEnum::by_volume`].
pub struct SupercellEnumIter {
    prim: Arc<Prim>,
    supercell_set: Option<Arc<SupercellSet>>,
    unit_cell: Matrix3<i64>,
    unit_cell_ops: Vec<Matrix3<i64>>,
    enumerated: [bool; 3],
    diagonal_only: bool,
    fixed_shape: bool,
    volume: usize,
    max_volume: usize,
    pending: VecDeque<Arc<Supercell>>,
}

impl SupercellEnumIter {
    /// HNFs `H` of determinant `volume` honoring the direction and shape constraints.
    fn hermite_candidates(&self, volume: usize) -> Vec<Matrix3<i64>> {
        let n = volume as i64;
        let divisors = |m: i64| (1..=m).filter(move |d| m % d == 0);
        let mut candidates = Vec::new();
        for a in divisors(n) {
            for c in divisors(n / a) {
                let f = n / a / c;
                for b in 0..c {
                    for d in 0..f {
                        for e in 0..f {
                            let h = Matrix3::new(a, 0, 0, b, c, 0, d, e, f);
                            if self.is_allowed(&h) {
                                candidates.push(h);
                            }
                        }
                    }
                }
            }
        }
        candidates
    }

    fn is_allowed(&self, h: &Matrix3<i64>) -> bool {
        for axis in 0..3 {
            if !self.enumerated[axis] {
                let column = h.column(axis);
                let is_unit = (0..3).all(|row| column[row] == if row == axis { 1 } else { 0 });
                if !is_unit {
                    return false;
                }
            }
        }
        let off_diagonal_zero = h[(1, 0)] == 0 && h[(2, 0)] == 0 && h[(2, 1)] == 0;
        if (self.diagonal_only || self.fixed_shape) && !off_diagonal_zero {
            return false;
        }
        if self.fixed_shape {
            let mut diagonal = (0..3)
                .filter(|&axis| self.enumerated[axis])
                .map(|axis| h[(axis, axis)]);
            if let Some(first) = diagonal.next() {
                if diagonal.any(|x| x != first) {
                    return false;
                }
            }
        }
        true
    }

    /// `h` is kept if no allowed symmetry image of it has a greater key.
    fn is_canonical(&self, h: &Matrix3<i64>) -> bool {
        let key = matrix_key(h);
        self.unit_cell_ops.iter().all(|op| {
            let image = reduce_to_hnf(&(op * h));
            !self.is_allowed(&image) || matrix_key(&image) <= key
        })
    }

    fn fill_pending(&mut self, volume: usize) {
        for h in self.hermite_candidates(volume) {
            if self.is_canonical(&h) {
                let hnf = reduce_to_hnf(&(self.unit_cell * h));
                let supercell = make_supercell(&self.prim, hnf, self.supercell_set.as_deref());
                self.pending.push_back(supercell);
            }
        }
        debug!(
            "Supercell enumeration: {} canonical supercells of volume {}",
            self.pending.len(),
            volume
        );
    }
}

impl Iterator for SupercellEnumIter {
    type Item = Arc<Supercell>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() {
            if self.volume > self.max_volume {
                return None;
            }
            let volume = self.volume;
            self.volume += 1;
            self.fill_pending(volume);
        }
        self.pending.pop_front()
    }
}
