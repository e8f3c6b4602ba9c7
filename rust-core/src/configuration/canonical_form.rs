use std::collections::BTreeMap;
use std::sync::Arc;

use nalgebra::Matrix3;

use crate::configuration::configuration::{check_set_prim, Configuration};
use crate::lattice::integer_matrix::{matrix_key, MatrixKey};
use crate::lattice::supercell::{make_supercell, Supercell, SupercellSet};
use crate::symmetries::supercell_sym_op::SupercellSymOp;
use crate::Result;

/// Distinct images of `supercell` under the prim factor group, in supercell order.
pub fn make_equivalent_supercells(
    supercell: &Arc<Supercell>,
    supercell_set: Option<&SupercellSet>,
) -> Result<Vec<Arc<Supercell>>> {
    if let Some(set) = supercell_set {
        check_set_prim(set, supercell)?;
    }
    Ok(equivalent_hnfs(supercell)
        .into_values()
        .map(|hnf| make_supercell(supercell.prim(), hnf, supercell_set))
        .collect())
}

// All equivalent supercells share a volume, so key order is supercell order
fn equivalent_hnfs(supercell: &Supercell) -> BTreeMap<MatrixKey, Matrix3<i64>> {
    supercell
        .prim()
        .factor_group()
        .iter()
        .map(|op| {
            let hnf = supercell.image_transformation_matrix(op);
            (matrix_key(&hnf), hnf)
        })
        .collect()
}

/// Index of the first prim factor group operation mapping `supercell` onto its
/// canonical equivalent.
pub fn to_canonical_supercell_op_index(supercell: &Supercell) -> usize {
    let mut best: Option<(MatrixKey, usize)> = None;
    for (i, op) in supercell.prim().factor_group().iter().enumerate() {
        let key = matrix_key(&supercell.image_transformation_matrix(op));
        if best.map_or(true, |(best_key, _)| key > best_key) {
            best = Some((key, i));
        }
    }
    best.map_or(0, |(_, i)| i)
}

/// The greatest supercell equivalent to `supercell` under the prim factor group.
pub fn make_canonical_supercell(
    supercell: &Arc<Supercell>,
    supercell_set: Option<&SupercellSet>,
) -> Result<Arc<Supercell>> {
    if let Some(set) = supercell_set {
        check_set_prim(set, supercell)?;
    }
    if is_canonical_supercell(supercell) {
        return Ok(match supercell_set {
            Some(set) => set.add_supercell(supercell)?,
            None => supercell.clone(),
        });
    }
    let op = &supercell.prim().factor_group()[to_canonical_supercell_op_index(supercell)];
    Ok(make_supercell(
        supercell.prim(),
        supercell.image_transformation_matrix(op),
        supercell_set,
    ))
}

pub fn is_canonical_supercell(supercell: &Supercell) -> bool {
    equivalent_hnfs(supercell)
        .keys()
        .next_back()
        .map_or(true, |key| key == supercell.key())
}

/// The greatest configuration equivalent to `configuration`.
///
/// With `in_canonical_supercell` the configuration is first moved into the canonical
/// equivalent supercell, so configurations equivalent under the full prim factor group
/// map to the same result. Otherwise only the operations of its own supercell are used.
pub fn make_canonical_configuration(
    configuration: &Configuration,
    in_canonical_supercell: bool,
    supercell_set: Option<&SupercellSet>,
) -> Result<Configuration> {
    let moved;
    let needs_move = in_canonical_supercell && !is_canonical_supercell(configuration.supercell());
    let configuration = if needs_move {
        let index = to_canonical_supercell_op_index(configuration.supercell());
        moved = configuration.copy_apply_prim_op(index, supercell_set)?;
        &moved
    } else {
        configuration
    };
    let best = SupercellSymOp::all(configuration.supercell())
        .map(|op| configuration.apply_unchecked(&op))
        .max()
        .unwrap_or_else(|| configuration.clone());
    Ok(best)
}

pub fn is_canonical_configuration(
    configuration: &Configuration,
    in_canonical_supercell: bool,
) -> Result<bool> {
    if in_canonical_supercell && !is_canonical_supercell(configuration.supercell()) {
        return Ok(false);
    }
    Ok(&make_canonical_configuration(configuration, false, None)? == configuration)
}

/// Supercell operations that leave `configuration` unchanged.
pub fn make_invariant_subgroup(configuration: &Configuration) -> Vec<SupercellSymOp> {
    SupercellSymOp::all(configuration.supercell())
        .filter(|op| &configuration.apply_unchecked(op) == configuration)
        .collect()
}
