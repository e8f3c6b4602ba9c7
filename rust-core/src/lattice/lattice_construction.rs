use std::sync::Arc;

use nalgebra::Matrix3;

use crate::lattice::lattice_types::Bravais2D;
use crate::lattice::prim::{Prim, Site};
use crate::symmetries::point_groups::{generate_cubic_operations, generate_point_group_2d};
use crate::symmetries::symmetry_operations::SymOp;
use crate::Result;

// Standard prim construction utilities: one basis site at the origin, so the factor
// group is the lattice point group.

/// Create a one-site prim with the given point group
pub fn single_site_prim<S: AsRef<str>>(
    occupants: &[S],
    point_group: &[Matrix3<i64>],
) -> Result<Arc<Prim>> {
    let factor_group = point_group
        .iter()
        .map(|point| SymOp::from_point(*point, 1))
        .collect();
    Ok(Arc::new(Prim::new(vec![Site::new(occupants)], factor_group)?))
}

/// Create a prim for a 2D Bravais lattice
pub fn bravais_2d_prim<S: AsRef<str>>(bravais: Bravais2D, occupants: &[S]) -> Result<Arc<Prim>> {
    single_site_prim(occupants, &generate_point_group_2d(&bravais))
}

/// Create a square lattice prim
pub fn square_prim<S: AsRef<str>>(occupants: &[S]) -> Result<Arc<Prim>> {
    bravais_2d_prim(Bravais2D::Square, occupants)
}

/// Create a rectangular lattice prim
pub fn rectangular_prim<S: AsRef<str>>(occupants: &[S]) -> Result<Arc<Prim>> {
    bravais_2d_prim(Bravais2D::Rectangular, occupants)
}

/// Create a hexagonal lattice prim
pub fn hexagonal_prim<S: AsRef<str>>(occupants: &[S]) -> Result<Arc<Prim>> {
    bravais_2d_prim(Bravais2D::Hexagonal, occupants)
}

/// Create an oblique lattice prim
pub fn oblique_prim<S: AsRef<str>>(occupants: &[S]) -> Result<Arc<Prim>> {
    bravais_2d_prim(Bravais2D::Oblique, occupants)
}

/// Create a centered rectangular lattice prim (primitive setting)
pub fn centered_rectangular_prim<S: AsRef<str>>(occupants: &[S]) -> Result<Arc<Prim>> {
    bravais_2d_prim(Bravais2D::CenteredRectangular, occupants)
}

/// Create a simple cubic prim with the full Oh point group
pub fn simple_cubic_prim<S: AsRef<str>>(occupants: &[S]) -> Result<Arc<Prim>> {
    single_site_prim(occupants, &generate_cubic_operations())
}

/// Create a prim whose factor group is only the identity
pub fn identity_prim<S: AsRef<str>>(occupants: &[S]) -> Result<Arc<Prim>> {
    single_site_prim(occupants, &[Matrix3::identity()])
}
