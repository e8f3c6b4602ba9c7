use serde::{Deserialize, Serialize};

/// The five 2D Bravais lattices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Bravais2D {
    Oblique,
    Rectangular,
    CenteredRectangular,
    Square,
    Hexagonal,
}

impl Bravais2D {
    /// Order of the lattice point group.
    pub fn point_group_order(&self) -> usize {
        match self {
            Bravais2D::Oblique => 2,
            Bravais2D::Rectangular | Bravais2D::CenteredRectangular => 4,
            Bravais2D::Square => 8,
            Bravais2D::Hexagonal => 12,
        }
    }
}
