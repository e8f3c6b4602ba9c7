use nalgebra::Matrix3;

use crate::lattice::lattice_types::Bravais2D;

/// Generate the 2D lattice point group for a Bravais type, in fractional coordinates of
/// the conventional primitive basis used by [`crate::lattice::lattice_construction`].
pub fn generate_point_group_2d(bravais: &Bravais2D) -> Vec<Matrix3<i64>> {
    let generators = match bravais {
        Bravais2D::Square => vec![
            // 4-fold rotation (90°)
            Matrix3::new(
                0, -1, 0,
                1,  0, 0,
                0,  0, 1,
            ),
            // Mirror (y -> -y)
            Matrix3::new(
                1,  0, 0,
                0, -1, 0,
                0,  0, 1,
            ),
        ],
        Bravais2D::Hexagonal => vec![
            // 6-fold rotation (60°), a2 at 120° from a1
            Matrix3::new(
                1, -1, 0,
                1,  0, 0,
                0,  0, 1,
            ),
            // Mirror (y -> -y)
            Matrix3::new(
                1, -1, 0,
                0, -1, 0,
                0,  0, 1,
            ),
        ],
        Bravais2D::Rectangular => vec![
            // 2-fold rotation (180°)
            Matrix3::new(
                -1,  0, 0,
                 0, -1, 0,
                 0,  0, 1,
            ),
            // Mirror (y -> -y)
            Matrix3::new(
                1,  0, 0,
                0, -1, 0,
                0,  0, 1,
            ),
        ],
        Bravais2D::CenteredRectangular => vec![
            // 2-fold rotation (180°)
            Matrix3::new(
                -1,  0, 0,
                 0, -1, 0,
                 0,  0, 1,
            ),
            // Mirror (y -> -y) exchanges the two primitive vectors
            Matrix3::new(
                0, 1, 0,
                1, 0, 0,
                0, 0, 1,
            ),
        ],
        Bravais2D::Oblique => vec![
            // Only 2-fold rotation (180°)
            Matrix3::new(
                -1,  0, 0,
                 0, -1, 0,
                 0,  0, 1,
            ),
        ],
    };
    generate_group(&generators)
}

/// Generate the full cubic point group (Oh, 48 operations).
pub fn generate_cubic_operations() -> Vec<Matrix3<i64>> {
    let generators = vec![
        // 4-fold rotation about z
        Matrix3::new(
            0, -1, 0,
            1,  0, 0,
            0,  0, 1,
        ),
        // 3-fold rotation about [111]
        Matrix3::new(
            0, 0, 1,
            1, 0, 0,
            0, 1, 0,
        ),
        // Inversion
        -Matrix3::<i64>::identity(),
    ];
    generate_group(&generators)
}

/// Close a set of generators under multiplication.
///
/// The identity comes first; the remaining elements follow in the order they are
/// discovered, so the result is deterministic for a given generator list.
pub fn generate_group(generators: &[Matrix3<i64>]) -> Vec<Matrix3<i64>> {
    let mut group = vec![Matrix3::identity()];
    let mut frontier = 0;
    while frontier < group.len() {
        let current = group[frontier];
        for generator in generators {
            let product = generator * current;
            if !group.contains(&product) {
                group.push(product);
            }
        }
        frontier += 1;
    }
    group
}
