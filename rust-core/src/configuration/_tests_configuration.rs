#[cfg(test)]
mod _tests_configuration {
    use super::super::canonical_form::{
        is_canonical_configuration, is_canonical_supercell, make_canonical_configuration,
        make_canonical_supercell, make_equivalent_supercells, make_invariant_subgroup,
        to_canonical_supercell_op_index,
    };
    use super::super::configuration::{copy_configuration, Configuration, ConfigurationData};
    use crate::error::EnumError;
    use crate::lattice::lattice_construction::square_prim;
    use crate::lattice::prim::Prim;
    use crate::lattice::supercell::{Supercell, SupercellSet};
    use crate::symmetries::supercell_sym_op::SupercellSymOp;
    use nalgebra::Matrix3;
    use std::sync::Arc;

    fn diag(a: i64, b: i64, c: i64) -> Matrix3<i64> {
        Matrix3::new(a, 0, 0, 0, b, 0, 0, 0, c)
    }

    fn supercell(prim: &Arc<Prim>, t: Matrix3<i64>) -> Arc<Supercell> {
        Arc::new(Supercell::new(prim.clone(), t).unwrap())
    }

    fn stripes(prim: &Arc<Prim>, t: Matrix3<i64>) -> Configuration {
        Configuration::new(supercell(prim, t), vec![0, 1]).unwrap()
    }

    // ==================== Construction ====================

    #[test]
    fn test_new_validates_occupation() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let cell = supercell(&prim, diag(2, 1, 1));
        assert!(Configuration::new(cell.clone(), vec![0, 1]).is_ok());
        assert!(matches!(
            Configuration::new(cell.clone(), vec![0]),
            Err(EnumError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Configuration::new(cell.clone(), vec![0, 2]),
            Err(EnumError::InvalidConfiguration(_))
        ));
        let default = Configuration::with_default_occupation(cell);
        assert_eq!(default.occupation(), &[0, 0]);
    }

    #[test]
    fn test_set_occ() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let mut config = Configuration::with_default_occupation(supercell(&prim, diag(2, 1, 1)));
        config.set_occ(1, 1).unwrap();
        assert_eq!(config.occ(1).unwrap(), 1);
        assert!(config.set_occ(2, 1).is_err());
        assert!(config.set_occ(0, 5).is_err());
        assert_eq!(config.occupation(), &[0, 1]);
        assert!(config.set_occupation(vec![1]).is_err());
        config.set_occupation(vec![1, 1]).unwrap();
        assert_eq!(config.occupation(), &[1, 1]);
    }

    // ==================== Symmetry Application ====================

    #[test]
    fn test_copy_apply_translation() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let config = stripes(&prim, diag(2, 1, 1));
        let shift = SupercellSymOp::translations(config.supercell()).nth(1).unwrap();
        let shifted = config.copy_apply(&shift).unwrap();
        assert_eq!(shifted.occupation(), &[1, 0]);
    }

    #[test]
    fn test_copy_apply_supercell_mismatch() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let config = stripes(&prim, diag(2, 1, 1));
        let other = supercell(&prim, diag(1, 2, 1));
        let op = SupercellSymOp::identity(&other);
        assert!(matches!(
            config.copy_apply(&op),
            Err(EnumError::SupercellMismatch(_))
        ));
    }

    #[test]
    fn test_copy_apply_prim_op_changes_supercell() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let config = stripes(&prim, diag(2, 1, 1));
        // Factor group op 1 is the 90° rotation
        let rotated = config.copy_apply_prim_op(1, None).unwrap();
        assert_eq!(rotated.supercell().transformation_matrix(), &diag(1, 2, 1));
        assert_eq!(rotated.occupation(), &[0, 1]);
        assert!(config.copy_apply_prim_op(100, None).is_err());
    }

    // ==================== Tiling ====================

    #[test]
    fn test_copy_configuration() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let motif = stripes(&prim, diag(2, 1, 1));
        let tiled = copy_configuration(&motif, &supercell(&prim, diag(4, 1, 1))).unwrap();
        assert_eq!(tiled.occupation(), &[0, 1, 0, 1]);

        let doubled = copy_configuration(&motif, &supercell(&prim, diag(2, 2, 1))).unwrap();
        assert_eq!(doubled.occupation().iter().filter(|&&x| x == 1).count(), 2);
    }

    #[test]
    fn test_copy_configuration_not_a_superlattice() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let motif = stripes(&prim, diag(2, 1, 1));
        let result = copy_configuration(&motif, &supercell(&prim, diag(3, 1, 1)));
        assert!(matches!(result, Err(EnumError::NotASuperlattice)));

        let other_prim = square_prim(&["A", "B"]).unwrap();
        let result = copy_configuration(&motif, &supercell(&other_prim, diag(4, 1, 1)));
        assert!(matches!(result, Err(EnumError::PrimMismatch(_))));
    }

    // ==================== Canonical Forms ====================

    #[test]
    fn test_equivalent_supercells() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let wide = supercell(&prim, diag(2, 1, 1));
        let equivalents = make_equivalent_supercells(&wide, None).unwrap();
        assert_eq!(equivalents.len(), 2);
        assert_eq!(equivalents[0].transformation_matrix(), &diag(1, 2, 1));
        assert_eq!(equivalents[1].transformation_matrix(), &diag(2, 1, 1));

        let checker = supercell(&prim, Matrix3::new(1, 0, 0, 1, 2, 0, 0, 0, 1));
        assert_eq!(make_equivalent_supercells(&checker, None).unwrap().len(), 1);
    }

    #[test]
    fn test_canonical_supercell() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let tall = supercell(&prim, diag(1, 2, 1));
        assert!(!is_canonical_supercell(&tall));
        let canonical = make_canonical_supercell(&tall, None).unwrap();
        assert_eq!(canonical.transformation_matrix(), &diag(2, 1, 1));
        assert!(is_canonical_supercell(&canonical));

        let index = to_canonical_supercell_op_index(&tall);
        let op = &prim.factor_group()[index];
        assert_eq!(tall.image_transformation_matrix(op), diag(2, 1, 1));

        let set = SupercellSet::new(prim.clone());
        let registered = make_canonical_supercell(&tall, Some(&set)).unwrap();
        assert!(Arc::ptr_eq(&registered, &set.add(&diag(2, 1, 1)).unwrap()));
    }

    #[test]
    fn test_canonical_configuration_in_supercell() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let config = stripes(&prim, diag(2, 1, 1));
        let canonical = make_canonical_configuration(&config, false, None).unwrap();
        assert_eq!(canonical.occupation(), &[1, 0]);
        assert!(is_canonical_configuration(&canonical, false).unwrap());
        assert!(!is_canonical_configuration(&config, false).unwrap());
    }

    #[test]
    fn test_canonical_configuration_across_supercells() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let tall = stripes(&prim, diag(1, 2, 1));
        let wide = stripes(&prim, diag(2, 1, 1));
        let from_tall = make_canonical_configuration(&tall, true, None).unwrap();
        let from_wide = make_canonical_configuration(&wide, true, None).unwrap();
        assert_eq!(from_tall, from_wide);
        assert_eq!(from_tall.supercell().transformation_matrix(), &diag(2, 1, 1));
        assert_eq!(from_tall.occupation(), &[1, 0]);
        assert!(!is_canonical_configuration(&tall, true).unwrap());
        assert!(is_canonical_configuration(&from_tall, true).unwrap());
    }

    #[test]
    fn test_canonical_configuration_is_orbit_invariant() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let cell = supercell(&prim, diag(3, 2, 1));
        let config = Configuration::new(cell.clone(), vec![1, 0, 0, 1, 1, 0]).unwrap();
        let canonical = make_canonical_configuration(&config, false, None).unwrap();
        for op in SupercellSymOp::all(&cell) {
            let image = config.copy_apply(&op).unwrap();
            assert_eq!(make_canonical_configuration(&image, false, None).unwrap(), canonical);
            assert!(image <= canonical);
        }
    }

    #[test]
    fn test_invariant_subgroup() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let uniform = Configuration::with_default_occupation(supercell(&prim, diag(2, 1, 1)));
        assert_eq!(make_invariant_subgroup(&uniform).len(), 8);

        // Stripes along x are kept by the 4 point ops without translation only
        let config = stripes(&prim, diag(2, 1, 1));
        assert_eq!(make_invariant_subgroup(&config).len(), 4);
    }

    // ==================== Serialization ====================

    #[test]
    fn test_configuration_data_round_trip() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let set = SupercellSet::new(prim.clone());
        let config = Configuration::new(set.add(&diag(2, 1, 1)).unwrap(), vec![0, 1]).unwrap();

        let value = serde_json::to_value(config.to_data()).unwrap();
        assert_eq!(
            value["transformation_matrix_to_supercell"],
            serde_json::json!([[2, 0, 0], [0, 1, 0], [0, 0, 1]])
        );
        assert_eq!(value["occupation"], serde_json::json!([0, 1]));

        let data: ConfigurationData = serde_json::from_value(value).unwrap();
        let back = Configuration::from_data(&data, &set).unwrap();
        assert_eq!(back, config);
        assert!(Arc::ptr_eq(back.supercell(), config.supercell()));
    }

    #[test]
    fn test_configuration_ordering() {
        let prim = square_prim(&["A", "B"]).unwrap();
        let small = Configuration::with_default_occupation(supercell(&prim, Matrix3::identity()));
        let a = Configuration::new(supercell(&prim, diag(2, 1, 1)), vec![0, 1]).unwrap();
        let b = Configuration::new(supercell(&prim, diag(2, 1, 1)), vec![1, 0]).unwrap();
        assert!(small < a);
        assert!(a < b);
    }
}
