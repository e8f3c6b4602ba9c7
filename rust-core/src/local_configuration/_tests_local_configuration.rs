#[cfg(test)]
mod _tests_local_configuration {
    use super::super::event_supercell_info::Position;
    use super::super::event_sym_info::OccEventSymInfo;
    use super::super::local_configuration::{LocalConfiguration, LocalConfigurationData};
    use crate::configuration::configuration::Configuration;
    use crate::error::EnumError;
    use crate::lattice::lattice_construction::square_prim;
    use crate::lattice::prim::Prim;
    use crate::lattice::supercell::{Supercell, SupercellSet};
    use crate::lattice::unitcellcoord::UnitCellCoord;
    use crate::occ_events::occ_event::OccEvent;
    use crate::symmetries::supercell_sym_op::SupercellSymOp;
    use nalgebra::{Matrix3, Vector3};
    use std::cmp::Ordering;
    use std::sync::Arc;

    fn site(i: i64, j: i64) -> UnitCellCoord {
        UnitCellCoord::new(0, Vector3::new(i, j, 0))
    }

    fn x_hop() -> OccEvent {
        OccEvent::new(vec![site(0, 0), site(1, 0)], vec![0, 1], vec![1, 0]).unwrap()
    }

    fn diag(a: i64, b: i64, c: i64) -> Matrix3<i64> {
        Matrix3::new(a, 0, 0, 0, b, 0, 0, 0, c)
    }

    fn setup() -> (Arc<Prim>, Arc<OccEventSymInfo>) {
        let prim = square_prim(&["A", "Va"]).unwrap();
        let info = OccEventSymInfo::init(prim.clone(), x_hop(), None, None).unwrap();
        (prim, info)
    }

    fn empty_config(prim: &Arc<Prim>, t: Matrix3<i64>) -> Configuration {
        Configuration::with_default_occupation(Arc::new(Supercell::new(prim.clone(), t).unwrap()))
    }

    // ==================== Construction ====================

    #[test]
    fn test_new_checks_position() {
        let (prim, info) = setup();
        let config = empty_config(&prim, diag(3, 3, 1));
        let lc = LocalConfiguration::new(config.clone(), Position::new(8, 1), &info).unwrap();
        assert_eq!(lc.pos(), Position::new(8, 1));
        assert!(matches!(
            LocalConfiguration::new(config.clone(), Position::new(9, 0), &info),
            Err(EnumError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            LocalConfiguration::new(config, Position::new(0, 2), &info),
            Err(EnumError::PositionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_new_checks_prim() {
        let (_, info) = setup();
        let other_prim = square_prim(&["A", "Va"]).unwrap();
        let config = empty_config(&other_prim, diag(2, 2, 1));
        assert!(matches!(
            LocalConfiguration::new(config, Position::new(0, 0), &info),
            Err(EnumError::PrimMismatch(_))
        ));
    }

    #[test]
    fn test_from_event() {
        let (prim, info) = setup();
        let config = empty_config(&prim, diag(3, 3, 1));
        let event = x_hop().translated(&Vector3::new(2, 1, 0));
        let lc = LocalConfiguration::from_event(config, &event, &info).unwrap();
        assert_eq!(lc.pos().equivalent_index, 1);
        assert_eq!(lc.event().unwrap(), event);
        assert!(Arc::ptr_eq(lc.event_info(), &info));
        assert!(Arc::ptr_eq(
            lc.event_supercell_info(),
            &info.get_event_supercell_info(lc.supercell()).unwrap()
        ));
    }

    // ==================== Symmetry Application ====================

    #[test]
    fn test_apply_translation() {
        let (prim, info) = setup();
        let mut config = empty_config(&prim, diag(3, 1, 1));
        config.set_occ(0, 1).unwrap();
        let lc = LocalConfiguration::from_event(config, &x_hop(), &info).unwrap();

        let shift = SupercellSymOp::translations(lc.supercell()).nth(1).unwrap();
        let moved = lc.apply(&shift).unwrap();
        assert_eq!(moved.event().unwrap(), x_hop().translated(&Vector3::new(1, 0, 0)));
        assert_eq!(moved.configuration().occupation(), &[0, 1, 0]);
    }

    #[test]
    fn test_apply_factor_group_op() {
        let (prim, info) = setup();
        let config = Configuration::new(
            Arc::new(Supercell::new(prim.clone(), diag(2, 1, 1)).unwrap()),
            vec![0, 1],
        )
        .unwrap();
        let lc = LocalConfiguration::from_event(config, &x_hop(), &info).unwrap();
        assert_eq!(lc.pos(), Position::new(0, 1));

        // The 90° rotation turns the x-hop in a 2x1 cell into a y-hop in a 1x2 cell
        let set = SupercellSet::new(prim);
        let rotated = lc.apply_factor_group_op(1, Some(&set)).unwrap();
        assert_eq!(rotated.supercell().transformation_matrix(), &diag(1, 2, 1));
        assert_eq!(rotated.pos(), Position::new(0, 0));
        assert_eq!(rotated.configuration().occupation(), &[0, 1]);
        assert!(Arc::ptr_eq(rotated.supercell(), &set.add(&diag(1, 2, 1)).unwrap()));
        assert!(Arc::ptr_eq(rotated.event_info(), &info));
    }

    #[test]
    fn test_with_event_occupation() {
        let (prim, info) = setup();
        let config = empty_config(&prim, diag(3, 1, 1));
        let lc = LocalConfiguration::from_event(config, &x_hop(), &info).unwrap();
        let occupied = lc.with_event_occupation().unwrap();
        assert_eq!(occupied.configuration().occupation(), &[0, 1, 0]);
        assert_eq!(occupied.pos(), lc.pos());
        // Unchanged original
        assert_eq!(lc.configuration().occupation(), &[0, 0, 0]);
    }

    #[test]
    fn test_event_invariant_ops() {
        let (prim, info) = setup();
        let lc =
            LocalConfiguration::from_event(empty_config(&prim, diag(3, 3, 1)), &x_hop(), &info)
                .unwrap();
        let invariant = lc.event_invariant_ops().unwrap();
        assert_eq!(invariant.len(), 4);
        for op in &invariant {
            assert_eq!(lc.apply(op).unwrap().pos(), lc.pos());
        }
    }

    // ==================== Comparison ====================

    #[test]
    fn test_compare_within_context() {
        let (prim, info) = setup();
        let config = empty_config(&prim, diag(3, 3, 1));
        let a = LocalConfiguration::new(config.clone(), Position::new(0, 0), &info).unwrap();
        let b = LocalConfiguration::new(config.clone(), Position::new(0, 1), &info).unwrap();
        assert!(a.try_eq(&a.clone()).unwrap());
        assert!(!a.try_eq(&b).unwrap());
        assert_eq!(a.try_cmp(&b).unwrap(), Ordering::Less);

        // Same position: configuration decides
        let mut filled = config;
        filled.set_occ(4, 1).unwrap();
        let c = LocalConfiguration::new(filled, Position::new(0, 0), &info).unwrap();
        assert_eq!(a.try_cmp(&c).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_compare_across_contexts() {
        let (prim, info) = setup();
        let twin = OccEventSymInfo::init(prim.clone(), x_hop(), None, None).unwrap();
        let config = empty_config(&prim, diag(2, 2, 1));
        let a = LocalConfiguration::new(config.clone(), Position::new(0, 0), &info).unwrap();
        let b = LocalConfiguration::new(config, Position::new(0, 0), &twin).unwrap();
        assert!(matches!(a.try_eq(&b), Err(EnumError::ContextMismatch)));
        assert!(matches!(a.try_cmp(&b), Err(EnumError::ContextMismatch)));

        let copy = LocalConfiguration::new(
            a.configuration().clone(),
            a.pos(),
            &info.deep_copy(),
        )
        .unwrap();
        assert!(a.try_eq(&copy).is_err());
    }

    // ==================== Serialization ====================

    #[test]
    fn test_data_round_trip() {
        let (prim, info) = setup();
        let set = SupercellSet::new(prim.clone());
        let mut config = Configuration::with_default_occupation(set.add(&diag(2, 2, 1)).unwrap());
        config.set_occ(3, 1).unwrap();
        let lc = LocalConfiguration::new(config, Position::new(2, 1), &info).unwrap();

        let value = serde_json::to_value(lc.to_data()).unwrap();
        assert_eq!(value["pos"], serde_json::json!([2, 1]));
        assert_eq!(value["configuration"]["occupation"], serde_json::json!([0, 0, 0, 1]));

        let data: LocalConfigurationData = serde_json::from_value(value).unwrap();
        let back = LocalConfiguration::from_data(&data, &info, &set).unwrap();
        assert!(back.try_eq(&lc).unwrap());

        let foreign_set = SupercellSet::new(square_prim(&["A", "Va"]).unwrap());
        assert!(matches!(
            LocalConfiguration::from_data(&data, &info, &foreign_set),
            Err(EnumError::PrimMismatch(_))
        ));
    }
}
