#[cfg(test)]
mod _tests_local_configuration_list {
    use super::super::event_supercell_info::Position;
    use super::super::event_sym_info::OccEventSymInfo;
    use super::super::local_configuration::LocalConfiguration;
    use super::super::local_configuration_list::{
        LocalConfigurationList, LocalConfigurationListData,
    };
    use crate::configuration::configuration::Configuration;
    use crate::error::EnumError;
    use crate::lattice::lattice_construction::square_prim;
    use crate::lattice::prim::Prim;
    use crate::lattice::supercell::SupercellSet;
    use crate::lattice::unitcellcoord::UnitCellCoord;
    use crate::occ_events::occ_event::OccEvent;
    use nalgebra::{Matrix3, Vector3};
    use std::sync::Arc;

    fn x_hop() -> OccEvent {
        OccEvent::new(
            vec![
                UnitCellCoord::new(0, Vector3::new(0, 0, 0)),
                UnitCellCoord::new(0, Vector3::new(1, 0, 0)),
            ],
            vec![0, 1],
            vec![1, 0],
        )
        .unwrap()
    }

    struct Fixture {
        prim: Arc<Prim>,
        set: SupercellSet,
        info: Arc<OccEventSymInfo>,
    }

    impl Fixture {
        fn new() -> Self {
            let prim = square_prim(&["A", "Va"]).unwrap();
            let set = SupercellSet::new(prim.clone());
            let info = OccEventSymInfo::init(prim.clone(), x_hop(), None, None).unwrap();
            Self { prim, set, info }
        }

        fn local_configuration(
            &self,
            unitcell_index: usize,
            equivalent_index: usize,
        ) -> LocalConfiguration {
            let supercell = self
                .set
                .add(&Matrix3::new(2, 0, 0, 0, 2, 0, 0, 0, 1))
                .unwrap();
            LocalConfiguration::new(
                Configuration::with_default_occupation(supercell),
                Position::new(unitcell_index, equivalent_index),
                &self.info,
            )
            .unwrap()
        }
    }

    // ==================== Shared Context ====================

    #[test]
    fn test_append_and_query() {
        let fixture = Fixture::new();
        let mut list = LocalConfigurationList::new(fixture.info.clone(), vec![]).unwrap();
        assert!(list.is_empty());
        list.append(fixture.local_configuration(1, 0)).unwrap();
        list.append(fixture.local_configuration(0, 1)).unwrap();
        assert_eq!(list.len(), 2);

        let probe = fixture.local_configuration(0, 1);
        assert!(list.contains(&probe).unwrap());
        assert_eq!(list.index(&probe).unwrap(), Some(1));
        assert_eq!(list.index(&fixture.local_configuration(3, 1)).unwrap(), None);
        assert_eq!(list.get(0).unwrap().pos(), Position::new(1, 0));
        assert!(list.get(2).is_none());
    }

    #[test]
    fn test_rejects_other_context() {
        let fixture = Fixture::new();
        let twin = OccEventSymInfo::init(fixture.prim.clone(), x_hop(), None, None).unwrap();
        let stranger = LocalConfiguration::new(
            fixture.local_configuration(0, 0).configuration().clone(),
            Position::new(0, 0),
            &twin,
        )
        .unwrap();

        let initial = vec![fixture.local_configuration(0, 0)];
        let mut list = LocalConfigurationList::new(fixture.info.clone(), initial).unwrap();
        assert!(matches!(list.append(stranger.clone()), Err(EnumError::ContextMismatch)));
        assert!(matches!(list.set(0, stranger.clone()), Err(EnumError::ContextMismatch)));
        assert!(matches!(list.contains(&stranger), Err(EnumError::ContextMismatch)));
        assert!(matches!(
            LocalConfigurationList::new(fixture.info.clone(), vec![stranger]),
            Err(EnumError::ContextMismatch)
        ));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_as_local_configuration() {
        let fixture = Fixture::new();
        let list = LocalConfigurationList::new(fixture.info.clone(), vec![]).unwrap();
        let config = fixture.local_configuration(0, 0).configuration().clone();
        let lc = list.as_local_configuration(&x_hop(), config).unwrap();
        assert_eq!(lc.pos(), Position::new(0, 1));
        assert!(Arc::ptr_eq(lc.event_info(), list.event_info()));
        assert!(list.is_empty());
    }

    // ==================== Editing ====================

    #[test]
    fn test_set_remove_sort_clear() {
        let fixture = Fixture::new();
        let mut list = LocalConfigurationList::new(
            fixture.info.clone(),
            vec![
                fixture.local_configuration(3, 0),
                fixture.local_configuration(0, 1),
                fixture.local_configuration(0, 0),
            ],
        )
        .unwrap();

        list.sort();
        let positions: Vec<Position> = list.iter().map(|lc| lc.pos()).collect();
        assert_eq!(
            positions,
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(3, 0)]
        );

        list.set(2, fixture.local_configuration(2, 1)).unwrap();
        assert_eq!(list.get(2).unwrap().pos(), Position::new(2, 1));
        assert!(matches!(
            list.set(3, fixture.local_configuration(0, 0)),
            Err(EnumError::IndexOutOfRange { index: 3, len: 3 })
        ));

        let removed = list.remove(0).unwrap();
        assert_eq!(removed.pos(), Position::new(0, 0));
        assert!(list.remove(5).is_err());
        assert_eq!((&list).into_iter().count(), 2);

        list.clear();
        assert!(list.is_empty());
    }

    // ==================== Serialization ====================

    #[test]
    fn test_data_round_trip() {
        let fixture = Fixture::new();
        let list = LocalConfigurationList::new(
            fixture.info.clone(),
            vec![fixture.local_configuration(1, 0), fixture.local_configuration(2, 1)],
        )
        .unwrap();

        let text = serde_json::to_string(&list.to_data()).unwrap();
        let data: LocalConfigurationListData = serde_json::from_str(&text).unwrap();
        assert_eq!(data.local_configurations.len(), 2);
        assert_eq!(data.equivalents_info.equivalent_generating_op_indices, vec![1, 0]);

        let back = LocalConfigurationList::from_data(&data, &fixture.prim, &fixture.set).unwrap();
        assert_eq!(back.len(), 2);
        // A fresh context is created
        assert_ne!(back.event_info().id(), list.event_info().id());
        assert_eq!(back.to_data(), list.to_data());
        for (a, b) in back.iter().zip(list.iter()) {
            assert!(Arc::ptr_eq(a.supercell(), b.supercell()));
        }

        let other_prim = square_prim(&["A", "Va"]).unwrap();
        assert!(matches!(
            LocalConfigurationList::from_data(&data, &other_prim, &fixture.set),
            Err(EnumError::PrimMismatch(_))
        ));
    }
}
