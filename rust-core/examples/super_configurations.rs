/// Example: distinct super configurations of a striped motif, and the canonical form of
/// a vacancy hop placed in one of them.
use std::sync::Arc;

use lattice_enumerate::configuration::Configuration;
use lattice_enumerate::enumerate::SuperConfigEnum;
use lattice_enumerate::lattice::{square_prim, Supercell, SupercellEnumParams, UnitCellCoord};
use lattice_enumerate::local_configuration::{
    make_canonical_local_configuration, CanonicalOptions, LocalConfiguration, OccEventSymInfo,
};
use lattice_enumerate::occ_events::OccEvent;
use nalgebra::{Matrix3, Vector3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Super configurations of a striped motif ===\n");

    let prim = square_prim(&["A", "Va"])?;
    let motif_cell = Supercell::new(prim.clone(), Matrix3::new(2, 0, 0, 0, 1, 0, 0, 0, 1))?;
    let motif = Configuration::new(Arc::new(motif_cell), vec![0, 1])?;

    let enumerator = SuperConfigEnum::new(prim.clone(), None)?;
    let params = SupercellEnumParams::new(4).with_dirs("ab");
    let mut super_configs = Vec::new();
    for config in enumerator.by_supercell(&motif, &params)? {
        let config = config?;
        println!(
            "   T = {:?}  occupation = {:?}",
            config.supercell().transformation_matrix_rows(),
            config.occupation()
        );
        super_configs.push(config);
    }
    println!("   {} distinct super configurations\n", super_configs.len());

    println!("=== Canonical local configuration ===\n");
    let hop = OccEvent::new(
        vec![
            UnitCellCoord::new(0, Vector3::new(0, 0, 0)),
            UnitCellCoord::new(0, Vector3::new(1, 0, 0)),
        ],
        vec![0, 1],
        vec![1, 0],
    )?;
    let event_info = OccEventSymInfo::init(prim, hop.clone(), None, None)?;
    println!("   Event orbit size: {}", event_info.prim_info().n_equivalents());

    if let Some(config) = super_configs.last() {
        let local_config = LocalConfiguration::from_event(config.clone(), &hop, &event_info)?;
        let canonical =
            make_canonical_local_configuration(&local_config, &CanonicalOptions::default(), None)?;
        println!("   Initial position:   {:?}", local_config.pos());
        println!("   Canonical position: {:?}", canonical.pos());
        println!("   Canonical occupation: {:?}", canonical.configuration().occupation());
    }

    Ok(())
}
