use std::path::PathBuf;

use gary_core::UnitSystem;
use gary_potential::{read, write, CompositePotential, Potential, PotentialKind};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("test-data")
        .join(relative)
}

#[test]
fn composite_fixture_reads_in_order() {
    let composite: CompositePotential =
        read(fixture_path("potential/milky_way.yml")).expect("read");
    let names: Vec<_> = composite.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["bulge", "disk", "2"]);
    assert_eq!(composite.units(), &UnitSystem::galactic());

    let disk = composite.get("disk").expect("disk");
    assert_eq!(disk.kind(), PotentialKind::MiyamotoNagai);
    assert_eq!(disk.parameter("a"), Some(6.5));

    // 220 km/s expressed in kpc/Myr.
    let halo = composite.get("2").expect("halo");
    assert_eq!(halo.kind(), PotentialKind::Logarithmic);
    let v_c = halo.parameter("v_c").expect("v_c");
    assert!((v_c - 0.224_997).abs() < 1e-6, "v_c = {v_c}");
}

#[test]
fn composite_round_trips_through_both_formats() {
    let original: Potential = read(fixture_path("potential/milky_way.yml")).expect("read");
    let dir = tempfile::tempdir().expect("tmp dir");

    for name in ["milky_way.yml", "milky_way.json"] {
        let path = dir.path().join(name);
        write(&original, &path).expect("write");
        let restored: Potential = read(&path).expect("read back");
        assert_eq!(restored, original, "{name}");
    }
}

#[test]
fn single_document_reads_as_one_component_composite() {
    let composite: CompositePotential =
        read(fixture_path("potential/isochrone.yml")).expect("read");
    assert_eq!(composite.len(), 1);
    let (name, model) = composite.iter().next().expect("component");
    assert_eq!(name, "0");
    assert_eq!(model.kind(), PotentialKind::Isochrone);
}

#[test]
fn composite_converts_units_together() {
    let composite: CompositePotential =
        read(fixture_path("potential/milky_way.yml")).expect("read");
    let si = composite.to_units(&UnitSystem::si()).expect("to si");
    assert_eq!(si.units(), &UnitSystem::si());
    let back = si.to_units(&UnitSystem::galactic()).expect("to galactic");
    assert!(back.approx_eq(&composite, 1e-12));
    assert!(format!("{composite}").starts_with("<CompositePotential (kpc,Myr,solMass,rad)>\n  bulge: <HernquistPotential"));
}
