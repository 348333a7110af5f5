use gary_core::GaryError;
use gary_potential::io::from_str;
use gary_potential::{read, write, CompositePotential, DocumentFormat, Potential, PotentialModel};

fn yaml_error(text: &str) -> GaryError {
    from_str::<Potential>(text, DocumentFormat::Yaml).expect_err("document should be rejected")
}

fn assert_format(err: &GaryError, code: &str) {
    assert!(matches!(err, GaryError::Format(_)), "expected format error, got {err:?}");
    assert_eq!(err.code(), code, "{err}");
}

#[test]
fn unknown_class_is_rejected() {
    let err = yaml_error("class: WobblyPotential\nparameters: {m: 1.0}\nunits: galactic\n");
    assert_format(&err, "unknown_potential");
    assert_eq!(err.info().context["class"], "WobblyPotential");
}

#[test]
fn missing_class_is_rejected() {
    let err = yaml_error("parameters: {m: 1.0}\nunits: galactic\n");
    assert_format(&err, "missing_class");
}

#[test]
fn missing_parameter_is_rejected() {
    let err = yaml_error("class: IsochronePotential\nparameters: {m: 1.0e+11}\nunits: galactic\n");
    assert_format(&err, "missing_parameter");
    assert_eq!(err.info().context["parameter"], "b");
}

#[test]
fn unexpected_parameter_is_rejected() {
    let err = yaml_error(
        "class: IsochronePotential\nparameters: {m: 1.0e+11, b: 0.76, c: 2.0}\nunits: galactic\n",
    );
    assert_format(&err, "unexpected_parameter");
}

#[test]
fn non_numeric_parameter_is_rejected() {
    let err = yaml_error("class: KeplerPotential\nparameters: {m: lots}\nunits: galactic\n");
    assert_format(&err, "non_numeric_parameter");

    let err = yaml_error("class: KeplerPotential\nparameters: {m: [1.0, 2.0]}\nunits: galactic\n");
    assert_format(&err, "non_numeric_parameter");
}

#[test]
fn non_finite_parameter_is_rejected() {
    let err = yaml_error("class: KeplerPotential\nparameters: {m: .nan}\nunits: galactic\n");
    assert_format(&err, "non_finite_parameter");
}

#[test]
fn unresolvable_units_are_rejected() {
    let err = yaml_error("class: KeplerPotential\nparameters: {m: 1.0}\n");
    assert_format(&err, "missing_units");

    let err = yaml_error("class: KeplerPotential\nparameters: {m: 1.0}\nunits: cgs\n");
    assert_format(&err, "unknown_unit_system");

    let err = yaml_error(
        "class: KeplerPotential\nparameters: {m: 1.0}\nunits: {length: furlong, mass: solMass, time: Myr}\n",
    );
    assert_format(&err, "unknown_unit");
}

#[test]
fn mismatched_unit_override_is_rejected() {
    let err = yaml_error(
        "class: IsochronePotential\nparameters: {m: 1.0e+11, b: 0.76, b_unit: Myr}\nunits: galactic\n",
    );
    assert_format(&err, "unit_dimension_mismatch");
    assert_eq!(err.info().context["parameter"], "b");
}

#[test]
fn syntax_errors_are_format_errors() {
    assert_format(&yaml_error("class: [unterminated\n"), "yaml_deserialize");
    let err = from_str::<Potential>("{\"class\": ", DocumentFormat::Json).unwrap_err();
    assert_format(&err, "json_deserialize");
}

#[test]
fn unknown_document_type_is_rejected() {
    let err = yaml_error("type: custom\nclass: KeplerPotential\n");
    assert_format(&err, "unknown_document_type");
}

#[test]
fn components_without_type_are_rejected() {
    let err = yaml_error(
        "components:\n- class: KeplerPotential\n  parameters: {m: 1.0}\n  units: galactic\n",
    );
    assert_format(&err, "missing_document_type");
    assert_eq!(err.info().hint.as_deref(), Some("add `type: composite`"));
}

#[test]
fn stray_keys_are_rejected() {
    let err = yaml_error("class: KeplerPotential\nparameters: {m: 1.0}\nunit: galactic\n");
    assert_format(&err, "yaml_deserialize");
    assert!(err.info().message.contains("unknown field `unit`"), "{err}");

    let err =
        yaml_error("name: sun\nclass: KeplerPotential\nparameters: {m: 1.0}\nunits: galactic\n");
    assert_format(&err, "unexpected_field");
    assert_eq!(err.info().context["field"], "name");
}

#[test]
fn composite_errors_name_the_component() {
    let err = yaml_error(
        "type: composite\ncomponents:\n  - name: halo\n    class: NFWPotential\n    parameters: {m: 1.0}\n    units: galactic\n",
    );
    assert_format(&err, "missing_parameter");
    assert_eq!(err.info().context["component"], "halo");

    assert_format(&yaml_error("type: composite\ncomponents: []\n"), "empty_composite");
}

#[test]
fn composite_with_mixed_units_is_rejected() {
    let err = yaml_error(
        "type: composite\ncomponents:\n  - {class: KeplerPotential, parameters: {m: 1.0}, units: galactic}\n  - {class: KeplerPotential, parameters: {m: 1.0}, units: si}\n",
    );
    assert_format(&err, "unit_system_mismatch");
}

#[test]
fn composite_cannot_be_read_as_single_model() {
    let text = "type: composite\ncomponents:\n  - {class: KeplerPotential, parameters: {m: 1.0}, units: galactic}\n";
    let err = from_str::<PotentialModel>(text, DocumentFormat::Yaml).unwrap_err();
    assert_format(&err, "expected_single_potential");

    let composite = from_str::<CompositePotential>(text, DocumentFormat::Yaml).expect("composite");
    assert_eq!(composite.len(), 1);
    assert!(composite.get("0").is_some());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("absent.yml");
    let err = read::<PotentialModel, _>(&path).unwrap_err();
    assert!(matches!(err, GaryError::Io(_)));
    assert_eq!(err.code(), "open");
    assert!(err.info().context["path"].ends_with("absent.yml"));
}

#[test]
fn unwritable_destination_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("missing-dir").join("potential.yml");
    let model = PotentialModel::kepler(1.0, gary_core::UnitSystem::galactic()).expect("model");
    let err = write(&model, &path).unwrap_err();
    assert!(matches!(err, GaryError::Io(_)));
    assert_eq!(err.code(), "create");
}

#[test]
fn format_errors_from_files_carry_the_path() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("broken.yml");
    std::fs::write(&path, "class: WobblyPotential\nunits: galactic\n").expect("write fixture");
    let err = read::<Potential, _>(&path).unwrap_err();
    assert_format(&err, "unknown_potential");
    assert!(err.info().context.contains_key("path"));
}
