use std::path::PathBuf;
use std::process::Command;

fn gary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gary"))
}

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("test-data")
        .join(relative)
}

#[test]
fn show_prints_the_summary() {
    let output = gary()
        .arg("show")
        .arg(fixture_path("potential/isochrone.yml"))
        .output()
        .expect("run gary show");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(
        stdout.trim(),
        "<IsochronePotential: b=0.76, m=1e11 (kpc,Myr,solMass,rad)>"
    );
}

#[test]
fn new_then_hash_matches_fixture() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let out = dir.path().join("isochrone.json");
    let status = gary()
        .args(["new", "isochrone", "--param", "m=1e11", "--param", "b=0.76", "--out"])
        .arg(&out)
        .status()
        .expect("run gary new");
    assert!(status.success());

    let hash_of = |path: PathBuf| {
        let output = gary().arg("hash").arg(path).output().expect("run gary hash");
        assert!(output.status.success());
        String::from_utf8(output.stdout).expect("utf8")
    };
    assert_eq!(hash_of(out), hash_of(fixture_path("potential/isochrone.yml")));
}

#[test]
fn convert_changes_units() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let out = dir.path().join("si.yml");
    let status = gary()
        .arg("convert")
        .arg(fixture_path("potential/isochrone.yml"))
        .arg(&out)
        .args(["--units", "si"])
        .status()
        .expect("run gary convert");
    assert!(status.success());
    let text = std::fs::read_to_string(&out).expect("converted document");
    assert!(text.contains("length: m\n"));
}

#[test]
fn invalid_document_fails() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("broken.yml");
    std::fs::write(&path, "class: WobblyPotential\nunits: galactic\n").expect("write");
    let output = gary().arg("show").arg(&path).output().expect("run gary show");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("unknown_potential"));
}
