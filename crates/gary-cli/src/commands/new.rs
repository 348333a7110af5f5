use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gary_core::UnitSystem;
use gary_potential::{write, PotentialKind, PotentialModel};

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Potential kind, as a tag (`isochrone`) or class name (`IsochronePotential`).
    pub kind: String,
    /// Parameter assignment `name=value`; repeat for each parameter.
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub params: Vec<(String, f64)>,
    /// Preset unit system for the parameter values.
    #[arg(long, default_value = "galactic")]
    pub units: String,
    /// Destination document; `.json` selects JSON, anything else YAML.
    #[arg(long)]
    pub out: PathBuf,
}

fn parse_assignment(text: &str) -> Result<(String, f64), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("`{text}` is not of the form name=value"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("`{value}` is not a number: {err}"))?;
    Ok((name.trim().to_string(), value))
}

pub fn run(args: &NewArgs) -> Result<(), Box<dyn Error>> {
    let kind = PotentialKind::parse(&args.kind)?;
    let units = UnitSystem::named(&args.units)?;
    let model = PotentialModel::new(kind, args.params.iter().cloned(), units)?;
    write(&model, &args.out)?;
    println!("{model}");
    Ok(())
}
