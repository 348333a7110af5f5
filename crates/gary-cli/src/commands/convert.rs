use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gary_core::UnitSystem;
use gary_potential::{read, write, Potential};
use tracing::info;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source document.
    pub input: PathBuf,
    /// Destination document; `.json` selects JSON, anything else YAML.
    pub output: PathBuf,
    /// Preset unit system to re-express parameters in.
    #[arg(long)]
    pub units: Option<String>,
}

pub fn run(args: &ConvertArgs) -> Result<(), Box<dyn Error>> {
    let mut potential: Potential = read(&args.input)?;
    if let Some(name) = &args.units {
        let target = UnitSystem::named(name)?;
        info!(from = %potential.units(), to = %target, "converting units");
        potential = potential.to_units(&target)?;
    }
    write(&potential, &args.output)?;
    Ok(())
}
