use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gary_potential::{fingerprint, read, Potential};

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Potential document (YAML or JSON).
    pub input: PathBuf,
}

pub fn run(args: &HashArgs) -> Result<(), Box<dyn Error>> {
    let potential: Potential = read(&args.input)?;
    println!("{}", fingerprint(&potential)?);
    Ok(())
}
