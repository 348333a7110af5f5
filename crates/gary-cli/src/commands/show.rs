use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gary_potential::{read, Potential};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Potential document (YAML or JSON).
    pub input: PathBuf,
}

pub fn run(args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    let potential: Potential = read(&args.input)?;
    println!("{potential}");
    Ok(())
}
