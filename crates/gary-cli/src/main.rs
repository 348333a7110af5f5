use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    convert::{self, ConvertArgs},
    hash::{self, HashArgs},
    kinds::{self, KindsArgs},
    new::{self, NewArgs},
    show::{self, ShowArgs},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "gary", about = "Inspect and convert potential documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a potential document and print its summary.
    Show(ShowArgs),
    /// Construct a potential from parameters and write it out.
    New(NewArgs),
    /// Re-encode a document, optionally converting its unit system.
    Convert(ConvertArgs),
    /// Print the stable fingerprint of a document.
    Hash(HashArgs),
    /// List the known potential kinds and their parameters.
    Kinds(KindsArgs),
}

fn setup_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("GARY_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Show(args) => show::run(&args),
        Command::New(args) => new::run(&args),
        Command::Convert(args) => convert::run(&args),
        Command::Hash(args) => hash::run(&args),
        Command::Kinds(args) => kinds::run(&args),
    }
}
