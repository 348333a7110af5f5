use std::error::Error;

use clap::Args;
use gary_potential::PotentialKind;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct KindsArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct KindEntry {
    tag: &'static str,
    class: &'static str,
    parameters: Vec<ParameterEntry>,
}

#[derive(Debug, Serialize)]
struct ParameterEntry {
    name: &'static str,
    physical_type: &'static str,
}

fn entries() -> Vec<KindEntry> {
    PotentialKind::ALL
        .into_iter()
        .map(|kind| KindEntry {
            tag: kind.tag(),
            class: kind.class_name(),
            parameters: kind
                .schema()
                .iter()
                .map(|spec| ParameterEntry {
                    name: spec.name,
                    physical_type: spec.physical_type.name(),
                })
                .collect(),
        })
        .collect()
}

pub fn run(args: &KindsArgs) -> Result<(), Box<dyn Error>> {
    let entries = entries();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for entry in entries {
        let parameters = entry
            .parameters
            .iter()
            .map(|param| format!("{} ({})", param.name, param.physical_type))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:<20} {:<28} {}", entry.tag, entry.class, parameters);
    }
    Ok(())
}
