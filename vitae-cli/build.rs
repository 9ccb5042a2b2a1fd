use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["tree-treeviz", "tree-json", "outline-treeviz"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("vitae")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a CV in LaTeX, PDF or HTML from a YAML outline")
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("build")
                .arg(Arg::new("out").index(1).value_hint(ValueHint::FilePath))
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("latex").long("latex").action(ArgAction::SetTrue))
                .arg(Arg::new("pdf").long("pdf").action(ArgAction::SetTrue))
                .arg(Arg::new("html").long("html").action(ArgAction::SetTrue))
                .arg(Arg::new("cache").long("cache").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("inspect")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "vitae", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "vitae", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "vitae", &outdir)?;

    Ok(())
}
