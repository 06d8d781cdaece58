//! Shugen CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod commands;
mod error;
mod generator;
mod logging;
mod utils;

#[cfg(test)]
mod test_helpers;

use clap::Parser;
use commands::generate;
use tracing::warn;

/// Shugen - generate Go client wrappers from bundle declarations
#[derive(Parser)]
#[command(name = "shugen")]
#[command(about = "Shugen - generate Go client wrappers from bundle declarations", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Declaration file containing the `bundle.Client` call
    inputs: Vec<String>,

    /// Output path for the generated file
    #[arg(short, long)]
    output: Option<String>,

    /// Print version
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("shugen {}", env!("SHUGEN_VERSION"));
        return;
    }

    logging::init(cli.verbose);

    let mut inputs = cli.inputs.into_iter();
    let Some(input) = inputs.next() else {
        eprintln!("✗ No declaration file given");
        eprintln!("  Usage: shugen <file.go> [-o <output.go>]");
        std::process::exit(1);
    };
    let ignored: Vec<String> = inputs.collect();
    if !ignored.is_empty() {
        warn!(?ignored, "only the first declaration file is processed");
    }

    let exit_code = generate::run(&generate::Options {
        input,
        output: cli.output,
    });

    std::process::exit(exit_code);
}
