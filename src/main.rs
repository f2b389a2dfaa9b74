//! GDIV CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the chosen
//! metric over every given raster, and print one JSON line per raster.
//! For programmatic use, prefer the library API (`gdiv::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
