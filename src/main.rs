//! CLI entry point for building a photomosaic

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicRunner};
use photomosaic::io::logging::init_logging;

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());
    MosaicRunner::new(cli).run()
}
