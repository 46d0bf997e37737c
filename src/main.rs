//! CLI entry point for composing random image grids

use clap::Parser;
use imagegrid::io::cli::{Cli, SessionRunner, init_logging};

fn main() -> imagegrid::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);
    let mut runner = SessionRunner::new(cli);
    runner.process()?;
    Ok(())
}
