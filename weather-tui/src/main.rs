//! Binary crate for the `weather` viewer.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Running the terminal window

use clap::Parser;

mod cli;
mod logging;

fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run()
}
