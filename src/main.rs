//! pathprobe CLI: probe a host for every dictionary path; Ctrl+C stops gracefully.

use anyhow::Result;
use clap::Parser;
use pathprobe::engine::arg_parser::Cli;
use pathprobe::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
