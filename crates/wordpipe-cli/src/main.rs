//! `wordpipe` binary entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use wordpipe_cli::{Args, execute, logging};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args);

    match execute(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
