//! # Kicks CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Parse arguments
//! 3. Load configuration, open the database, run the command

use clap::Parser;
use std::process::ExitCode;

use kicks_storefront::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    kicks_storefront::init_tracing();

    let args = Cli::parse();
    cli::run(args).await
}
