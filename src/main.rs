//! bosh-render CLI entry point
//!
//! Parses the five positional paths, renders the template and reports any
//! failure as a colored, human-readable message with exit status 1.

use bosh_render::cli;
use bosh_render::core::error::user_friendly_error;
use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute() {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
