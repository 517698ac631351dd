//! ouiscan - extract MAC addresses from text and identify their OUI vendors
//!
//! Reads free-form text from a file or standard input, pulls out anything
//! that looks like a MAC address, and resolves each one against a locally
//! cached copy of the IEEE OUI registry.

mod app;
mod cli;
mod mac;
mod registry;

use clap::Parser;

use cli::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    app::run(&cli)?;
    Ok(())
}
