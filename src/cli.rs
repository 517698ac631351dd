//! Command-line interface parsing for ouiscan
//!
//! This module handles parsing of CLI arguments using clap: input source
//! selection and the flags controlling when the cached OUI registry is
//! refreshed.

use clap::Parser;
use std::path::PathBuf;

/// ouiscan - Pull MAC addresses out of text and identify their OUI vendors
#[derive(Parser, Debug)]
#[command(name = "ouiscan")]
#[command(about = "Extracts MAC addresses and resolves their OUI vendors")]
#[command(version)]
pub struct Cli {
    /// File to ingest instead of reading from standard input
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Update the registry only, then exit without reading input
    #[arg(short, long)]
    pub update_only: bool,

    /// Do not check whether the registry is due for a refresh
    #[arg(short, long)]
    pub skip_update: bool,

    /// Refresh the registry unconditionally before processing input
    #[arg(short, long)]
    pub force_update: bool,

    /// Directory holding the registry file (defaults to the XDG cache dir)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}
