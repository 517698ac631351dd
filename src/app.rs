//! Interactive/batch driver for ouiscan
//!
//! This module wires the CLI options, registry cache, and MAC matcher
//! together: it decides whether the cached registry needs a refresh, collects
//! input lines from a file or standard input, and prints one
//! `<mac>\t<vendor>` result per recognized MAC address.

use chrono::Utc;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::Cli;
use crate::mac::find_mac;
use crate::registry::{
    parse_listing, LoadOutcome, OuiSource, RegistryStore, SourceError, VendorRegistry,
    TIMESTAMP_FORMAT,
};

/// Separator printed around interactive input
const BANNER: &str = "======================================";

/// Errors that abort an invocation
///
/// Missing or corrupt registry files and unmatched input lines are not
/// errors; what remains is fetch failures during a mandatory refresh and
/// plain I/O problems.
#[derive(Debug, Error)]
pub enum AppError {
    /// No cache directory could be determined and none was supplied
    #[error("could not determine a cache directory; pass --cache-dir")]
    NoCacheDir,

    /// The remote OUI listing could not be fetched
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The input file could not be read
    #[error("failed to read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading stdin or writing the registry file failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Driver state: the registry, where it persists, and where refreshes come from
pub struct App {
    /// Persisted registry location
    store: RegistryStore,
    /// Remote listing client
    source: OuiSource,
    /// In-memory prefix-to-vendor mapping
    registry: VendorRegistry,
    /// How the initial load from disk went
    load_outcome: LoadOutcome,
}

impl App {
    /// Creates the driver, loading the registry from disk best-effort
    ///
    /// With no `cache_dir` override the registry lives in the XDG cache
    /// directory. A missing or corrupt registry file yields an empty registry
    /// here; the freshness check decides whether to fetch a replacement.
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self, AppError> {
        let store = match cache_dir {
            Some(dir) => RegistryStore::with_dir(dir),
            None => RegistryStore::new().ok_or(AppError::NoCacheDir)?,
        };
        let (registry, load_outcome) = store.load();
        Ok(Self {
            store,
            source: OuiSource::new(),
            registry,
            load_outcome,
        })
    }

    /// Refreshes the registry from the remote listing and persists it
    ///
    /// New prefixes are merged first-seen-wins, so entries already in the
    /// registry keep their existing vendor names. A fetch failure propagates;
    /// there is no retry.
    pub fn refresh(&mut self) -> Result<(), AppError> {
        eprintln!("Pulling the latest OUI listing from {}", self.source.url());
        let document = self.source.fetch()?;
        self.registry.merge(parse_listing(&document));
        self.registry.touch(Utc::now().naive_utc());
        self.store.save(&self.registry)?;
        eprintln!("Registry refreshed, {} vendors known", self.registry.len());
        Ok(())
    }

    /// Ensures the registry is usable before processing input
    ///
    /// An absent registry file always triggers a refresh, even with `skip`
    /// set. Otherwise `skip` suppresses the staleness check entirely; without
    /// it, the last-updated timestamp is reported and a registry at least 7
    /// days old (or one loaded from a malformed file, which carries no
    /// timestamp) is refreshed.
    pub fn ensure_fresh(&mut self, skip: bool) -> Result<(), AppError> {
        if self.load_outcome == LoadOutcome::Absent {
            eprintln!(
                "No registry file at {}, fetching one",
                self.store.path().display()
            );
            self.refresh()?;
        }
        if skip {
            return Ok(());
        }
        if let Some(last) = self.registry.last_updated() {
            eprintln!("Registry last updated: {}", last.format(TIMESTAMP_FORMAT));
        }
        if self.registry.is_stale(Utc::now().naive_utc()) {
            self.refresh()?;
        }
        Ok(())
    }

    /// Resolves one input line to an output line
    ///
    /// Returns the `<mac>\t<vendor>` result for the first MAC found in the
    /// line, or `None` when the line holds no recognizable MAC (the line is
    /// then silently skipped).
    pub fn process_line(&self, line: &str) -> Option<String> {
        let mac = find_mac(line)?;
        let vendor = self.registry.lookup(mac.oui_prefix());
        Some(format!("{mac}\t{vendor}"))
    }
}

/// Runs one full invocation: freshness handling, input collection, lookups
///
/// Input is collected completely before any line is processed. Lookup results
/// go to stdout; prompts, banners, and refresh status go to stderr so piped
/// output stays clean.
pub fn run(cli: &Cli) -> Result<(), AppError> {
    let mut app = App::new(cli.cache_dir.clone())?;

    if cli.update_only {
        return app.refresh();
    }

    if cli.force_update {
        app.refresh()?;
    } else {
        app.ensure_fresh(cli.skip_update)?;
    }

    let lines = match &cli.input {
        Some(path) => read_file_lines(path)?,
        None => read_stdin_lines()?,
    };

    for line in &lines {
        if let Some(result) = app.process_line(line) {
            println!("{result}");
        }
    }
    Ok(())
}

/// Reads all lines from the input file
fn read_file_lines(path: &Path) -> Result<Vec<String>, AppError> {
    let file = File::open(path).map_err(|source| AppError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<String>>>()
        .map_err(|source| AppError::Input {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads lines from stdin until end-of-input, with prompts and banners
fn read_stdin_lines() -> Result<Vec<String>, AppError> {
    eprintln!("Paste MAC addresses here, one per line");
    eprintln!("Press Ctrl+D when finished adding MACs");
    eprintln!("{BANNER}");
    let lines = io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<String>>>()?;
    eprintln!("{BANNER}");
    Ok(lines)
}
