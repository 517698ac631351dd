//! On-disk persistence for the vendor registry
//!
//! The registry is stored as a two-line plain-text file: a `last_update =`
//! timestamp line and a `db =` line holding the prefix-to-vendor mapping as a
//! JSON object. A missing or malformed file degrades to an empty registry
//! rather than failing; the distinction between the two is reported
//! explicitly via [`LoadOutcome`].

use chrono::{Duration, NaiveDateTime};
use directories::ProjectDirs;

use super::source::is_oui_prefix;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the persisted registry inside the cache directory
const REGISTRY_FILE_NAME: &str = "oui.db";

/// Key prefix of the timestamp line
const LAST_UPDATE_KEY: &str = "last_update = ";

/// Key prefix of the mapping line
const DB_KEY: &str = "db = ";

/// Timestamp format used when writing the persisted file, e.g. `2024-01-15 10:30:00.123456`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Lenient counterpart of [`TIMESTAMP_FORMAT`] used when reading, accepting
/// any fractional-second precision
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Vendor name reported for prefixes absent from the registry
const UNKNOWN_VENDOR: &str = "Unknown";

/// Registry entries older than this many days are considered stale
const STALENESS_DAYS: i64 = 7;

/// How loading the persisted registry file went
///
/// `Absent` and `Malformed` both yield an empty registry; callers use the
/// distinction to decide whether an immediate refresh is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// File existed and parsed cleanly
    Loaded,
    /// File does not exist yet (first run)
    Absent,
    /// File exists but could not be parsed
    Malformed,
}

/// In-memory mapping from OUI prefix to vendor name
///
/// Keys are exactly 6 lowercase hex characters. Entries are only ever added,
/// never overwritten or removed: the merge during a refresh is
/// first-seen-wins, which preserves previously resolved entries even when the
/// upstream listing changes its wording for a prefix.
#[derive(Debug, Clone, Default)]
pub struct VendorRegistry {
    /// When the registry was last refreshed; `None` until the first refresh
    last_updated: Option<NaiveDateTime>,
    /// OUI prefix → vendor name
    entries: HashMap<String, String>,
}

impl VendorRegistry {
    /// Looks up the vendor for a 6-hex-digit OUI prefix
    ///
    /// Returns the literal `"Unknown"` for prefixes not in the registry;
    /// an unknown prefix is a normal lookup result, not an error.
    pub fn lookup(&self, prefix: &str) -> &str {
        self.entries
            .get(prefix)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_VENDOR)
    }

    /// Merges parsed `(prefix, vendor)` pairs into the registry
    ///
    /// First-seen-wins: a pair whose prefix is already present is dropped.
    pub fn merge<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (prefix, vendor) in pairs {
            self.entries.entry(prefix).or_insert(vendor);
        }
    }

    /// Stamps the registry as refreshed at `now`
    pub fn touch(&mut self, now: NaiveDateTime) {
        self.last_updated = Some(now);
    }

    /// When the registry was last refreshed, if ever
    pub fn last_updated(&self) -> Option<NaiveDateTime> {
        self.last_updated
    }

    /// Whether the registry is due for a refresh at time `now`
    ///
    /// A registry that has never been refreshed (no timestamp, e.g. loaded
    /// from a malformed file) is always stale.
    pub fn is_stale(&self, now: NaiveDateTime) -> bool {
        match self.last_updated {
            Some(last) => now - last >= Duration::days(STALENESS_DAYS),
            None => true,
        }
    }

    /// Number of known OUI prefixes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads and writes the registry file at a fixed path
///
/// By default the file lives in the XDG cache directory
/// (`~/.cache/ouiscan/oui.db` on Linux). A custom directory can be supplied
/// for testing or to keep the registry elsewhere.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    /// Full path of the persisted registry file
    path: PathBuf,
}

impl RegistryStore {
    /// Creates a store under the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "ouiscan")?;
        Some(Self::with_dir(project_dirs.cache_dir().to_path_buf()))
    }

    /// Creates a store keeping the registry file in `dir`
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            path: dir.join(REGISTRY_FILE_NAME),
        }
    }

    /// Path of the persisted registry file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted registry
    ///
    /// Never fails: an absent file yields an empty registry with
    /// `LoadOutcome::Absent`, and a file that does not parse yields an empty
    /// registry with `LoadOutcome::Malformed`.
    pub fn load(&self) -> (VendorRegistry, LoadOutcome) {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return (VendorRegistry::default(), LoadOutcome::Absent),
        };

        match parse_registry_file(&content) {
            Some(registry) => (registry, LoadOutcome::Loaded),
            None => (VendorRegistry::default(), LoadOutcome::Malformed),
        }
    }

    /// Writes the registry back to disk, replacing prior contents wholesale
    ///
    /// The write goes to a temporary sibling file first and is moved into
    /// place with a rename, so a crash mid-write never leaves a truncated
    /// registry behind.
    pub fn save(&self, registry: &VendorRegistry) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let timestamp = registry
            .last_updated
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();
        let mapping = serde_json::to_string(&registry.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let content = format!("{LAST_UPDATE_KEY}{timestamp}\n{DB_KEY}{mapping}");

        let tmp_path = self.path.with_extension("db.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)
    }
}

/// Decodes the two-line registry file format
///
/// Returns `None` on any structural problem: missing lines, wrong key
/// prefixes, an unparseable timestamp, or a mapping line that is not a JSON
/// object of strings. Entries whose keys are not 6 lowercase hex digits
/// (e.g. from a hand-edited file) are dropped so the registry invariant
/// holds on the load path just as it does on the refresh path.
fn parse_registry_file(content: &str) -> Option<VendorRegistry> {
    let mut lines = content.lines();
    let timestamp_line = lines.next()?;
    let mapping_line = lines.next()?;

    let timestamp = timestamp_line.strip_prefix(LAST_UPDATE_KEY)?;
    let last_updated =
        NaiveDateTime::parse_from_str(timestamp.trim(), TIMESTAMP_PARSE_FORMAT).ok()?;

    let mapping = mapping_line.strip_prefix(DB_KEY)?;
    let mut entries: HashMap<String, String> = serde_json::from_str(mapping).ok()?;
    entries.retain(|prefix, _| is_oui_prefix(prefix));

    Some(VendorRegistry {
        last_updated: Some(last_updated),
        entries,
    })
}
