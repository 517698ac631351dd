//! MAC address extraction from free-form text
//!
//! Recognizes MAC-like substrings in arbitrary text under three lexical forms
//! (bare hex, colon/dash pairs, Cisco dot notation) and normalizes them to a
//! canonical colon-delimited lowercase form.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern covering the three accepted MAC notations.
///
/// Alternatives are tried in order at each position, matching the leftmost
/// occurrence first:
/// - 12 contiguous hex digits (`aabbccddeeff`)
/// - six hex pairs separated by `:` or `-`, mixing allowed (`aa:bb-cc:dd-ee:ff`)
/// - three groups of four hex digits separated by `.` (`aabb.ccdd.eeff`)
static MAC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([0-9a-f]{12})|((?:[0-9a-f]{2}[-:]){5}[0-9a-f]{2})|((?:[0-9a-f]{4}\.){2}[0-9a-f]{4})",
    )
    .expect("MAC pattern is a valid regex")
});

/// A MAC address normalized to 12 lowercase hex digits
///
/// The canonical display form regroups the digits into colon-separated pairs
/// (`aa:bb:cc:dd:ee:ff`). The first 6 digits form the OUI prefix used for
/// vendor lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacAddress {
    /// Exactly 12 lowercase hex digits, no separators
    digits: String,
}

impl MacAddress {
    /// Returns the 6-hex-digit OUI prefix of this address
    pub fn oui_prefix(&self) -> &str {
        &self.digits[..6]
    }
}

impl std::fmt::Display for MacAddress {
    /// Renders the canonical form: lowercase hex pairs joined by colons
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, pair) in self.digits.as_bytes().chunks(2).enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            f.write_str(std::str::from_utf8(pair).map_err(|_| std::fmt::Error)?)?;
        }
        Ok(())
    }
}

/// Finds the first MAC-like substring in a line of text
///
/// Matching is case-insensitive; the line is lowercased before the pattern
/// runs, so callers can pass raw input. Separators (`:`, `-`, `.`) are
/// stripped from the matched text to produce the normalized digit string.
///
/// # Returns
/// * `Some(MacAddress)` if any of the three notations occurs in the line
/// * `None` if the line holds no recognizable MAC (a normal skip, not an error)
pub fn find_mac(line: &str) -> Option<MacAddress> {
    let lowered = line.to_ascii_lowercase();
    let matched = MAC_PATTERN.find(&lowered)?;
    let digits: String = matched
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .collect();
    Some(MacAddress { digits })
}
