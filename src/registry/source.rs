//! Remote IEEE OUI listing client
//!
//! Fetches the public OUI registry document over plain HTTP and parses the
//! `(base 16)` assignment lines into prefix/vendor pairs.

use reqwest::blocking::Client;
use thiserror::Error;

/// URL of the public IEEE OUI listing
const DEFAULT_OUI_URL: &str = "http://standards-oui.ieee.org/oui.txt";

/// Marker substring identifying assignment lines in the listing
const BASE16_MARKER: &str = "(base 16)";

/// Errors that can occur when fetching the remote listing
///
/// There is no retry or backoff; a fetch failure during a mandatory refresh
/// is fatal to the invocation.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for fetching the IEEE OUI listing
#[derive(Debug, Clone)]
pub struct OuiSource {
    /// Blocking HTTP client
    http_client: Client,
    /// URL of the listing (allows override for testing)
    url: String,
}

impl OuiSource {
    /// Creates a source pointing at the public IEEE listing
    pub fn new() -> Self {
        Self::with_url(DEFAULT_OUI_URL.to_string())
    }

    /// Creates a source with a custom URL
    pub fn with_url(url: String) -> Self {
        Self {
            http_client: Client::new(),
            url,
        }
    }

    /// URL this source fetches from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the full listing document
    ///
    /// One plain GET, no auth, no retry; blocks until complete or failed.
    pub fn fetch(&self) -> Result<String, SourceError> {
        let text = self
            .http_client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .text()?;
        Ok(text)
    }
}

impl Default for OuiSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses the OUI listing into `(prefix, vendor)` pairs
///
/// Only lines containing the `(base 16)` marker are considered: the text
/// before the marker, trimmed and lowercased, is the OUI prefix; the text
/// after, trimmed, is the vendor name. Prefixes that are not exactly 6 hex
/// digits after normalization are skipped so the registry invariant holds.
/// Duplicate handling is left to the registry merge (first-seen-wins).
pub fn parse_listing(document: &str) -> Vec<(String, String)> {
    document
        .lines()
        .filter_map(|line| {
            let (before, after) = line.split_once(BASE16_MARKER)?;
            let prefix = before.trim().to_ascii_lowercase();
            let vendor = after.trim().to_string();
            if is_oui_prefix(&prefix) {
                Some((prefix, vendor))
            } else {
                None
            }
        })
        .collect()
}

/// Whether `s` is exactly 6 lowercase hex digits
pub(crate) fn is_oui_prefix(s: &str) -> bool {
    s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shape of the real listing: a preamble, `(hex)` lines with dashed
    /// prefixes, and `(base 16)` lines with bare prefixes.
    const SAMPLE_LISTING: &str = "\
OUI/MA-L                                                    Organization
company_id                                                  Organization
                                                            Address

00-11-22   (hex)\t\tAcme Corp
001122     (base 16)\t\tAcme Corp
\t\t\t\t123 Example Street
\t\t\t\tSpringfield  US

AA-BB-CC   (hex)\t\tWidget Inc
AABBCC     (base 16)\t\tWidget Inc
";

    #[test]
    fn test_parse_extracts_base16_lines_only() {
        let pairs = parse_listing(SAMPLE_LISTING);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("001122".to_string(), "Acme Corp".to_string()));
        assert_eq!(pairs[1], ("aabbcc".to_string(), "Widget Inc".to_string()));
    }

    #[test]
    fn test_parse_lowercases_prefix_and_trims_vendor() {
        let pairs = parse_listing("AABBCC     (base 16)\t\t  Widget Inc  \n");
        assert_eq!(pairs, vec![("aabbcc".to_string(), "Widget Inc".to_string())]);
    }

    #[test]
    fn test_parse_skips_invalid_prefixes() {
        let doc = "00-11-22   (base 16)\t\tDashed Prefix\nGGGGGG   (base 16)\t\tNot Hex\n";
        assert!(parse_listing(doc).is_empty());
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_listing("").is_empty());
    }

    #[test]
    fn test_parse_keeps_duplicate_prefixes_for_merge_to_resolve() {
        let doc = "001122   (base 16)\t\tFirst Name\n001122   (base 16)\t\tSecond Name\n";
        let pairs = parse_listing(doc);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_is_oui_prefix() {
        assert!(is_oui_prefix("001122"));
        assert!(is_oui_prefix("abcdef"));
        assert!(!is_oui_prefix("ABCDEF"));
        assert!(!is_oui_prefix("00112"));
        assert!(!is_oui_prefix("0011223"));
        assert!(!is_oui_prefix("00-11-"));
    }

    #[test]
    fn test_default_url_is_ieee_listing() {
        let source = OuiSource::new();
        assert_eq!(source.url(), "http://standards-oui.ieee.org/oui.txt");
    }

    #[test]
    fn test_with_url_overrides_target() {
        let source = OuiSource::with_url("http://localhost:9999/oui.txt".to_string());
        assert_eq!(source.url(), "http://localhost:9999/oui.txt");
    }
}
