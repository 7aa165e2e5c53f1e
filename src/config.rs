//! Configuration types.

use std::path::PathBuf;

/// Sender marker that identifies a fax-delivery notification.
pub const DEFAULT_SENDER_MARKER: &str = "From: fax@example.com";

/// Batch router configuration.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Directory of email records to scan.
    pub emails_dir: PathBuf,
    /// Directory that attachment filenames are resolved against.
    pub faxes_dir: PathBuf,
    /// Base directory holding one subfolder per category.
    pub output_dir: PathBuf,
    /// Literal substring an email must contain to be treated as a fax notification.
    pub sender_marker: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            emails_dir: PathBuf::from("test_dataset/emails"),
            faxes_dir: PathBuf::from("test_dataset/faxes"),
            output_dir: PathBuf::from("classified_faxes"),
            sender_marker: DEFAULT_SENDER_MARKER.to_string(),
        }
    }
}

impl RouterConfig {
    /// Build from process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            emails_dir: get("FAX_ROUTER_EMAILS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.emails_dir),
            faxes_dir: get("FAX_ROUTER_FAXES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.faxes_dir),
            output_dir: get("FAX_ROUTER_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            sender_marker: get("FAX_ROUTER_SENDER_MARKER").unwrap_or(defaults.sender_marker),
        }
    }
}
