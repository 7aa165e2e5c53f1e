//! Fax notification filter and attachment reference extraction.
//!
//! Pure string matching, no parsing of real email structure:
//! - sender marker → literal, case-sensitive substring anywhere in the text
//! - attachment → first `Attachment:` label followed by a non-whitespace token

use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::pipeline::types::FaxEmail;

/// Label followed by optional whitespace (newlines included) and a filename token.
const ATTACHMENT_PATTERN: &str = r"Attachment:\s*(\S+)";

/// Pre-LLM rules deciding whether a record is a fax notification.
#[derive(Debug, Clone)]
pub struct FaxRules {
    sender_marker: String,
    attachment: Regex,
}

impl FaxRules {
    pub fn new(sender_marker: impl Into<String>) -> Self {
        Self {
            sender_marker: sender_marker.into(),
            attachment: Regex::new(ATTACHMENT_PATTERN).unwrap(),
        }
    }

    /// Whether the raw text carries the fax sender marker.
    pub fn is_fax(&self, content: &str) -> bool {
        content.contains(&self.sender_marker)
    }

    /// First attachment filename in the text, trimmed.
    pub fn attachment_name(&self, content: &str) -> Option<String> {
        self.attachment
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty())
    }

    /// Evaluate a record. Returns `None` for non-fax records.
    pub fn evaluate(&self, source: &Path, content: &str) -> Option<FaxEmail> {
        if !self.is_fax(content) {
            debug!(path = %source.display(), "No fax sender marker, skipping");
            return None;
        }

        Some(FaxEmail {
            source: source.to_path_buf(),
            attachment: self.attachment_name(content),
        })
    }
}
