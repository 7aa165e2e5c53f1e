//! Shared types for the fax routing pipeline.

use std::fmt;
use std::path::PathBuf;

// ── Categories ──────────────────────────────────────────────────────

/// Document categories, in match-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PatientReferral,
    PriorAuthorizationResponse,
    PatientRecords,
}

impl Category {
    /// Declaration order. Matching is first-hit over this slice.
    pub const ALL: [Category; 3] = [
        Category::PatientReferral,
        Category::PriorAuthorizationResponse,
        Category::PatientRecords,
    ];

    /// Label the classifier is asked to reply with.
    pub fn label(self) -> &'static str {
        match self {
            Self::PatientReferral => "Patient Referral",
            Self::PriorAuthorizationResponse => "Prior Authorization Response",
            Self::PatientRecords => "Patient Records",
        }
    }

    /// Output subfolder name.
    pub fn folder(self) -> &'static str {
        match self {
            Self::PatientReferral => "patient_referrals",
            Self::PriorAuthorizationResponse => "prior_authorizations",
            Self::PatientRecords => "patient_records",
        }
    }

    /// First category whose label appears case-insensitively anywhere in `reply`.
    pub fn from_reply(reply: &str) -> Option<Self> {
        let reply = reply.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| reply.contains(&c.label().to_lowercase()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Classification ──────────────────────────────────────────────────

/// Result of classifying one fax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Known(Category),
    Uncertain,
}

impl Classification {
    pub const UNCERTAIN_LABEL: &'static str = "Uncertain";

    pub fn from_reply(reply: &str) -> Self {
        Category::from_reply(reply).map_or(Self::Uncertain, Self::Known)
    }

    pub fn category(self) -> Option<Category> {
        match self {
            Self::Known(c) => Some(c),
            Self::Uncertain => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Known(c) => c.label(),
            Self::Uncertain => Self::UNCERTAIN_LABEL,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Email record ────────────────────────────────────────────────────

/// A fax notification email that passed the sender filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaxEmail {
    /// Where the email record was read from.
    pub source: PathBuf,
    /// Trimmed attachment filename, if a reference was found.
    pub attachment: Option<String>,
}

// ── Outcomes ────────────────────────────────────────────────────────

/// How processing of a single email record ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Sender marker absent. Silent skip.
    NotFax,
    /// Record could not be read as text.
    Unreadable,
    /// Fax email without an `Attachment:` reference.
    NoAttachment,
    /// Referenced attachment does not exist in fax storage.
    AttachmentMissing { path: PathBuf },
    /// Classifier produced no known category.
    Unclassified { path: PathBuf },
    /// Destination write failed.
    CopyFailed { path: PathBuf },
    /// Attachment copied into its category folder.
    Routed { category: Category, dest: PathBuf },
}

impl RecordOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFax => "not_fax",
            Self::Unreadable => "unreadable",
            Self::NoAttachment => "no_attachment",
            Self::AttachmentMissing { .. } => "attachment_missing",
            Self::Unclassified { .. } => "unclassified",
            Self::CopyFailed { .. } => "copy_failed",
            Self::Routed { .. } => "routed",
        }
    }
}

/// Per-run tally of record outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub scanned: usize,
    pub not_fax: usize,
    pub routed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &RecordOutcome) {
        self.scanned += 1;
        match outcome {
            RecordOutcome::NotFax => self.not_fax += 1,
            RecordOutcome::Routed { .. } => self.routed += 1,
            _ => self.skipped += 1,
        }
    }
}
