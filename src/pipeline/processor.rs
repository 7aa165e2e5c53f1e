//! Fax processor: filters email records, classifies their attachments and
//! files copies into category folders.
//!
//! Flow per record (first failing gate ends the record):
//! 1. Read the record as text
//! 2. Sender marker check (silent skip)
//! 3. Attachment reference extraction
//! 4. Attachment lookup in fax storage
//! 5. LLM classification
//! 6. Copy into the category folder + notification
//!
//! Per-record problems are logged and never abort the batch. Only failing to
//! create output folders or to list the input directory is fatal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::llm::provider::LlmProvider;
use crate::pipeline::classifier::FaxClassifier;
use crate::pipeline::notify::{ConsoleNotifier, Notifier};
use crate::pipeline::router::FaxRouter;
use crate::pipeline::rules::FaxRules;
use crate::pipeline::types::{BatchSummary, RecordOutcome};

pub struct FaxProcessor {
    emails_dir: PathBuf,
    faxes_dir: PathBuf,
    rules: FaxRules,
    classifier: FaxClassifier,
    router: FaxRouter,
    notifier: Arc<dyn Notifier>,
}

impl FaxProcessor {
    /// Build a processor that prints notifications to stdout.
    pub fn new(config: &RouterConfig, llm: Arc<dyn LlmProvider>) -> Self {
        Self::with_notifier(config, llm, Arc::new(ConsoleNotifier))
    }

    pub fn with_notifier(
        config: &RouterConfig,
        llm: Arc<dyn LlmProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            emails_dir: config.emails_dir.clone(),
            faxes_dir: config.faxes_dir.clone(),
            rules: FaxRules::new(config.sender_marker.clone()),
            classifier: FaxClassifier::new(llm),
            router: FaxRouter::new(config.output_dir.clone()),
            notifier,
        }
    }

    /// Run the whole batch once: create output folders, then process every
    /// file in the emails directory in listing order.
    pub async fn run(&self) -> Result<BatchSummary, RouterError> {
        self.router.create_output_dirs().await?;

        let input_err = |source: std::io::Error| RouterError::InputDir {
            path: self.emails_dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.emails_dir).await.map_err(input_err)?;
        let mut summary = BatchSummary::default();

        while let Some(entry) = entries.next_entry().await.map_err(input_err)? {
            let path = entry.path();
            let is_file = fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if !is_file {
                debug!(path = %path.display(), "Skipping non-file entry");
                continue;
            }

            let outcome = self.process_email(&path).await;
            debug!(path = %path.display(), outcome = outcome.label(), "Record done");
            summary.record(&outcome);
        }

        info!(
            scanned = summary.scanned,
            routed = summary.routed,
            skipped = summary.skipped,
            not_fax = summary.not_fax,
            "Batch processing complete"
        );
        Ok(summary)
    }

    /// Process a single email record through every gate.
    pub async fn process_email(&self, email_path: &Path) -> RecordOutcome {
        let content = match fs::read_to_string(email_path).await {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %email_path.display(), error = %e, "Could not read email");
                return RecordOutcome::Unreadable;
            }
        };

        let Some(email) = self.rules.evaluate(email_path, &content) else {
            return RecordOutcome::NotFax;
        };

        let Some(attachment) = email.attachment else {
            warn!("No attachment found in email: {}", email_path.display());
            return RecordOutcome::NoAttachment;
        };

        // An absolute attachment path replaces `faxes_dir` entirely.
        let fax_path = self.faxes_dir.join(&attachment);
        if !fs::try_exists(&fax_path).await.unwrap_or(false) {
            warn!("Fax file not found: {}", fax_path.display());
            return RecordOutcome::AttachmentMissing { path: fax_path };
        }

        let fax_content = match fs::read_to_string(&fax_path).await {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %fax_path.display(), error = %e, "Could not read fax");
                return RecordOutcome::Unreadable;
            }
        };

        let classification = self.classifier.classify(&fax_content).await;
        let Some(category) = classification.category() else {
            warn!(
                "Could not determine classification for fax: {}",
                fax_path.display()
            );
            return RecordOutcome::Unclassified { path: fax_path };
        };

        match self.router.route(category, &fax_path).await {
            Ok(dest) => {
                info!(
                    email = %email_path.display(),
                    category = %category,
                    "Fax routed"
                );
                self.notifier.fax_routed(category, &dest);
                RecordOutcome::Routed { category, dest }
            }
            Err(e) => {
                warn!(path = %fax_path.display(), error = %e, "Failed to copy fax");
                RecordOutcome::CopyFailed { path: fax_path }
            }
        }
    }
}
