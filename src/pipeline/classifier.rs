//! LLM-backed fax classifier.
//!
//! Never fails: transport and response errors are logged and become
//! `Classification::Uncertain`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm::provider::{ChatMessage, CompletionRequest, LlmProvider};
use crate::pipeline::types::Classification;

/// Zero temperature for repeatable labels.
const CLASSIFY_TEMPERATURE: f32 = 0.0;

pub struct FaxClassifier {
    llm: Arc<dyn LlmProvider>,
}

impl FaxClassifier {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Classify fax content into a category or `Uncertain`.
    pub async fn classify(&self, fax_content: &str) -> Classification {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(build_system_prompt()),
            ChatMessage::user(build_user_prompt(fax_content)),
        ])
        .with_temperature(CLASSIFY_TEMPERATURE);

        match self.llm.complete(request).await {
            Ok(response) => {
                let reply = response.content.trim();
                let classification = Classification::from_reply(reply);
                debug!(
                    model = self.llm.model_name(),
                    reply = %reply,
                    classification = %classification,
                    "Classifier replied"
                );
                classification
            }
            Err(e) => {
                warn!(error = %e, "Error during classification");
                Classification::Uncertain
            }
        }
    }
}

// ── Prompt construction ─────────────────────────────────────────────

fn build_system_prompt() -> String {
    "You are an AI assistant that classifies faxes into specific categories. \
     Only respond with one of the following classifications: \
     'Patient Referral', 'Prior Authorization Response', or 'Patient Records'. \
     If the category is unclear, respond with 'Uncertain'. Do not provide explanations."
        .to_string()
}

fn build_user_prompt(fax_content: &str) -> String {
    format!("Fax Content:\n{fax_content}:")
}
