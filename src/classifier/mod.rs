//! Classification orchestrator.
//!
//! One classification is one completion request:
//!
//! ```text
//! description, supplier
//!        │  reject blank description (no I/O)
//!        ▼
//!  system prompt (taxonomy) + user prompt
//!        │  CompletionProvider::complete, single attempt
//!        ▼
//!  reply text ──► parse JSON object ──► validate against taxonomy
//!        │                 │
//!        │ provider error  │ not a JSON object
//!        ▼                 ▼
//!    fallback result: L1 = L2 = L3 = "Not sure", error set
//! ```
//!
//! Provider failures never surface as `Err`; the caller always gets a
//! [`ClassificationResult`] and checks its `error` field.

mod builder;
pub mod prompt;
mod reply;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::providers::CompletionProvider;
use crate::taxonomy::{Level, NOT_SURE, Taxonomy};
use crate::telemetry;
use crate::types::{ClassificationRequest, ClassificationResult, CompletionOptions, Message};
use crate::{ClassifierError, Result};

pub use builder::ClassifierBuilder;
pub use prompt::PROMPT_VERSION;

/// Error text attached when the model reply is not a JSON object.
pub const INVALID_JSON_ERROR: &str = "Invalid JSON from model";

/// Classifies purchase orders against a fixed taxonomy.
pub struct Classifier {
    provider: Arc<dyn CompletionProvider>,
    taxonomy: Taxonomy,
    options: CompletionOptions,
    system_prompt: String,
}

impl Classifier {
    /// Create a new builder.
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::new()
    }

    /// Create a classifier around an already-constructed provider.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        taxonomy: Taxonomy,
        options: CompletionOptions,
    ) -> Result<Self> {
        let system_prompt = prompt::build_system_prompt(&taxonomy)?;
        Ok(Self {
            provider,
            taxonomy,
            options,
            system_prompt,
        })
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Classify a description with an optional supplier.
    pub async fn classify(
        &self,
        description: &str,
        supplier: Option<&str>,
    ) -> Result<ClassificationResult> {
        let mut request = ClassificationRequest::new(description);
        request.supplier = supplier.map(str::to_string);
        self.classify_request(&request).await
    }

    /// Classify and serialize the result as JSON text.
    pub async fn classify_json(&self, description: &str, supplier: Option<&str>) -> Result<String> {
        self.classify(description, supplier).await?.to_json()
    }

    /// Classify a request.
    ///
    /// Returns `Err` only for a blank description (checked before any
    /// request is made) or a non-transport provider failure.
    #[instrument(skip_all, fields(provider = self.provider.name(), model = %self.options.model))]
    pub async fn classify_request(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResult> {
        let description = request.description.trim();
        if description.is_empty() {
            return Err(ClassifierError::InvalidInput(
                "PO description must not be empty".to_string(),
            ));
        }

        let messages = [
            Message::system(self.system_prompt.as_str()),
            Message::user(prompt::build_user_prompt(
                description,
                request.supplier_or_default(),
            )),
        ];

        let start = Instant::now();
        let outcome = self.provider.complete(&messages, &self.options).await;
        telemetry::record_request(self.provider.name(), start);

        let result = match outcome {
            Ok(raw) => self.normalize(&request.description, &raw),
            Err(e) if e.is_transport() => {
                warn!(error = %e, "completion request failed");
                ClassificationResult::fallback(&request.description, PROMPT_VERSION, e.to_string())
            }
            Err(e) => return Err(e),
        };

        telemetry::record_classification(result.is_degraded());
        Ok(result)
    }

    /// Turn raw reply text into a taxonomy-safe result.
    fn normalize(&self, description: &str, raw: &str) -> ClassificationResult {
        let Some(reply) = reply::parse_reply(raw) else {
            warn!(raw, "model returned invalid JSON");
            return ClassificationResult::fallback(description, PROMPT_VERSION, INVALID_JSON_ERROR);
        };

        let proposed = [
            reply.l1.as_deref().unwrap_or(NOT_SURE),
            reply.l2.as_deref().unwrap_or(NOT_SURE),
            reply.l3.as_deref().unwrap_or(NOT_SURE),
        ];
        let validation = self
            .taxonomy
            .validate(proposed[0], proposed[1], proposed[2]);

        if let Some(level) = validation.downgraded_from {
            let label = match level {
                Level::L1 => proposed[0],
                Level::L2 => proposed[1],
                Level::L3 => proposed[2],
            };
            // An explicit "Not sure" from the model is an answer, not a violation
            if label != NOT_SURE {
                debug!(level = level.as_str(), label, "category outside taxonomy");
                telemetry::record_downgrade(level);
            }
        }

        ClassificationResult::new(description, validation.path, reply.confidence, PROMPT_VERSION)
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("provider", &self.provider.name())
            .field("options", &self.options)
            .field("categories", &self.taxonomy.len())
            .finish()
    }
}
