//! Orchestrator behaviour with scripted completion providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use po_classifier::{
    Classifier, ClassifierError, CompletionOptions, CompletionProvider, INVALID_JSON_ERROR,
    Message, NOT_SURE, PROMPT_VERSION, Result, Role, Taxonomy,
};

// ============================================================================
// Mock providers
// ============================================================================

/// Replies with fixed text and records every request.
struct ScriptedProvider {
    reply: String,
    calls: AtomicUsize,
    last_messages: Mutex<Vec<Message>>,
}

impl ScriptedProvider {
    fn new(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, messages: &[Message], _options: &CompletionOptions) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
        Ok(self.reply.clone())
    }
}

/// Fails every request with a fixed error.
struct FailingProvider {
    error: fn() -> ClassifierError,
    calls: AtomicUsize,
}

impl FailingProvider {
    fn new(error: fn() -> ClassifierError) -> Arc<Self> {
        Arc::new(Self {
            error,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CompletionProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _messages: &[Message], _options: &CompletionOptions) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.error)())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn classifier(provider: Arc<dyn CompletionProvider>) -> Classifier {
    Classifier::builder()
        .provider(provider)
        .taxonomy(Taxonomy::builtin().unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// Successful replies
// ============================================================================

#[tokio::test]
async fn valid_reply_passes_through() {
    let provider = ScriptedProvider::new(
        r#"{"L1": "Software", "L2": "Cloud Services", "L3": "IaaS", "confidence": "High"}"#,
    );
    let result = classifier(provider.clone())
        .classify("Reserved EC2 instances for 12 months", Some("AWS"))
        .await
        .unwrap();

    assert_eq!(result.l1, "Software");
    assert_eq!(result.l2, "Cloud Services");
    assert_eq!(result.l3, "IaaS");
    assert_eq!(result.confidence.as_deref(), Some("High"));
    assert_eq!(result.prompt_version, PROMPT_VERSION);
    assert_eq!(result.error, None);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn invalid_l3_is_downgraded() {
    let provider =
        ScriptedProvider::new(r#"{"L1": "Software", "L2": "Cloud Services", "L3": "Bogus"}"#);
    let result = classifier(provider)
        .classify("Cloud hosting", None)
        .await
        .unwrap();

    assert_eq!(result.l1, "Software");
    assert_eq!(result.l2, "Cloud Services");
    assert_eq!(result.l3, NOT_SURE);
    assert_eq!(result.error, None, "taxonomy violations are not errors");
}

#[tokio::test]
async fn invalid_l1_downgrades_all_levels() {
    let provider =
        ScriptedProvider::new(r#"{"L1": "Groceries", "L2": "Cloud Services", "L3": "IaaS"}"#);
    let result = classifier(provider)
        .classify("Bananas", None)
        .await
        .unwrap();

    assert!(result.is_unsure());
    assert_eq!(result.l2, NOT_SURE);
    assert_eq!(result.l3, NOT_SURE);
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn all_not_sure_reply_stays_not_sure() {
    let provider =
        ScriptedProvider::new(r#"{"L1": "Not sure", "L2": "Not sure", "L3": "Not sure"}"#);
    let result = classifier(provider)
        .classify("Misc charges", None)
        .await
        .unwrap();

    assert_eq!(
        (result.l1.as_str(), result.l2.as_str(), result.l3.as_str()),
        (NOT_SURE, NOT_SURE, NOT_SURE)
    );
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn missing_levels_become_not_sure() {
    let provider = ScriptedProvider::new(r#"{"L1": "Travel"}"#);
    let result = classifier(provider)
        .classify("Flight to Berlin", None)
        .await
        .unwrap();

    assert_eq!(result.l1, "Travel");
    assert_eq!(result.l2, NOT_SURE);
    assert_eq!(result.l3, NOT_SURE);
    assert_eq!(result.confidence, None);
}

#[tokio::test]
async fn description_is_preserved_verbatim() {
    let provider = ScriptedProvider::new(
        r#"{"L1": "Travel", "L2": "Airfare", "L3": "Domestic Flights", "po_description": "echoed"}"#,
    );
    let description = "  Flight LHR-EDI for onsite visit \n";
    let result = classifier(provider)
        .classify(description, None)
        .await
        .unwrap();

    assert_eq!(result.po_description, description);
}

// ============================================================================
// Degraded results
// ============================================================================

#[tokio::test]
async fn malformed_reply_falls_back() {
    let provider = ScriptedProvider::new("I think this is Software > Cloud Services.");
    let result = classifier(provider)
        .classify("Azure credits", None)
        .await
        .unwrap();

    assert!(result.is_unsure());
    assert_eq!(result.l3, NOT_SURE);
    assert_eq!(result.error.as_deref(), Some(INVALID_JSON_ERROR));
    assert_eq!(result.po_description, "Azure credits");
    assert_eq!(result.prompt_version, PROMPT_VERSION);
}

#[tokio::test]
async fn timeout_falls_back() {
    let provider = FailingProvider::new(|| ClassifierError::Timeout(Duration::from_secs(20)));
    let result = classifier(provider.clone())
        .classify("Office chairs x40", Some("Herman Miller"))
        .await
        .unwrap();

    assert!(result.is_unsure());
    assert_eq!(result.l2, NOT_SURE);
    assert_eq!(result.l3, NOT_SURE);
    assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert_eq!(result.po_description, "Office chairs x40");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1, "no retries");
}

#[tokio::test]
async fn authentication_failure_falls_back() {
    let provider = FailingProvider::new(|| ClassifierError::AuthenticationFailed);
    let result = classifier(provider)
        .classify("Legal review of MSA", None)
        .await
        .unwrap();

    assert!(result.is_degraded());
    assert_eq!(result.error.as_deref(), Some("authentication failed"));
}

#[tokio::test]
async fn non_transport_provider_error_is_returned() {
    let provider = FailingProvider::new(|| ClassifierError::Configuration("bad".into()));
    let err = classifier(provider)
        .classify("Printer paper", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClassifierError::Configuration(_)));
}

// ============================================================================
// Input checks and prompts
// ============================================================================

#[tokio::test]
async fn blank_description_is_rejected_before_any_call() {
    let provider = ScriptedProvider::new("{}");
    let classifier = classifier(provider.clone());

    for description in ["", "   ", "\n\t"] {
        let err = classifier.classify(description, Some("Acme")).await.unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidInput(_)));
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn sends_system_and_user_messages() {
    let provider =
        ScriptedProvider::new(r#"{"L1": "Hardware", "L2": "Computers", "L3": "Laptops"}"#);
    let classifier = classifier(provider.clone());
    classifier.classify("20 laptops", None).await.unwrap();

    let messages = provider.last_messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[0].content, classifier.system_prompt());
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(
        messages[1].content,
        "PO Description: 20 laptops\nSupplier: Not provided"
    );
}

#[tokio::test]
async fn classify_json_uses_wire_field_names() {
    let provider = ScriptedProvider::new(
        r#"{"L1": "Software", "L2": "Licenses", "L3": "License Renewals", "confidence": 0.9}"#,
    );
    let json = classifier(provider)
        .classify_json("Renewal of JetBrains licenses", Some("JetBrains"))
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["po_description"], "Renewal of JetBrains licenses");
    assert_eq!(value["L1"], "Software");
    assert_eq!(value["L2"], "Licenses");
    assert_eq!(value["L3"], "License Renewals");
    assert_eq!(value["confidence"], "0.9");
    assert_eq!(value["prompt_version"], PROMPT_VERSION);
    assert!(value.get("error").is_none());
}
