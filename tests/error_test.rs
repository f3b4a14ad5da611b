use std::time::Duration;

use po_classifier::{ClassifierError, Result};

#[test]
fn test_error_display() {
    let err = ClassifierError::ModelNotFound("llama-9".to_string());
    assert!(err.to_string().contains("llama-9"));

    let err = ClassifierError::Timeout(Duration::from_secs(20));
    assert!(err.to_string().contains("timed out"));
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(ClassifierError::MissingCredential("GROQ_API_KEY"))
    }
    assert!(returns_error().is_err());
}

#[test]
fn json_errors_convert() {
    let err: ClassifierError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, ClassifierError::Json(_)));
}

// ============================================================================
// Transport error classification
// ============================================================================

#[test]
fn transport_errors() {
    assert!(ClassifierError::Http("connection reset".into()).is_transport());
    assert!(ClassifierError::Timeout(Duration::from_secs(1)).is_transport());
    assert!(
        ClassifierError::Api {
            status: 500,
            message: "internal".into()
        }
        .is_transport()
    );
    assert!(ClassifierError::RateLimited { retry_after: None }.is_transport());
    assert!(ClassifierError::AuthenticationFailed.is_transport());
    assert!(ClassifierError::ModelNotFound("m".into()).is_transport());
    assert!(ClassifierError::EmptyResponse.is_transport());
}

#[test]
fn non_transport_errors() {
    assert!(!ClassifierError::InvalidInput("empty".into()).is_transport());
    assert!(!ClassifierError::Configuration("bad".into()).is_transport());
    assert!(!ClassifierError::MissingCredential("GROQ_API_KEY").is_transport());
    assert!(!ClassifierError::Taxonomy("bad".into()).is_transport());
}
