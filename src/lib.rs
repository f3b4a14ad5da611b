//! po-classifier - purchase-order category classification via a hosted LLM
//!
//! Maps a free-text purchase-order description (and optional supplier) to a
//! three-level L1/L2/L3 category from a fixed taxonomy. The model's reply is
//! parsed and validated so that callers only ever see a valid taxonomy path,
//! or a valid prefix padded with `"Not sure"`.
//!
//! # Example
//!
//! ```rust,no_run
//! use po_classifier::{Classifier, Settings};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> po_classifier::Result<()> {
//!     let classifier = Classifier::builder()
//!         .settings(Settings::from_env()?)
//!         .build()?;
//!
//!     let result = classifier
//!         .classify("Annual AWS EC2 reserved instances", Some("Amazon Web Services"))
//!         .await?;
//!
//!     println!("{} > {} > {}", result.l1, result.l2, result.l3);
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod providers;
pub mod taxonomy;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use classifier::{Classifier, ClassifierBuilder, INVALID_JSON_ERROR, PROMPT_VERSION};
pub use config::{ApiKey, CredentialChain, Settings};
pub use error::{ClassifierError, Result};
pub use providers::{CompletionProvider, GroqClient};
pub use taxonomy::{CategoryPath, NOT_SURE, Taxonomy, validate};
pub use types::{
    ClassificationRequest, ClassificationResult, CompletionOptions, Message, Role,
    SUPPLIER_NOT_PROVIDED,
};
pub use version::{PKG_VERSION, version_string};
