//! Provider trait for chat-completion backends.
//!
//! The classifier talks to the completion service only through
//! [`CompletionProvider`], so the HTTP client is constructed once by the
//! caller and injected. Tests substitute scripted providers.
//!
//! # Example
//!
//! ```ignore
//! struct Canned;
//!
//! #[async_trait]
//! impl CompletionProvider for Canned {
//!     fn name(&self) -> &str { "canned" }
//!
//!     async fn complete(&self, _: &[Message], _: &CompletionOptions) -> Result<String> {
//!         Ok(r#"{"L1":"Software","L2":"Cloud Services","L3":"IaaS"}"#.into())
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::Result;
use crate::types::{CompletionOptions, Message};

/// Provider for single-shot chat completions.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Send `messages` and return the assistant's reply text.
    ///
    /// Exactly one request is made; implementations must not retry.
    async fn complete(&self, messages: &[Message], options: &CompletionOptions) -> Result<String>;
}
