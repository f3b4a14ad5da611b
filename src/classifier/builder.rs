//! Builder for configuring classifier instances

use std::sync::Arc;

use super::Classifier;
use crate::Result;
use crate::config::{CredentialChain, Settings};
use crate::providers::{CompletionProvider, GroqClient};
use crate::taxonomy::Taxonomy;
use crate::types::CompletionOptions;

/// Builder for [`Classifier`].
///
/// Without an explicit provider, `build` constructs a [`GroqClient`] from the
/// settings and the first credential the chain resolves. A missing
/// credential is reported here, before any classification is attempted.
#[derive(Default)]
pub struct ClassifierBuilder {
    settings: Option<Settings>,
    credentials: Option<CredentialChain>,
    taxonomy: Option<Taxonomy>,
    provider: Option<Arc<dyn CompletionProvider>>,
    base_url: Option<String>,
}

impl ClassifierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completion settings (default: [`Settings::default`]).
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Credential sources (default: environment, then secrets files).
    pub fn credentials(mut self, credentials: CredentialChain) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Category tree (default: [`Taxonomy::builtin`]).
    pub fn taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    /// Use a ready-made provider instead of building a Groq client.
    pub fn provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Override the Groq API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<Classifier> {
        let settings = self.settings.unwrap_or_default();
        let taxonomy = match self.taxonomy {
            Some(taxonomy) => taxonomy,
            None => Taxonomy::builtin()?,
        };

        let provider = match self.provider {
            Some(provider) => provider,
            None => {
                let api_key = self.credentials.unwrap_or_default().api_key()?;
                let client = match self.base_url {
                    Some(url) => GroqClient::with_base_url(api_key, url, settings.timeout)?,
                    None => GroqClient::new(api_key, settings.timeout)?,
                };
                Arc::new(client) as Arc<dyn CompletionProvider>
            }
        };

        Classifier::new(provider, taxonomy, CompletionOptions::from(&settings))
    }
}
