//! API credential resolution.
//!
//! Credentials come from a ranked list of providers, each a plain lookup:
//! 1. Environment variable (`GROQ_API_KEY`)
//! 2. Secrets file, a TOML document with a top-level `GROQ_API_KEY = "..."`
//!    (user `~/.po-classifier/secrets.toml`, then system
//!    `/etc/po-classifier/secrets.toml`; must be 0600 or 0400)
//!
//! The first provider that yields a non-empty key wins.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::API_KEY_VAR;
use crate::{ClassifierError, Result};

/// An API key. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// A single credential source.
pub trait CredentialProvider: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    /// Look up `key`. `Ok(None)` means this source does not have it;
    /// errors are reserved for a source that exists but is unusable.
    fn lookup(&self, key: &str) -> Result<Option<String>>;
}

/// Reads credentials from process environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentialProvider;

impl CredentialProvider for EnvCredentialProvider {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self, key: &str) -> Result<Option<String>> {
        Ok(std::env::var(key).ok())
    }
}

/// Reads credentials from the first existing TOML secrets file.
#[derive(Debug, Clone)]
pub struct SecretsFileProvider {
    paths: Vec<PathBuf>,
}

impl SecretsFileProvider {
    /// Search the standard user and system locations.
    pub fn standard() -> Self {
        let mut paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".po-classifier").join("secrets.toml"));
        }
        paths.push(PathBuf::from("/etc/po-classifier/secrets.toml"));
        Self { paths }
    }

    /// Use exactly one file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
        }
    }

    fn load(path: &Path) -> Result<HashMap<String, toml::Value>> {
        check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            ClassifierError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            ClassifierError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }
}

impl CredentialProvider for SecretsFileProvider {
    fn name(&self) -> &str {
        "secrets-file"
    }

    fn lookup(&self, key: &str) -> Result<Option<String>> {
        let Some(path) = self.paths.iter().find(|p| p.exists()) else {
            return Ok(None);
        };
        let secrets = Self::load(path)?;
        Ok(secrets
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }
}

/// Check that the secrets file has secure permissions (0600 or 0400).
#[cfg(unix)]
fn check_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|e| {
        ClassifierError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
    })?;

    let mode = metadata.permissions().mode();
    // Reject if group or other bits are set
    if mode & 0o077 != 0 {
        return Err(ClassifierError::Configuration(format!(
            "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
            mode & 0o777
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn check_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// Ranked credential providers, tried in order.
pub struct CredentialChain {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl Default for CredentialChain {
    /// Environment first, then the standard secrets files.
    fn default() -> Self {
        Self::new()
            .with(EnvCredentialProvider)
            .with(SecretsFileProvider::standard())
    }
}

impl CredentialChain {
    /// An empty chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Append a provider at the lowest priority.
    pub fn with(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Provider names in priority order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolve `GROQ_API_KEY`.
    pub fn api_key(&self) -> Result<ApiKey> {
        self.resolve(API_KEY_VAR)
    }

    /// Resolve `key` from the first provider that has a non-empty value.
    pub fn resolve(&self, key: &'static str) -> Result<ApiKey> {
        for provider in &self.providers {
            if let Some(value) = provider.lookup(key)?.filter(|v| !v.trim().is_empty()) {
                debug!(source = provider.name(), key, "credential resolved");
                return Ok(ApiKey::new(value.trim()));
            }
        }
        Err(ClassifierError::MissingCredential(key))
    }
}

impl fmt::Debug for CredentialChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialChain")
            .field("providers", &self.provider_names())
            .finish()
    }
}
