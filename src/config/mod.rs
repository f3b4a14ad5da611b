//! Process-wide settings.
//!
//! Settings are resolved once from environment variables, falling back to
//! defaults when a variable is unset or empty:
//!
//! | Variable           | Default                  |
//! |--------------------|--------------------------|
//! | `GROQ_MODEL`       | `llama-3.1-8b-instant`   |
//! | `GROQ_TEMPERATURE` | `0.0`                    |
//! | `GROQ_MAX_TOKENS`  | `512`                    |
//! | `GROQ_TIMEOUT_S`   | `20` (seconds)           |
//!
//! The API key is not part of [`Settings`]; it is resolved separately through
//! a [`CredentialChain`].

pub mod credentials;

use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::{ClassifierError, Result};

pub use credentials::{
    ApiKey, CredentialChain, CredentialProvider, EnvCredentialProvider, SecretsFileProvider,
};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

const MODEL_VAR: &str = "GROQ_MODEL";
const TEMPERATURE_VAR: &str = "GROQ_TEMPERATURE";
const MAX_TOKENS_VAR: &str = "GROQ_MAX_TOKENS";
const TIMEOUT_VAR: &str = "GROQ_TIMEOUT_S";

const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_TEMPERATURE: f32 = 0.0;
const DEFAULT_MAX_TOKENS: u32 = 512;
const DEFAULT_TIMEOUT_SECS: f64 = 20.0;

/// Completion service settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(rename = "timeout_s", serialize_with = "serialize_secs")]
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let model = get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let temperature = parse_var(TEMPERATURE_VAR, get(TEMPERATURE_VAR), DEFAULT_TEMPERATURE)?;
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(ClassifierError::Configuration(format!(
                "{TEMPERATURE_VAR} must be a non-negative number, got {temperature}"
            )));
        }
        let max_tokens = parse_var(MAX_TOKENS_VAR, get(MAX_TOKENS_VAR), DEFAULT_MAX_TOKENS)?;
        if max_tokens == 0 {
            return Err(ClassifierError::Configuration(format!(
                "{MAX_TOKENS_VAR} must be greater than zero"
            )));
        }
        let timeout_secs = parse_var(TIMEOUT_VAR, get(TIMEOUT_VAR), DEFAULT_TIMEOUT_SECS)?;
        let timeout = Duration::try_from_secs_f64(timeout_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                ClassifierError::Configuration(format!(
                    "{TIMEOUT_VAR} must be a positive number of seconds, got {timeout_secs}"
                ))
            })?;

        Ok(Self {
            model,
            temperature,
            max_tokens,
            timeout,
        })
    }
}

fn parse_var<T>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| {
            ClassifierError::Configuration(format!("invalid value {raw:?} for {name}: {e}"))
        }),
    }
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.model, "llama-3.1-8b-instant");
        assert_eq!(settings.temperature, 0.0);
        assert_eq!(settings.max_tokens, 512);
        assert_eq!(settings.timeout, Duration::from_secs(20));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let settings = Settings::from_lookup(lookup(&[
            ("GROQ_MODEL", ""),
            ("GROQ_TEMPERATURE", ""),
            ("GROQ_MAX_TOKENS", ""),
            ("GROQ_TIMEOUT_S", ""),
        ]))
        .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn overrides_from_environment() {
        let settings = Settings::from_lookup(lookup(&[
            ("GROQ_MODEL", "llama-3.3-70b-versatile"),
            ("GROQ_TEMPERATURE", "0.2"),
            ("GROQ_MAX_TOKENS", "256"),
            ("GROQ_TIMEOUT_S", "7.5"),
        ]))
        .unwrap();
        assert_eq!(settings.model, "llama-3.3-70b-versatile");
        assert!((settings.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(settings.max_tokens, 256);
        assert_eq!(settings.timeout, Duration::from_millis(7500));
    }

    #[test]
    fn unparseable_values_are_configuration_errors() {
        let err = Settings::from_lookup(lookup(&[("GROQ_MAX_TOKENS", "lots")])).unwrap_err();
        assert!(matches!(err, ClassifierError::Configuration(_)));
        assert!(err.to_string().contains("GROQ_MAX_TOKENS"));

        let err = Settings::from_lookup(lookup(&[("GROQ_TEMPERATURE", "warm")])).unwrap_err();
        assert!(err.to_string().contains("GROQ_TEMPERATURE"));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Settings::from_lookup(lookup(&[("GROQ_TIMEOUT_S", "0")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("GROQ_TIMEOUT_S", "-3")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("GROQ_TEMPERATURE", "-1")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("GROQ_MAX_TOKENS", "0")])).is_err());
    }

    #[test]
    fn serializes_timeout_as_seconds() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(value["timeout_s"], 20.0);
        assert_eq!(value["model"], "llama-3.1-8b-instant");
    }
}
