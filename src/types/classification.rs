//! Classification request and result types

use serde::{Deserialize, Serialize};

use crate::taxonomy::{CategoryPath, NOT_SURE};

/// Supplier placeholder used when the caller gives none.
pub const SUPPLIER_NOT_PROVIDED: &str = "Not provided";

/// A purchase order to classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub description: String,
    pub supplier: Option<String>,
}

impl ClassificationRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            supplier: None,
        }
    }

    pub fn supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// Supplier text for the prompt; blank counts as absent.
    pub fn supplier_or_default(&self) -> &str {
        self.supplier
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(SUPPLIER_NOT_PROVIDED)
    }
}

/// Normalized classification of one purchase order.
///
/// `L1`/`L2`/`L3` always form a valid taxonomy path, or a valid prefix
/// padded with "Not sure". A present `error` marks a degraded result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub po_description: String,
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
    #[serde(rename = "L3")]
    pub l3: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    pub prompt_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassificationResult {
    pub(crate) fn new(
        po_description: impl Into<String>,
        path: CategoryPath,
        confidence: Option<String>,
        prompt_version: impl Into<String>,
    ) -> Self {
        Self {
            po_description: po_description.into(),
            l1: path.l1,
            l2: path.l2,
            l3: path.l3,
            confidence,
            prompt_version: prompt_version.into(),
            error: None,
        }
    }

    /// All-unsure result carrying an error description.
    pub(crate) fn fallback(
        po_description: impl Into<String>,
        prompt_version: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(
                po_description,
                CategoryPath::not_sure(),
                None,
                prompt_version,
            )
        }
    }

    /// The classified path.
    pub fn path(&self) -> CategoryPath {
        CategoryPath {
            l1: self.l1.clone(),
            l2: self.l2.clone(),
            l3: self.l3.clone(),
        }
    }

    /// Whether the result is degraded (service or parse failure).
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// Whether no level could be determined.
    pub fn is_unsure(&self) -> bool {
        self.l1 == NOT_SURE
    }

    /// Compact JSON text, the cross-boundary form of a result.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
