//! Taxonomy validation of proposed L1/L2/L3 triples.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{NOT_SURE, Taxonomy};

/// A category triple that is either a valid taxonomy path or a valid
/// prefix padded with [`NOT_SURE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPath {
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
    #[serde(rename = "L3")]
    pub l3: String,
}

impl CategoryPath {
    /// The all-unsure path.
    pub fn not_sure() -> Self {
        Self {
            l1: NOT_SURE.to_string(),
            l2: NOT_SURE.to_string(),
            l3: NOT_SURE.to_string(),
        }
    }

    /// Whether every level was determined.
    pub fn is_complete(&self) -> bool {
        self.l3 != NOT_SURE
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {} > {}", self.l1, self.l2, self.l3)
    }
}

/// Taxonomy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    L1,
    L2,
    L3,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::L1 => "L1",
            Level::L2 => "L2",
            Level::L3 => "L3",
        }
    }
}

/// Outcome of validating a triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub path: CategoryPath,
    /// First level that was not a taxonomy member, if any.
    pub downgraded_from: Option<Level>,
}

/// Check a proposed triple against the taxonomy.
///
/// The first level that is not a member is replaced by [`NOT_SURE`], along
/// with every deeper level. Shallower levels are kept as given. Matching is
/// exact and case-sensitive.
pub fn validate(l1: &str, l2: &str, l3: &str, taxonomy: &Taxonomy) -> CategoryPath {
    taxonomy.validate(l1, l2, l3).path
}

impl Taxonomy {
    /// Validate a triple and report where it was downgraded.
    pub fn validate(&self, l1: &str, l2: &str, l3: &str) -> Validation {
        let Some(l2s) = self.l2(l1) else {
            return Validation {
                path: CategoryPath::not_sure(),
                downgraded_from: Some(Level::L1),
            };
        };
        let Some(l3s) = l2s.get(l2) else {
            return Validation {
                path: CategoryPath {
                    l1: l1.to_string(),
                    l2: NOT_SURE.to_string(),
                    l3: NOT_SURE.to_string(),
                },
                downgraded_from: Some(Level::L2),
            };
        };
        let (l3, downgraded_from) = if l3s.contains(l3) {
            (l3.to_string(), None)
        } else {
            (NOT_SURE.to_string(), Some(Level::L3))
        };
        Validation {
            path: CategoryPath {
                l1: l1.to_string(),
                l2: l2.to_string(),
                l3,
            },
            downgraded_from,
        }
    }
}
