//! Purchase-order category taxonomy.
//!
//! The taxonomy is a fixed three-level tree: L1 → L2 → set of L3 names.
//! It is loaded once (from the compiled-in seed or an explicit JSON file)
//! and never mutated afterwards. Ordered collections keep every rendering
//! of the tree (prompt text, CLI output) byte-for-byte deterministic.

mod validation;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::{ClassifierError, Result};

pub use validation::{CategoryPath, Level, Validation, validate};

/// Fallback label used whenever a level cannot be validly determined.
pub const NOT_SURE: &str = "Not sure";

/// Raw JSON seed compiled into the binary.
const EMBEDDED_TAXONOMY: &str = include_str!("taxonomy.json");

/// Immutable three-level category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Taxonomy {
    tree: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl Taxonomy {
    /// The taxonomy shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(EMBEDDED_TAXONOMY)
    }

    /// Parse a taxonomy from JSON of the shape `{"L1": {"L2": ["L3", ...]}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let tree = serde_json::from_str(json)
            .map_err(|e| ClassifierError::Taxonomy(format!("failed to parse taxonomy: {e}")))?;
        Self::from_tree(tree)
    }

    /// Load a taxonomy JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ClassifierError::Taxonomy(format!("failed to read taxonomy file {path:?}: {e}"))
        })?;
        Self::from_json(&content)
    }

    /// Build from an in-memory tree, checking that every name is usable.
    pub fn from_tree(tree: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>) -> Result<Self> {
        if tree.is_empty() {
            return Err(ClassifierError::Taxonomy("taxonomy has no categories".into()));
        }
        for (l1, l2s) in &tree {
            check_name(l1)?;
            if l2s.is_empty() {
                return Err(ClassifierError::Taxonomy(format!(
                    "L1 category '{l1}' has no L2 categories"
                )));
            }
            for (l2, l3s) in l2s {
                check_name(l2)?;
                if l3s.is_empty() {
                    return Err(ClassifierError::Taxonomy(format!(
                        "L2 category '{l1} > {l2}' has no L3 categories"
                    )));
                }
                for l3 in l3s {
                    check_name(l3)?;
                }
            }
        }
        Ok(Self { tree })
    }

    /// Whether `l1` is a top-level category.
    pub fn contains_l1(&self, l1: &str) -> bool {
        self.tree.contains_key(l1)
    }

    /// L2 categories under `l1`, if it exists.
    pub fn l2(&self, l1: &str) -> Option<&BTreeMap<String, BTreeSet<String>>> {
        self.tree.get(l1)
    }

    /// L3 categories under `l1 > l2`, if the pair exists.
    pub fn l3(&self, l1: &str, l2: &str) -> Option<&BTreeSet<String>> {
        self.tree.get(l1).and_then(|l2s| l2s.get(l2))
    }

    /// Iterate over every full L1/L2/L3 path in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.tree.iter().flat_map(|(l1, l2s)| {
            l2s.iter().flat_map(move |(l2, l3s)| {
                l3s.iter()
                    .map(move |l3| (l1.as_str(), l2.as_str(), l3.as_str()))
            })
        })
    }

    /// Number of L1 categories.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Always false for a constructed taxonomy; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Pretty JSON rendering, stable across runs.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.tree)?)
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ClassifierError::Taxonomy("empty category name".into()));
    }
    if name == NOT_SURE {
        return Err(ClassifierError::Taxonomy(format!(
            "'{NOT_SURE}' is reserved and cannot be a category name"
        )));
    }
    Ok(())
}
