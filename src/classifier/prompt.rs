//! Prompt construction.
//!
//! The system prompt is a pure function of the taxonomy, so the same
//! taxonomy always produces byte-identical instructions.

use crate::Result;
use crate::taxonomy::{NOT_SURE, Taxonomy};

/// Identifies the instruction template that produced a result.
pub const PROMPT_VERSION: &str = "po-l1l2l3-v1";

/// Build the system instruction, embedding the full taxonomy.
pub fn build_system_prompt(taxonomy: &Taxonomy) -> Result<String> {
    let tree = taxonomy.to_pretty_json()?;
    Ok(format!(
        "You are a procurement analyst. Classify each purchase order (PO) into a \
fixed three-level category taxonomy.

Rules:
- Pick L1, L2 and L3 only from the taxonomy below, spelled exactly as written.
- L2 must be listed under the chosen L1, and L3 must be listed under the chosen L2.
- If a level cannot be determined with reasonable confidence, use \"{NOT_SURE}\" for that level and every level below it.
- Set \"confidence\" to \"High\", \"Medium\" or \"Low\".
- Reply with a single JSON object and nothing else, in this shape:
{{\"L1\": \"...\", \"L2\": \"...\", \"L3\": \"...\", \"confidence\": \"...\"}}

Taxonomy (L1 -> L2 -> [L3]):
{tree}"
    ))
}

/// Build the user message for one purchase order.
pub fn build_user_prompt(description: &str, supplier: &str) -> String {
    format!("PO Description: {description}\nSupplier: {supplier}")
}
