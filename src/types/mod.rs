//! Public types for the classifier API.

mod classification;
mod message;
mod options;

pub use classification::{ClassificationRequest, ClassificationResult, SUPPLIER_NOT_PROVIDED};
pub use message::{Message, Role};
pub use options::CompletionOptions;
