//! Completion service providers.

pub mod groq;
pub mod traits;

pub use groq::GroqClient;
pub use traits::CompletionProvider;
