//! Prompt templates for GraphRAG indexing.
//!
//! Two templates: triplet extraction (document -> entities/relationships JSON)
//! and community summary (relationships -> prose). Calling the model and
//! parsing its answer happen elsewhere.

pub mod community;
pub mod error;
pub mod store;
pub mod templates;

pub use community::{PromptPair, RelationshipLine, community_summary_prompt};
pub use error::{PromptError, Result};
pub use store::{
    BindingValue, Bindings, Template, render, scan_placeholders, triplet_extraction_prompt,
};
pub use templates::{COMMUNITY_SUMMARY_TMPL, KG_TRIPLET_EXTRACT_TMPL, MAX_KNOWLEDGE_TRIPLETS, TEXT};

use sha2::{Digest, Sha256};

/// Stable key for a rendered prompt (hex SHA-256), e.g. for response caches.
pub fn fingerprint(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    hex::encode(hasher.finalize())
}
