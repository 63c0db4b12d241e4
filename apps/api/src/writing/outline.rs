//! Outline tool — outline + meta descriptions, then iterative revision.

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::writing::prompts::{
    meta_description_prompt, outline_prompt, outline_revision_prompt, META_SAMPLING,
    OUTLINE_SAMPLING, REVISION_SAMPLING,
};

/// Outline plus the meta descriptions written for the same title.
///
/// The two come from separate calls; a failed meta call still returns the
/// outline, with the failure in `meta_error`.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineDraft {
    pub outline: String,
    pub meta_descriptions: Option<String>,
    pub meta_error: Option<String>,
}

impl OutlineDraft {
    pub fn new(outline: String, meta: Result<String, LlmError>) -> Self {
        match meta {
            Ok(meta_descriptions) => Self {
                outline,
                meta_descriptions: Some(meta_descriptions),
                meta_error: None,
            },
            Err(e) => {
                warn!("Meta description call failed: {e}");
                Self {
                    outline,
                    meta_descriptions: None,
                    meta_error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Generates an H2/H3 outline for `title` around the target keywords.
pub async fn draft_outline(
    llm: &LlmClient,
    title: &str,
    keywords: &str,
) -> Result<String, LlmError> {
    info!("Generating outline for '{title}'");
    llm.complete(&outline_prompt(title, keywords), OUTLINE_SAMPLING)
        .await
}

/// Three meta descriptions for `title`.
pub async fn write_meta_descriptions(llm: &LlmClient, title: &str) -> Result<String, LlmError> {
    llm.complete(&meta_description_prompt(title), META_SAMPLING)
        .await
}

/// Rewrites `current_outline` according to a free-text instruction.
pub async fn revise_outline(
    llm: &LlmClient,
    current_outline: &str,
    instruction: &str,
) -> Result<String, LlmError> {
    info!("Revising outline ({} chars)", current_outline.len());
    llm.complete(
        &outline_revision_prompt(current_outline, instruction),
        REVISION_SAMPLING,
    )
    .await
}
