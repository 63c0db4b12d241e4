//! Long-form blog generation.

use serde::Deserialize;
use tracing::info;

use crate::llm_client::{LlmClient, LlmError};
use crate::writing::prompts::{blog_prompt, BLOG_SAMPLING};

/// File name offered when the generated blog is downloaded.
pub const BLOG_DOWNLOAD_NAME: &str = "generated_blog.txt";

/// Everything the blog prompt is parameterized by. Missing fields default to
/// empty strings and are sent as such.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlogBrief {
    pub title: String,
    pub brand: String,
    pub audience: String,
    pub outline: String,
    pub important_keywords: String,
    pub normal_keywords: String,
}

pub async fn generate_blog(llm: &LlmClient, brief: &BlogBrief) -> Result<String, LlmError> {
    info!("Generating blog for '{}'", brief.title);
    let content = llm.complete(&blog_prompt(brief), BLOG_SAMPLING).await?;
    info!("Blog generated ({} words)", content.split_whitespace().count());
    Ok(content)
}
