// Writing tools: outline + meta descriptions, outline revision, long-form blog.
// All LLM calls go through llm_client — no direct OpenAI calls here.

pub mod blog;
pub mod handlers;
pub mod outline;
pub mod prompts;
