// All LLM prompt templates for the writing tools.
// Fields are substituted verbatim: nothing is validated or escaped, and empty
// fields stay empty in the final prompt.

use crate::llm_client::Generation;
use crate::writing::blog::BlogBrief;

pub const OUTLINE_SAMPLING: Generation = Generation::with_temperature(0.7);
pub const META_SAMPLING: Generation = Generation::with_temperature(0.7);
pub const REVISION_SAMPLING: Generation = Generation::with_temperature(0.3);
pub const BLOG_SAMPLING: Generation = Generation::with_temperature(0.7).max_tokens(4000);

/// Outline prompt. Replace: {title}, {keywords}
pub const OUTLINE_PROMPT_TEMPLATE: &str = r#"You are an expert blog strategist trained in Generative Engine Optimization (GEO) and AI-assisted content planning.
Generate a structured blog outline with H2 and H3 headings based on:

Blog Title:
{title}

Target Keywords:
{keywords}

Follow these rules:
- Logical intro → H2 sections → conclusion
- 4–6 H2s, each with 2–3 H3s
- Use facts, stats, brand mentions, E-E-A-T signals
- Add a 'People Also Ask' section with FAQs"#;

/// Meta description prompt. Replace: {title}
pub const META_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"You're an SEO expert. Write 3 meta descriptions (120–155 characters) for the blog titled:
"{title}"

Requirements:
• Clear and compelling
• Use relevant keywords naturally
• Highlight value/benefit
• Use action verbs to encourage clicks"#;

/// Outline revision prompt. Replace: {outline}, {instruction}
pub const OUTLINE_REVISION_PROMPT_TEMPLATE: &str = r#"Here is the current blog outline:

{outline}

Instruction:
{instruction}

Update the outline accordingly while keeping the structure intact."#;

/// Long-form blog prompt.
/// Replace: {title}, {brand}, {audience}, {outline}, {important_keywords}, {normal_keywords}
pub const BLOG_PROMPT_TEMPLATE: &str = r#"You are an expert content writing assistant trained in Generative Engine Optimization (GEO) best practices.
Your goal is to create compelling and high-performing content for AI-powered search engines and generative AI tools.
Please use the following input to create a well-structured, authoritative, and engaging blog post.
Ensure that the content is valuable for both humans and AI tools, and follows all GEO Writing Rules as outlined.

Input Data:
Blog Title: “{title}”
Company/Brand Name: “{brand}”
Target Audience: “{audience}”
Blog Outline: {outline}
Important Keywords: {important_keywords}
Normal Keywords (must all be included at least once): {normal_keywords}

GEO Writing Rules:
- Authority & Credibility: Naturally mention the provided company/brand name in the body text and metadata.
  Use authoritative sources when mentioning statistics or facts.
  Include examples and case studies to demonstrate expertise.
  Reference current industry trends and developments where relevant.

- Structure & Readability:
  Follow the para-point-para format throughout the entire blog.
  Use H2 and H3 headings exactly as outlined, with each heading having 5+ words.
  Ensure the blog content is between 1500 to 1600 words (strictly enforced).
  Keep paragraphs short (2–4 lines, 120–175 words).
  Ensure each H3 section is within 150–160 words.
  Write in active voice.
  Include some question-style headings when natural.

- Local & Contextual Relevance:
  Mention physical locations, local services, or regional considerations if applicable.
  Reference current industry trends and developments.
  Use location-aware language where relevant.

- Keyword Integration:
  Important keywords must repeat 5–6 times across the blog.
  Every normal keyword MUST appear at least once in the blog.
  Use keywords contextually and naturally.
  Include related terms and synonyms naturally.

- Beginner-Friendly Approach:
  Use a conversational tone.
  Provide practical examples and real-world scenarios.
  Break down complex ideas into digestible parts.
  Follow the para-point-para format throughout the blog:
    * Start with a paragraph introducing a concept or idea.
    * Follow with a bullet-point list that elaborates or provides additional details.
    * Conclude with a paragraph summarizing the points or providing a closing thought.

Output Requirements:
- Follow the provided outline structure exactly without altering formatting.
- Keep the total word count between 1500 to 1600 words.
- Naturally incorporate all important and normal keywords.
- Add authoritative signals throughout the content.
- Keep the language accessible while maintaining expertise."#;

/// Fills `{name}` placeholders in one pass, so substituted text is never
/// rescanned for further placeholders.
fn render(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let field = after.find('}').and_then(|close| {
            let name = &after[..close];
            fields
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match field {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn outline_prompt(title: &str, keywords: &str) -> String {
    render(
        OUTLINE_PROMPT_TEMPLATE,
        &[("title", title), ("keywords", keywords)],
    )
}

pub fn meta_description_prompt(title: &str) -> String {
    render(META_DESCRIPTION_PROMPT_TEMPLATE, &[("title", title)])
}

pub fn outline_revision_prompt(outline: &str, instruction: &str) -> String {
    render(
        OUTLINE_REVISION_PROMPT_TEMPLATE,
        &[("outline", outline), ("instruction", instruction)],
    )
}

pub fn blog_prompt(brief: &BlogBrief) -> String {
    render(
        BLOG_PROMPT_TEMPLATE,
        &[
            ("title", brief.title.as_str()),
            ("brand", brief.brand.as_str()),
            ("audience", brief.audience.as_str()),
            ("outline", brief.outline.as_str()),
            ("important_keywords", brief.important_keywords.as_str()),
            ("normal_keywords", brief.normal_keywords.as_str()),
        ],
    )
}
