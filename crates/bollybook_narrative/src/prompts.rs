//! Prompt composition.
//!
//! Every function here is pure: same inputs, same prompt. Reference material
//! is cut to a fixed number of characters and never summarized.

use bollybook_core::{LanguageProfile, truncate_chars};

/// Characters of reference material included in the table-of-contents prompt.
pub const TOC_EXCERPT_LIMIT: usize = 500;

/// Characters of reference material included in each chapter prompt.
pub const CHAPTER_EXCERPT_LIMIT: usize = 300;

/// Layout every generated comic page must follow.
pub const PAGE_TEMPLATE: &str = r#"Page [Number]
━━━━━━━━━━━━━━━━━━━━━
📖 Topic: [Specific topic name]

🎬 Bollywood Meme Prompt:
[Describe the meme - e.g., "Raju from Hera Pheri shocked face when seeing cloud bills"]

🎭 Comic Panel Description:
[Describe the scene - characters, setting, visual composition]

💬 Dialogue:
[Character 1]: "[Funny Bollywood-style dialogue]"
[Character 2]: "[Response with cloud computing reference]"

📚 Academic Explanation:
[Clear, accurate technical explanation of the cloud computing concept]

🎯 Key Points:
• [Important point 1]
• [Important point 2]
• [Important point 3]

😄 Punchline/Joke:
[Funny ending related to the topic]

━━━━━━━━━━━━━━━━━━━━━"#;

const CHAPTER_REQUIREMENTS: &str = "**REQUIREMENTS:**
1. Use simple, student-friendly language
2. Include Bollywood movie references (Hera Pheri, 3 Idiots, Sholay, DDLJ, etc.)
3. Make technical concepts relatable through funny analogies
4. Maintain 100% technical accuracy
5. Each page should teach one specific concept
6. Use emojis for visual appeal
7. Make it engaging and memorable";

/// Session key for the title page call.
pub fn title_session_key(profile: &LanguageProfile) -> String {
    format!("title_{}", profile.code)
}

/// Session key for the table-of-contents call.
pub fn toc_session_key(profile: &LanguageProfile) -> String {
    format!("toc_{}", profile.code)
}

/// Session key for one chapter call.
pub fn chapter_session_key(profile: &LanguageProfile, number: u32) -> String {
    format!("chapter_{}_{}", number, profile.code)
}

fn excerpt_line(label: &str, reference: &str, limit: usize) -> String {
    let excerpt = truncate_chars(reference, limit);
    if excerpt.trim().is_empty() {
        String::new()
    } else {
        format!("{}: {}", label, excerpt)
    }
}

/// Prompt for the book's title page.
///
/// # Examples
///
/// ```
/// use bollybook_core::resolve;
/// use bollybook_narrative::title_prompt;
///
/// let prompt = title_prompt(resolve("tamil"));
/// assert!(prompt.contains("Tamil (தமிழ்)"));
/// assert!(prompt.contains("Tagline"));
/// ```
pub fn title_prompt(profile: &LanguageProfile) -> String {
    format!(
        "Create a Bollywood-style title page for the Cloud Computing book in {}.

Include:
- 🎬 Main Title (creative and filmy)
- 📚 Subtitle
- 💫 Tagline (Bollywood dialogue style)
- 🎭 Visual description for cover design

Make it exciting and appealing to B.Tech CSE students!",
        profile.display_name
    )
}

/// Prompt for the table of contents.
///
/// Lists the syllabus topics and, when `reference` is non-empty, its first
/// [`TOC_EXCERPT_LIMIT`] characters.
pub fn toc_prompt(profile: &LanguageProfile, syllabus: &[&str], reference: &str) -> String {
    let topics = syllabus
        .iter()
        .enumerate()
        .map(|(idx, topic)| format!("{}. {}", idx + 1, topic))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Generate a detailed Table of Contents for a 60-page Bollywood-style Cloud Computing book in {}.

Base syllabus topics (adapt as needed):
{}

{}

Generate a structured TOC with chapter numbers, topics, and page numbers (for 60-page book).
Make it fun and Bollywood-themed but academically complete.",
        profile.display_name,
        topics,
        excerpt_line(
            "Additional context from user materials",
            reference,
            TOC_EXCERPT_LIMIT
        )
    )
}

/// Prompt for one chapter written as `target_pages` comic pages.
///
/// Embeds [`PAGE_TEMPLATE`] and, when `reference` is non-empty, its first
/// [`CHAPTER_EXCERPT_LIMIT`] characters.
pub fn chapter_prompt(
    profile: &LanguageProfile,
    number: u32,
    title: &str,
    target_pages: u32,
    reference: &str,
) -> String {
    format!(
        "Generate Chapter {number}: {title}

Write it in {language}. This chapter should have approximately {target_pages} pages in Bollywood comic-style format.

**CRITICAL FORMAT FOR EACH PAGE:**

{template}

{excerpt}

{requirements}

Generate all {target_pages} pages now.",
        language = profile.display_name,
        template = PAGE_TEMPLATE,
        excerpt = excerpt_line("Reference material", reference, CHAPTER_EXCERPT_LIMIT),
        requirements = CHAPTER_REQUIREMENTS,
    )
}
