use ai4s_core::{ArticleRequest, MAX_SUGGESTED_TOPICS};
use chrono::NaiveDate;

use crate::format::OutputFormat;

pub const DEFAULT_PREVIOUS_BLOG_LIMIT: usize = 1000;

pub const WRITER_PERSONA: &str = "\
You are an expert content writer. You write engaging, human-sounding blog articles \
with a clear SEO structure: one title, descriptive section headings, short paragraphs, \
scannable lists and a conclusion.";

pub const SUGGESTION_SYSTEM_PROMPT: &str = "\
You are an editorial assistant who proposes follow-up blog post titles. \
Answer with the titles only.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Prompt for the article itself.
///
/// `previous_blog_limit` caps how many characters of the style reference are
/// embedded; zero omits the reference entirely.
pub fn article_prompt(
    request: &ArticleRequest,
    date: NaiveDate,
    format: OutputFormat,
    previous_blog_limit: usize,
) -> Prompt {
    let system = format!("{WRITER_PERSONA}\n\n{}", format.instructions());

    let mut user = format!(
        "Write a comprehensive blog article titled \"{topic}\".\n\
         Author: {author}\n\
         Date: {date}\n\n\
         Start with the title as the main heading, followed by a byline that reads \
         \"By {author} • {date}\". Cover the fundamentals, practical applications, \
         best practices, common challenges and the future outlook, then finish with a conclusion.",
        topic = request.topic(),
        author = request.creator_name(),
        date = date.format("%B %-d, %Y"),
    );

    if let Some(reference) = request.previous_blog().map(|p| truncate_chars(p, previous_blog_limit)) {
        if !reference.is_empty() {
            user.push_str(
                "\n\nStyle reference: analyze and match the tone, vocabulary and sentence rhythm \
                 of this previous content by the same author:\n",
            );
            user.push_str(reference);
        }
    }

    Prompt { system, user }
}

/// Prompt asking for follow-up titles related to `topic`.
pub fn suggestion_prompt(topic: &str) -> Prompt {
    Prompt {
        system: SUGGESTION_SYSTEM_PROMPT.to_string(),
        user: format!(
            "Given the topic \"{topic}\", suggest {MAX_SUGGESTED_TOPICS} related blog post titles. \
             Put each title on its own line, numbered 1 to {MAX_SUGGESTED_TOPICS}, with no other text."
        ),
    }
}

/// Longest prefix of `text` with at most `limit` characters.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
