use std::fmt;
use std::str::FromStr;

use ai4s_core::{Error, Result};
use ai4s_markup::{markdown_to_html, strip_code_fence};

/// What the oracle is asked to write, and how its reply becomes `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Styled HTML, relayed verbatim.
    #[default]
    Html,
    /// Markdown, converted to HTML before it is returned.
    Markdown,
}

const HTML_INSTRUCTIONS: &str = "\
Respond with an HTML fragment only: no <html>, <head> or <body> tags, no Markdown and no code fences. \
Style it for a dark theme with these utility classes:
- wrap everything in <div class=\"article-content\">
- h1: class=\"text-4xl font-bold mb-2 text-white\"
- byline paragraph: class=\"text-gray-400 text-sm\"
- h2: class=\"text-3xl font-bold mt-12 mb-4 text-cyan-400\"
- h3: class=\"text-2xl font-semibold mt-8 mb-4 text-blue-400\"
- p: class=\"text-gray-300 leading-relaxed mb-6\"
- ul and ol: class=\"space-y-3 mb-8\", li: class=\"text-gray-300\"
- strong: class=\"text-white\"
- callout boxes: <div class=\"bg-gray-800/50 border border-gray-700 rounded-lg p-6 my-8\">";

const MARKDOWN_INSTRUCTIONS: &str = "\
Respond in Markdown only: # for the title, ## and ### for sections, **bold** and *italic* for emphasis, \
[text](url) for links and - for bullet lists. Do not use HTML and do not wrap the answer in a code fence.";

impl OutputFormat {
    /// Formatting rules appended to the system prompt.
    pub fn instructions(self) -> &'static str {
        match self {
            OutputFormat::Html => HTML_INSTRUCTIONS,
            OutputFormat::Markdown => MARKDOWN_INSTRUCTIONS,
        }
    }

    /// Turn a raw oracle reply into the HTML fragment sent to the client.
    pub fn normalize(self, reply: &str) -> String {
        let reply = strip_code_fence(reply);
        match self {
            OutputFormat::Html => reply.to_string(),
            OutputFormat::Markdown => markdown_to_html(reply),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(Error::Validation(format!("Unknown output format: {other}"))),
        }
    }
}
