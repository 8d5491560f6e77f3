use pulldown_cmark::{html as md_html, Event, Options, Parser};

/// Render oracle Markdown into an HTML fragment.
///
/// Headings become `h1`..`h6`, `**bold**` becomes `strong`, `*italic*` becomes
/// `em` and `[text](url)` becomes an anchor. Blank lines separate paragraphs
/// and a single newline inside a paragraph becomes `<br />`.
///
/// Input that already opens with an element tag is returned unchanged, so
/// feeding the output back in yields the same string.
pub fn markdown_to_html(markdown: &str) -> String {
    if is_html_fragment(markdown) {
        return markdown.to_string();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut html_output = String::with_capacity(markdown.len() * 2);
    md_html::push_html(&mut html_output, parser);
    html_output
}

fn is_html_fragment(text: &str) -> bool {
    let mut chars = text.trim_start().chars();
    chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Remove a Markdown code fence wrapping the whole reply (```` ```html ... ``` ````).
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (`html`, `markdown`, ...) on the opening line.
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_emphasis() {
        let html = markdown_to_html("# Title\n\n## Section\n\n### Detail\n\nSome **bold** and *italic* text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<h2>Section</h2>"));
        assert!(html.contains("<h3>Detail</h3>"));
        assert!(html.contains("<p>Some <strong>bold</strong> and <em>italic</em> text.</p>"));
    }

    #[test]
    fn test_links_and_paragraphs() {
        let html = markdown_to_html("First paragraph.\n\nSee [the docs](https://example.com/docs).");
        assert!(html.contains("<p>First paragraph.</p>"));
        assert!(html.contains(r#"<a href="https://example.com/docs">the docs</a>"#));
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let markdown = "# Edge Computing\n\nBy **Jane Doe**\n\n## Why it matters\n\n- Latency\n- Bandwidth\n\nRead [more](https://example.com).\n";
        let once = markdown_to_html(markdown);
        let twice = markdown_to_html(&once);
        assert_eq!(once, twice);
        assert_eq!(twice.matches("<h1>").count(), 1);
        assert!(!twice.contains("<p><h1>"));
    }

    #[test]
    fn test_code_block_with_blank_line_is_idempotent() {
        let once = markdown_to_html("# T\n\n```\nlet a = 1;\n\nlet b = 2;\n```\n");
        assert_eq!(once, "<h1>T</h1>\n<pre><code>let a = 1;\n\nlet b = 2;\n</code></pre>\n");
        assert_eq!(markdown_to_html(&once), once);
    }

    #[test]
    fn test_single_newline_breaks_line() {
        let html = markdown_to_html("First line\nsecond line\n\nNext paragraph");
        assert_eq!(html, "<p>First line<br />\nsecond line</p>\n<p>Next paragraph</p>\n");
    }

    #[test]
    fn test_html_input_passes_through() {
        let html = "<div class=\"article-content\">\n\n<p>Already **rendered**</p>\n</div>";
        assert_eq!(markdown_to_html(html), html);
        assert!(markdown_to_html("<3 hearts").starts_with("<p>"));
    }

    #[test]
    fn test_empty_input() {
        assert!(markdown_to_html("").is_empty());
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```html\n<h1>Hi</h1>\n```"), "<h1>Hi</h1>");
        assert_eq!(strip_code_fence("  <p>plain</p>\n"), "<p>plain</p>");
        assert_eq!(strip_code_fence("```<p>x</p>```"), "<p>x</p>");
        assert_eq!(strip_code_fence("```unterminated"), "```unterminated");
    }
}
