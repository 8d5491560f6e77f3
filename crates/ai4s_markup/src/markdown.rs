use scraper::{ElementRef, Html};

/// Best-effort HTML to Markdown conversion used by the Markdown export.
///
/// The fragment is parsed into a node tree and walked in document order:
/// `h1`-`h3` become `#` headings, paragraphs outside lists become plain
/// paragraphs, `li` become `- ` bullets and `strong` becomes `**text**`.
/// Everything else is flattened to its text. Loose text outside those
/// elements is dropped.
pub fn html_to_markdown(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut markdown = String::new();
    walk_blocks(fragment.root_element(), false, &mut markdown);
    markdown
}

fn walk_blocks(element: ElementRef<'_>, in_list: bool, out: &mut String) {
    for child in element.children() {
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };

        match child.value().name() {
            "h1" => push_heading(out, "#", child),
            "h2" => push_heading(out, "##", child),
            "h3" => push_heading(out, "###", child),
            "p" => {
                if in_list {
                    continue;
                }
                let text = inline_text(child, true);
                if !text.is_empty() {
                    out.push_str(&text);
                    out.push_str("\n\n");
                }
            }
            "li" => {
                out.push_str("- ");
                out.push_str(&inline_text(child, true));
                out.push('\n');
                // Nested lists follow their parent item.
                for nested in child.children().filter_map(ElementRef::wrap) {
                    if matches!(nested.value().name(), "ul" | "ol") {
                        walk_blocks(nested, true, out);
                    }
                }
            }
            "ul" | "ol" => walk_blocks(child, true, out),
            "strong" | "b" => {
                let text = inline_text(child, false);
                if !text.is_empty() {
                    out.push_str(&format!("**{text}**"));
                }
            }
            "script" | "style" => {}
            _ => walk_blocks(child, in_list, out),
        }
    }
}

fn push_heading(out: &mut String, marker: &str, element: ElementRef<'_>) {
    out.push_str(marker);
    out.push(' ');
    out.push_str(&inline_text(element, false));
    out.push_str("\n\n");
}

fn inline_text(element: ElementRef<'_>, emphasis: bool) -> String {
    let mut raw = String::new();
    collect_inline(element, emphasis, &mut raw);
    collapse_whitespace(&raw)
}

fn collect_inline(element: ElementRef<'_>, emphasis: bool, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        match child.value().name() {
            "strong" | "b" if emphasis => {
                let mut raw = String::new();
                collect_inline(child, false, &mut raw);
                let text = collapse_whitespace(&raw);
                if text.is_empty() {
                    out.push_str(&raw);
                    continue;
                }
                // Whitespace just inside the tag moves outside the markers.
                if raw.starts_with(char::is_whitespace) {
                    out.push(' ');
                }
                out.push_str(&format!("**{text}**"));
                if raw.ends_with(char::is_whitespace) {
                    out.push(' ');
                }
            }
            "ul" | "ol" | "script" | "style" => {}
            "br" => out.push(' '),
            _ => collect_inline(child, emphasis, out),
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
