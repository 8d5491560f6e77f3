use ai4s_core::MAX_SUGGESTED_TOPICS;

/// Parse the oracle's list of follow-up titles.
///
/// Leading enumeration markers (`1.`, `2)`, `-`, `*`, `•`), heading hashes,
/// wrapping quotes and emphasis are stripped in any nesting order, blank lines
/// and heading lines ending in `:` are dropped, and at most
/// [`MAX_SUGGESTED_TOPICS`] entries are kept.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .map(clean_line)
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .take(MAX_SUGGESTED_TOPICS)
        .map(str::to_string)
        .collect()
}

fn clean_line(line: &str) -> &str {
    let mut current = line.trim();
    loop {
        let unwrapped = current
            .trim_start_matches('#')
            .trim()
            .trim_matches(|c: char| matches!(c, '"' | '“' | '”' | '*' | '_'))
            .trim();
        let next = strip_marker(unwrapped);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_marker(line: &str) -> &str {
    let without_digits = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() != line.len() {
        // "2025 trends" keeps its number, "2. Title" and "2) Title" do not.
        return match without_digits.strip_prefix(|c: char| matches!(c, '.' | ')' | ':')) {
            Some(rest) => rest.trim_start(),
            None => line,
        };
    }

    match line.strip_prefix(|c: char| matches!(c, '-' | '*' | '•')) {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}
