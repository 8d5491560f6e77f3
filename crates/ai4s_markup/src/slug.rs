const FALLBACK_SLUG: &str = "article";

/// Derive a file-name-safe slug from a topic.
///
/// Every character outside `[a-z0-9]` (after lowercasing) is replaced by a
/// single `-`, so consecutive symbols produce consecutive hyphens. Leading and
/// trailing hyphens are trimmed.
pub fn slugify(topic: &str) -> String {
    let slug: String = topic
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect();

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}
