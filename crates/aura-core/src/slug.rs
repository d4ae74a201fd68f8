//! URL slugs.

/// Slug used when a name has no usable characters.
const EMPTY_SLUG: &str = "item";

/// Convert text to a URL-safe slug.
///
/// Lowercase ASCII letters and digits are kept; every other run of
/// characters collapses to a single `-`.
pub fn slugify(text: &str) -> String {
    let slug = text
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            'a'..='z' | '0'..='9' => ch,
            _ => '-',
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}
