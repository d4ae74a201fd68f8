//! Alphabet filtering, free-text search and fixed-size pagination for the
//! public directory pages.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Page size shared by every public directory.
pub const PAGE_SIZE: usize = 12;

/// Bucket for entries that do not start with a letter.
pub const NON_ALPHA_BUCKET: char = '#';

/// Query string accepted by listing endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub letter: Option<char>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

impl ListQuery {
    pub fn page(&self) -> usize {
        self.page.map(|p| p.max(1) as usize).unwrap_or(1)
    }

    fn letter_bucket(&self) -> Option<char> {
        self.letter.map(|l| {
            if l.is_ascii_alphabetic() {
                l.to_ascii_uppercase()
            } else {
                NON_ALPHA_BUCKET
            }
        })
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// A directory page together with the letters that have entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    #[serde(flatten)]
    pub page: Page<T>,
    pub letters: Vec<char>,
}

/// Alphabet-bar bucket of a sort key: its first letter uppercased, or `#`.
pub fn letter_of(key: &str) -> char {
    match key.trim_start().chars().next() {
        Some(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
        _ => NON_ALPHA_BUCKET,
    }
}

/// Letters that have at least one entry, for rendering the alphabet bar.
pub fn available_letters<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<char> {
    keys.into_iter()
        .map(letter_of)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Filter `items` by letter and search text, then cut out the requested page.
///
/// `key` yields the sort key used for the letter filter and `haystack` the
/// text searched case-insensitively. Input order is preserved.
pub fn paginate<T>(
    items: Vec<T>,
    query: &ListQuery,
    page_size: usize,
    key: impl Fn(&T) -> &str,
    haystack: impl Fn(&T) -> String,
) -> Page<T> {
    let letter = query.letter_bucket();
    let needle = query.needle();

    let matching: Vec<T> = items
        .into_iter()
        .filter(|item| letter.is_none_or(|l| letter_of(key(item)) == l))
        .filter(|item| {
            needle
                .as_deref()
                .is_none_or(|n| haystack(item).to_lowercase().contains(n))
        })
        .collect();

    let page_size = page_size.max(1);
    let total_items = matching.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = query.page();

    let items = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        [
            "Ashwagandha",
            "Astragalus",
            "Basil",
            "Chamomile",
            "5-HTP",
            "Cinnamon",
            "Cacao",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    fn run(query: ListQuery, page_size: usize) -> Page<String> {
        paginate(names(), &query, page_size, |s| s.as_str(), |s| s.clone())
    }

    #[test]
    fn test_letter_filter() {
        let page = run(
            ListQuery {
                letter: Some('c'),
                ..Default::default()
            },
            12,
        );
        assert_eq!(page.items, vec!["Chamomile", "Cinnamon", "Cacao"]);

        let page = run(
            ListQuery {
                letter: Some('#'),
                ..Default::default()
            },
            12,
        );
        assert_eq!(page.items, vec!["5-HTP"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let page = run(
            ListQuery {
                search: Some("  CA ".to_string()),
                ..Default::default()
            },
            12,
        );
        assert_eq!(page.items, vec!["Cacao"]);
    }

    #[test]
    fn test_pagination_totals() {
        let page = run(
            ListQuery {
                page: Some(2),
                ..Default::default()
            },
            3,
        );
        assert_eq!(page.items, vec!["Chamomile", "5-HTP", "Cinnamon"]);
        assert_eq!(page.total_items, 7);
        assert_eq!(page.total_pages, 3);

        let past_end = run(
            ListQuery {
                page: Some(9),
                ..Default::default()
            },
            3,
        );
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_pages, 3);
    }

    #[test]
    fn test_available_letters() {
        let names = names();
        let letters = available_letters(names.iter().map(String::as_str));
        assert_eq!(letters, vec!['#', 'A', 'B', 'C']);
    }
}
