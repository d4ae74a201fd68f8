//! Best-effort decoding of plain-text model replies.
//!
//! Replies are expected to be section-delimited (`LABEL: ...` lines) with
//! numbered or bulleted lists inside sections. Models decorate labels with
//! markdown and reorder or skip sections, so every helper here tolerates
//! junk and returns whatever it could recover.

use std::sync::LazyLock;

use regex::Regex;

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\(?\d{1,2}\s*[.):\-]\s*(.+)$").unwrap());

static BULLETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*•]\s+(.+)$").unwrap());

/// One labelled section of a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub label: &'static str,
    pub body: String,
}

/// Drop markdown emphasis and heading markers around a line.
fn plain(line: &str) -> String {
    line.trim()
        .trim_start_matches('#')
        .replace("**", "")
        .replace("__", "")
        .trim()
        .to_string()
}

/// If `line` opens one of `labels`, return the label and the text after
/// its colon.
fn match_label(line: &str, labels: &[&'static str]) -> Option<(&'static str, String)> {
    let plain = plain(line);
    labels.iter().find_map(|label| {
        let head = plain.get(..label.len())?;
        if !head.eq_ignore_ascii_case(label) {
            return None;
        }
        let rest = plain[label.len()..].trim_start().strip_prefix(':')?;
        Some((*label, rest.trim().to_string()))
    })
}

/// Split a reply into labelled sections, in reply order.
///
/// Labels repeat freely (several `CHAKRA:` blocks); text before the first
/// label is discarded. Labels are matched case-insensitively and must be
/// upper-case in `labels`.
pub fn sections(text: &str, labels: &[&'static str]) -> Vec<Section> {
    let mut out: Vec<Section> = Vec::new();
    for line in text.lines() {
        if let Some((label, rest)) = match_label(line, labels) {
            out.push(Section { label, body: rest });
        } else if let Some(current) = out.last_mut() {
            if !current.body.is_empty() {
                current.body.push('\n');
            }
            current.body.push_str(line.trim_end());
        }
    }
    for section in &mut out {
        section.body = section.body.trim().to_string();
    }
    out
}

/// Body of the first section with `label`, if present and non-empty.
pub fn first_body<'a>(sections: &'a [Section], label: &str) -> Option<&'a str> {
    sections
        .iter()
        .find(|s| s.label == label && !s.body.is_empty())
        .map(|s| s.body.as_str())
}

/// Remove numbering, bullets, markdown emphasis and wrapping quotes.
pub fn clean_item(line: &str) -> String {
    let line = plain(line);
    let inner = NUMBERED
        .captures(&line)
        .or_else(|| BULLETED.captures(&line))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(&line);
    inner
        .trim()
        .trim_matches(|c| c == '"' || c == '\u{201c}' || c == '\u{201d}' || c == '*')
        .trim()
        .to_string()
}

/// Items of numbered lines (`1.`, `2)`, `(3)` ...) only.
pub fn numbered_items(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| NUMBERED.is_match(&plain(line)))
        .map(clean_item)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Items of a list section. Numbered and bulleted lines are preferred;
/// a section without markers is read one item per line, and a single line
/// is split on commas.
pub fn list_items(text: &str) -> Vec<String> {
    let marked: Vec<String> = text
        .lines()
        .filter(|line| {
            let line = plain(line);
            NUMBERED.is_match(&line) || BULLETED.is_match(&line)
        })
        .map(clean_item)
        .filter(|item| !item.is_empty())
        .collect();
    if !marked.is_empty() {
        return marked;
    }

    let lines: Vec<String> = text
        .lines()
        .map(clean_item)
        .filter(|item| !item.is_empty())
        .collect();
    if lines.len() == 1 {
        return lines[0]
            .split(',')
            .map(|s| s.trim().trim_end_matches('.').trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    lines
}

/// Collapse a multi-line body into one paragraph.
pub fn paragraph(text: &str) -> String {
    text.lines()
        .map(plain)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_with_markdown_labels() {
        let reply = "Sure! Here you go.\n\n**CHAKRA:** Heart Chakra\n## ANALYSIS: Grief sits here.\nIt tightens the chest.\nRecommendations:\n1. Breathe slowly";
        let parsed = sections(reply, &["CHAKRA", "ANALYSIS", "RECOMMENDATIONS"]);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].label, "CHAKRA");
        assert_eq!(parsed[0].body, "Heart Chakra");
        assert_eq!(parsed[1].body, "Grief sits here.\nIt tightens the chest.");
        assert_eq!(parsed[2].label, "RECOMMENDATIONS");
        assert_eq!(parsed[2].body, "1. Breathe slowly");
    }

    #[test]
    fn test_multiword_label_requires_colon() {
        let parsed = sections(
            "EMOTIONAL SUMMARY: calm\nEmotional summary without colon",
            &["EMOTIONAL SUMMARY"],
        );
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].body, "calm\nEmotional summary without colon");
    }

    #[test]
    fn test_clean_item() {
        assert_eq!(clean_item("1. \"I am safe.\""), "I am safe.");
        assert_eq!(clean_item("  2) **Drink water**"), "Drink water");
        assert_eq!(clean_item("- Walk barefoot"), "Walk barefoot");
        assert_eq!(clean_item("(3) Rest"), "Rest");
        assert_eq!(clean_item("plain"), "plain");
    }

    #[test]
    fn test_numbered_items_ignore_prose() {
        let items = numbered_items("Here are three:\n1. One thing\n\n2. Two things\nThanks!");
        assert_eq!(items, vec!["One thing", "Two things"]);
    }

    #[test]
    fn test_list_items_fallbacks() {
        assert_eq!(list_items("grief, release, trust."), vec!["grief", "release", "trust"]);
        assert_eq!(list_items("grief\nrelease"), vec!["grief", "release"]);
        assert_eq!(list_items("* grief\n* release"), vec!["grief", "release"]);
    }
}
