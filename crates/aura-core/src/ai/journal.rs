use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Generated;
use super::decode::{first_body, list_items, numbered_items, paragraph, sections};
use crate::error::DomainError;
use crate::ports::{GenerationOptions, GenerationRequest, TextGenerator};

const INSIGHT_LABELS: [&str; 4] = ["EMOTIONAL SUMMARY", "KEY THEMES", "INSIGHTS", "RECOMMENDATIONS"];
const PATTERN_LABELS: [&str; 4] = ["PATTERNS", "TRIGGERS", "GROWTH", "SUGGESTIONS"];

/// Prompt suggestions returned at most.
const MAX_SUGGESTIONS: usize = 5;
/// Characters of each entry included in the pattern prompt.
const ENTRY_EXCERPT_CHARS: usize = 600;
/// Entries included in the pattern prompt, most recent last.
const MAX_PATTERN_ENTRIES: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalInsight {
    pub emotional_summary: String,
    pub themes: Vec<String>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub patterns: Vec<String>,
    pub triggers: Vec<String>,
    pub growth: Vec<String>,
    pub suggestions: Vec<String>,
}

impl PatternReport {
    fn is_empty(&self) -> bool {
        self.patterns.is_empty()
            && self.triggers.is_empty()
            && self.growth.is_empty()
            && self.suggestions.is_empty()
    }
}

/// A past entry handed to pattern detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntrySummary {
    pub date: NaiveDate,
    #[serde(default)]
    pub mood: Option<String>,
    pub text: String,
}

fn fallback_insight() -> JournalInsight {
    JournalInsight {
        emotional_summary: "Thank you for taking the time to write today. Putting your \
                            feelings into words is already an act of care for yourself."
            .to_string(),
        themes: vec!["Self-reflection".to_string()],
        insights: vec![
            "Regular journaling helps you notice how your energy shifts over time.".to_string(),
        ],
        recommendations: vec![
            "Take three slow breaths and notice where you feel tension in your body."
                .to_string(),
            "Write one thing you are grateful for before bed.".to_string(),
        ],
    }
}

fn fallback_prompts() -> Vec<String> {
    [
        "What is one thing your body is asking you for today?",
        "When did you feel most at peace this week, and what made it possible?",
        "What emotion have you been carrying that you are ready to release?",
        "Describe a moment today when you felt truly yourself.",
        "What would you tell a close friend who felt the way you feel right now?",
    ]
    .map(String::from)
    .to_vec()
}

fn fallback_patterns() -> PatternReport {
    PatternReport {
        patterns: vec![
            "Your entries show you are actively paying attention to your inner life."
                .to_string(),
        ],
        triggers: Vec::new(),
        growth: vec!["Consistency in journaling is itself a sign of growth.".to_string()],
        suggestions: vec![
            "Note your mood at the start of each entry so changes are easier to spot."
                .to_string(),
        ],
    }
}

fn mood_clause(mood: Option<&str>) -> String {
    mood.map(str::trim)
        .filter(|m| !m.is_empty())
        .map(|m| format!("The writer describes their mood as: {m}.\n"))
        .unwrap_or_default()
}

pub fn journal_prompt(entry: &str, mood: Option<&str>) -> String {
    format!(
        "You are a gentle, insightful wellness coach reading a private journal entry.\n\
         {mood}\
         Journal entry:\n\"\"\"\n{entry}\n\"\"\"\n\n\
         Respond using exactly these sections:\n\
         EMOTIONAL SUMMARY: <two or three compassionate sentences>\n\
         KEY THEMES:\n- <theme>\n- <theme>\n\
         INSIGHTS:\n- <insight>\n- <insight>\n\
         RECOMMENDATIONS:\n1. <supportive practice>\n2. <supportive practice>",
        mood = mood_clause(mood),
        entry = entry.trim(),
    )
}

pub fn decode_journal_insight(reply: &str) -> Generated<JournalInsight> {
    let parsed = sections(reply, &INSIGHT_LABELS);
    let emotional_summary = first_body(&parsed, "EMOTIONAL SUMMARY")
        .map(paragraph)
        .unwrap_or_default();
    if emotional_summary.is_empty() {
        return Generated::fallback(fallback_insight());
    }
    let list = |label| first_body(&parsed, label).map(list_items).unwrap_or_default();
    Generated::decoded(JournalInsight {
        emotional_summary,
        themes: list("KEY THEMES"),
        insights: list("INSIGHTS"),
        recommendations: list("RECOMMENDATIONS"),
    })
}

/// Summarize the emotional content of one journal entry.
pub async fn analyze_journal_entry(
    generator: &dyn TextGenerator,
    entry: &str,
    mood: Option<&str>,
) -> Result<Generated<JournalInsight>, DomainError> {
    if entry.trim().is_empty() {
        return Err(DomainError::Validation(
            "Journal entry text is required".to_string(),
        ));
    }
    let request = GenerationRequest::new(journal_prompt(entry, mood)).with_options(
        GenerationOptions {
            temperature: Some(0.7),
            num_predict: Some(700),
            ..Default::default()
        },
    );
    let reply = generator.generate(request).await?;
    Ok(decode_journal_insight(&reply).logged("journal-analysis"))
}

pub fn suggestions_prompt(mood: Option<&str>, recent_topics: &[String]) -> String {
    let topics = recent_topics
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>();
    let topics = if topics.is_empty() {
        String::new()
    } else {
        format!(
            "Recently they have written about: {}. Avoid repeating these exactly.\n",
            topics.join(", ")
        )
    };
    format!(
        "You are a reflective journaling guide.\n\
         {mood}{topics}\
         Suggest {MAX_SUGGESTIONS} open-ended journaling prompts that invite gentle \
         self-reflection. Reply with a numbered list only, one prompt per line.",
        mood = mood_clause(mood),
    )
}

pub fn decode_prompt_suggestions(reply: &str) -> Generated<Vec<String>> {
    let prompts: Vec<String> = numbered_items(reply)
        .into_iter()
        .filter(|p| p.chars().count() >= 10)
        .take(MAX_SUGGESTIONS)
        .collect();
    if prompts.is_empty() {
        Generated::fallback(fallback_prompts())
    } else {
        Generated::decoded(prompts)
    }
}

/// Suggest journaling prompts for the writer's mood and recent topics.
pub async fn suggest_prompts(
    generator: &dyn TextGenerator,
    mood: Option<&str>,
    recent_topics: &[String],
) -> Result<Generated<Vec<String>>, DomainError> {
    let request = GenerationRequest::new(suggestions_prompt(mood, recent_topics)).with_options(
        GenerationOptions {
            temperature: Some(0.9),
            num_predict: Some(300),
            ..Default::default()
        },
    );
    let reply = generator.generate(request).await?;
    Ok(decode_prompt_suggestions(&reply).logged("journal-prompts"))
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= ENTRY_EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(ENTRY_EXCERPT_CHARS).collect();
    format!("{cut}...")
}

pub fn patterns_prompt(entries: &[JournalEntrySummary]) -> String {
    let written: Vec<&JournalEntrySummary> =
        entries.iter().filter(|e| !e.text.trim().is_empty()).collect();
    let start = written.len().saturating_sub(MAX_PATTERN_ENTRIES);
    let rendered = written[start..]
        .iter()
        .map(|e| {
            let mood = e
                .mood
                .as_deref()
                .map(|m| format!(" (mood: {m})"))
                .unwrap_or_default();
            format!("[{}]{mood}\n{}", e.date, excerpt(&e.text))
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "You are a wellness coach reviewing several journal entries written over time.\n\n\
         {rendered}\n\n\
         Identify recurring emotional patterns. Respond using exactly these sections, \
         each followed by a bulleted list:\n\
         PATTERNS:\nTRIGGERS:\nGROWTH:\nSUGGESTIONS:"
    )
}

pub fn decode_pattern_report(reply: &str) -> Generated<PatternReport> {
    let parsed = sections(reply, &PATTERN_LABELS);
    let list = |label| first_body(&parsed, label).map(list_items).unwrap_or_default();
    let report = PatternReport {
        patterns: list("PATTERNS"),
        triggers: list("TRIGGERS"),
        growth: list("GROWTH"),
        suggestions: list("SUGGESTIONS"),
    };
    if report.is_empty() {
        Generated::fallback(fallback_patterns())
    } else {
        Generated::decoded(report)
    }
}

/// Look for recurring themes across several entries.
pub async fn identify_patterns(
    generator: &dyn TextGenerator,
    entries: &[JournalEntrySummary],
) -> Result<Generated<PatternReport>, DomainError> {
    if entries.iter().filter(|e| !e.text.trim().is_empty()).count() < 2 {
        return Err(DomainError::Validation(
            "At least two journal entries are needed to find patterns".to_string(),
        ));
    }
    let request = GenerationRequest::new(patterns_prompt(entries)).with_options(
        GenerationOptions {
            temperature: Some(0.6),
            num_predict: Some(800),
            ..Default::default()
        },
    );
    let reply = generator.generate(request).await?;
    Ok(decode_pattern_report(&reply).logged("journal-patterns"))
}
