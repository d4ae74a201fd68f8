//! AI activity widgets: prompt templates, reply decoders and their fallbacks.
//!
//! Every feature renders a fixed-format prompt, sends it through a
//! [`TextGenerator`], and decodes the plain-text reply. Decoding never
//! fails: when nothing usable comes back the feature substitutes a static
//! fallback and marks the result with `fallback: true`. Upstream failures
//! are returned as errors and are not retried.

mod affirmations;
mod blog;
mod chakra;
pub mod decode;
mod journal;

use serde::Serialize;

use crate::error::DomainError;
use crate::ports::{GenerationOptions, GenerationRequest, TextGenerator};

pub use affirmations::{
    AFFIRMATION_COUNT, FALLBACK_AFFIRMATIONS, affirmations_prompt, decode_affirmations,
    generate_affirmations,
};
pub use blog::{BlogGenerationRequest, BlogLength, blog_prompt, generate_blog_stream};
pub use chakra::{
    ChakraAnalysis, MAX_RECOMMENDATIONS, MIN_RECOMMENDATION_LEN, analyze_chakras,
    chakra_prompt, decode_chakra_analysis, fallback_chakra_analysis,
};
pub use journal::{
    JournalEntrySummary, JournalInsight, PatternReport, analyze_journal_entry,
    decode_journal_insight, decode_pattern_report, decode_prompt_suggestions,
    identify_patterns, journal_prompt, patterns_prompt, suggest_prompts, suggestions_prompt,
};

/// A decoded AI result and whether it is the static fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated<T> {
    pub value: T,
    pub fallback: bool,
}

impl<T> Generated<T> {
    pub fn decoded(value: T) -> Self {
        Self {
            value,
            fallback: false,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            fallback: true,
        }
    }

    /// Log a degradation for `feature` and hand the result back.
    pub(crate) fn logged(self, feature: &'static str) -> Self {
        if self.fallback {
            tracing::warn!(feature, "Model reply unusable, serving fallback");
        } else {
            tracing::debug!(feature, "Model reply decoded");
        }
        self
    }
}

/// Send a raw prompt and return the reply text.
pub async fn generate_text(
    generator: &dyn TextGenerator,
    prompt: &str,
    options: GenerationOptions,
) -> Result<String, DomainError> {
    if prompt.trim().is_empty() {
        return Err(DomainError::Validation("Prompt is required".to_string()));
    }
    let request = GenerationRequest::new(prompt).with_options(options);
    Ok(generator.generate(request).await?)
}
