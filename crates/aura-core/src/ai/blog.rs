use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ports::{GenerationOptions, GenerationRequest, TextGenerator, TextStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl BlogLength {
    /// Approximate target word count.
    pub fn words(&self) -> u32 {
        match self {
            BlogLength::Short => 400,
            BlogLength::Medium => 800,
            BlogLength::Long => 1500,
        }
    }

    /// Token budget with headroom for HTML markup.
    fn token_budget(&self) -> u32 {
        self.words() * 2
    }
}

/// Editor request for an AI-drafted post body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogGenerationRequest {
    pub keyword: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub length: BlogLength,
    #[serde(default)]
    pub instructions: Option<String>,
}

pub fn blog_prompt(request: &BlogGenerationRequest) -> String {
    let tone = request
        .tone
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("warm and informative");
    let mut prompt = format!(
        "Write a blog post for an energy-healing and holistic wellness practice about \
         \"{keyword}\".\n\
         Tone: {tone}.\n\
         Length: about {words} words.\n\
         Format the post as clean HTML using only <h2>, <h3>, <p>, <ul>, <li>, <strong> \
         and <em> tags. Do not include <html>, <head> or <body> tags and do not wrap the \
         output in code fences.",
        keyword = request.keyword.trim(),
        words = request.length.words(),
    );
    if let Some(extra) = request
        .instructions
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
    {
        prompt.push_str("\nAdditional instructions: ");
        prompt.push_str(extra);
    }
    prompt
}

/// Stream an HTML post body into the editor. Dropping the returned stream
/// aborts the generation.
pub async fn generate_blog_stream(
    generator: &dyn TextGenerator,
    request: &BlogGenerationRequest,
) -> Result<TextStream, DomainError> {
    if request.keyword.trim().is_empty() {
        return Err(DomainError::Validation("Keyword is required".to_string()));
    }
    let generation = GenerationRequest::new(blog_prompt(request)).with_options(
        GenerationOptions {
            temperature: Some(0.7),
            num_predict: Some(request.length.token_budget()),
            ..Default::default()
        },
    );
    tracing::info!(keyword = %request.keyword, length = ?request.length, "Streaming blog draft");
    Ok(generator.generate_stream(generation).await?)
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use super::*;
    use crate::ai::testing::ScriptedGenerator;

    fn request() -> BlogGenerationRequest {
        BlogGenerationRequest {
            keyword: "sound baths".to_string(),
            tone: None,
            length: BlogLength::Short,
            instructions: Some("Mention Tibetan bowls.".to_string()),
        }
    }

    #[test]
    fn test_prompt_contents() {
        let prompt = blog_prompt(&request());
        assert!(prompt.contains("\"sound baths\""));
        assert!(prompt.contains("about 400 words"));
        assert!(prompt.contains("warm and informative"));
        assert!(prompt.ends_with("Mention Tibetan bowls."));
    }

    #[tokio::test]
    async fn test_stream_yields_reply() {
        let generator = ScriptedGenerator::replying("<h2>Sound baths</h2> <p>Relax.</p>");
        let stream = generate_blog_stream(&generator, &request()).await.unwrap();
        let chunks: Vec<String> = stream.try_collect().await.unwrap();
        assert!(chunks.len() > 1);
        assert_eq!(chunks.concat(), "<h2>Sound baths</h2> <p>Relax.</p>");
    }

    #[tokio::test]
    async fn test_keyword_required() {
        let generator = ScriptedGenerator::replying("");
        let err = generate_blog_stream(
            &generator,
            &BlogGenerationRequest {
                keyword: " ".to_string(),
                ..request()
            },
        )
        .await;
        assert!(matches!(err, Err(DomainError::Validation(_))));
    }
}
