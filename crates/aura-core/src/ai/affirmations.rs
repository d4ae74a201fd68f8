use super::Generated;
use super::decode::numbered_items;
use crate::error::DomainError;
use crate::ports::{GenerationOptions, GenerationRequest, TextGenerator};

/// Affirmations returned per request.
pub const AFFIRMATION_COUNT: usize = 3;

/// Served when the reply contains no numbered list, and used to top up a
/// short one.
pub const FALLBACK_AFFIRMATIONS: [&str; AFFIRMATION_COUNT] = [
    "I am worthy of love, healing, and peace.",
    "I release what no longer serves me and welcome what does.",
    "My body and spirit are returning to balance with every breath.",
];

const DEFAULT_MOOD: &str = "in need of gentle encouragement";

pub fn affirmations_prompt(mood: &str, challenge: Option<&str>) -> String {
    let mood = match mood.trim() {
        "" => DEFAULT_MOOD,
        m => m,
    };
    let mut prompt = format!(
        "You are a compassionate energy-healing coach.\n\
         Write exactly {AFFIRMATION_COUNT} short, positive, first-person affirmations \
         for someone who is feeling {mood}."
    );
    if let Some(challenge) = challenge.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str(&format!(
            " They are currently facing this challenge: {challenge}."
        ));
    }
    prompt.push_str(
        "\nEach affirmation must be a single sentence in the present tense.\n\
         Reply with a numbered list only, one affirmation per line, like:\n\
         1. I am ...\n2. I ...\n3. I ...",
    );
    prompt
}

/// Take the first three distinct numbered items; top up from the fallback
/// triple when fewer were found.
pub fn decode_affirmations(reply: &str) -> Generated<Vec<String>> {
    let mut parsed: Vec<String> = Vec::with_capacity(AFFIRMATION_COUNT);
    for item in numbered_items(reply) {
        if parsed.len() == AFFIRMATION_COUNT {
            break;
        }
        if !parsed.iter().any(|p| p.eq_ignore_ascii_case(&item)) {
            parsed.push(item);
        }
    }

    if parsed.is_empty() {
        return Generated::fallback(FALLBACK_AFFIRMATIONS.map(String::from).to_vec());
    }

    let mut spares = FALLBACK_AFFIRMATIONS.iter();
    while parsed.len() < AFFIRMATION_COUNT {
        match spares.next() {
            Some(spare) if !parsed.iter().any(|p| p == spare) => parsed.push(spare.to_string()),
            Some(_) => continue,
            None => break,
        }
    }
    Generated::decoded(parsed)
}

/// Generate three affirmations for a mood and optional challenge.
pub async fn generate_affirmations(
    generator: &dyn TextGenerator,
    mood: &str,
    challenge: Option<&str>,
) -> Result<Generated<Vec<String>>, DomainError> {
    let request = GenerationRequest::new(affirmations_prompt(mood, challenge)).with_options(
        GenerationOptions {
            temperature: Some(0.8),
            num_predict: Some(200),
            ..Default::default()
        },
    );
    let reply = generator.generate(request).await?;
    Ok(decode_affirmations(&reply).logged("affirmations"))
}
