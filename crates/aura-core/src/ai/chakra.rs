use serde::{Deserialize, Serialize};

use super::Generated;
use super::decode::{Section, first_body, list_items, paragraph, sections};
use crate::error::DomainError;
use crate::ports::{GenerationOptions, GenerationRequest, TextGenerator};

/// Recommendations kept per chakra.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Shorter recommendation lines are treated as noise.
pub const MIN_RECOMMENDATION_LEN: usize = 10;

const LABELS: [&str; 3] = ["CHAKRA", "ANALYSIS", "RECOMMENDATIONS"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChakraAnalysis {
    pub chakra: String,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

pub fn fallback_chakra_analysis() -> ChakraAnalysis {
    ChakraAnalysis {
        chakra: "Heart Chakra".to_string(),
        analysis: "The symptoms you describe often reflect an imbalance in the heart \
                   center, where stress and emotional strain tend to collect."
            .to_string(),
        recommendations: vec![
            "Practice five minutes of slow, deep breathing into the chest each morning."
                .to_string(),
            "Spend quiet time in nature and notice what you feel grateful for.".to_string(),
            "Try a gentle heart-opening yoga pose such as supported fish or cobra."
                .to_string(),
        ],
    }
}

pub fn chakra_prompt(symptoms: &[String]) -> String {
    let list = symptoms
        .iter()
        .map(|s| format!("- {s}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You are an experienced energy healer who works with the seven chakras.\n\
         A client reports the following symptoms:\n{list}\n\n\
         Identify the one to three chakras most likely to be out of balance. \
         For each chakra use exactly this format:\n\
         CHAKRA: <chakra name>\n\
         ANALYSIS: <two or three sentences linking the symptoms to this chakra>\n\
         RECOMMENDATIONS:\n\
         1. <practical recommendation>\n\
         2. <practical recommendation>\n\
         3. <practical recommendation>\n\n\
         Do not add any other text."
    )
}

fn recommendations(body: &str) -> Vec<String> {
    list_items(body)
        .into_iter()
        .filter(|r| r.chars().count() >= MIN_RECOMMENDATION_LEN)
        .take(MAX_RECOMMENDATIONS)
        .collect()
}

fn decode_block(block: &[Section]) -> Option<ChakraAnalysis> {
    let chakra = paragraph(first_body(block, "CHAKRA")?);
    let analysis = paragraph(first_body(block, "ANALYSIS")?);
    if chakra.is_empty() || analysis.is_empty() {
        return None;
    }
    let recommendations = first_body(block, "RECOMMENDATIONS")
        .map(recommendations)
        .unwrap_or_default();
    Some(ChakraAnalysis {
        chakra,
        analysis,
        recommendations,
    })
}

/// Split the reply into `CHAKRA:` blocks; blocks missing a chakra name or
/// analysis are dropped. No usable block yields the fallback record.
pub fn decode_chakra_analysis(reply: &str) -> Generated<Vec<ChakraAnalysis>> {
    let parsed = sections(reply, &LABELS);

    let mut blocks: Vec<Vec<Section>> = Vec::new();
    for section in parsed {
        if section.label == "CHAKRA" || blocks.is_empty() {
            blocks.push(Vec::new());
        }
        if let Some(block) = blocks.last_mut() {
            block.push(section);
        }
    }

    let analyses: Vec<ChakraAnalysis> = blocks.iter().filter_map(|b| decode_block(b)).collect();
    if analyses.is_empty() {
        Generated::fallback(vec![fallback_chakra_analysis()])
    } else {
        Generated::decoded(analyses)
    }
}

/// Map reported symptoms to likely chakra imbalances.
pub async fn analyze_chakras(
    generator: &dyn TextGenerator,
    symptoms: &[String],
) -> Result<Generated<Vec<ChakraAnalysis>>, DomainError> {
    let symptoms: Vec<String> = symptoms
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if symptoms.is_empty() {
        return Err(DomainError::Validation(
            "At least one symptom is required".to_string(),
        ));
    }

    let request = GenerationRequest::new(chakra_prompt(&symptoms)).with_options(
        GenerationOptions {
            temperature: Some(0.7),
            num_predict: Some(800),
            ..Default::default()
        },
    );
    let reply = generator.generate(request).await?;
    Ok(decode_chakra_analysis(&reply).logged("chakra-analysis"))
}
