//! AI activity widgets and the admin generation tools.

use actix_web::{HttpResponse, web};
use aura_core::ai::{self, BlogGenerationRequest, JournalEntrySummary};
use aura_core::ports::GenerationOptions;
use aura_shared::dto::{
    AffirmationsRequest, AffirmationsResponse, ChakraAnalysisRequest, GenerateTextRequest,
    GenerateTextResponse, JournalAnalysisRequest, PromptSuggestionRequest,
    PromptSuggestionResponse,
};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PatternsRequest {
    pub entries: Vec<JournalEntrySummary>,
}

/// Decoded value flattened next to its fallback flag.
#[derive(Serialize)]
struct Flattened<T: Serialize> {
    #[serde(flatten)]
    value: T,
    fallback: bool,
}

/// POST /api/ai/affirmations
pub async fn affirmations(
    state: web::Data<AppState>,
    body: web::Json<AffirmationsRequest>,
) -> AppResult<HttpResponse> {
    let generated = ai::generate_affirmations(
        state.generator.as_ref(),
        &body.mood,
        body.challenge.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(AffirmationsResponse {
        affirmations: generated.value,
        fallback: generated.fallback,
    }))
}

/// POST /api/ai/chakra-analysis
pub async fn chakra_analysis(
    state: web::Data<AppState>,
    body: web::Json<ChakraAnalysisRequest>,
) -> AppResult<HttpResponse> {
    let generated = ai::analyze_chakras(state.generator.as_ref(), &body.symptoms).await?;
    Ok(HttpResponse::Ok().json(json!({
        "analysis": generated.value,
        "fallback": generated.fallback,
    })))
}

/// POST /api/ai/journal/analyze
pub async fn journal_analyze(
    state: web::Data<AppState>,
    body: web::Json<JournalAnalysisRequest>,
) -> AppResult<HttpResponse> {
    let generated =
        ai::analyze_journal_entry(state.generator.as_ref(), &body.entry, body.mood.as_deref())
            .await?;
    Ok(HttpResponse::Ok().json(Flattened {
        value: generated.value,
        fallback: generated.fallback,
    }))
}

/// POST /api/ai/journal/prompts
pub async fn journal_prompts(
    state: web::Data<AppState>,
    body: web::Json<PromptSuggestionRequest>,
) -> AppResult<HttpResponse> {
    let generated = ai::suggest_prompts(
        state.generator.as_ref(),
        body.mood.as_deref(),
        &body.recent_topics,
    )
    .await?;
    Ok(HttpResponse::Ok().json(PromptSuggestionResponse {
        prompts: generated.value,
        fallback: generated.fallback,
    }))
}

/// POST /api/ai/journal/patterns
pub async fn journal_patterns(
    state: web::Data<AppState>,
    body: web::Json<PatternsRequest>,
) -> AppResult<HttpResponse> {
    let generated = ai::identify_patterns(state.generator.as_ref(), &body.entries).await?;
    Ok(HttpResponse::Ok().json(Flattened {
        value: generated.value,
        fallback: generated.fallback,
    }))
}

/// GET /api/ai/models
pub async fn models(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let models = state.generator.list_models().await?;
    Ok(HttpResponse::Ok().json(json!({ "models": models })))
}

/// POST /api/admin/ai/generate - raw prompt playground.
pub async fn generate_text(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    body: web::Json<GenerateTextRequest>,
) -> AppResult<HttpResponse> {
    let options = GenerationOptions {
        temperature: body.temperature,
        ..Default::default()
    };
    let text = ai::generate_text(state.generator.as_ref(), &body.prompt, options).await?;
    Ok(HttpResponse::Ok().json(GenerateTextResponse { text }))
}

/// POST /api/blog/generate
///
/// Streams the drafted HTML as it is generated. A client disconnect drops
/// the body stream and with it the upstream request.
pub async fn generate_blog(
    admin: AdminIdentity,
    state: web::Data<AppState>,
    body: web::Json<BlogGenerationRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    tracing::info!(admin = %admin.subject, keyword = %request.keyword, "Blog draft requested");

    let stream = ai::generate_blog_stream(state.generator.as_ref(), &request)
        .await?
        .map_ok(web::Bytes::from)
        .inspect_err(|e| tracing::error!(error = %e, "Blog stream interrupted"));

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .streaming(stream))
}
