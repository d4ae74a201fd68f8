//! Public testimonial submission and listings.

use actix_web::{HttpResponse, web};
use aura_core::domain::{NewTestimonial, Testimonial};
use aura_shared::dto::{FeaturedQuery, PublicTestimonial, SubmissionResponse};

use super::featured_limit;
use crate::middleware::error::AppResult;
use crate::observability::{RequestId, mask_email};
use crate::state::AppState;

fn public_view(t: Testimonial) -> PublicTestimonial {
    PublicTestimonial {
        id: t.id,
        client_name: t.client_name,
        rating: t.rating,
        testimonial_text: t.testimonial_text,
        issue: t.issue,
        outcome: t.outcome,
        session_type: t.session_type,
        location: t.location,
        featured: t.featured,
        created_at: t.created_at,
    }
}

/// POST /api/testimonials/submit
pub async fn submit(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<NewTestimonial>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    tracing::info!(
        request_id = request_id.as_str(),
        email = %mask_email(&input.email),
        rating = input.rating,
        "Testimonial submitted"
    );

    let saved = state.testimonials.submit(Testimonial::new(input)).await?;
    Ok(HttpResponse::Created().json(SubmissionResponse {
        id: saved.id,
        approved: saved.approved,
        message: "Thank you! Your testimonial will appear once it has been reviewed.".to_string(),
    }))
}

/// GET /api/testimonials
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let items: Vec<PublicTestimonial> = state
        .testimonials
        .list_public()
        .await?
        .into_iter()
        .map(public_view)
        .collect();
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/testimonials/featured?limit=
pub async fn featured(
    state: web::Data<AppState>,
    query: web::Query<FeaturedQuery>,
) -> AppResult<HttpResponse> {
    let items: Vec<PublicTestimonial> = state
        .testimonials
        .featured_sample(featured_limit(&query))
        .await?
        .into_iter()
        .map(public_view)
        .collect();
    Ok(HttpResponse::Ok().json(items))
}
