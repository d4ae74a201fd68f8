//! Admin moderation queues for user-submitted content.

use actix_web::{HttpResponse, web};
use aura_core::domain::{
    Moderated, ModerationAction, ModerationOutcome, ModerationStatus, StoryComment, Testimonial,
    UserStory,
};
use aura_core::services::ModerationService;
use aura_shared::dto::{DeletedResponse, ModerationRequest, StatusQuery};
use serde::Serialize;

use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// A moderated type with an admin queue.
pub trait ModerationRoute: Moderated + Serialize {
    fn service(state: &AppState) -> &ModerationService<Self>;
}

impl ModerationRoute for Testimonial {
    fn service(state: &AppState) -> &ModerationService<Self> {
        &state.testimonials
    }
}

impl ModerationRoute for UserStory {
    fn service(state: &AppState) -> &ModerationService<Self> {
        &state.stories
    }
}

impl ModerationRoute for StoryComment {
    fn service(state: &AppState) -> &ModerationService<Self> {
        state.comments.moderation()
    }
}

/// GET /api/admin/{queue}?status=pending|approved|all
///
/// Full records, emails included.
pub async fn list<T: ModerationRoute>(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    query: web::Query<StatusQuery>,
) -> AppResult<HttpResponse> {
    let status = match query.status.as_deref() {
        Some(raw) => raw.parse::<ModerationStatus>()?,
        None => ModerationStatus::default(),
    };
    let records = T::service(&state).list(status).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// PATCH /api/admin/{queue} with `{id, action, featured?}`.
pub async fn moderate<T: ModerationRoute>(
    admin: AdminIdentity,
    state: web::Data<AppState>,
    body: web::Json<ModerationRequest>,
) -> AppResult<HttpResponse> {
    let ModerationRequest {
        id,
        action,
        featured,
    } = body.into_inner();
    let action = ModerationAction::parse(&action, featured)?;

    tracing::info!(
        admin = %admin.subject,
        entity = T::ENTITY,
        %id,
        action = action.name(),
        "Moderation requested"
    );

    match T::service(&state).moderate(id, action).await? {
        ModerationOutcome::Updated(record) => Ok(HttpResponse::Ok().json(record)),
        ModerationOutcome::Deleted(id) => {
            Ok(HttpResponse::Ok().json(DeletedResponse { id, deleted: true }))
        }
    }
}

/// List and moderation routes for one queue.
pub fn moderation_resource<T: ModerationRoute>(path: &str) -> actix_web::Resource {
    web::resource(path)
        .route(web::get().to(list::<T>))
        .route(web::patch().to(moderate::<T>))
}
