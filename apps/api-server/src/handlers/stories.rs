//! Public user stories and their comments.

use actix_web::{HttpResponse, web};
use aura_core::domain::{NewStoryComment, NewUserStory, StoryComment, UserStory};
use aura_shared::dto::{FeaturedQuery, PublicComment, PublicUserStory, SubmissionResponse};
use uuid::Uuid;

use super::featured_limit;
use crate::middleware::error::AppResult;
use crate::observability::{RequestId, mask_email};
use crate::state::AppState;

fn public_story(s: UserStory) -> PublicUserStory {
    PublicUserStory {
        id: s.id,
        author_name: s.author_name,
        title: s.title,
        story: s.story,
        pain_type: s.pain_type,
        duration: s.duration,
        what_helped: s.what_helped,
        what_didnt_help: s.what_didnt_help,
        status: s.status,
        category: s.category,
        location: s.location,
        age: s.age,
        featured: s.featured,
        created_at: s.created_at,
    }
}

fn public_comment(c: StoryComment) -> PublicComment {
    PublicComment {
        id: c.id,
        story_id: c.story_id,
        author_name: c.author_name,
        text: c.text,
        created_at: c.created_at,
    }
}

/// POST /api/user-stories/submit
pub async fn submit(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<NewUserStory>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    tracing::info!(
        request_id = request_id.as_str(),
        email = %mask_email(&input.email),
        "User story submitted"
    );

    let saved = state.stories.submit(UserStory::new(input)).await?;
    Ok(HttpResponse::Created().json(SubmissionResponse {
        id: saved.id,
        approved: saved.approved,
        message: "Thank you for sharing. Your story will be published after review.".to_string(),
    }))
}

/// GET /api/user-stories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let items: Vec<PublicUserStory> = state
        .stories
        .list_public()
        .await?
        .into_iter()
        .map(public_story)
        .collect();
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/user-stories/featured?limit=
pub async fn featured(
    state: web::Data<AppState>,
    query: web::Query<FeaturedQuery>,
) -> AppResult<HttpResponse> {
    let items: Vec<PublicUserStory> = state
        .stories
        .featured_sample(featured_limit(&query))
        .await?
        .into_iter()
        .map(public_story)
        .collect();
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/user-stories/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let story = state.stories.get_public(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(public_story(story)))
}

/// GET /api/user-stories/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let items: Vec<PublicComment> = state
        .comments
        .list_public_for_story(path.into_inner())
        .await?
        .into_iter()
        .map(public_comment)
        .collect();
    Ok(HttpResponse::Ok().json(items))
}

/// POST /api/user-stories/{id}/comments
pub async fn submit_comment(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<Uuid>,
    body: web::Json<NewStoryComment>,
) -> AppResult<HttpResponse> {
    let story_id = path.into_inner();
    let input = body.into_inner();
    tracing::info!(
        request_id = request_id.as_str(),
        %story_id,
        email = %mask_email(&input.email),
        "Story comment submitted"
    );

    let saved = state.comments.submit(story_id, input).await?;
    Ok(HttpResponse::Created().json(SubmissionResponse {
        id: saved.id,
        approved: saved.approved,
        message: "Thank you! Your comment will appear once it has been reviewed.".to_string(),
    }))
}
