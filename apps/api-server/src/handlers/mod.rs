//! HTTP route handlers.

mod admin;
mod ai;
mod catalog;
mod health;
mod stories;
mod testimonials;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use actix_web::web;
use aura_core::domain::{
    Affirmation, BlogPost, GlossaryTerm, Herb, Product, StoryComment, Testimonial, UserStory,
};
use aura_core::ports::RateLimiter;
use aura_shared::dto::FeaturedQuery;

use crate::middleware::error::{json_error_handler, query_error_handler};
use crate::middleware::rate_limit::RateLimitMiddleware;

/// Featured rotation size when the client does not ask for one.
const DEFAULT_FEATURED: usize = 3;
const MAX_FEATURED: usize = 12;

fn featured_limit(query: &FeaturedQuery) -> usize {
    query.limit.unwrap_or(DEFAULT_FEATURED).clamp(1, MAX_FEATURED)
}

/// Configure all application routes.
///
/// Public submissions and the AI widgets are rate limited per client IP.
pub fn configure_routes(cfg: &mut web::ServiceConfig, limiter: Arc<dyn RateLimiter>) {
    let limited = || RateLimitMiddleware::new(limiter.clone());

    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/testimonials")
                        .service(
                            web::resource("/submit")
                                .wrap(limited())
                                .route(web::post().to(testimonials::submit)),
                        )
                        .route("", web::get().to(testimonials::list))
                        .route("/featured", web::get().to(testimonials::featured)),
                )
                .service(
                    web::scope("/user-stories")
                        .service(
                            web::resource("/submit")
                                .wrap(limited())
                                .route(web::post().to(stories::submit)),
                        )
                        .route("", web::get().to(stories::list))
                        .route("/featured", web::get().to(stories::featured))
                        .route("/{id}", web::get().to(stories::get))
                        .route("/{id}/comments", web::get().to(stories::list_comments))
                        .service(
                            web::resource("/{id}/comments")
                                .wrap(limited())
                                .route(web::post().to(stories::submit_comment)),
                        ),
                )
                .service(catalog::public_scope::<Herb>("/herbs"))
                .service(catalog::public_scope::<GlossaryTerm>("/glossary"))
                .service(catalog::public_scope::<Affirmation>("/affirmations"))
                .service(
                    catalog::public_scope::<Product>("/products").service(
                        web::resource("/{slug}/reviews")
                            .wrap(limited())
                            .route(web::post().to(catalog::add_review)),
                    ),
                )
                // Registered ahead of the blog scope so `generate` is never read as a slug.
                .route("/blog/generate", web::post().to(ai::generate_blog))
                .service(catalog::public_scope::<BlogPost>("/blog"))
                .service(
                    web::scope("/ai")
                        .wrap(limited())
                        .route("/affirmations", web::post().to(ai::affirmations))
                        .route("/chakra-analysis", web::post().to(ai::chakra_analysis))
                        .route("/journal/analyze", web::post().to(ai::journal_analyze))
                        .route("/journal/prompts", web::post().to(ai::journal_prompts))
                        .route("/journal/patterns", web::post().to(ai::journal_patterns))
                        .route("/models", web::get().to(ai::models)),
                )
                .service(
                    web::scope("/admin")
                        .service(admin::moderation_resource::<Testimonial>("/testimonials"))
                        .service(admin::moderation_resource::<UserStory>("/user-stories"))
                        .service(admin::moderation_resource::<StoryComment>("/comments"))
                        .service(catalog::admin_scope::<Herb>("/herbs"))
                        .service(catalog::admin_scope::<GlossaryTerm>("/glossary"))
                        .service(catalog::admin_scope::<Product>("/products"))
                        .service(catalog::admin_scope::<Affirmation>("/affirmations"))
                        .service(catalog::admin_scope::<BlogPost>("/blog"))
                        .route("/ai/generate", web::post().to(ai::generate_text)),
                ),
        );
}
