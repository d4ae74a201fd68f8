use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, http::StatusCode, test, web};
use async_trait::async_trait;
use aura_core::ports::{GenerationError, GenerationRequest, ModelInfo, TextGenerator, TextStream};
use aura_infra::{InMemoryRateLimiter, JwtConfig, JwtVerifier, RateLimitConfig};
use futures::stream;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::{Value, json};

use super::configure_routes;
use crate::observability::RequestIdMiddleware;
use crate::state::{AppState, Repositories};

const SECRET: &str = "handler-test-secret";

/// Answers every prompt with the same text, or fails with an upstream status.
struct FakeGenerator {
    reply: Result<String, u16>,
}

impl FakeGenerator {
    fn replying(reply: &str) -> Arc<dyn TextGenerator> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
        })
    }

    fn failing(status: u16) -> Arc<dyn TextGenerator> {
        Arc::new(Self { reply: Err(status) })
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, GenerationError> {
        self.reply
            .clone()
            .map_err(|status| GenerationError::Upstream { status })
    }

    async fn generate_stream(
        &self,
        request: GenerationRequest,
    ) -> Result<TextStream, GenerationError> {
        let reply = self.generate(request).await?;
        let chunks: Vec<Result<String, GenerationError>> = reply
            .split_inclusive(' ')
            .map(|s| Ok(s.to_string()))
            .collect();
        Ok(Box::pin(stream::iter(chunks)))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError> {
        Ok(vec![ModelInfo {
            name: "llama3.2".to_string(),
            size: None,
            modified_at: None,
        }])
    }
}

fn state_with(generator: Arc<dyn TextGenerator>, max_requests: u32) -> AppState {
    let limiter = InMemoryRateLimiter::new(RateLimitConfig {
        max_requests,
        window: Duration::from_secs(60),
    })
    .unwrap();
    let verifier = JwtVerifier::new(JwtConfig {
        secret: SECRET.to_string(),
        issuer: None,
    });
    AppState::assemble(
        Repositories::in_memory(),
        generator,
        Some(Arc::new(verifier)),
        Arc::new(limiter),
        "admin".to_string(),
    )
}

fn default_state() -> AppState {
    state_with(FakeGenerator::replying(""), 100)
}

macro_rules! app {
    ($state:expr) => {{
        let state: AppState = $state;
        let limiter = state.limiter.clone();
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(state))
                .configure(move |cfg| configure_routes(cfg, limiter)),
        )
        .await
    }};
}

#[derive(Serialize)]
struct TestClaims<'a> {
    sub: &'a str,
    email: &'a str,
    roles: Vec<&'a str>,
    exp: i64,
}

fn token(roles: &[&str]) -> String {
    let claims = TestClaims {
        sub: "admin-1",
        email: "owner@example.com",
        roles: roles.to_vec(),
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn bearer(roles: &[&str]) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token(roles)))
}

fn testimonial(name: &str, text: &str) -> Value {
    json!({
        "clientName": name,
        "email": "jane.doe@example.com",
        "rating": 5,
        "testimonialText": text,
    })
}

#[actix_web::test]
async fn test_health_echoes_request_id() {
    let app = app!(default_state());

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "trace-me"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-me");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["adminEnabled"], true);
}

#[actix_web::test]
async fn test_testimonial_moderation_end_to_end() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/testimonials/submit")
        .set_json(testimonial("J.D.", "Changed my life"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["approved"], false);
    let keep_id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/testimonials/submit")
        .set_json(testimonial("Spam", "Buy my course"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let deny_id = created["id"].as_str().unwrap().to_string();

    // Nothing is public before review.
    let req = test::TestRequest::get().uri("/api/testimonials").to_request();
    let public: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(public.as_array().unwrap().len(), 0);

    let req = test::TestRequest::patch()
        .uri("/api/admin/testimonials")
        .insert_header(bearer(&["admin"]))
        .set_json(json!({ "id": keep_id, "action": "approve", "featured": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let approved: Value = test::read_body_json(resp).await;
    assert_eq!(approved["approved"], true);
    assert_eq!(approved["featured"], true);

    let req = test::TestRequest::get().uri("/api/testimonials").to_request();
    let public: Value = test::call_and_read_body_json(&app, req).await;
    let items = public.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], keep_id.as_str());
    assert_eq!(items[0]["featured"], true);
    assert!(items[0].get("email").is_none());

    let req = test::TestRequest::get()
        .uri("/api/testimonials/featured?limit=5")
        .to_request();
    let featured: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(featured.as_array().unwrap().len(), 1);

    let req = test::TestRequest::patch()
        .uri("/api/admin/testimonials")
        .insert_header(bearer(&["admin"]))
        .set_json(json!({ "id": deny_id, "action": "deny" }))
        .to_request();
    let denied: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(denied["deleted"], true);
    assert_eq!(denied["id"], deny_id.as_str());

    let req = test::TestRequest::get()
        .uri("/api/admin/testimonials?status=all")
        .insert_header(bearer(&["admin"]))
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["id"], keep_id.as_str());
    // Admins see the private fields.
    assert_eq!(all[0]["email"], "jane.doe@example.com");
}

#[actix_web::test]
async fn test_admin_routes_require_admin_role() {
    let app = app!(default_state());

    let req = test::TestRequest::get()
        .uri("/api/admin/testimonials")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 401);

    let req = test::TestRequest::get()
        .uri("/api/admin/testimonials")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/admin/testimonials")
        .insert_header(bearer(&["editor"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_disabled_without_verifier() {
    let mut state = default_state();
    state.verifier = None;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/api/admin/comments")
        .insert_header(bearer(&["admin"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Admin authentication is not configured");
}

#[actix_web::test]
async fn test_unknown_moderation_action_is_rejected() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/testimonials/submit")
        .set_json(testimonial("A.B.", "Lovely session"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::patch()
        .uri("/api/admin/testimonials")
        .insert_header(bearer(&["admin"]))
        .set_json(json!({ "id": created["id"], "action": "publish" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/admin/testimonials?status=archived")
        .insert_header(bearer(&["admin"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_story_comments_follow_moderation() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/user-stories/submit")
        .set_json(json!({
            "authorName": "M.",
            "email": "m@example.com",
            "title": "Back pain",
            "story": "Ten years of it, then slowly better.",
        }))
        .to_request();
    let story: Value = test::call_and_read_body_json(&app, req).await;
    let story_id = story["id"].as_str().unwrap().to_string();
    let comment = json!({
        "authorName": "K.",
        "email": "k@example.com",
        "text": "Same here, thank you.",
    });

    // Unapproved stories cannot be read or commented on.
    let req = test::TestRequest::post()
        .uri(&format!("/api/user-stories/{story_id}/comments"))
        .set_json(&comment)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::patch()
        .uri("/api/admin/user-stories")
        .insert_header(bearer(&["admin"]))
        .set_json(json!({ "id": story_id, "action": "approve" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/user-stories/{story_id}"))
        .to_request();
    let public: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(public["title"], "Back pain");
    assert!(public.get("email").is_none());

    let req = test::TestRequest::post()
        .uri(&format!("/api/user-stories/{story_id}/comments"))
        .set_json(&comment)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;

    let comments_uri = format!("/api/user-stories/{story_id}/comments");
    let req = test::TestRequest::get().uri(&comments_uri).to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 0);

    let req = test::TestRequest::patch()
        .uri("/api/admin/comments")
        .insert_header(bearer(&["admin"]))
        .set_json(json!({ "id": created["id"], "action": "approve" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri(&comments_uri).to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["text"], "Same here, thank you.");
    assert!(listed[0].get("email").is_none());
}

#[actix_web::test]
async fn test_herb_crud_and_directory() {
    let app = app!(default_state());

    let mut slugs = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/admin/herbs")
            .insert_header(bearer(&["admin"]))
            .set_json(json!({ "name": "Holy Basil", "category": "Herbs" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let herb: Value = test::read_body_json(resp).await;
        slugs.push((
            herb["slug"].as_str().unwrap().to_string(),
            herb["id"].as_str().unwrap().to_string(),
        ));
    }
    assert_eq!(slugs[0].0, "holy-basil");
    assert_eq!(slugs[1].0, "holy-basil-2");

    let req = test::TestRequest::get()
        .uri("/api/herbs?letter=h&search=basil")
        .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing["totalItems"], 2);
    assert_eq!(listing["page"], 1);
    assert_eq!(listing["letters"], json!(["H"]));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/herbs/{}", slugs[1].1))
        .insert_header(bearer(&["admin"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/herbs/holy-basil-2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Not Found");

    let req = test::TestRequest::get().uri("/api/herbs/holy-basil").to_request();
    let herb: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(herb["name"], "Holy Basil");
}

#[actix_web::test]
async fn test_draft_blog_posts_only_visible_to_admins() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/admin/blog")
        .insert_header(bearer(&["admin"]))
        .set_json(json!({ "title": "Grounding Basics", "content": "<p>Soon</p>" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/blog").to_request();
    let public: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(public["totalItems"], 0);

    let req = test::TestRequest::get()
        .uri("/api/admin/blog")
        .insert_header(bearer(&["admin"]))
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all["totalItems"], 1);
}

#[actix_web::test]
async fn test_product_review_appended() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/admin/products")
        .insert_header(bearer(&["admin"]))
        .set_json(json!({ "name": "Singing Bowl", "pricing": "one-time" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/products/singing-bowl/reviews")
        .set_json(json!({ "author": "Ana", "rating": 5, "text": "Deep tone" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = test::read_body_json(resp).await;
    assert_eq!(product["reviews"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri("/api/products/singing-bowl/reviews")
        .set_json(json!({ "author": "Ana", "rating": 9, "text": "Too loud" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Admin edits neither drop visitor reviews nor inject their own.
    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/products/{id}"))
        .insert_header(bearer(&["admin"]))
        .set_json(json!({
            "name": "Singing Bowl",
            "description": "Hand hammered",
            "reviews": [{ "author": "Bot", "rating": 200, "text": "!", "createdAt": "2026-01-01T00:00:00Z" }],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = test::read_body_json(resp).await;
    assert_eq!(product["description"], "Hand hammered");
    let reviews = product["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["author"], "Ana");
}

#[actix_web::test]
async fn test_affirmations_decoded_and_fallback() {
    let app = app!(state_with(
        FakeGenerator::replying("1. I am calm.\n2. I am safe.\n3. I am whole."),
        100
    ));
    let req = test::TestRequest::post()
        .uri("/api/ai/affirmations")
        .set_json(json!({ "mood": "anxious" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["fallback"], false);
    assert_eq!(
        body["affirmations"],
        json!(["I am calm.", "I am safe.", "I am whole."])
    );

    let app = app!(state_with(
        FakeGenerator::replying("I could not think of anything."),
        100
    ));
    let req = test::TestRequest::post()
        .uri("/api/ai/affirmations")
        .set_json(json!({ "mood": "tired", "challenge": "work" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["fallback"], true);
    assert_eq!(body["affirmations"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_upstream_failure_is_bad_gateway() {
    let app = app!(state_with(FakeGenerator::failing(500), 100));

    let req = test::TestRequest::post()
        .uri("/api/ai/chakra-analysis")
        .set_json(json!({ "symptoms": ["tight chest"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 502);
}

#[actix_web::test]
async fn test_ai_routes_are_rate_limited() {
    let app = app!(state_with(FakeGenerator::replying("1. One"), 1));
    let client: SocketAddr = "203.0.113.7:40000".parse().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/ai/journal/prompts")
        .peer_addr(client)
        .set_json(json!({ "recentTopics": ["sleep"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/ai/journal/prompts")
        .peer_addr(client)
        .set_json(json!({ "recentTopics": ["sleep"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key("retry-after"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 429);
    assert!(body["request_id"].is_string());

    // Reads outside the limited routes are unaffected.
    let req = test::TestRequest::get()
        .uri("/api/testimonials")
        .peer_addr(client)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_blog_generation_streams_html() {
    let html = "<h2>Grounding</h2> <p>Walk barefoot on the grass.</p>";
    let app = app!(state_with(FakeGenerator::replying(html), 100));

    let req = test::TestRequest::post()
        .uri("/api/blog/generate")
        .insert_header(bearer(&["admin"]))
        .set_json(json!({ "keyword": "grounding", "length": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
    let body = test::read_body(resp).await;
    assert_eq!(body, html.as_bytes());

    let req = test::TestRequest::post()
        .uri("/api/blog/generate")
        .set_json(json!({ "keyword": "grounding" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_malformed_json_is_problem_details() {
    let app = app!(default_state());

    let req = test::TestRequest::post()
        .uri("/api/ai/journal/analyze")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Bad Request");
}

#[actix_web::test]
async fn test_models_listed() {
    let app = app!(default_state());

    let req = test::TestRequest::get().uri("/api/ai/models").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["models"][0]["name"], "llama3.2");
}
