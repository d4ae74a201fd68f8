//! Application state - shared across all handlers.

use std::sync::Arc;

use aura_core::domain::{
    Affirmation, BlogPost, GlossaryTerm, Herb, Product, StoryComment, Testimonial, UserStory,
};
use aura_core::ports::{
    CatalogRepository, GenerationError, ModerationRepository, RateLimitError, RateLimiter,
    StoryCommentRepository, TextGenerator, TokenVerifier,
};
use aura_core::services::{CatalogService, ModerationService, StoryCommentService};
use aura_infra::{
    InMemoryRateLimiter, InMemoryRepository, JwtConfig, JwtVerifier, OllamaClient,
};

use crate::config::{AppConfig, AuthConfig};

/// Failures that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid rate limit settings: {0}")]
    RateLimit(#[from] RateLimitError),

    #[error("Could not build the generation client: {0}")]
    Generation(#[from] GenerationError),
}

/// One repository per stored entity.
///
/// `comments` and `comment_moderation` must point at the same store.
pub struct Repositories {
    pub testimonials: Arc<dyn ModerationRepository<Testimonial>>,
    pub stories: Arc<dyn ModerationRepository<UserStory>>,
    pub comments: Arc<dyn StoryCommentRepository>,
    pub comment_moderation: Arc<dyn ModerationRepository<StoryComment>>,
    pub herbs: Arc<dyn CatalogRepository<Herb>>,
    pub glossary: Arc<dyn CatalogRepository<GlossaryTerm>>,
    pub products: Arc<dyn CatalogRepository<Product>>,
    pub affirmations: Arc<dyn CatalogRepository<Affirmation>>,
    pub blog: Arc<dyn CatalogRepository<BlogPost>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        let comments = InMemoryRepository::<StoryComment>::shared();
        Self {
            testimonials: InMemoryRepository::<Testimonial>::shared(),
            stories: InMemoryRepository::<UserStory>::shared(),
            comments: comments.clone(),
            comment_moderation: comments,
            herbs: InMemoryRepository::<Herb>::shared(),
            glossary: InMemoryRepository::<GlossaryTerm>::shared(),
            products: InMemoryRepository::<Product>::shared(),
            affirmations: InMemoryRepository::<Affirmation>::shared(),
            blog: InMemoryRepository::<BlogPost>::shared(),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(db: &aura_infra::DatabaseConnections) -> Self {
        use aura_infra::database::postgres_repo::{
            PostgresAffirmationRepository, PostgresBlogRepository, PostgresGlossaryRepository,
            PostgresHerbRepository, PostgresProductRepository, PostgresStoryCommentRepository,
            PostgresTestimonialRepository, PostgresUserStoryRepository,
        };

        let comments = Arc::new(PostgresStoryCommentRepository::new(db.main.clone()));
        Self {
            testimonials: Arc::new(PostgresTestimonialRepository::new(db.main.clone())),
            stories: Arc::new(PostgresUserStoryRepository::new(db.main.clone())),
            comments: comments.clone(),
            comment_moderation: comments,
            herbs: Arc::new(PostgresHerbRepository::new(db.main.clone())),
            glossary: Arc::new(PostgresGlossaryRepository::new(db.main.clone())),
            products: Arc::new(PostgresProductRepository::new(db.main.clone())),
            affirmations: Arc::new(PostgresAffirmationRepository::new(db.main.clone())),
            blog: Arc::new(PostgresBlogRepository::new(db.main.clone())),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub testimonials: ModerationService<Testimonial>,
    pub stories: ModerationService<UserStory>,
    pub comments: StoryCommentService,
    pub herbs: CatalogService<Herb>,
    pub glossary: CatalogService<GlossaryTerm>,
    pub products: CatalogService<Product>,
    pub affirmations: CatalogService<Affirmation>,
    pub blog: CatalogService<BlogPost>,
    pub generator: Arc<dyn TextGenerator>,
    /// `None` when no signing secret is configured; admin routes are then closed.
    pub verifier: Option<Arc<dyn TokenVerifier>>,
    pub limiter: Arc<dyn RateLimiter>,
    pub admin_role: String,
}

impl AppState {
    /// Wire services over the given repositories and adapters.
    pub fn assemble(
        repos: Repositories,
        generator: Arc<dyn TextGenerator>,
        verifier: Option<Arc<dyn TokenVerifier>>,
        limiter: Arc<dyn RateLimiter>,
        admin_role: String,
    ) -> Self {
        let stories = ModerationService::new(repos.stories);
        let comments = StoryCommentService::new(
            repos.comments,
            ModerationService::new(repos.comment_moderation),
            stories.clone(),
        );

        Self {
            testimonials: ModerationService::new(repos.testimonials),
            stories,
            comments,
            herbs: CatalogService::new(repos.herbs),
            glossary: CatalogService::new(repos.glossary),
            products: CatalogService::new(repos.products),
            affirmations: CatalogService::new(repos.affirmations),
            blog: CatalogService::new(repos.blog),
            generator,
            verifier,
            limiter,
            admin_role,
        }
    }

    /// Build the application state from configuration.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let repos = Self::repositories(config).await;
        let generator: Arc<dyn TextGenerator> = Arc::new(OllamaClient::new(config.ollama.clone())?);
        let limiter: Arc<dyn RateLimiter> =
            Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone())?);
        let verifier = token_verifier(&config.auth);

        tracing::info!(
            ollama_url = %config.ollama.base_url,
            model = %config.ollama.model,
            "Application state initialized"
        );

        Ok(Self::assemble(
            repos,
            generator,
            verifier,
            limiter,
            config.auth.admin_role.clone(),
        ))
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> Repositories {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Repositories::in_memory();
        };

        match aura_infra::DatabaseConnections::init(db_config).await {
            Ok(connections) => Repositories::postgres(&connections),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Repositories::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(_config: &AppConfig) -> Repositories {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Repositories::in_memory()
    }
}

fn token_verifier(auth: &AuthConfig) -> Option<Arc<dyn TokenVerifier>> {
    let Some(secret) = &auth.jwt_secret else {
        tracing::warn!("AUTH_JWT_SECRET not set. Admin API is disabled.");
        return None;
    };

    Some(Arc::new(JwtVerifier::new(JwtConfig {
        secret: secret.clone(),
        issuer: auth.jwt_issuer.clone(),
    })))
}
