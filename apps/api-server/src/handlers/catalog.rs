//! Slug-addressed content: public directory pages and admin CRUD.
//!
//! Handlers are generic over the record type; [`CatalogRoute`] picks the
//! matching service out of the application state.

use actix_web::{HttpResponse, web};
use aura_core::domain::{
    Affirmation, BlogPost, Catalogued, GlossaryTerm, Herb, Product, ProductReview,
};
use aura_core::listing::ListQuery;
use aura_core::services::CatalogService;
use aura_shared::dto::{DeletedResponse, ReviewRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// A catalogue type served over HTTP.
pub trait CatalogRoute: Catalogued + Serialize {
    fn service(state: &AppState) -> &CatalogService<Self>;
}

macro_rules! catalog_route {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl CatalogRoute for $ty {
                fn service(state: &AppState) -> &CatalogService<Self> {
                    &state.$field
                }
            }
        )*
    };
}

catalog_route!(
    Herb => herbs,
    GlossaryTerm => glossary,
    Product => products,
    Affirmation => affirmations,
    BlogPost => blog,
);

/// GET /api/{catalog}?letter=&search=&page=
pub async fn list<T>(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse>
where
    T: CatalogRoute,
    T::Draft: DeserializeOwned,
{
    let listing = T::service(&state).list(&query, false).await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// GET /api/{catalog}/{slug}
pub async fn get_by_slug<T>(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse>
where
    T: CatalogRoute,
    T::Draft: DeserializeOwned,
{
    let record = T::service(&state).get_by_slug(&path, false).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// POST /api/products/{slug}/reviews
pub async fn add_review(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ReviewRequest>,
) -> AppResult<HttpResponse> {
    let ReviewRequest {
        author,
        rating,
        text,
    } = body.into_inner();
    let review = ProductReview::new(author, rating, text)?;
    let product = state.products.add_review(&path, review).await?;
    tracing::info!(slug = %product.slug, reviews = product.reviews.len(), "Product review added");
    Ok(HttpResponse::Created().json(product))
}

/// GET /api/admin/{catalog}, hidden records included.
pub async fn admin_list<T>(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse>
where
    T: CatalogRoute,
    T::Draft: DeserializeOwned,
{
    let listing = T::service(&state).list(&query, true).await?;
    Ok(HttpResponse::Ok().json(listing))
}

/// POST /api/admin/{catalog}
pub async fn create<T>(
    admin: AdminIdentity,
    state: web::Data<AppState>,
    body: web::Json<T::Draft>,
) -> AppResult<HttpResponse>
where
    T: CatalogRoute,
    T::Draft: DeserializeOwned,
{
    let record = T::service(&state).create(body.into_inner()).await?;
    tracing::debug!(admin = %admin.subject, entity = T::ENTITY, "Catalog record created");
    Ok(HttpResponse::Created().json(record))
}

/// PUT /api/admin/{catalog}/{id}
pub async fn update<T>(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<T::Draft>,
) -> AppResult<HttpResponse>
where
    T: CatalogRoute,
    T::Draft: DeserializeOwned,
{
    let record = T::service(&state)
        .update(path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

/// DELETE /api/admin/{catalog}/{id}
pub async fn delete<T>(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse>
where
    T: CatalogRoute,
    T::Draft: DeserializeOwned,
{
    let id = path.into_inner();
    T::service(&state).delete(id).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse { id, deleted: true }))
}

/// Public listing and lookup routes for one catalogue.
pub fn public_scope<T>(path: &str) -> actix_web::Scope
where
    T: CatalogRoute,
    T::Draft: DeserializeOwned,
{
    web::scope(path)
        .route("", web::get().to(list::<T>))
        .route("/{slug}", web::get().to(get_by_slug::<T>))
}

/// Admin CRUD routes for one catalogue.
pub fn admin_scope<T>(path: &str) -> actix_web::Scope
where
    T: CatalogRoute,
    T::Draft: DeserializeOwned,
{
    web::scope(path)
        .route("", web::get().to(admin_list::<T>))
        .route("", web::post().to(create::<T>))
        .route("/{id}", web::put().to(update::<T>))
        .route("/{id}", web::delete().to(delete::<T>))
}
