//! Admin authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use aura_core::ports::{AuthError, TokenClaims};
use aura_shared::ErrorResponse;

use crate::state::AppState;

/// Verified administrator identity.
///
/// Add it as a handler argument to restrict a route to admins:
/// ```ignore
/// async fn moderate(_admin: AdminIdentity, ...) -> AppResult<HttpResponse> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub subject: String,
}

impl From<TokenClaims> for AdminIdentity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.subject,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub enum AuthenticationError {
    Rejected(AuthError),
    /// No signing secret configured, so no token can be accepted.
    NotConfigured,
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthenticationError::Rejected(e) => write!(f, "{}", e),
            AuthenticationError::NotConfigured => write!(f, "Admin authentication not configured"),
        }
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AuthenticationError::Rejected(AuthError::InsufficientPermissions) => {
                actix_web::http::StatusCode::FORBIDDEN
            }
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match self {
            AuthenticationError::Rejected(AuthError::TokenExpired) => {
                ErrorResponse::new(401, "Token Expired")
                    .with_detail("Your authentication token has expired. Please login again.")
            }
            AuthenticationError::Rejected(AuthError::InvalidToken(msg)) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthenticationError::Rejected(AuthError::MissingAuth) => {
                ErrorResponse::new(401, "Authentication Required")
                    .with_detail("Please provide a valid Bearer token in the Authorization header.")
            }
            AuthenticationError::Rejected(AuthError::InsufficientPermissions) => {
                ErrorResponse::forbidden().with_detail("Administrator role required.")
            }
            AuthenticationError::NotConfigured => ErrorResponse::unauthorized()
                .with_detail("Admin authentication is not configured"),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

fn authenticate(req: &HttpRequest) -> Result<AdminIdentity, AuthenticationError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AuthenticationError::NotConfigured
    })?;
    let verifier = state
        .verifier
        .as_ref()
        .ok_or(AuthenticationError::NotConfigured)?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthenticationError::Rejected(AuthError::MissingAuth))?;

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AuthenticationError::Rejected(AuthError::InvalidToken(
                "Expected Bearer token".to_string(),
            ))
        })?;

    let claims = verifier
        .verify(token.trim())
        .map_err(AuthenticationError::Rejected)?;

    if !claims.has_role(&state.admin_role) {
        tracing::warn!(subject = %claims.subject, "Admin route denied: missing role");
        return Err(AuthenticationError::Rejected(
            AuthError::InsufficientPermissions,
        ));
    }

    Ok(AdminIdentity::from(claims))
}

impl FromRequest for AdminIdentity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
