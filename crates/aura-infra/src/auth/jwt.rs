//! Verification of identity-provider access tokens.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;

use aura_core::ports::{AuthError, TokenClaims, TokenVerifier};

/// JWT verifier configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 shared secret of the identity provider.
    pub secret: String,
    /// Expected `iss` claim. Not checked when `None`.
    pub issuer: Option<String>,
}

/// Claims as issued by the identity provider.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
    exp: i64,
}

/// Verifies HS256 access tokens. This service never issues tokens.
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::default();
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(TokenClaims {
            subject: token_data.claims.sub,
            email: token_data.claims.email,
            roles: token_data.claims.roles,
            exp: token_data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct IssuedClaims<'a> {
        sub: &'a str,
        roles: Vec<&'a str>,
        exp: i64,
        iss: &'a str,
    }

    fn issue(secret: &str, issuer: &str, roles: Vec<&str>, ttl: TimeDelta) -> String {
        let claims = IssuedClaims {
            sub: "user-42",
            roles,
            exp: (Utc::now() + ttl).timestamp(),
            iss: issuer,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn verifier() -> JwtVerifier {
        JwtVerifier::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            issuer: Some("test-idp".to_string()),
        })
    }

    #[test]
    fn test_verify_success() {
        let token = issue("test-secret-key", "test-idp", vec!["admin"], TimeDelta::hours(1));

        let claims = verifier().verify(&token).unwrap();

        assert_eq!(claims.subject, "user-42");
        assert!(claims.has_role("admin"));
        assert_eq!(claims.email, None);
    }

    #[test]
    fn test_verify_invalid_token() {
        let result = verifier().verify("invalid-token");

        assert!(matches!(result.unwrap_err(), AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let token = issue("other-secret", "test-idp", vec![], TimeDelta::hours(1));

        assert!(verifier().verify(&token).is_err());
    }

    #[test]
    fn test_verify_wrong_issuer() {
        let token = issue("test-secret-key", "someone-else", vec![], TimeDelta::hours(1));

        assert!(verifier().verify(&token).is_err());
    }

    #[test]
    fn test_verify_expired() {
        let token = issue("test-secret-key", "test-idp", vec![], TimeDelta::hours(-2));

        assert!(matches!(
            verifier().verify(&token).unwrap_err(),
            AuthError::TokenExpired
        ));
    }
}
