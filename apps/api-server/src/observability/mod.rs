//! Observability helpers - request IDs and PII masking for logs.

mod request_id;

pub use request_id::{RequestId, RequestIdMiddleware};

/// Mask an email address for logging: `jane@example.com` -> `j***@example.com`.
pub fn mask_email(email: &str) -> String {
    let Some(at_pos) = email.find('@') else {
        return "***".to_string();
    };
    let (local, domain) = email.split_at(at_pos);
    match local.chars().next() {
        Some(first) if local.chars().count() > 1 => format!("{first}***{domain}"),
        _ => format!("***{domain}"),
    }
}
