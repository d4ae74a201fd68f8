//! Approval workflow shared by user-submitted content.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// A record that is hidden from the public until an admin approves it.
///
/// `approved` starts out false on every submission. `featured` is only
/// meaningful once the record is approved; entities without a featured flag
/// keep the default `featured`/`set_featured` implementations.
pub trait Moderated: Clone + Send + Sync + 'static {
    /// Entity name used in errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;

    fn is_approved(&self) -> bool;

    fn set_approved(&mut self, approved: bool);

    /// `None` when the entity has no featured flag.
    fn featured(&self) -> Option<bool> {
        None
    }

    fn set_featured(&mut self, _featured: bool) {}

    fn created_at(&self) -> DateTime<Utc>;

    /// Bump `updated_at`.
    fn touch(&mut self);

    /// Validate the publicly submitted fields.
    fn validate(&self) -> Result<(), DomainError>;
}

/// Admin listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    #[default]
    Pending,
    Approved,
    All,
}

impl ModerationStatus {
    pub fn matches(self, approved: bool) -> bool {
        match self {
            ModerationStatus::Pending => !approved,
            ModerationStatus::Approved => approved,
            ModerationStatus::All => true,
        }
    }
}

impl FromStr for ModerationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ModerationStatus::Pending),
            "approved" => Ok(ModerationStatus::Approved),
            "all" => Ok(ModerationStatus::All),
            other => Err(DomainError::Validation(format!(
                "Unknown status '{other}', expected pending, approved or all"
            ))),
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::All => "all",
        };
        f.write_str(s)
    }
}

/// An admin transition on a moderated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    /// Set `approved`; `featured: true` approves and features in one step.
    Approve { featured: bool },
    /// Permanently delete the record.
    Deny,
    /// Flip `featured` on an already approved record.
    ToggleFeatured,
}

impl ModerationAction {
    /// Build an action from the wire form `{action, featured?}`.
    pub fn parse(action: &str, featured: Option<bool>) -> Result<Self, DomainError> {
        match action.trim() {
            "approve" => Ok(ModerationAction::Approve {
                featured: featured.unwrap_or(false),
            }),
            "deny" => Ok(ModerationAction::Deny),
            "toggle-featured" => Ok(ModerationAction::ToggleFeatured),
            other => Err(DomainError::Validation(format!(
                "Unknown action '{other}', expected approve, deny or toggle-featured"
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModerationAction::Approve { .. } => "approve",
            ModerationAction::Deny => "deny",
            ModerationAction::ToggleFeatured => "toggle-featured",
        }
    }

    /// Apply a non-destructive action to a record in place.
    ///
    /// Returns `Ok(false)` for `Deny`, which the caller turns into a delete.
    pub fn apply<T: Moderated>(self, record: &mut T) -> Result<bool, DomainError> {
        match self {
            ModerationAction::Approve { featured } => {
                record.set_approved(true);
                if featured && record.featured().is_some() {
                    record.set_featured(true);
                }
            }
            ModerationAction::Deny => return Ok(false),
            ModerationAction::ToggleFeatured => {
                let Some(current) = record.featured() else {
                    return Err(DomainError::Validation(format!(
                        "{} records cannot be featured",
                        T::ENTITY
                    )));
                };
                if !record.is_approved() {
                    return Err(DomainError::Validation(format!(
                        "Only approved {} records can be featured",
                        T::ENTITY
                    )));
                }
                record.set_featured(!current);
            }
        }
        record.touch();
        Ok(true)
    }
}

/// Result of a moderation call.
#[derive(Debug, Clone)]
pub enum ModerationOutcome<T> {
    Updated(T),
    Deleted(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTestimonial, NewStoryComment, StoryComment, Testimonial};

    fn testimonial() -> Testimonial {
        Testimonial::new(NewTestimonial {
            client_name: "J.D.".to_string(),
            email: "jd@example.com".to_string(),
            rating: 5,
            testimonial_text: "Changed my life".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_status_filter() {
        assert!(ModerationStatus::Pending.matches(false));
        assert!(!ModerationStatus::Pending.matches(true));
        assert!(ModerationStatus::Approved.matches(true));
        assert!(ModerationStatus::All.matches(false));
        assert_eq!("APPROVED".parse::<ModerationStatus>().unwrap(), ModerationStatus::Approved);
        assert!("archived".parse::<ModerationStatus>().is_err());
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(
            ModerationAction::parse("approve", Some(true)).unwrap(),
            ModerationAction::Approve { featured: true }
        );
        assert_eq!(
            ModerationAction::parse("approve", None).unwrap(),
            ModerationAction::Approve { featured: false }
        );
        assert_eq!(
            ModerationAction::parse("toggle-featured", None).unwrap(),
            ModerationAction::ToggleFeatured
        );
        assert!(ModerationAction::parse("publish", None).is_err());
    }

    #[test]
    fn test_toggle_requires_approval() {
        let mut record = testimonial();
        let err = ModerationAction::ToggleFeatured.apply(&mut record);
        assert!(matches!(err, Err(DomainError::Validation(_))));
        assert!(!record.featured);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut record = testimonial();
        ModerationAction::Approve { featured: false }
            .apply(&mut record)
            .unwrap();
        ModerationAction::ToggleFeatured.apply(&mut record).unwrap();
        assert!(record.featured);
        ModerationAction::ToggleFeatured.apply(&mut record).unwrap();
        assert!(!record.featured);
    }

    #[test]
    fn test_approve_never_unfeatures() {
        let mut record = testimonial();
        ModerationAction::Approve { featured: true }
            .apply(&mut record)
            .unwrap();
        ModerationAction::Approve { featured: false }
            .apply(&mut record)
            .unwrap();
        assert!(record.approved);
        assert!(record.featured);
    }

    #[test]
    fn test_comments_cannot_be_featured() {
        let mut comment = StoryComment::new(
            Uuid::new_v4(),
            NewStoryComment {
                author_name: "Sam".to_string(),
                email: "sam@example.com".to_string(),
                text: "Thank you for sharing".to_string(),
            },
        );
        ModerationAction::Approve { featured: true }
            .apply(&mut comment)
            .unwrap();
        assert!(comment.approved);
        assert!(ModerationAction::ToggleFeatured.apply(&mut comment).is_err());
    }

    #[test]
    fn test_deny_signals_delete() {
        let mut record = testimonial();
        assert!(!ModerationAction::Deny.apply(&mut record).unwrap());
    }
}
