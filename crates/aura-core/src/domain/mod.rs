//! Domain entities - the core business objects.

mod affirmation;
mod blog;
mod catalog;
mod glossary;
mod herb;
mod moderation;
mod product;
mod story;
mod testimonial;

pub use affirmation::{Affirmation, AffirmationCategory, AffirmationDraft, RitualPairing};
pub use blog::{BlogPost, BlogPostDraft};
pub use catalog::{Catalogued, ListOrder, RecordMeta};
pub use glossary::{GlossaryEnrichment, GlossaryTerm, GlossaryTermDraft};
pub use herb::{Herb, HerbCategory, HerbDraft};
pub use moderation::{Moderated, ModerationAction, ModerationOutcome, ModerationStatus};
pub use product::{PricingModel, Product, ProductDraft, ProductRecommendation, ProductReview};
pub use story::{NewStoryComment, NewUserStory, StoryComment, UserStory};
pub use testimonial::{NewTestimonial, Testimonial};

/// Returns the trimmed value, or `None` when nothing is left.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
