//! Blog entity - a post moving through a moderation queue
//!
//! Posts are created PENDING and become publicly visible once a moderator
//! approves them. The upvote set holds at most one reference per voter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Moderation state of a blog post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlogStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl BlogStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Blog post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: Snowflake,
    pub title: String,
    /// URL slug derived from the title, unique across posts
    pub slug: String,
    pub content: String,
    pub summary: Option<String>,
    pub author_id: Snowflake,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    /// Voter references, no duplicates
    pub upvotes: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new pending post with a slug derived from the title
    pub fn new(
        id: Snowflake,
        title: String,
        content: String,
        summary: Option<String>,
        author_id: Snowflake,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        let mut blog = Self {
            id,
            title,
            slug: String::new(),
            content,
            summary,
            author_id,
            tags,
            status: BlogStatus::Pending,
            upvotes: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        blog.refresh_slug();
        blog
    }

    /// Recompute the slug from the title. A title with no usable
    /// characters gets an id-based slug so the post stays reachable.
    pub fn refresh_slug(&mut self) {
        self.slug = slugify(&self.title);
        if self.slug.is_empty() {
            self.slug = format!("post-{}", self.id);
        }
    }

    #[inline]
    pub fn upvote_count(&self) -> usize {
        self.upvotes.len()
    }

    #[inline]
    pub fn has_upvoted(&self, user_id: Snowflake) -> bool {
        self.upvotes.contains(&user_id)
    }

    /// Move the post back to the moderation queue (after an author edit)
    pub fn reset_to_pending(&mut self) {
        self.status = BlogStatus::Pending;
        self.updated_at = Utc::now();
    }

    /// Moderator decision
    pub fn set_status(&mut self, status: BlogStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Derive a URL slug from a title: lowercase, alphanumerics kept, runs of
/// anything else collapsed to a single hyphen
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_blog() -> Blog {
        Blog::new(
            Snowflake::new(30),
            "Hello, World!".to_string(),
            "body".to_string(),
            None,
            Snowflake::new(1),
            vec!["intro".to_string()],
        )
    }

    #[test]
    fn test_new_blog_pending_with_slug() {
        let blog = test_blog();
        assert_eq!(blog.status, BlogStatus::Pending);
        assert_eq!(blog.slug, "hello-world");
        assert_eq!(blog.upvote_count(), 0);
    }

    #[test]
    fn test_upvote_lookup() {
        let mut blog = test_blog();
        blog.upvotes.push(Snowflake::new(5));
        blog.upvotes.push(Snowflake::new(6));
        assert_eq!(blog.upvote_count(), 2);
        assert!(blog.has_upvoted(Snowflake::new(5)));
        assert!(!blog.has_upvoted(Snowflake::new(7)));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust   2024  "), "rust-2024");
        assert_eq!(slugify("C++ / Systems"), "c-systems");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_unsluggable_title_falls_back_to_id() {
        let blog = Blog::new(
            Snowflake::new(77),
            "!!!".to_string(),
            "body".to_string(),
            None,
            Snowflake::new(1),
            Vec::new(),
        );
        assert_eq!(blog.slug, "post-77");

        let mut blog = test_blog();
        blog.title = "???".to_string();
        blog.refresh_slug();
        assert_eq!(blog.slug, "post-30");
    }

    #[test]
    fn test_edit_resets_to_pending() {
        let mut blog = test_blog();
        blog.set_status(BlogStatus::Approved);
        blog.reset_to_pending();
        assert_eq!(blog.status, BlogStatus::Pending);
    }
}
