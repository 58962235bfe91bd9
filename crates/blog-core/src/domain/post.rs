use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters allowed in a post title.
pub const TITLE_MAX_CHARS: usize = 200;

/// Post entity - an authored article that is either a draft or published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    /// `None` while the post is a draft.
    pub published_date: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new draft authored by `author_id`.
    pub fn new_draft(author_id: Uuid, title: String, text: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            text,
            created_date: now,
            published_date: None,
        }
    }

    /// Stamp the publication date. Calling this again re-stamps it.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published_date = Some(now);
    }

    pub fn is_draft(&self) -> bool {
        self.published_date.is_none()
    }

    /// A post is publicly visible once its publication date has passed.
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.published_date, Some(published) if published <= now)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn draft() -> Post {
        Post::new_draft(Uuid::new_v4(), "Hello".into(), "World".into(), Utc::now())
    }

    #[test]
    fn test_new_post_is_draft() {
        let post = draft();
        assert!(post.is_draft());
        assert!(!post.is_published_at(Utc::now()));
    }

    #[test]
    fn test_publish_restamps_date() {
        let mut post = draft();
        let first = Utc::now();
        post.publish(first);
        assert_eq!(post.published_date, Some(first));

        let second = first + TimeDelta::seconds(5);
        post.publish(second);
        assert_eq!(post.published_date, Some(second));
        assert!(!post.is_draft());
    }

    #[test]
    fn test_future_publication_is_not_visible() {
        let mut post = draft();
        let now = Utc::now();
        post.publish(now + TimeDelta::hours(1));

        assert!(!post.is_draft());
        assert!(!post.is_published_at(now));
        assert!(post.is_published_at(now + TimeDelta::hours(1)));
    }

    #[test]
    fn test_display_is_title() {
        assert_eq!(draft().to_string(), "Hello");
    }
}
