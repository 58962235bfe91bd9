use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters allowed in a commenter's display name.
pub const COMMENT_AUTHOR_MAX_CHARS: usize = 200;

/// Comment entity - a reader's remark on a post, hidden until approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    /// Free-text display name, not tied to any user account.
    pub author: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub approved_comment: bool,
}

impl Comment {
    /// Create a new, unapproved comment on `post_id`.
    pub fn new(post_id: Uuid, author: String, text: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            author,
            text,
            created_date: now,
            approved_comment: false,
        }
    }

    pub fn approve(&mut self) {
        self.approved_comment = true;
    }

    pub fn is_visible_to_public(&self) -> bool {
        self.approved_comment
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment_is_unapproved() {
        let comment = Comment::new(Uuid::new_v4(), "Alice".into(), "Nice post".into(), Utc::now());
        assert!(!comment.approved_comment);
        assert!(!comment.is_visible_to_public());
    }

    #[test]
    fn test_approve_is_idempotent() {
        let mut comment =
            Comment::new(Uuid::new_v4(), "Alice".into(), "Nice post".into(), Utc::now());
        comment.approve();
        let once = comment.clone();
        comment.approve();

        assert_eq!(comment, once);
        assert!(comment.is_visible_to_public());
    }
}
