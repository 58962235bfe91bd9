use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Comment, Post, User};
use crate::error::RepoError;

/// Operations every stored entity supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a freshly constructed entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their (normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Replacement values for an edit. `author_id: None` keeps the current author.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub text: String,
    pub author_id: Option<Uuid>,
}

/// Post repository.
///
/// Mutations that read then write a single post run atomically against the store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts whose publication date is set and not after `now`, newest first.
    async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError>;

    /// Posts without a publication date, oldest first.
    async fn list_drafts(&self) -> Result<Vec<Post>, RepoError>;

    /// Replace title, text and optionally the author. `RepoError::NotFound` if absent.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError>;

    /// Stamp `published_date = at`. `RepoError::NotFound` if absent.
    async fn publish(&self, id: Uuid, at: DateTime<Utc>) -> Result<Post, RepoError>;

    /// Delete the post together with all of its comments.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Every comment on the post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Approved comments on the post, oldest first.
    async fn find_approved_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Mark the comment approved. `RepoError::NotFound` if absent.
    async fn approve(&self, id: Uuid) -> Result<Comment, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
