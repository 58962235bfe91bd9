use async_trait::async_trait;
use uuid::Uuid;

use blog_core::domain::Comment;
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CommentRepository};

use super::InMemoryStore;

pub struct InMemoryCommentRepository {
    store: InMemoryStore,
}

impl InMemoryCommentRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    async fn collect(&self, post_id: Uuid, approved_only: bool) -> Vec<Comment> {
        let tables = self.store.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id && (!approved_only || c.approved_comment))
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_date);
        comments
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.comments.get(&id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.store.tables.write().await;
        // Mirrors the foreign key on comments.post_id.
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::ForeignKey(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        Ok(self.collect(post_id, false).await)
    }

    async fn find_approved_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        Ok(self.collect(post_id, true).await)
    }

    async fn approve(&self, id: Uuid) -> Result<Comment, RepoError> {
        let mut tables = self.store.tables.write().await;
        let comment = tables.comments.get_mut(&id).ok_or(RepoError::NotFound)?;
        comment.approve();
        Ok(comment.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}
