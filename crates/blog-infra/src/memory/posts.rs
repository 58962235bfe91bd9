use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostChanges, PostRepository};

use super::InMemoryStore;

pub struct InMemoryPostRepository {
    store: InMemoryStore,
}

impl InMemoryPostRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::ForeignKey(format!(
                "author {} does not exist",
                post.author_id
            )));
        }
        if tables.posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("Post already exists".to_string()));
        }
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|post| post.is_published_at(now))
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            b.published_date
                .cmp(&a.published_date)
                .then_with(|| b.created_date.cmp(&a.created_date))
        });
        Ok(posts)
    }

    async fn list_drafts(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|post| post.is_draft())
            .cloned()
            .collect();
        posts.sort_by_key(|post| post.created_date);
        Ok(posts)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        if let Some(author_id) = changes.author_id {
            if !tables.users.contains_key(&author_id) {
                return Err(RepoError::ForeignKey(format!("author {author_id} does not exist")));
            }
        }

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.title = changes.title;
        post.text = changes.text;
        if let Some(author_id) = changes.author_id {
            post.author_id = author_id;
        }
        Ok(post.clone())
    }

    async fn publish(&self, id: Uuid, at: DateTime<Utc>) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.publish(at);
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        if tables.posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.comments.retain(|_, comment| comment.post_id != id);
        Ok(())
    }
}
