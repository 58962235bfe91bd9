//! The blog's access layer: every read and mutation a presentation layer may call.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::validation::{CommentContent, FieldErrors, InputValidator, PostContent};
use crate::domain::{Caller, Comment, Post};
use crate::error::{DomainError, RepoError};
use crate::ports::{Clock, CommentRepository, PostChanges, PostRepository, UserRepository};

/// A post together with the comments the caller is allowed to see.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// Mediates all access to posts and comments.
///
/// Privileged operations check the caller before touching the store and
/// validate all input before any write.
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            comments,
            users,
            clock,
        }
    }

    /// Published posts, most recently published first.
    pub async fn list_published_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list_published(self.clock.now()).await?)
    }

    /// Unpublished posts, oldest first.
    pub async fn list_drafts(&self, caller: &Caller) -> Result<Vec<Post>, DomainError> {
        caller.require_principal()?;
        Ok(self.posts.list_drafts().await?)
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// The post plus its comments; anonymous callers only get approved ones.
    pub async fn get_post_detail(
        &self,
        caller: &Caller,
        id: Uuid,
    ) -> Result<PostDetail, DomainError> {
        let post = self.get_post(id).await?;
        let comments = self.visible_comments(caller, id).await?;
        Ok(PostDetail { post, comments })
    }

    pub async fn create_post(
        &self,
        caller: &Caller,
        author_id: Uuid,
        content: PostContent,
    ) -> Result<Post, DomainError> {
        let principal = caller.require_principal()?;
        let content = content.trimmed();

        let mut errors = FieldErrors::new();
        content.collect_errors(&mut errors);
        self.check_author(author_id, &mut errors).await?;
        errors.into_result()?;

        let post = Post::new_draft(author_id, content.title, content.text, self.clock.now());
        let post = self.posts.insert(post).await.map_err(missing_author)?;

        tracing::info!(post_id = %post.id, created_by = %principal.user_id, "Draft created");
        Ok(post)
    }

    pub async fn update_post(
        &self,
        caller: &Caller,
        id: Uuid,
        content: PostContent,
        author_id: Option<Uuid>,
    ) -> Result<Post, DomainError> {
        caller.require_principal()?;
        let content = content.trimmed();

        let mut errors = FieldErrors::new();
        content.collect_errors(&mut errors);
        if let Some(author_id) = author_id {
            self.check_author(author_id, &mut errors).await?;
        }
        errors.into_result()?;

        let changes = PostChanges {
            title: content.title,
            text: content.text,
            author_id,
        };
        let post = self
            .posts
            .update(id, changes)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::post_not_found(id),
                other => missing_author(other),
            })?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(post)
    }

    /// Permanently delete a post and every comment on it.
    pub async fn delete_post(&self, caller: &Caller, id: Uuid) -> Result<(), DomainError> {
        caller.require_principal()?;
        self.posts
            .delete(id)
            .await
            .map_err(|e| not_found_as(e, DomainError::post_not_found(id)))?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Stamp the publication date with the current time, even if already published.
    pub async fn publish_post(&self, caller: &Caller, id: Uuid) -> Result<Post, DomainError> {
        caller.require_principal()?;
        let post = self
            .posts
            .publish(id, self.clock.now())
            .await
            .map_err(|e| not_found_as(e, DomainError::post_not_found(id)))?;

        tracing::info!(post_id = %id, published_date = ?post.published_date, "Post published");
        Ok(post)
    }

    /// Open to anyone. The comment stays hidden until approved.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        content: CommentContent,
    ) -> Result<Comment, DomainError> {
        let content = content.trimmed();
        content.validate()?;

        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::post_not_found(post_id));
        }

        let comment = Comment::new(post_id, content.author, content.text, self.clock.now());
        // The post may be deleted between the check above and the insert.
        let comment = self.comments.insert(comment).await.map_err(|e| match e {
            RepoError::ForeignKey(_) => DomainError::post_not_found(post_id),
            other => other.into(),
        })?;

        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment awaiting moderation");
        Ok(comment)
    }

    pub async fn approve_comment(&self, caller: &Caller, id: Uuid) -> Result<Comment, DomainError> {
        caller.require_principal()?;
        let comment = self
            .comments
            .approve(id)
            .await
            .map_err(|e| not_found_as(e, DomainError::comment_not_found(id)))?;

        tracing::info!(comment_id = %id, post_id = %comment.post_id, "Comment approved");
        Ok(comment)
    }

    /// Delete a comment regardless of its approval state.
    pub async fn remove_comment(&self, caller: &Caller, id: Uuid) -> Result<(), DomainError> {
        caller.require_principal()?;
        self.comments
            .delete(id)
            .await
            .map_err(|e| not_found_as(e, DomainError::comment_not_found(id)))?;

        tracing::info!(comment_id = %id, "Comment removed");
        Ok(())
    }

    /// Approved comments on a post, re-read from the store on every call.
    pub async fn list_approved_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.find_approved_by_post(post_id).await?)
    }

    /// Comments on a post as the caller may see them: all for the author, approved for readers.
    pub async fn list_post_comments(
        &self,
        caller: &Caller,
        post_id: Uuid,
    ) -> Result<Vec<Comment>, DomainError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::post_not_found(post_id));
        }
        self.visible_comments(caller, post_id).await
    }

    async fn visible_comments(
        &self,
        caller: &Caller,
        post_id: Uuid,
    ) -> Result<Vec<Comment>, DomainError> {
        let comments = if caller.is_authenticated() {
            self.comments.find_by_post(post_id).await?
        } else {
            self.comments.find_approved_by_post(post_id).await?
        };
        Ok(comments)
    }

    async fn check_author(&self, author_id: Uuid, errors: &mut FieldErrors) -> Result<(), DomainError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            errors.add("author", INVALID_AUTHOR);
        }
        Ok(())
    }
}

const INVALID_AUTHOR: &str = "Select a valid author.";

fn not_found_as(err: RepoError, not_found: DomainError) -> DomainError {
    match err {
        RepoError::NotFound => not_found,
        other => other.into(),
    }
}

/// An author removed after `check_author` surfaces as a foreign key failure.
fn missing_author(err: RepoError) -> DomainError {
    match err {
        RepoError::ForeignKey(_) => DomainError::invalid("author", INVALID_AUTHOR),
        other => other.into(),
    }
}
