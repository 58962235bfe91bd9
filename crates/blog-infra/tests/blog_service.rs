//! End-to-end behaviour of the access layer over the in-memory store.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use blog_core::BlogService;
use blog_core::domain::validation::{CommentContent, PostContent};
use blog_core::domain::{Caller, Post, User};
use blog_core::error::{DomainError, RepoError};
use blog_core::ports::{
    BaseRepository, CommentRepository, ManualClock, PostChanges, PostRepository, UserRepository,
};
use blog_infra::InMemoryStore;

struct Harness {
    store: InMemoryStore,
    clock: Arc<ManualClock>,
    service: BlogService,
    author: Caller,
    author_id: Uuid,
}

async fn setup() -> Harness {
    let store = InMemoryStore::new();
    let user = store
        .users()
        .insert(User::new("author@example.com", "hash".to_string()))
        .await
        .unwrap();

    let clock = Arc::new(ManualClock::new(Utc::now()));
    let service = BlogService::new(
        Arc::new(store.posts()),
        Arc::new(store.comments()),
        Arc::new(store.users()),
        clock.clone(),
    );

    Harness {
        store,
        clock,
        service,
        author: Caller::Authenticated(user.principal()),
        author_id: user.id,
    }
}

fn content(title: &str, text: &str) -> PostContent {
    PostContent {
        title: title.to_string(),
        text: text.to_string(),
    }
}

fn remark(author: &str, text: &str) -> CommentContent {
    CommentContent {
        author: author.to_string(),
        text: text.to_string(),
    }
}

fn ids(posts: &[Post]) -> Vec<Uuid> {
    posts.iter().map(|p| p.id).collect()
}

fn invalid_fields(err: DomainError) -> Vec<&'static str> {
    match err {
        DomainError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_new_post_is_a_draft() {
    let h = setup().await;

    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();

    assert_eq!(post.author_id, h.author_id);
    assert!(post.published_date.is_none());
    assert_eq!(ids(&h.service.list_drafts(&h.author).await.unwrap()), vec![post.id]);
    assert!(h.service.list_published_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_published_post_leads_the_listing() {
    let h = setup().await;

    let older = h
        .service
        .create_post(&h.author, h.author_id, content("Older", "text"))
        .await
        .unwrap();
    h.service.publish_post(&h.author, older.id).await.unwrap();

    h.clock.advance(TimeDelta::minutes(5));
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();
    let published = h.service.publish_post(&h.author, post.id).await.unwrap();

    assert_eq!(published.published_date, Some(h.clock_now()));
    let listing = h.service.list_published_posts().await.unwrap();
    assert_eq!(ids(&listing), vec![post.id, older.id]);
    assert!(h.service.list_drafts(&h.author).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_new_comment_awaits_approval() {
    let h = setup().await;
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();

    let comment = h
        .service
        .add_comment(post.id, remark("Alice", "Nice post"))
        .await
        .unwrap();

    assert_eq!(comment.post_id, post.id);
    assert!(!comment.approved_comment);
    assert!(h.service.list_approved_comments(post.id).await.unwrap().is_empty());

    let approved = h.service.approve_comment(&h.author, comment.id).await.unwrap();
    assert!(approved.approved_comment);

    let visible = h.service.list_approved_comments(post.id).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, comment.id);
}

#[tokio::test]
async fn test_anonymous_cannot_publish() {
    let h = setup().await;
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();

    let result = h.service.publish_post(&Caller::Anonymous, post.id).await;

    assert!(matches!(result, Err(DomainError::Unauthorized)));
    let unchanged = h.service.get_post(post.id).await.unwrap();
    assert_eq!(unchanged, post);
}

#[tokio::test]
async fn test_empty_title_creates_nothing() {
    let h = setup().await;

    let err = h
        .service
        .create_post(&h.author, h.author_id, content("", "x"))
        .await
        .unwrap_err();

    assert_eq!(invalid_fields(err), vec!["title"]);
    assert!(h.service.list_drafts(&h.author).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_privileged_operations_reject_anonymous() {
    let h = setup().await;
    let anon = Caller::Anonymous;
    let id = Uuid::new_v4();

    let unauthorized = |r: Result<(), DomainError>| matches!(r, Err(DomainError::Unauthorized));

    assert!(unauthorized(h.service.list_drafts(&anon).await.map(drop)));
    assert!(unauthorized(
        h.service
            .create_post(&anon, h.author_id, content("Hello", "World"))
            .await
            .map(drop)
    ));
    assert!(unauthorized(
        h.service
            .update_post(&anon, id, content("Hello", "World"), None)
            .await
            .map(drop)
    ));
    assert!(unauthorized(h.service.delete_post(&anon, id).await));
    assert!(unauthorized(h.service.approve_comment(&anon, id).await.map(drop)));
    assert!(unauthorized(h.service.remove_comment(&anon, id).await));
}

#[tokio::test]
async fn test_republishing_restamps_date() {
    let h = setup().await;
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();

    let first = h.service.publish_post(&h.author, post.id).await.unwrap();
    h.clock.advance(TimeDelta::seconds(30));
    let second = h.service.publish_post(&h.author, post.id).await.unwrap();

    assert!(second.published_date > first.published_date);
    assert_eq!(ids(&h.service.list_published_posts().await.unwrap()), vec![post.id]);
}

#[tokio::test]
async fn test_approving_twice_changes_nothing() {
    let h = setup().await;
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();
    let comment = h
        .service
        .add_comment(post.id, remark("Alice", "Nice post"))
        .await
        .unwrap();

    let once = h.service.approve_comment(&h.author, comment.id).await.unwrap();
    let twice = h.service.approve_comment(&h.author, comment.id).await.unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn test_future_publication_is_hidden() {
    let h = setup().await;
    let mut scheduled = Post::new_draft(h.author_id, "Soon".into(), "text".into(), h.clock_now());
    scheduled.publish(h.clock_now() + TimeDelta::hours(1));
    h.store.posts().insert(scheduled.clone()).await.unwrap();

    assert!(h.service.list_published_posts().await.unwrap().is_empty());
    assert!(h.service.list_drafts(&h.author).await.unwrap().is_empty());

    h.clock.advance(TimeDelta::hours(1));
    assert_eq!(
        ids(&h.service.list_published_posts().await.unwrap()),
        vec![scheduled.id]
    );
}

#[tokio::test]
async fn test_drafts_are_oldest_first() {
    let h = setup().await;
    let first = h
        .service
        .create_post(&h.author, h.author_id, content("First", "text"))
        .await
        .unwrap();
    h.clock.advance(TimeDelta::seconds(1));
    let second = h
        .service
        .create_post(&h.author, h.author_id, content("Second", "text"))
        .await
        .unwrap();

    let drafts = h.service.list_drafts(&h.author).await.unwrap();
    assert_eq!(ids(&drafts), vec![first.id, second.id]);
}

#[tokio::test]
async fn test_deleting_post_removes_its_comments() {
    let h = setup().await;
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();
    let keep = h
        .service
        .create_post(&h.author, h.author_id, content("Other", "post"))
        .await
        .unwrap();

    let doomed = h
        .service
        .add_comment(post.id, remark("Alice", "Nice post"))
        .await
        .unwrap();
    h.service
        .add_comment(post.id, remark("Bob", "Agreed"))
        .await
        .unwrap();
    let survivor = h
        .service
        .add_comment(keep.id, remark("Carol", "Hi"))
        .await
        .unwrap();

    h.service.delete_post(&h.author, post.id).await.unwrap();

    let comments = h.store.comments();
    assert!(comments.find_by_post(post.id).await.unwrap().is_empty());
    assert!(comments.find_by_id(doomed.id).await.unwrap().is_none());
    assert!(comments.find_by_id(survivor.id).await.unwrap().is_some());
    assert!(matches!(
        h.service.get_post(post.id).await,
        Err(DomainError::NotFound { entity_type: "Post", .. })
    ));
}

#[tokio::test]
async fn test_missing_entities_are_not_found() {
    let h = setup().await;
    let id = Uuid::new_v4();

    assert!(matches!(h.service.get_post(id).await, Err(DomainError::NotFound { .. })));
    assert!(matches!(
        h.service.publish_post(&h.author, id).await,
        Err(DomainError::NotFound { entity_type: "Post", .. })
    ));
    assert!(matches!(
        h.service.delete_post(&h.author, id).await,
        Err(DomainError::NotFound { entity_type: "Post", .. })
    ));
    assert!(matches!(
        h.service
            .update_post(&h.author, id, content("Hello", "World"), None)
            .await,
        Err(DomainError::NotFound { entity_type: "Post", .. })
    ));
    assert!(matches!(
        h.service.add_comment(id, remark("Alice", "Nice post")).await,
        Err(DomainError::NotFound { entity_type: "Post", .. })
    ));
    assert!(matches!(
        h.service.approve_comment(&h.author, id).await,
        Err(DomainError::NotFound { entity_type: "Comment", .. })
    ));
    assert!(matches!(
        h.service.remove_comment(&h.author, id).await,
        Err(DomainError::NotFound { entity_type: "Comment", .. })
    ));
}

#[tokio::test]
async fn test_update_post_replaces_content_and_author() {
    let h = setup().await;
    let other = h
        .store
        .users()
        .insert(User::new("guest@example.com", "hash".to_string()))
        .await
        .unwrap();
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();

    let edited = h
        .service
        .update_post(&h.author, post.id, content("  Edited ", "Body"), Some(other.id))
        .await
        .unwrap();

    assert_eq!(edited.title, "Edited");
    assert_eq!(edited.text, "Body");
    assert_eq!(edited.author_id, other.id);
    assert_eq!(edited.created_date, post.created_date);

    let err = h
        .service
        .update_post(&h.author, post.id, content("Hello", ""), Some(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(invalid_fields(err), vec!["text", "author"]);
}

#[tokio::test]
async fn test_unknown_author_is_a_validation_error() {
    let h = setup().await;

    let err = h
        .service
        .create_post(&h.author, Uuid::new_v4(), content("Hello", "World"))
        .await
        .unwrap_err();

    assert_eq!(invalid_fields(err), vec!["author"]);
}

#[tokio::test]
async fn test_comment_requires_author_and_text() {
    let h = setup().await;
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();

    let err = h
        .service
        .add_comment(post.id, remark(" ", ""))
        .await
        .unwrap_err();

    assert_eq!(invalid_fields(err), vec!["author", "text"]);
    assert!(h.store.comments().find_by_post(post.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_readers_only_see_approved_comments() {
    let h = setup().await;
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();
    let pending = h
        .service
        .add_comment(post.id, remark("Alice", "Nice post"))
        .await
        .unwrap();
    h.clock.advance(TimeDelta::seconds(1));
    let approved = h
        .service
        .add_comment(post.id, remark("Bob", "Agreed"))
        .await
        .unwrap();
    h.service.approve_comment(&h.author, approved.id).await.unwrap();

    let public = h
        .service
        .get_post_detail(&Caller::Anonymous, post.id)
        .await
        .unwrap();
    assert_eq!(public.comments.len(), 1);
    assert_eq!(public.comments[0].id, approved.id);

    let moderation = h.service.list_post_comments(&h.author, post.id).await.unwrap();
    let moderation_ids: Vec<Uuid> = moderation.iter().map(|c| c.id).collect();
    assert_eq!(moderation_ids, vec![pending.id, approved.id]);
}

#[tokio::test]
async fn test_removing_unapproved_comment() {
    let h = setup().await;
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();
    let comment = h
        .service
        .add_comment(post.id, remark("Spammer", "Buy now"))
        .await
        .unwrap();

    h.service.remove_comment(&h.author, comment.id).await.unwrap();

    assert!(h.service.list_post_comments(&h.author, post.id).await.unwrap().is_empty());
}

impl Harness {
    fn clock_now(&self) -> chrono::DateTime<Utc> {
        use blog_core::ports::Clock;
        self.clock.now()
    }
}

/// Deletes the post right after handing it out, so the caller's next write
/// races against a concurrent delete.
struct VanishingPosts {
    inner: blog_infra::memory::InMemoryPostRepository,
}

#[async_trait::async_trait]
impl BaseRepository<Post, Uuid> for VanishingPosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let found = self.inner.find_by_id(id).await?;
        if found.is_some() {
            self.inner.delete(id).await?;
        }
        Ok(found)
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.inner.insert(post).await
    }
}

#[async_trait::async_trait]
impl PostRepository for VanishingPosts {
    async fn list_published(&self, now: chrono::DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        self.inner.list_published(now).await
    }

    async fn list_drafts(&self) -> Result<Vec<Post>, RepoError> {
        self.inner.list_drafts().await
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        self.inner.update(id, changes).await
    }

    async fn publish(&self, id: Uuid, at: chrono::DateTime<Utc>) -> Result<Post, RepoError> {
        self.inner.publish(id, at).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.inner.delete(id).await
    }
}

/// Vouches for any author id, as if the account were removed after the check.
struct StaleUsers {
    inner: blog_infra::memory::InMemoryUserRepository,
}

#[async_trait::async_trait]
impl BaseRepository<User, Uuid> for StaleUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let mut ghost = User::new("gone@example.com", "hash".to_string());
        ghost.id = id;
        Ok(Some(ghost))
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        self.inner.insert(user).await
    }
}

#[async_trait::async_trait]
impl UserRepository for StaleUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        self.inner.find_by_email(email).await
    }
}

#[tokio::test]
async fn test_comment_on_post_deleted_mid_request_is_not_found() {
    let h = setup().await;
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();

    let service = BlogService::new(
        Arc::new(VanishingPosts {
            inner: h.store.posts(),
        }),
        Arc::new(h.store.comments()),
        Arc::new(h.store.users()),
        h.clock.clone(),
    );

    let err = service
        .add_comment(post.id, remark("Alice", "First!"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, DomainError::NotFound { entity_type: "Post", id } if id == post.id),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_author_removed_mid_request_is_a_validation_error() {
    let h = setup().await;
    let post = h
        .service
        .create_post(&h.author, h.author_id, content("Hello", "World"))
        .await
        .unwrap();

    let service = BlogService::new(
        Arc::new(h.store.posts()),
        Arc::new(h.store.comments()),
        Arc::new(StaleUsers {
            inner: h.store.users(),
        }),
        h.clock.clone(),
    );
    let missing = Uuid::new_v4();

    let err = service
        .create_post(&h.author, missing, content("Hello", "World"))
        .await
        .unwrap_err();
    assert_eq!(invalid_fields(err), vec!["author"]);

    let err = service
        .update_post(&h.author, post.id, content("Hello", "World"), Some(missing))
        .await
        .unwrap_err();
    assert_eq!(invalid_fields(err), vec!["author"]);
}
