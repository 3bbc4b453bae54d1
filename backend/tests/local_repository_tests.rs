//! Behavioural tests for the in-memory repository through the repository traits.

use std::sync::Arc;

use blog_api::db::{CommentRepository, FullRepository, LocalRepository, PostRepository};
use blog_api::models::{CommentId, NewComment, NewPost, PostChanges, PostId};

fn repo() -> Arc<dyn FullRepository> {
    Arc::new(LocalRepository::new())
}

#[tokio::test]
async fn test_create_then_get_matches() {
    let repo = repo();
    let created = repo
        .create_post(NewPost::new("Title", "Body"))
        .await
        .unwrap();

    let fetched = repo.get_post(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Title");
    assert_eq!(fetched.content, "Body");
    assert_eq!(fetched.views, 0);
    assert!(fetched.comments.is_empty());
}

#[tokio::test]
async fn test_get_missing_post_is_none() {
    let repo = repo();
    assert!(repo.get_post(PostId::new(1)).await.unwrap().is_none());

    let post = repo.create_post(NewPost::new("t", "c")).await.unwrap();
    repo.delete_post(post.id).await.unwrap();
    assert!(repo.get_post(post.id).await.unwrap().is_none());
    assert!(repo.get_post(PostId::new(-1)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_views_increase_by_one_per_call() {
    let repo = repo();
    let post = repo.create_post(NewPost::new("t", "c")).await.unwrap();

    let mut last = 0;
    for _ in 0..10 {
        let updated = repo.increment_views(post.id).await.unwrap().unwrap();
        assert_eq!(updated.views, last + 1);
        last = updated.views;
    }
    assert_eq!(last, 10);
}

#[tokio::test]
async fn test_increment_missing_post_is_none() {
    let repo = repo();
    assert!(repo.increment_views(PostId::new(7)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_replaces_title_and_content_only() {
    let repo = repo();
    let post = repo.create_post(NewPost::new("old", "old")).await.unwrap();
    repo.add_comment(post.id, NewComment::new("keep me"))
        .await
        .unwrap();
    repo.increment_views(post.id).await.unwrap();

    let updated = repo
        .update_post(post.id, PostChanges::new("new", "text"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, post.id);
    assert_eq!(updated.title, "new");
    assert_eq!(updated.content, "text");
    assert_eq!(updated.views, 1);
    assert_eq!(updated.comments.len(), 1);
}

#[tokio::test]
async fn test_update_missing_post_is_none() {
    let repo = repo();
    let result = repo
        .update_post(PostId::new(3), PostChanges::new("a", "b"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_add_comment_requires_existing_post() {
    let repo = repo();
    let result = repo
        .add_comment(PostId::new(1), NewComment::new("orphan"))
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(repo
        .list_comments_for_post(PostId::new(1))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_comments_listed_per_post() {
    let repo = repo();
    let a = repo.create_post(NewPost::new("a", "1")).await.unwrap();
    let b = repo.create_post(NewPost::new("b", "2")).await.unwrap();
    repo.add_comment(a.id, NewComment::new("a1")).await.unwrap();
    repo.add_comment(b.id, NewComment::new("b1")).await.unwrap();
    repo.add_comment(a.id, NewComment::new("a2")).await.unwrap();

    let for_a = repo.list_comments_for_post(a.id).await.unwrap();
    let contents: Vec<&str> = for_a.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["a1", "a2"]);
    assert!(for_a.iter().all(|c| c.post_id == a.id));
}

#[tokio::test]
async fn test_delete_post_cascades_to_comments() {
    let repo = repo();
    let post = repo.create_post(NewPost::new("t", "c")).await.unwrap();
    let first = repo
        .add_comment(post.id, NewComment::new("one"))
        .await
        .unwrap()
        .unwrap();
    let second = repo
        .add_comment(post.id, NewComment::new("two"))
        .await
        .unwrap()
        .unwrap();

    assert!(repo.delete_post(post.id).await.unwrap());

    for comment_id in [first.id, second.id] {
        assert!(repo
            .get_comment(post.id, comment_id)
            .await
            .unwrap()
            .is_none());
    }
}

#[tokio::test]
async fn test_delete_post_leaves_other_posts_comments() {
    let repo = repo();
    let doomed = repo.create_post(NewPost::new("a", "1")).await.unwrap();
    let kept = repo.create_post(NewPost::new("b", "2")).await.unwrap();
    repo.add_comment(doomed.id, NewComment::new("x")).await.unwrap();
    let survivor = repo
        .add_comment(kept.id, NewComment::new("y"))
        .await
        .unwrap()
        .unwrap();

    repo.delete_post(doomed.id).await.unwrap();

    let kept = repo.get_post(kept.id).await.unwrap().unwrap();
    assert_eq!(kept.comments, vec![survivor]);
}

#[tokio::test]
async fn test_delete_missing_records_report_false() {
    let repo = repo();
    assert!(!repo.delete_post(PostId::new(1)).await.unwrap());
    assert!(!repo
        .delete_comment(PostId::new(1), CommentId::new(1))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_delete_comment_matches_post_and_comment() {
    let repo = repo();
    let a = repo.create_post(NewPost::new("a", "1")).await.unwrap();
    let b = repo.create_post(NewPost::new("b", "2")).await.unwrap();
    let comment = repo
        .add_comment(a.id, NewComment::new("x"))
        .await
        .unwrap()
        .unwrap();

    assert!(!repo.delete_comment(b.id, comment.id).await.unwrap());
    assert!(repo.delete_comment(a.id, comment.id).await.unwrap());
    assert!(repo.get_comment(a.id, comment.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_posts_embeds_comments() {
    let repo = repo();
    let post = repo.create_post(NewPost::new("t", "c")).await.unwrap();
    repo.add_comment(post.id, NewComment::new("hi")).await.unwrap();

    let posts = repo.list_posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].comments.len(), 1);
    assert_eq!(posts[0].comments[0].content, "hi");
}

#[tokio::test]
async fn test_concurrent_increments_are_not_lost() {
    let local = LocalRepository::new();
    let post = local.create_post(NewPost::new("t", "c")).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let repo = local.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_views(post.id).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let post = local.get_post(post.id).await.unwrap().unwrap();
    assert_eq!(post.views, 50);
}
