use diesel::prelude::*;

use super::schema::{comments, posts};
use crate::models::{Comment, CommentId, Post, PostId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub views: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPostRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub struct PostChangesRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow<'a> {
    pub post_id: i64,
    pub content: &'a str,
}

impl PostRow {
    pub fn into_post(self, comments: Vec<Comment>) -> Post {
        Post {
            id: PostId::new(self.id),
            title: self.title,
            content: self.content,
            views: self.views,
            comments,
        }
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: CommentId::new(row.id),
            post_id: PostId::new(row.post_id),
            content: row.content,
        }
    }
}
