//! File comments.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use netshare_auth::access::{AccessChecker, FileAction};
use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_database::repositories::{CommentRepository, FileRepository};
use netshare_entity::comment::{CommentDetail, CreateComment, MAX_COMMENT_LEN, time_ago};
use netshare_entity::file::File;

use crate::context::RequestContext;

/// Lists, adds, and removes comments on files the caller can view.
#[derive(Debug, Clone)]
pub struct CommentService {
    comments: Arc<CommentRepository>,
    files: Arc<FileRepository>,
    access: Arc<AccessChecker>,
}

/// One comment as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    /// Comment identifier.
    pub id: Uuid,
    /// Author's user id.
    pub user_id: Uuid,
    /// Author's username.
    pub author: String,
    /// Comment text.
    pub comment: String,
    /// Relative age, e.g. `3h ago`.
    pub time_ago: String,
    /// When it was posted.
    pub created_at: DateTime<Utc>,
}

impl CommentView {
    fn new(detail: CommentDetail, now: DateTime<Utc>) -> Self {
        Self {
            id: detail.id,
            user_id: detail.user_id,
            author: detail.username,
            time_ago: time_ago(detail.created_at, now),
            comment: detail.comment,
            created_at: detail.created_at,
        }
    }
}

/// Comments on one file, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct CommentList {
    /// The comments.
    pub comments: Vec<CommentView>,
    /// Number of comments.
    pub total: usize,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        comments: Arc<CommentRepository>,
        files: Arc<FileRepository>,
        access: Arc<AccessChecker>,
    ) -> Self {
        Self {
            comments,
            files,
            access,
        }
    }

    /// Lists comments on a file the caller can view.
    pub async fn list(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<CommentList> {
        let file = self.viewable(ctx, file_id).await?;
        let comments: Vec<CommentView> = self
            .comments
            .list_by_file(file.id)
            .await?
            .into_iter()
            .map(|c| CommentView::new(c, ctx.request_time))
            .collect();
        Ok(CommentList {
            total: comments.len(),
            comments,
        })
    }

    /// Adds a comment to a file the caller can view.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        text: &str,
    ) -> AppResult<CommentView> {
        let file = self.viewable(ctx, file_id).await?;
        let comment = validate_comment(text)?;

        let created = self
            .comments
            .create(&CreateComment {
                file_id: file.id,
                user_id: ctx.user_id,
                comment,
            })
            .await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, comment_id = %created.id, "Comment added");
        Ok(CommentView::new(created, ctx.request_time))
    }

    /// Deletes a comment. Allowed for its author and the file owner.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        comment_id: Uuid,
    ) -> AppResult<()> {
        let file = self.find(file_id).await?;
        let comment = self
            .comments
            .find_in_file(comment_id, file.id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        if !ctx.is(comment.user_id) && !file.is_owned_by(ctx.user_id) {
            return Err(AppError::authorization(
                "Only the author or the file owner can delete this comment",
            ));
        }

        self.comments.delete(comment.id).await?;
        info!(user_id = %ctx.user_id, file_id = %file.id, comment_id = %comment.id, "Comment deleted");
        Ok(())
    }

    async fn find(&self, file_id: Uuid) -> AppResult<File> {
        self.files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    async fn viewable(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self.find(file_id).await?;
        self.access
            .require_file(ctx.user_id, &file, FileAction::View, ctx.request_time)
            .await?;
        Ok(file)
    }
}

fn validate_comment(text: &str) -> AppResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::field("comment", "Comment cannot be empty"));
    }
    if text.chars().count() > MAX_COMMENT_LEN {
        return Err(AppError::field(
            "comment",
            "Comment must be at most 1000 characters",
        ));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_length_bounds() {
        assert!(validate_comment("   ").is_err());
        assert_eq!(validate_comment("  nice  ").expect("valid"), "nice");
        assert!(validate_comment(&"a".repeat(1000)).is_ok());
        assert!(validate_comment(&"a".repeat(1001)).is_err());
    }

    #[test]
    fn test_view_formats_age() {
        let now = Utc::now();
        let detail = CommentDetail {
            id: Uuid::new_v4(),
            file_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: "alice".into(),
            comment: "hello".into(),
            created_at: now - chrono::Duration::hours(2),
        };
        let view = CommentView::new(detail, now);
        assert_eq!(view.author, "alice");
        assert_eq!(view.time_ago, "2h ago");
    }
}
