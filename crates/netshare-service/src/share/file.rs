//! File share service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use netshare_auth::access::{AccessChecker, FileAction};
use netshare_core::error::AppError;
use netshare_core::result::AppResult;
use netshare_database::repositories::{FileRepository, FileShareRepository, UserRepository};
use netshare_entity::file::File;
use netshare_entity::share::{
    CreateFileShare, FilePermission, FileShare, FileShareDetail, UpdateShare,
};

use super::recipient::{NewShare, require_future, require_recipient};
use crate::context::RequestContext;

/// Manages who a file is shared with.
#[derive(Debug, Clone)]
pub struct FileShareService {
    shares: Arc<FileShareRepository>,
    files: Arc<FileRepository>,
    users: Arc<UserRepository>,
    access: Arc<AccessChecker>,
}

impl FileShareService {
    /// Creates a new file share service.
    pub fn new(
        shares: Arc<FileShareRepository>,
        files: Arc<FileRepository>,
        users: Arc<UserRepository>,
        access: Arc<AccessChecker>,
    ) -> Self {
        Self {
            shares,
            files,
            users,
            access,
        }
    }

    /// Lists shares of a file. Owner only.
    pub async fn list(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<Vec<FileShareDetail>> {
        let file = self.owned_file(ctx, file_id).await?;
        let shares = self.shares.list_by_file(file.id).await?;
        Ok(shares.into_iter().map(|s| s.at(ctx.request_time)).collect())
    }

    /// Active file shares granted to the caller, expired ones flagged.
    pub async fn shared_with_me(&self, ctx: &RequestContext) -> AppResult<Vec<FileShareDetail>> {
        let shares = self.shares.list_shared_with(ctx.user_id).await?;
        Ok(shares.into_iter().map(|s| s.at(ctx.request_time)).collect())
    }

    /// Shares a file with another user. Owner only.
    pub async fn share(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        req: NewShare<FilePermission>,
    ) -> AppResult<FileShare> {
        let file = self.owned_file(ctx, file_id).await?;
        require_recipient(&self.users, ctx, "shared_with_id", req.shared_with_id).await?;
        require_future("expires_at", req.expires_at, ctx.request_time)?;

        let share = self
            .shares
            .create(&CreateFileShare {
                file_id: file.id,
                shared_with_id: req.shared_with_id,
                permission_level: req.permission_level,
                expires_at: req.expires_at,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            share_id = %share.id,
            shared_with_id = %share.shared_with_id,
            permission_level = %share.permission_level,
            "File shared"
        );

        Ok(share)
    }

    /// Changes level, active flag, or expiry of a share. Owner only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        share_id: Uuid,
        req: UpdateShare<FilePermission>,
    ) -> AppResult<FileShare> {
        let file = self.owned_file(ctx, file_id).await?;
        let share = self.find_share(share_id, file.id).await?;
        if !req.clear_expiry {
            require_future("expires_at", req.expires_at, ctx.request_time)?;
        }

        let share = self.shares.update(&share, &req).await?;
        info!(user_id = %ctx.user_id, file_id = %file.id, share_id = %share.id, "File share updated");
        Ok(share)
    }

    /// Revokes a share. Owner only.
    pub async fn revoke(&self, ctx: &RequestContext, file_id: Uuid, share_id: Uuid) -> AppResult<()> {
        let file = self.owned_file(ctx, file_id).await?;
        let share = self.find_share(share_id, file.id).await?;
        self.shares.delete(share.id).await?;
        info!(user_id = %ctx.user_id, file_id = %file.id, share_id = %share.id, "File share revoked");
        Ok(())
    }

    async fn owned_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;
        self.access
            .require_file(ctx.user_id, &file, FileAction::Administer, ctx.request_time)
            .await?;
        Ok(file)
    }

    async fn find_share(&self, share_id: Uuid, file_id: Uuid) -> AppResult<FileShare> {
        self.shares
            .find_in_file(share_id, file_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))
    }
}
