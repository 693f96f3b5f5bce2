//! # Comments
//!
//! Comment documents and the comment store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{ensure_owner, CatalogError, CatalogResult};
use super::video::Video;
use crate::auth::user::{User, UNKNOWN_AVATAR};
use crate::store::{Document, DocumentStore, DocumentStoreExt};
use crate::validate;

/// Comment document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    /// Author, fixed at creation
    pub author_user_id: Uuid,
    pub video_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

impl Document for Comment {
    const COLLECTION: &'static str = "comments";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Public view of a comment's author
#[derive(Debug, Clone, Serialize)]
pub struct CommentAuthor {
    pub id: Option<Uuid>,
    pub username: String,
    pub avatar: String,
}

impl CommentAuthor {
    fn from_user(user: Option<User>) -> Self {
        match user {
            Some(user) => Self {
                id: Some(user.id),
                username: user.username,
                avatar: user.avatar,
            },
            None => Self {
                id: None,
                username: "Unknown".to_string(),
                avatar: UNKNOWN_AVATAR.to_string(),
            },
        }
    }
}

/// Comment with its author, as returned by listings
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: CommentAuthor,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentRequest {
    #[serde(default)]
    pub text: String,
    pub video_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditCommentRequest {
    #[serde(default)]
    pub text: String,
}

/// Comment store
pub struct CommentService {
    comments: Arc<dyn DocumentStore<Comment>>,
    videos: Arc<dyn DocumentStore<Video>>,
    users: Arc<dyn DocumentStore<User>>,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn DocumentStore<Comment>>,
        videos: Arc<dyn DocumentStore<Video>>,
        users: Arc<dyn DocumentStore<User>>,
    ) -> Self {
        Self {
            comments,
            videos,
            users,
        }
    }

    /// Post a comment on a video
    pub fn post(&self, author: Uuid, request: PostCommentRequest) -> CatalogResult<Comment> {
        let text = validate::required("text", &request.text)?;
        self.ensure_video(request.video_id)?;

        let comment = self.comments.insert(Comment {
            id: Uuid::new_v4(),
            text,
            author_user_id: author,
            video_id: request.video_id,
            timestamp: Utc::now(),
            edited_at: None,
        })?;

        // The video may have been deleted while we were inserting
        if self.videos.get(request.video_id)?.is_none() {
            self.comments.remove(comment.id)?;
            return Err(CatalogError::NotFound("Video"));
        }

        tracing::debug!(comment_id = %comment.id, video_id = %comment.video_id, "comment posted");
        Ok(comment)
    }

    /// Comments on a video, newest first, with authors
    pub fn list_for_video(&self, video_id: Uuid) -> CatalogResult<Vec<CommentView>> {
        self.ensure_video(video_id)?;

        let mut comments = self.comments.find(&|c| c.video_id == video_id)?;
        comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        comments
            .into_iter()
            .map(|comment| {
                let author = self.users.get(comment.author_user_id)?;
                Ok(CommentView {
                    comment,
                    author: CommentAuthor::from_user(author),
                })
            })
            .collect()
    }

    /// Replace the text of the caller's comment
    pub fn edit(
        &self,
        caller: Uuid,
        id: Uuid,
        request: EditCommentRequest,
    ) -> CatalogResult<Comment> {
        let text = validate::required("text", &request.text)?;

        let updated = self.comments.try_update(id, |comment| {
            ensure_owner(comment.author_user_id, caller)?;
            comment.text = text.clone();
            comment.edited_at = Some(Utc::now());
            Ok::<(), CatalogError>(())
        })?;

        updated.ok_or(CatalogError::NotFound("Comment"))
    }

    /// Delete the caller's comment
    pub fn delete(&self, caller: Uuid, id: Uuid) -> CatalogResult<()> {
        let comment = self
            .comments
            .get(id)?
            .ok_or(CatalogError::NotFound("Comment"))?;
        ensure_owner(comment.author_user_id, caller)?;

        self.comments.remove(id)?;
        Ok(())
    }

    fn ensure_video(&self, video_id: Uuid) -> CatalogResult<()> {
        match self.videos.get(video_id)? {
            Some(_) => Ok(()),
            None => Err(CatalogError::NotFound("Video")),
        }
    }
}
