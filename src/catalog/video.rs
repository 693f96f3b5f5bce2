//! # Videos
//!
//! Video documents, the per-user reaction state machine and the video store.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel::Channel;
use super::comment::Comment;
use super::errors::{ensure_owner, CatalogError, CatalogResult};
use super::media::{default_thumbnail, parse_video_reference};
use crate::store::{Document, DocumentStore, DocumentStoreExt};
use crate::validate;

/// Video document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,

    /// External (YouTube) video id
    pub media_reference: String,
    pub thumbnail_url: String,

    /// Owning channel, fixed at upload
    pub channel_id: Uuid,

    pub views: u64,

    /// Always equal to `liked_by_user_ids.len()`
    pub like_count: u64,
    /// Always equal to `disliked_by_user_ids.len()`
    pub dislike_count: u64,
    pub liked_by_user_ids: BTreeSet<Uuid>,
    pub disliked_by_user_ids: BTreeSet<Uuid>,

    pub upload_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Video {
    const COLLECTION: &'static str = "videos";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Reaction of one user to one video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Neutral,
    Liked,
    Disliked,
}

impl Video {
    pub fn reaction_of(&self, user_id: Uuid) -> Reaction {
        if self.liked_by_user_ids.contains(&user_id) {
            Reaction::Liked
        } else if self.disliked_by_user_ids.contains(&user_id) {
            Reaction::Disliked
        } else {
            Reaction::Neutral
        }
    }

    /// Move to `Liked`, dropping a dislike; returns whether anything changed
    pub fn like(&mut self, user_id: Uuid) -> bool {
        let undisliked = self.undislike(user_id);
        let liked = if self.liked_by_user_ids.insert(user_id) {
            self.like_count += 1;
            true
        } else {
            false
        };
        undisliked || liked
    }

    /// Drop a like; returns whether anything changed
    pub fn unlike(&mut self, user_id: Uuid) -> bool {
        if self.liked_by_user_ids.remove(&user_id) {
            self.like_count = self.like_count.saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// Move to `Disliked`, dropping a like; returns whether anything changed
    pub fn dislike(&mut self, user_id: Uuid) -> bool {
        let unliked = self.unlike(user_id);
        let disliked = if self.disliked_by_user_ids.insert(user_id) {
            self.dislike_count += 1;
            true
        } else {
            false
        };
        unliked || disliked
    }

    /// Drop a dislike; returns whether anything changed
    pub fn undislike(&mut self, user_id: Uuid) -> bool {
        if self.disliked_by_user_ids.remove(&user_id) {
            self.dislike_count = self.dislike_count.saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// Counters match the membership sets and the sets are disjoint
    pub fn is_consistent(&self) -> bool {
        self.like_count == self.liked_by_user_ids.len() as u64
            && self.dislike_count == self.disliked_by_user_ids.len() as u64
            && self.liked_by_user_ids.is_disjoint(&self.disliked_by_user_ids)
    }
}

/// Upload request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadVideoRequest {
    #[serde(default)]
    pub title: String,
    /// Bare id or YouTube URL
    #[serde(default, alias = "videoLink")]
    pub media_reference: String,
    #[serde(default, alias = "thumbnail")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Video update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "videoLink")]
    pub media_reference: Option<String>,
    #[serde(default, alias = "thumbnail")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoQuery {
    /// Case-insensitive title substring
    #[serde(default)]
    pub search: Option<String>,
    /// Case-insensitive category; `All` matches everything
    #[serde(default)]
    pub category: Option<String>,
}

impl VideoQuery {
    fn matches(&self, video: &Video) -> bool {
        let search = validate::optional(self.search.as_deref()).map(|s| s.to_lowercase());
        let category = validate::optional(self.category.as_deref())
            .filter(|c| !c.eq_ignore_ascii_case("all"));

        let title_ok = search
            .as_ref()
            .map_or(true, |term| video.title.to_lowercase().contains(term.as_str()));
        let category_ok = category
            .as_ref()
            .map_or(true, |c| video.category.eq_ignore_ascii_case(c));

        title_ok && category_ok
    }
}

fn media_reference(input: &str) -> CatalogResult<String> {
    parse_video_reference(input).ok_or_else(|| {
        CatalogError::Validation("Please enter a valid YouTube video ID or URL".to_string())
    })
}

/// Video store
pub struct VideoService {
    videos: Arc<dyn DocumentStore<Video>>,
    channels: Arc<dyn DocumentStore<Channel>>,
    comments: Arc<dyn DocumentStore<Comment>>,
}

impl VideoService {
    pub fn new(
        videos: Arc<dyn DocumentStore<Video>>,
        channels: Arc<dyn DocumentStore<Channel>>,
        comments: Arc<dyn DocumentStore<Comment>>,
    ) -> Self {
        Self {
            videos,
            channels,
            comments,
        }
    }

    /// Upload a video to the caller's channel
    pub fn upload(&self, caller: Uuid, request: UploadVideoRequest) -> CatalogResult<Video> {
        let title = validate::required("title", &request.title)?;
        let media = media_reference(&validate::required("videoLink", &request.media_reference)?)?;

        let channel = self
            .channels
            .find_one(&|c| c.owner_user_id == caller)?
            .ok_or_else(|| {
                CatalogError::InvalidOperation(
                    "Create a channel before uploading videos".to_string(),
                )
            })?;

        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            title,
            description: validate::optional(request.description.as_deref()).unwrap_or_default(),
            category: validate::optional(request.category.as_deref()).unwrap_or_default(),
            thumbnail_url: validate::optional(request.thumbnail_url.as_deref())
                .unwrap_or_else(|| default_thumbnail(&media)),
            media_reference: media,
            channel_id: channel.id,
            views: 0,
            like_count: 0,
            dislike_count: 0,
            liked_by_user_ids: BTreeSet::new(),
            disliked_by_user_ids: BTreeSet::new(),
            upload_date: now,
            updated_at: now,
        };
        let video = self.videos.insert(video)?;

        // The channel may have been deleted while we were inserting
        if self.channels.get(channel.id)?.is_none() {
            self.videos.remove(video.id)?;
            return Err(CatalogError::NotFound("Channel"));
        }

        tracing::info!(video_id = %video.id, channel_id = %channel.id, "video uploaded");
        Ok(video)
    }

    pub fn get(&self, id: Uuid) -> CatalogResult<Video> {
        self.videos.get(id)?.ok_or(CatalogError::NotFound("Video"))
    }

    /// Videos matching the query, newest first
    pub fn list(&self, query: &VideoQuery) -> CatalogResult<Vec<Video>> {
        let mut videos = self.videos.find(&|v| query.matches(v))?;
        videos.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        Ok(videos)
    }

    /// Merge the provided fields into a video on the caller's channel
    pub fn update(
        &self,
        caller: Uuid,
        id: Uuid,
        request: UpdateVideoRequest,
    ) -> CatalogResult<Video> {
        self.owned_video(caller, id)?;

        let title = validate::required_patch("title", request.title)?;
        let media = validate::required_patch("videoLink", request.media_reference)?
            .map(|m| media_reference(&m))
            .transpose()?;
        let thumbnail = request.thumbnail_url.map(|t| t.trim().to_string());
        let description = request.description.map(|d| d.trim().to_string());
        let category = request.category.map(|c| c.trim().to_string());

        let updated = self.videos.try_update(id, |video| {
            if let Some(title) = &title {
                video.title = title.clone();
            }
            if let Some(media) = &media {
                // Keep a derived thumbnail in step with the new media
                if video.thumbnail_url == default_thumbnail(&video.media_reference) {
                    video.thumbnail_url = default_thumbnail(media);
                }
                video.media_reference = media.clone();
            }
            match &thumbnail {
                Some(t) if t.is_empty() => {
                    video.thumbnail_url = default_thumbnail(&video.media_reference)
                }
                Some(t) => video.thumbnail_url = t.clone(),
                None => {}
            }
            if let Some(description) = &description {
                video.description = description.clone();
            }
            if let Some(category) = &category {
                video.category = category.clone();
            }
            video.updated_at = Utc::now();
            Ok::<(), CatalogError>(())
        })?;

        updated.ok_or(CatalogError::NotFound("Video"))
    }

    /// Delete a video on the caller's channel, with its comments
    pub fn delete(&self, caller: Uuid, id: Uuid) -> CatalogResult<()> {
        self.owned_video(caller, id)?;

        self.videos.remove(id)?;
        let comments = self.comments.remove_where(&|c| c.video_id == id)?;

        tracing::info!(video_id = %id, comments = comments.len(), "video deleted");
        Ok(())
    }

    /// The video, provided the caller owns its channel
    ///
    /// Channel ids and owners never change, so the check stays valid for the
    /// mutation that follows.
    fn owned_video(&self, caller: Uuid, id: Uuid) -> CatalogResult<Video> {
        let video = self.get(id)?;
        let channel = self
            .channels
            .get(video.channel_id)?
            .ok_or(CatalogError::Forbidden)?;
        ensure_owner(channel.owner_user_id, caller)?;
        Ok(video)
    }
}
