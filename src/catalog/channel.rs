//! # Channels
//!
//! Channel documents and the channel store.
//!
//! A user owns at most one channel. The channel's video list is not stored on
//! the channel; it is read from the video collection by `channelId`.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::comment::Comment;
use super::errors::{ensure_owner, CatalogError, CatalogResult};
use super::video::Video;
use crate::store::{Document, DocumentStore, DocumentStoreExt, StoreError};
use crate::validate;

/// Channel document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub avatar_url: String,
    pub banner_url: String,

    /// Owning user, fixed at creation
    pub owner_user_id: Uuid,

    /// Always equal to `subscriber_user_ids.len()`
    pub subscriber_count: u64,
    pub subscriber_user_ids: BTreeSet<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Channel {
    const COLLECTION: &'static str = "channels";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Channel {
    /// Add a subscriber; returns whether membership changed
    pub fn add_subscriber(&mut self, user_id: Uuid) -> bool {
        if self.subscriber_user_ids.insert(user_id) {
            self.subscriber_count += 1;
            true
        } else {
            false
        }
    }

    /// Remove a subscriber; returns whether membership changed
    pub fn remove_subscriber(&mut self, user_id: Uuid) -> bool {
        if self.subscriber_user_ids.remove(&user_id) {
            self.subscriber_count = self.subscriber_count.saturating_sub(1);
            true
        } else {
            false
        }
    }

    pub fn is_subscribed(&self, user_id: Uuid) -> bool {
        self.subscriber_user_ids.contains(&user_id)
    }

    /// Counter matches the membership set
    pub fn is_consistent(&self) -> bool {
        self.subscriber_count == self.subscriber_user_ids.len() as u64
    }
}

/// Channel with its videos, as returned by reads
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelView {
    #[serde(flatten)]
    pub channel: Channel,
    pub channel_id: Uuid,
    /// Oldest upload first
    pub videos: Vec<Video>,
}

/// Channel creation request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    #[serde(default, alias = "channelName")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "channelPic", alias = "channelPicUrl")]
    pub avatar_url: Option<String>,
    #[serde(default, alias = "channelBanner", alias = "channelBannerUrl")]
    pub banner_url: Option<String>,
}

/// Channel update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChannelRequest {
    #[serde(default, alias = "channelName")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "channelPic", alias = "channelPicUrl")]
    pub avatar_url: Option<String>,
    #[serde(default, alias = "channelBanner", alias = "channelBannerUrl")]
    pub banner_url: Option<String>,
}

/// Channel store
pub struct ChannelService {
    channels: Arc<dyn DocumentStore<Channel>>,
    videos: Arc<dyn DocumentStore<Video>>,
    comments: Arc<dyn DocumentStore<Comment>>,
}

impl ChannelService {
    pub fn new(
        channels: Arc<dyn DocumentStore<Channel>>,
        videos: Arc<dyn DocumentStore<Video>>,
        comments: Arc<dyn DocumentStore<Comment>>,
    ) -> Self {
        Self {
            channels,
            videos,
            comments,
        }
    }

    /// Create the caller's channel
    pub fn create(&self, owner: Uuid, request: CreateChannelRequest) -> CatalogResult<Channel> {
        let name = validate::required("name", &request.name)?;
        let now = Utc::now();

        let channel = Channel {
            id: Uuid::new_v4(),
            name,
            description: trimmed_or_empty(request.description),
            avatar_url: trimmed_or_empty(request.avatar_url),
            banner_url: trimmed_or_empty(request.banner_url),
            owner_user_id: owner,
            subscriber_count: 0,
            subscriber_user_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        };

        let channel = self
            .channels
            .insert_unique(channel, &|existing, new| {
                existing.owner_user_id == new.owner_user_id
            })
            .map_err(|e| match e {
                StoreError::Duplicate(_) => {
                    CatalogError::InvalidOperation("You already have a channel".to_string())
                }
                other => CatalogError::Storage(other),
            })?;

        tracing::info!(channel_id = %channel.id, owner = %owner, "channel created");
        Ok(channel)
    }

    /// Channel by id, with its videos
    pub fn get(&self, id: Uuid) -> CatalogResult<ChannelView> {
        let channel = self
            .channels
            .get(id)?
            .ok_or(CatalogError::NotFound("Channel"))?;
        self.view(channel)
    }

    /// Channel owned by a user, with its videos
    pub fn get_by_owner(&self, user_id: Uuid) -> CatalogResult<ChannelView> {
        let channel = self
            .find_by_owner(user_id)?
            .ok_or(CatalogError::NotFound("Channel"))?;
        self.view(channel)
    }

    /// Channel owned by a user, if any
    pub fn find_by_owner(&self, user_id: Uuid) -> CatalogResult<Option<Channel>> {
        Ok(self.channels.find_one(&|c| c.owner_user_id == user_id)?)
    }

    /// Merge the provided fields into the caller's channel
    pub fn update(
        &self,
        caller: Uuid,
        id: Uuid,
        request: UpdateChannelRequest,
    ) -> CatalogResult<Channel> {
        let name = validate::required_patch("name", request.name)?;
        let description = request.description.map(|v| v.trim().to_string());
        let avatar_url = request.avatar_url.map(|v| v.trim().to_string());
        let banner_url = request.banner_url.map(|v| v.trim().to_string());

        let updated = self.channels.try_update(id, |channel| {
            ensure_owner(channel.owner_user_id, caller)?;

            if let Some(name) = &name {
                channel.name = name.clone();
            }
            if let Some(description) = &description {
                channel.description = description.clone();
            }
            if let Some(avatar_url) = &avatar_url {
                channel.avatar_url = avatar_url.clone();
            }
            if let Some(banner_url) = &banner_url {
                channel.banner_url = banner_url.clone();
            }
            channel.updated_at = Utc::now();
            Ok::<(), CatalogError>(())
        })?;

        updated.ok_or(CatalogError::NotFound("Channel"))
    }

    /// Delete the caller's channel with its videos and their comments
    pub fn delete(&self, caller: Uuid, id: Uuid) -> CatalogResult<()> {
        let channel = self
            .channels
            .get(id)?
            .ok_or(CatalogError::NotFound("Channel"))?;
        ensure_owner(channel.owner_user_id, caller)?;

        self.channels.remove(id)?;

        let videos = self.videos.remove_where(&|v| v.channel_id == id)?;
        let video_ids: BTreeSet<Uuid> = videos.iter().map(|v| v.id).collect();
        let comments = self
            .comments
            .remove_where(&|c| video_ids.contains(&c.video_id))?;

        tracing::info!(
            channel_id = %id,
            videos = videos.len(),
            comments = comments.len(),
            "channel deleted"
        );
        Ok(())
    }

    fn view(&self, channel: Channel) -> CatalogResult<ChannelView> {
        let channel_id = channel.id;
        let mut videos = self.videos.find(&|v| v.channel_id == channel_id)?;
        videos.sort_by(|a, b| a.upload_date.cmp(&b.upload_date));

        Ok(ChannelView {
            channel,
            channel_id,
            videos,
        })
    }
}

fn trimmed_or_empty(value: Option<String>) -> String {
    validate::optional(value.as_deref()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;

    fn service() -> (Database, ChannelService) {
        let db = Database::in_memory();
        let service = ChannelService::new(
            db.channels.clone(),
            db.videos.clone(),
            db.comments.clone(),
        );
        (db, service)
    }

    fn create_request(name: &str) -> CreateChannelRequest {
        CreateChannelRequest {
            name: name.to_string(),
            description: Some("  all about talks ".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_get() {
        let (_db, service) = service();
        let owner = Uuid::new_v4();

        let channel = service.create(owner, create_request(" Tech Talks ")).unwrap();
        assert_eq!(channel.name, "Tech Talks");
        assert_eq!(channel.description, "all about talks");
        assert_eq!(channel.subscriber_count, 0);

        let view = service.get(channel.id).unwrap();
        assert_eq!(view.channel_id, channel.id);
        assert!(view.videos.is_empty());

        let by_owner = service.get_by_owner(owner).unwrap();
        assert_eq!(by_owner.channel.id, channel.id);
    }

    #[test]
    fn test_create_requires_name() {
        let (_db, service) = service();
        let result = service.create(Uuid::new_v4(), create_request("   "));
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_one_channel_per_owner() {
        let (_db, service) = service();
        let owner = Uuid::new_v4();
        service.create(owner, create_request("First")).unwrap();

        let result = service.create(owner, create_request("Second"));
        assert!(matches!(result, Err(CatalogError::InvalidOperation(_))));
    }

    #[test]
    fn test_get_missing() {
        let (_db, service) = service();
        assert!(matches!(
            service.get(Uuid::new_v4()),
            Err(CatalogError::NotFound("Channel"))
        ));
        assert!(matches!(
            service.get_by_owner(Uuid::new_v4()),
            Err(CatalogError::NotFound("Channel"))
        ));
    }

    #[test]
    fn test_update_merges_fields() {
        let (_db, service) = service();
        let owner = Uuid::new_v4();
        let channel = service.create(owner, create_request("Tech Talks")).unwrap();

        let updated = service
            .update(
                owner,
                channel.id,
                UpdateChannelRequest {
                    banner_url: Some(" https://cdn.example.com/b.png ".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Tech Talks");
        assert_eq!(updated.banner_url, "https://cdn.example.com/b.png");
    }

    #[test]
    fn test_update_by_non_owner_is_forbidden() {
        let (_db, service) = service();
        let channel = service
            .create(Uuid::new_v4(), create_request("Tech Talks"))
            .unwrap();

        let result = service.update(
            Uuid::new_v4(),
            channel.id,
            UpdateChannelRequest {
                name: Some("Hijacked".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(CatalogError::Forbidden)));
        assert_eq!(service.get(channel.id).unwrap().channel.name, "Tech Talks");
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let (_db, service) = service();
        let owner = Uuid::new_v4();
        let channel = service.create(owner, create_request("Tech Talks")).unwrap();

        let result = service.update(
            owner,
            channel.id,
            UpdateChannelRequest {
                name: Some("  ".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_delete_by_non_owner_is_forbidden() {
        let (_db, service) = service();
        let channel = service
            .create(Uuid::new_v4(), create_request("Tech Talks"))
            .unwrap();

        let result = service.delete(Uuid::new_v4(), channel.id);
        assert!(matches!(result, Err(CatalogError::Forbidden)));
        assert!(service.get(channel.id).is_ok());
    }

    #[test]
    fn test_subscriber_helpers_keep_count_in_sync() {
        let (_db, service) = service();
        let mut channel = service
            .create(Uuid::new_v4(), create_request("Tech Talks"))
            .unwrap();
        let user = Uuid::new_v4();

        assert!(channel.add_subscriber(user));
        assert!(!channel.add_subscriber(user));
        assert_eq!(channel.subscriber_count, 1);
        assert!(channel.remove_subscriber(user));
        assert!(!channel.remove_subscriber(user));
        assert_eq!(channel.subscriber_count, 0);
        assert!(channel.is_consistent());
    }

    #[test]
    fn test_create_accepts_legacy_field_names() {
        let request: CreateChannelRequest = serde_json::from_value(serde_json::json!({
            "channelName": "Tech Talks",
            "channelPic": "https://cdn.example.com/p.png",
            "channelBanner": "https://cdn.example.com/b.png"
        }))
        .unwrap();

        assert_eq!(request.name, "Tech Talks");
        assert_eq!(request.avatar_url.as_deref(), Some("https://cdn.example.com/p.png"));
        assert_eq!(request.banner_url.as_deref(), Some("https://cdn.example.com/b.png"));
    }
}
