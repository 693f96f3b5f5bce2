//! User profiles assembled from the channel and video collections.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::channel::Channel;
use super::errors::{CatalogError, CatalogResult};
use super::video::Video;
use crate::auth::user::User;
use crate::store::DocumentStore;

/// Profile of a user with its relations, shown to that user only
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub liked_videos: BTreeSet<Uuid>,
    pub subscribed_channels: BTreeSet<Uuid>,
    /// Channel owned by the user, if any
    pub channel: Option<Uuid>,
}

/// Profile of any user as seen by others; carries no contact details
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    pub username: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub subscribed_channels: BTreeSet<Uuid>,
    pub channel: Option<Uuid>,
}

impl From<UserProfile> for PublicProfile {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.user.id,
            username: profile.user.username,
            avatar: profile.user.avatar,
            created_at: profile.user.created_at,
            subscribed_channels: profile.subscribed_channels,
            channel: profile.channel,
        }
    }
}

pub struct ProfileService {
    users: Arc<dyn DocumentStore<User>>,
    channels: Arc<dyn DocumentStore<Channel>>,
    videos: Arc<dyn DocumentStore<Video>>,
}

impl ProfileService {
    pub fn new(
        users: Arc<dyn DocumentStore<User>>,
        channels: Arc<dyn DocumentStore<Channel>>,
        videos: Arc<dyn DocumentStore<Video>>,
    ) -> Self {
        Self {
            users,
            channels,
            videos,
        }
    }

    pub fn profile(&self, user_id: Uuid) -> CatalogResult<UserProfile> {
        let user = self
            .users
            .get(user_id)?
            .ok_or(CatalogError::NotFound("User"))?;
        self.assemble(user)
    }

    /// What other users may see of `user_id`
    pub fn public_profile(&self, user_id: Uuid) -> CatalogResult<PublicProfile> {
        self.profile(user_id).map(PublicProfile::from)
    }

    /// Attach relations to an already loaded user
    pub fn assemble(&self, user: User) -> CatalogResult<UserProfile> {
        let user_id = user.id;

        let liked_videos = self
            .videos
            .find(&|v| v.liked_by_user_ids.contains(&user_id))?
            .into_iter()
            .map(|v| v.id)
            .collect();

        let channels = self.channels.find(&|c| {
            c.owner_user_id == user_id || c.subscriber_user_ids.contains(&user_id)
        })?;
        let channel = channels
            .iter()
            .find(|c| c.owner_user_id == user_id)
            .map(|c| c.id);
        let subscribed_channels = channels
            .iter()
            .filter(|c| c.is_subscribed(user_id))
            .map(|c| c.id)
            .collect();

        Ok(UserProfile {
            user,
            liked_videos,
            subscribed_channels,
            channel,
        })
    }
}
