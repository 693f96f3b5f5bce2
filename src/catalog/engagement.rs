//! # Engagement
//!
//! Subscriptions, reactions and view counts.
//!
//! Every operation is a single atomic update of one document, so the stored
//! counter and its membership set change together. Repeating an operation is
//! a no-op: liking twice still counts one like.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::channel::Channel;
use super::errors::{CatalogError, CatalogResult};
use super::video::{Reaction, Video};
use crate::store::{DocumentStore, DocumentStoreExt};

/// Like and dislike totals after a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionCounts {
    pub likes: u64,
    pub dislikes: u64,
}

impl From<&Video> for ReactionCounts {
    fn from(video: &Video) -> Self {
        Self {
            likes: video.like_count,
            dislikes: video.dislike_count,
        }
    }
}

/// Engagement operations over channels and videos
pub struct EngagementService {
    channels: Arc<dyn DocumentStore<Channel>>,
    videos: Arc<dyn DocumentStore<Video>>,
}

impl EngagementService {
    pub fn new(
        channels: Arc<dyn DocumentStore<Channel>>,
        videos: Arc<dyn DocumentStore<Video>>,
    ) -> Self {
        Self { channels, videos }
    }

    /// Subscribe to a channel; returns the subscriber count
    pub fn subscribe(&self, user_id: Uuid, channel_id: Uuid) -> CatalogResult<u64> {
        let channel = self
            .channels
            .try_update(channel_id, |channel| {
                if channel.owner_user_id == user_id {
                    return Err(CatalogError::InvalidOperation(
                        "You cannot subscribe to your own channel".to_string(),
                    ));
                }
                channel.add_subscriber(user_id);
                Ok(())
            })?
            .ok_or(CatalogError::NotFound("Channel"))?;

        tracing::debug!(%user_id, %channel_id, subscribers = channel.subscriber_count, "subscribed");
        Ok(channel.subscriber_count)
    }

    /// Unsubscribe from a channel; returns the subscriber count
    pub fn unsubscribe(&self, user_id: Uuid, channel_id: Uuid) -> CatalogResult<u64> {
        let channel = self
            .channels
            .update(channel_id, &mut |channel| channel.remove_subscriber(user_id))?
            .ok_or(CatalogError::NotFound("Channel"))?;

        tracing::debug!(%user_id, %channel_id, subscribers = channel.subscriber_count, "unsubscribed");
        Ok(channel.subscriber_count)
    }

    pub fn like(&self, user_id: Uuid, video_id: Uuid) -> CatalogResult<ReactionCounts> {
        self.react(video_id, &mut |video| video.like(user_id))
    }

    pub fn unlike(&self, user_id: Uuid, video_id: Uuid) -> CatalogResult<ReactionCounts> {
        self.react(video_id, &mut |video| video.unlike(user_id))
    }

    pub fn dislike(&self, user_id: Uuid, video_id: Uuid) -> CatalogResult<ReactionCounts> {
        self.react(video_id, &mut |video| video.dislike(user_id))
    }

    pub fn undislike(&self, user_id: Uuid, video_id: Uuid) -> CatalogResult<ReactionCounts> {
        self.react(video_id, &mut |video| video.undislike(user_id))
    }

    /// Current reaction of a user to a video
    pub fn reaction(&self, user_id: Uuid, video_id: Uuid) -> CatalogResult<Reaction> {
        let video = self
            .videos
            .get(video_id)?
            .ok_or(CatalogError::NotFound("Video"))?;
        Ok(video.reaction_of(user_id))
    }

    /// Count one view; returns the new total
    pub fn record_view(&self, video_id: Uuid) -> CatalogResult<u64> {
        let video = self
            .videos
            .update(video_id, &mut |video| {
                video.views += 1;
                true
            })?
            .ok_or(CatalogError::NotFound("Video"))?;
        Ok(video.views)
    }

    fn react(
        &self,
        video_id: Uuid,
        transition: &mut dyn FnMut(&mut Video) -> bool,
    ) -> CatalogResult<ReactionCounts> {
        let video = self
            .videos
            .update(video_id, transition)?
            .ok_or(CatalogError::NotFound("Video"))?;
        Ok(ReactionCounts::from(&video))
    }
}
