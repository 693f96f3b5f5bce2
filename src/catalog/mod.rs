//! # Catalog
//!
//! Channels, videos, comments and the engagement protocol.
//!
//! ## Ownership rules
//! - A user owns at most one channel
//! - Only the channel owner may update or delete the channel and its videos
//! - Only the author may edit or delete a comment
//!
//! Deleting a channel removes its videos; deleting a video removes its
//! comments.

pub mod channel;
pub mod comment;
pub mod engagement;
pub mod errors;
pub mod media;
pub mod profile;
pub mod video;

pub use channel::{Channel, ChannelService, ChannelView, CreateChannelRequest, UpdateChannelRequest};
pub use comment::{Comment, CommentService, CommentView, EditCommentRequest, PostCommentRequest};
pub use engagement::{EngagementService, ReactionCounts};
pub use errors::{CatalogError, CatalogResult};
pub use profile::{ProfileService, PublicProfile, UserProfile};
pub use video::{Reaction, UpdateVideoRequest, UploadVideoRequest, Video, VideoQuery, VideoService};

use crate::store::Database;

/// Every catalog service over one database
pub struct Catalog {
    pub channels: ChannelService,
    pub videos: VideoService,
    pub comments: CommentService,
    pub engagement: EngagementService,
    pub profiles: ProfileService,
}

impl Catalog {
    pub fn new(db: &Database) -> Self {
        Self {
            channels: ChannelService::new(
                db.channels.clone(),
                db.videos.clone(),
                db.comments.clone(),
            ),
            videos: VideoService::new(db.videos.clone(), db.channels.clone(), db.comments.clone()),
            comments: CommentService::new(db.comments.clone(), db.videos.clone(), db.users.clone()),
            engagement: EngagementService::new(db.channels.clone(), db.videos.clone()),
            profiles: ProfileService::new(db.users.clone(), db.channels.clone(), db.videos.clone()),
        }
    }
}
