//! # Document Store
//!
//! Typed collections for users, channels, videos and comments.
//!
//! Services never reach for a global handle: they receive the [`Database`]
//! (or the collections they need) when constructed.

pub mod document;
pub mod errors;
pub mod memory;

use std::sync::Arc;

pub use document::{Document, DocumentStore, DocumentStoreExt};
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryCollection;

use crate::auth::user::User;
use crate::catalog::channel::Channel;
use crate::catalog::comment::Comment;
use crate::catalog::video::Video;

/// Handle to every collection the application uses
#[derive(Clone)]
pub struct Database {
    pub users: Arc<dyn DocumentStore<User>>,
    pub channels: Arc<dyn DocumentStore<Channel>>,
    pub videos: Arc<dyn DocumentStore<Video>>,
    pub comments: Arc<dyn DocumentStore<Comment>>,
}

impl Database {
    /// Database backed by in-memory collections
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryCollection::<User>::new()),
            channels: Arc::new(InMemoryCollection::<Channel>::new()),
            videos: Arc::new(InMemoryCollection::<Video>::new()),
            comments: Arc::new(InMemoryCollection::<Comment>::new()),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::in_memory()
    }
}
