//! crates/najm_core/src/stores/content.rs
//!
//! Persists the community photo feed, newest post first.
//!
//! The whole collection is read, modified, and written back on every upload.
//! Writers inside one process are serialized by the store. Two processes
//! sharing one storage backend end with the last write winning.

use chrono::{SubsecRound, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog;
use crate::domain::{ContentPost, Language, NewPost};
use crate::error::{StoreError, StoreResult};
use crate::ports::{KeyValueStore, PortError, PortResult};
use crate::records::{PostRecord, POSTS_KEY};
use crate::stores::identity::IdentityStore;

pub struct ContentStore {
    storage: Arc<dyn KeyValueStore>,
    identities: Arc<IdentityStore>,
    /// Held across each read-modify-write of the collection.
    writes: Mutex<()>,
}

impl ContentStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, identities: Arc<IdentityStore>) -> Self {
        Self {
            storage,
            identities,
            writes: Mutex::new(()),
        }
    }

    fn lock_writes(&self) -> PortResult<MutexGuard<'_, ()>> {
        self.writes
            .lock()
            .map_err(|_| PortError::Unavailable("community feed lock poisoned".to_string()))
    }

    /// Loads the persisted collection. `None` means nothing usable is stored.
    fn load(&self) -> Option<Vec<ContentPost>> {
        let raw = match self.storage.get(POSTS_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Could not read community feed: {}", e);
                return None;
            }
        };
        let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring unreadable community feed: {}", e);
                return None;
            }
        };
        // One bad entry must not cost the visitor the rest of the feed.
        let posts = entries
            .into_iter()
            .filter_map(|entry| {
                let record = match serde_json::from_value::<PostRecord>(entry) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!("Skipping unreadable post: {}", e);
                        return None;
                    }
                };
                let id = record.id.clone();
                let post = record.to_domain();
                if post.is_none() {
                    warn!("Skipping post {} with an out-of-range timestamp", id);
                }
                post
            })
            .collect();
        Some(posts)
    }

    fn persist(&self, posts: &[ContentPost]) -> PortResult<()> {
        let records: Vec<PostRecord> = posts.iter().map(PostRecord::from_domain).collect();
        let json =
            serde_json::to_string(&records).map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.storage.set(POSTS_KEY, &json)
    }

    /// All posts, newest first. The seeded pair is the exception: it keeps its
    /// fixed order, with the older Issyk-Kul post ahead of Ala-Archa.
    pub fn list(&self) -> Vec<ContentPost> {
        self.load().unwrap_or_default()
    }

    /// Populates a fresh store with the example posts. Returns whether it seeded.
    pub fn seed_if_empty(&self, language: Language) -> PortResult<bool> {
        let _writes = self.lock_writes()?;
        if self.load().is_some() {
            return Ok(false);
        }
        let seeds = catalog::seed_posts(language, Utc::now().trunc_subsecs(3));
        self.persist(&seeds)?;
        info!("Seeded community feed with {} example posts", seeds.len());
        Ok(true)
    }

    /// Publishes a photo under the active visitor's name.
    ///
    /// The identity check lives here, not only in the presentation layer, so it
    /// holds for every caller.
    pub fn add(&self, new_post: NewPost) -> StoreResult<ContentPost> {
        let author = self
            .identities
            .current()
            .ok_or(StoreError::NoActiveIdentity)?;
        if new_post.image_data.trim().is_empty() {
            return Err(StoreError::Validation("an image is required".to_string()));
        }

        let _writes = self.lock_writes()?;
        let mut posts = self.list();
        // Storage keeps millisecond timestamps.
        let now = Utc::now().trunc_subsecs(3);
        // Keep created_at non-decreasing towards the head, even if the clock stepped back.
        let created_at = posts
            .first()
            .map_or(now, |head| head.created_at.max(now));

        let post = ContentPost {
            id: Uuid::new_v4().to_string(),
            image_data: new_post.image_data,
            author_name: author.name,
            caption: new_post.caption,
            location: new_post.location,
            created_at,
        };
        posts.insert(0, post.clone());
        self.persist(&posts)?;
        info!("Post {} added by '{}'", post.id, post.author_name);
        Ok(post)
    }
}
