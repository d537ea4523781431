//! crates/najm_core/src/records.rs
//!
//! "Impure" storage records and the keys they live under. The layouts match what
//! the site has always written to local storage, so existing data keeps loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ContentPost, Identity};

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "lang";
pub const IDENTITY_KEY: &str = "najm_user";
pub const POSTS_KEY: &str = "najm_photos";

#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub name: String,
    pub email: String,
}

impl IdentityRecord {
    pub fn to_domain(self) -> Identity {
        Identity {
            name: self.name,
            email: self.email,
        }
    }

    pub fn from_domain(identity: &Identity) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: String,
    pub image_url: String,
    pub user_name: String,
    pub caption: String,
    pub location: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl PostRecord {
    pub fn to_domain(self) -> Option<ContentPost> {
        let created_at = DateTime::<Utc>::from_timestamp_millis(self.timestamp)?;
        Some(ContentPost {
            id: self.id,
            image_data: self.image_url,
            author_name: self.user_name,
            caption: self.caption,
            location: self.location,
            created_at,
        })
    }

    pub fn from_domain(post: &ContentPost) -> Self {
        Self {
            id: post.id.clone(),
            image_url: post.image_data.clone(),
            user_name: post.author_name.clone(),
            caption: post.caption.clone(),
            location: post.location.clone(),
            timestamp: post.created_at.timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_record_uses_camel_case_layout() {
        let json = r#"{"id":"00000000-0000-0000-0000-000000000001","imageUrl":"data:image/png;base64,AA==","userName":"Ahmed Ali","caption":"Hi","location":"Bishkek","timestamp":1700000000000}"#;
        let record: PostRecord = serde_json::from_str(json).unwrap();
        let post = record.to_domain().unwrap();
        assert_eq!(post.author_name, "Ahmed Ali");
        assert_eq!(post.created_at.timestamp_millis(), 1_700_000_000_000);

        let back = serde_json::to_value(PostRecord::from_domain(&post)).unwrap();
        assert_eq!(back["userName"], "Ahmed Ali");
        assert_eq!(back["imageUrl"], "data:image/png;base64,AA==");
    }

    #[test]
    fn post_ids_are_opaque_tokens() {
        let json = r#"{"id":"k3j9x2a1b","imageUrl":"","userName":"Omar","caption":"","location":"","timestamp":0}"#;
        let post = serde_json::from_str::<PostRecord>(json).unwrap().to_domain().unwrap();
        assert_eq!(post.id, "k3j9x2a1b");
        assert_eq!(serde_json::to_value(PostRecord::from_domain(&post)).unwrap()["id"], "k3j9x2a1b");
    }
}
