//! crates/najm_core/src/stores/identity.rs
//!
//! Persists the single "current visitor" label. There is no password and no
//! verification; presence of an identity is not a security boundary.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::Identity;
use crate::error::{StoreError, StoreResult};
use crate::ports::{KeyValueStore, PortError, PortResult};
use crate::records::{IdentityRecord, IDENTITY_KEY};

pub struct IdentityStore {
    storage: Arc<dyn KeyValueStore>,
}

impl IdentityStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Records a new visitor, replacing whoever signed up before.
    pub fn sign_up(&self, name: &str, email: &str) -> StoreResult<Identity> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation("name is required".to_string()));
        }
        if email.trim().is_empty() {
            return Err(StoreError::Validation("email is required".to_string()));
        }

        let identity = Identity {
            name: name.to_string(),
            email: email.to_string(),
        };
        let json = serde_json::to_string(&IdentityRecord::from_domain(&identity))
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.storage.set(IDENTITY_KEY, &json)?;
        info!("Visitor '{}' signed up", identity.name);
        Ok(identity)
    }

    pub fn current(&self) -> Option<Identity> {
        let raw = match self.storage.get(IDENTITY_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Could not read visitor identity: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<IdentityRecord>(&raw) {
            Ok(record) => Some(record.to_domain()),
            Err(e) => {
                warn!("Ignoring unreadable visitor identity: {}", e);
                None
            }
        }
    }

    /// Clears the visitor. Succeeds when nobody is signed up.
    pub fn log_out(&self) -> PortResult<()> {
        self.storage.remove(IDENTITY_KEY)?;
        info!("Visitor logged out");
        Ok(())
    }
}
