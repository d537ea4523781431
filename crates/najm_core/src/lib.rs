pub mod catalog;
pub mod chat;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod memory;
pub mod ports;
pub mod records;
pub mod stores;

pub use chat::{ChatSession, ChatState, RejectReason, SubmitOutcome};
pub use coordinator::{PageContext, SiteCoordinator};
pub use domain::{ChatRole, ChatTurn, ContentPost, Identity, Language, NewPost, Theme};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use ports::{AdviceService, DisplayHost, KeyValueStore, PortError, PortResult};
