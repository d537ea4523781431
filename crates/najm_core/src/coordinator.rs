//! crates/najm_core/src/coordinator.rs
//!
//! Wires the stores and the chat session together for one page session and
//! enforces the rule that uploads require a signed-up visitor.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::catalog::{self, DestinationView, UiText};
use crate::chat::{ChatSession, ChatState, SubmitOutcome};
use crate::domain::{ChatTurn, ContentPost, Identity, Language, NewPost, Theme};
use crate::error::{StoreError, StoreResult};
use crate::ports::{AdviceService, DisplayHost, KeyValueStore, PortResult};
use crate::stores::{ContentStore, IdentityStore, PreferenceStore};

/// Everything a render pass needs, read once and threaded to every component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    pub language: Language,
    pub theme: Theme,
    pub identity: Option<Identity>,
}

pub struct SiteCoordinator {
    preferences: PreferenceStore,
    identities: Arc<IdentityStore>,
    content: ContentStore,
    chat: ChatSession,
}

impl SiteCoordinator {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        host: Arc<dyn DisplayHost>,
        advice: Arc<dyn AdviceService>,
        advice_timeout: Option<Duration>,
    ) -> Self {
        let identities = Arc::new(IdentityStore::new(storage.clone()));
        let chat = match advice_timeout {
            Some(limit) => ChatSession::new(advice).with_timeout(limit),
            None => ChatSession::new(advice),
        };
        Self {
            preferences: PreferenceStore::new(storage.clone(), host),
            content: ContentStore::new(storage, identities.clone()),
            identities,
            chat,
        }
    }

    /// Restores preferences, applies the theme flag, and seeds an empty feed.
    pub fn boot(&self) -> PortResult<PageContext> {
        let theme = self.preferences.apply_current_theme();
        let language = self.preferences.language();
        if self.content.seed_if_empty(language)? {
            info!("Fresh storage detected; example posts added");
        }
        Ok(PageContext {
            language,
            theme,
            identity: self.identities.current(),
        })
    }

    pub fn context(&self) -> PageContext {
        PageContext {
            language: self.preferences.language(),
            theme: self.preferences.theme(),
            identity: self.identities.current(),
        }
    }

    // --- Preferences ---

    pub fn set_language(&self, language: Language) -> PortResult<()> {
        self.preferences.set_language(language)
    }

    pub fn toggle_language(&self) -> PortResult<Language> {
        self.preferences.toggle_language()
    }

    pub fn set_theme(&self, theme: Theme) -> PortResult<()> {
        self.preferences.set_theme(theme)
    }

    pub fn toggle_theme(&self) -> PortResult<Theme> {
        self.preferences.toggle_theme()
    }

    // --- Identity ---

    pub fn sign_up(&self, name: &str, email: &str) -> StoreResult<Identity> {
        self.identities.sign_up(name, email)
    }

    pub fn log_out(&self) -> PortResult<()> {
        self.identities.log_out()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.identities.current()
    }

    // --- Community feed ---

    /// Gate for entering the upload flow.
    pub fn begin_upload(&self) -> StoreResult<Identity> {
        self.identities.current().ok_or(StoreError::NoActiveIdentity)
    }

    pub fn submit_post(&self, new_post: NewPost) -> StoreResult<ContentPost> {
        self.content.add(new_post)
    }

    pub fn feed(&self) -> Vec<ContentPost> {
        self.content.list()
    }

    // --- Assistant ---

    /// Asks the assistant in the visitor's current language.
    pub async fn ask(&self, prompt: &str) -> SubmitOutcome {
        let language = self.preferences.language();
        self.chat.submit(prompt, language).await
    }

    pub async fn chat_turns(&self) -> Vec<ChatTurn> {
        self.chat.turns().await
    }

    pub async fn chat_state(&self) -> ChatState {
        self.chat.state().await
    }

    // --- Reference content ---

    pub fn ui_text(&self) -> &'static UiText {
        catalog::ui_text(self.preferences.language())
    }

    pub fn destinations(&self) -> Vec<DestinationView> {
        catalog::destinations(self.preferences.language())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::ports::PortError;
    use crate::stores::testing::RecordingHost;
    use async_trait::async_trait;

    struct EchoAdvice;

    #[async_trait]
    impl AdviceService for EchoAdvice {
        async fn get_travel_advice(&self, prompt: &str, language: Language) -> PortResult<String> {
            if prompt == "fail" {
                return Err(PortError::Unexpected("boom".to_string()));
            }
            Ok(format!("[{}] {}", language, prompt))
        }
    }

    fn coordinator(storage: Arc<dyn KeyValueStore>) -> (SiteCoordinator, Arc<RecordingHost>) {
        let host = Arc::new(RecordingHost::new(false));
        let site = SiteCoordinator::new(storage, host.clone(), Arc::new(EchoAdvice), None);
        (site, host)
    }

    #[test]
    fn boot_applies_theme_and_seeds_feed() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (site, host) = coordinator(storage);
        let context = site.boot().unwrap();
        assert_eq!(context.language, Language::Ar);
        assert_eq!(context.theme, Theme::Light);
        assert_eq!(context.identity, None);
        assert_eq!(host.applied(), vec![Theme::Light]);
        assert_eq!(site.feed().len(), 2);
        assert_eq!(site.feed()[0].caption, "منظر رائع من إيسيك كول!");
    }

    #[test]
    fn upload_gate_follows_identity() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (site, _) = coordinator(storage);
        site.boot().unwrap();

        assert!(matches!(site.begin_upload(), Err(StoreError::NoActiveIdentity)));
        let rejected = site.submit_post(NewPost {
            image_data: "data:image/png;base64,AA==".to_string(),
            ..NewPost::default()
        });
        assert!(matches!(rejected, Err(StoreError::NoActiveIdentity)));

        site.sign_up("Maryam", "maryam@example.com").unwrap();
        assert_eq!(site.begin_upload().unwrap().name, "Maryam");
        let post = site
            .submit_post(NewPost {
                image_data: "data:image/png;base64,AA==".to_string(),
                caption: "Yurt camp".to_string(),
                location: "Son-Kul".to_string(),
            })
            .unwrap();
        assert_eq!(site.feed()[0].id, post.id);

        site.log_out().unwrap();
        assert!(site.begin_upload().is_err());
    }

    #[test]
    fn state_survives_a_reload() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (site, _) = coordinator(storage.clone());
        site.boot().unwrap();
        site.set_theme(Theme::Dark).unwrap();
        site.toggle_language().unwrap();
        site.sign_up("Maryam", "maryam@example.com").unwrap();

        let (reloaded, host) = coordinator(storage);
        let context = reloaded.boot().unwrap();
        assert_eq!(context.theme, Theme::Dark);
        assert_eq!(context.language, Language::En);
        assert_eq!(context.identity.unwrap().name, "Maryam");
        assert_eq!(host.applied(), vec![Theme::Dark]);
        assert_eq!(reloaded.ui_text().nav_home, "Home");
        assert_eq!(reloaded.destinations()[2].title, "Bishkek City");
    }

    #[tokio::test]
    async fn ask_uses_current_language() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (site, _) = coordinator(storage);
        site.set_language(Language::En).unwrap();

        let outcome = site.ask("Best season?").await;
        assert_eq!(outcome, SubmitOutcome::Answered(ChatTurn::assistant("[en] Best season?")));

        site.ask("fail").await;
        let turns = site.chat_turns().await;
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[3].text, catalog::ADVICE_FALLBACK_EN);
        assert_eq!(site.chat_state().await, ChatState::Idle);
    }
}
