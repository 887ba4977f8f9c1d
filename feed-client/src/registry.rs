//! Multi-account session composition.
//!
//! A [`SessionRegistry`] builds one [`SessionCoordinator`] per
//! authenticated account, each configured for the personal-messages feed
//! only, and presents a unified conversation-list view over whichever
//! account is currently active. Notifications from non-active accounts
//! are filtered out by the registry's own observer proxy, so a display
//! only ever hears about the session it is showing.

use crate::session::{SessionCoordinator, SessionDisplay};
use crate::transport::Transport;
use feed_core::{conversation_previews, conversation_with, ConversationPreview};
use feed_types::{FeedType, Item, Person};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Observer registered on every coordinator; forwards only notifications
/// originating from the active session.
struct ActiveSessionProxy {
    active_username: Mutex<String>,
    downstream: Arc<dyn SessionDisplay>,
}

impl SessionDisplay for ActiveSessionProxy {
    fn id(&self) -> &str {
        "registry-active-session-proxy"
    }

    fn items_loaded(&self, coordinator: &SessionCoordinator, items: &[Item], feed: FeedType) {
        let active = self.active_username.lock().unwrap().clone();
        if coordinator.username() == active {
            self.downstream.items_loaded(coordinator, items, feed);
        }
    }
}

/// One coordinator per authenticated account, with an active-session
/// pointer for display purposes.
pub struct SessionRegistry {
    coordinators: Vec<Arc<SessionCoordinator>>,
    proxy: Arc<ActiveSessionProxy>,
}

impl SessionRegistry {
    /// Build the registry from one transport per authenticated account.
    ///
    /// Each account gets a coordinator configured for
    /// [`FeedType::PersonalMessages`] only; the registry's proxy is
    /// registered as an observer on every coordinator and an initial
    /// fetch runs per account. The first account starts active.
    pub async fn new(
        transports: Vec<Arc<dyn Transport>>,
        display: Arc<dyn SessionDisplay>,
    ) -> Self {
        let coordinators: Vec<_> = transports
            .into_iter()
            .map(|transport| {
                Arc::new(SessionCoordinator::new(
                    transport,
                    &[FeedType::PersonalMessages],
                ))
            })
            .collect();

        let active_username = coordinators
            .first()
            .map(|c| c.username())
            .unwrap_or_default();
        let proxy = Arc::new(ActiveSessionProxy {
            active_username: Mutex::new(active_username),
            downstream: display,
        });

        for coordinator in &coordinators {
            coordinator.add_observer(Arc::clone(&proxy) as Arc<dyn SessionDisplay>);
            coordinator.fetch().await;
        }

        Self {
            coordinators,
            proxy,
        }
    }

    /// The account handles of every composed session, in construction
    /// order.
    pub fn accounts(&self) -> Vec<String> {
        self.coordinators.iter().map(|c| c.username()).collect()
    }

    /// The coordinator currently selected for display.
    pub fn active(&self) -> Option<Arc<SessionCoordinator>> {
        let active = self.proxy.active_username.lock().unwrap().clone();
        self.coordinators
            .iter()
            .find(|c| c.username() == active)
            .cloned()
    }

    /// Select the account to display. Returns false when no session is
    /// authenticated as that username.
    pub fn set_active(&self, username: &str) -> bool {
        let known = self.coordinators.iter().any(|c| c.username() == username);
        if known {
            debug!(%username, "switching active session");
            *self.proxy.active_username.lock().unwrap() = username.to_string();
        }
        known
    }

    /// The active session's display title.
    pub fn title(&self) -> Option<String> {
        self.active().map(|c| c.title())
    }

    /// Refresh the active session's feed.
    ///
    /// Only the active coordinator fetches, so only observers of the
    /// active session hear about it.
    pub async fn fetch(&self) {
        if let Some(coordinator) = self.active() {
            coordinator.fetch().await;
        }
    }

    /// One conversation-list row per distinct sender in the active
    /// session's personal messages, most recently active first.
    pub async fn conversation_previews(&self) -> Vec<ConversationPreview> {
        conversation_previews(&self.personal_items().await)
    }

    /// The one-to-one conversation with a person in the active session:
    /// items they sent plus items addressed solely to them, newest first.
    pub async fn conversation_with(&self, person: &Person) -> Vec<Item> {
        conversation_with(&self.personal_items().await, person)
    }

    async fn personal_items(&self) -> Vec<Item> {
        match self.active() {
            Some(coordinator) => coordinator
                .items_for_feed(FeedType::PersonalMessages)
                .await
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use feed_types::{ItemId, PersonId};
    use url::Url;

    fn person(id: &str, username: &str) -> Person {
        Person::new(
            PersonId::new(id),
            username,
            username,
            Url::parse("https://example.com/avatar.png").unwrap(),
            "",
            false,
        )
    }

    fn message(id: &str, sender: &Person, to: &Person, text: &str) -> Item {
        Item::new(
            ItemId::new(id),
            sender.clone(),
            vec![to.clone()],
            text,
            format!("d{}", id),
        )
    }

    /// Observer that records which session each notification came from.
    struct RecordingDisplay {
        events: Mutex<Vec<(String, usize)>>,
    }

    impl RecordingDisplay {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(Vec::new()),
            })
        }

        fn events(&self) -> Vec<(String, usize)> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SessionDisplay for RecordingDisplay {
        fn id(&self) -> &str {
            "recording-display"
        }

        fn items_loaded(&self, coordinator: &SessionCoordinator, items: &[Item], _: FeedType) {
            self.events
                .lock()
                .unwrap()
                .push((coordinator.username(), items.len()));
        }
    }

    fn two_account_fixtures() -> (MockTransport, MockTransport) {
        let a = MockTransport::with_username("account-a");
        let b = MockTransport::with_username("account-b");
        let alice = person("1", "alice");
        let me_a = person("10", "account-a");
        let me_b = person("11", "account-b");
        a.queue_page(
            FeedType::PersonalMessages,
            vec![message("3", &alice, &me_a, "to a")],
        );
        b.queue_page(
            FeedType::PersonalMessages,
            vec![message("7", &alice, &me_b, "to b")],
        );
        (a, b)
    }

    async fn registry_of(
        transports: &[&MockTransport],
        display: Arc<dyn SessionDisplay>,
    ) -> SessionRegistry {
        let transports: Vec<Arc<dyn Transport>> = transports
            .iter()
            .map(|t| Arc::new((*t).clone()) as Arc<dyn Transport>)
            .collect();
        SessionRegistry::new(transports, display).await
    }

    #[tokio::test]
    async fn construction_fetches_every_account() {
        let (a, b) = two_account_fixtures();
        let display = RecordingDisplay::new();
        let registry = registry_of(&[&a, &b], display).await;

        assert_eq!(a.fetch_calls().len(), 1);
        assert_eq!(b.fetch_calls().len(), 1);
        assert_eq!(registry.accounts(), vec!["account-a", "account-b"]);
    }

    #[tokio::test]
    async fn first_account_starts_active() {
        let (a, b) = two_account_fixtures();
        let display = RecordingDisplay::new();
        let registry = registry_of(&[&a, &b], display).await;

        assert_eq!(registry.active().unwrap().username(), "account-a");
        assert_eq!(registry.title().unwrap(), "@account-a");
    }

    #[tokio::test]
    async fn fetch_only_notifies_the_active_session() {
        let (a, b) = two_account_fixtures();
        let display = RecordingDisplay::new();
        let registry = registry_of(&[&a, &b], display.clone()).await;

        assert!(registry.set_active("account-b"));
        let before = display.events().len();

        // Give both accounts fresh pages; only B may reach the display.
        let alice = person("1", "alice");
        let me_a = person("10", "account-a");
        let me_b = person("11", "account-b");
        a.queue_page(
            FeedType::PersonalMessages,
            vec![message("4", &alice, &me_a, "more to a")],
        );
        b.queue_page(
            FeedType::PersonalMessages,
            vec![message("8", &alice, &me_b, "more to b")],
        );

        registry.fetch().await;

        let new_events: Vec<_> = display.events().split_off(before);
        assert!(!new_events.is_empty());
        assert!(new_events.iter().all(|(who, _)| who == "account-b"));
        // A's transport was not asked for anything.
        assert_eq!(a.fetch_calls().len(), 1);
    }

    #[tokio::test]
    async fn proxy_filters_non_active_notifications_entirely() {
        let (a, b) = two_account_fixtures();
        let display = RecordingDisplay::new();
        let _registry = registry_of(&[&a, &b], display.clone()).await;

        // During construction both accounts fetched, but account-a was
        // active the whole time: nothing from account-b got through.
        let events = display.events();
        assert!(events.iter().all(|(who, _)| who == "account-a"));
    }

    #[tokio::test]
    async fn set_active_rejects_unknown_account() {
        let (a, b) = two_account_fixtures();
        let display = RecordingDisplay::new();
        let registry = registry_of(&[&a, &b], display).await;

        assert!(!registry.set_active("nobody"));
        assert_eq!(registry.active().unwrap().username(), "account-a");
    }

    #[tokio::test]
    async fn previews_project_unique_senders_newest_first() {
        let me = person("10", "account-a");
        let alice = person("1", "alice");
        let bob = person("2", "bob");
        let transport = MockTransport::with_username("account-a");
        transport.queue_page(
            FeedType::PersonalMessages,
            vec![
                message("9", &bob, &me, "bob latest"),
                message("8", &alice, &me, "alice latest"),
                message("7", &bob, &me, "bob older"),
            ],
        );
        let display = RecordingDisplay::new();
        let registry = registry_of(&[&transport], display).await;

        let previews = registry.conversation_previews().await;

        assert_eq!(previews.len(), 2);
        assert_eq!(previews[0].person, bob);
        assert_eq!(previews[0].latest.message(), "bob latest");
        assert_eq!(previews[1].person, alice);
        assert_eq!(previews[1].latest.message(), "alice latest");
    }

    #[tokio::test]
    async fn conversation_scopes_to_one_person() {
        let me = person("10", "account-a");
        let alice = person("1", "alice");
        let bob = person("2", "bob");
        let transport = MockTransport::with_username("account-a");
        transport.queue_page(
            FeedType::PersonalMessages,
            vec![
                message("9", &bob, &me, "from bob"),
                message("8", &me, &bob, "to bob"),
                message("7", &alice, &me, "from alice"),
            ],
        );
        let display = RecordingDisplay::new();
        let registry = registry_of(&[&transport], display).await;

        let thread = registry.conversation_with(&bob).await;

        let texts: Vec<_> = thread.iter().map(Item::message).collect();
        assert_eq!(texts, vec!["from bob", "to bob"]);
    }

    #[tokio::test]
    async fn empty_registry_is_inert() {
        let display = RecordingDisplay::new();
        let registry = SessionRegistry::new(Vec::new(), display).await;

        assert!(registry.accounts().is_empty());
        assert!(registry.active().is_none());
        assert!(registry.title().is_none());
        registry.fetch().await;
        assert!(registry.conversation_previews().await.is_empty());
    }
}
