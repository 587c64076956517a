use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use finhub_auth::{IdentityProvider, SessionController};
use finhub_chat::{ConversationEngine, ScriptedReplyGenerator};
use finhub_core::Bus;
use finhub_notify::NotificationCenter;
use finhub_store::PreferenceStore;
use finhub_theme::ThemeController;
use finhub_types::NotificationKind;

use crate::config::AppConfig;
use crate::portfolio;
use crate::shell::{Shell, Tab};

/// Opening assistant message shown when the chat is first mounted.
pub const CHAT_GREETING: &str =
    "Hello! I'm your personal finance assistant. How can I help you today?";

/// Composition root: owns the bus and the four state controllers, and mounts
/// the conversation engine on demand when the chat is opened.
///
/// The controllers are independent state owners with no shared mutable
/// state; they compose only by being read from the rendering layer, which
/// observes changes through the bus.
#[derive(Clone)]
pub struct App {
    config: AppConfig,
    bus: Arc<Bus>,
    store: Arc<PreferenceStore>,
    session: SessionController,
    theme: ThemeController,
    notifications: NotificationCenter,
    chat: Arc<RwLock<Option<ConversationEngine>>>,
    shell: Arc<RwLock<Shell>>,
}

impl App {
    pub fn new(
        config: AppConfig,
        provider: Arc<dyn IdentityProvider>,
        store: Arc<PreferenceStore>,
    ) -> Self {
        let bus = Arc::new(Bus::new());
        let session = SessionController::new(provider).with_bus(Arc::clone(&bus));
        let theme = ThemeController::new(Arc::clone(&store)).with_bus(Arc::clone(&bus));
        let notifications = NotificationCenter::new().with_bus(Arc::clone(&bus));

        Self {
            config,
            bus,
            store,
            session,
            theme,
            notifications,
            chat: Arc::new(RwLock::new(None)),
            shell: Arc::new(RwLock::new(Shell::new())),
        }
    }

    /// Builds an app over the per-user data directory: config and
    /// preferences are read from (and written back to) disk there.
    pub async fn with_default_environment(provider: Arc<dyn IdentityProvider>) -> Self {
        let data_dir = PreferenceStore::default_data_dir().unwrap_or_else(|| PathBuf::from("."));
        let mut config = AppConfig::load_or_default(&data_dir);
        config.data_dir.get_or_insert_with(|| data_dir.clone());
        let store = Arc::new(PreferenceStore::load_from_dir(&data_dir).await);
        Self::new(config, provider, store)
    }

    /// Installs the tracing subscriber for this process: a log file under
    /// the configured data dir, or stderr when none is set. Safe to call
    /// more than once; later calls are no-ops.
    pub fn init_logging(&self) {
        let log_dir = self.config.data_dir.as_ref().map(|dir| dir.join("logs"));
        let print = log_dir.is_none();
        finhub_util::logging::init_tracing(self.config.log_level.as_deref(), log_dir, print);
    }

    /// Brings the app out of its startup state: loads the persisted theme
    /// preference, resolves the session, and posts the welcome notifications.
    pub async fn start(&self) {
        self.theme.load().await;
        self.session.start().await;

        let ttl = Some(self.config.welcome_notification_ttl());
        self.notifications
            .publish(
                NotificationKind::Success,
                "Account Secured",
                "Your account security has been enhanced with 2FA",
                ttl,
            )
            .await;
        self.notifications
            .publish(
                NotificationKind::Info,
                "Market Update",
                "USD/EUR exchange rate is favorable for transfers",
                ttl,
            )
            .await;
    }

    pub fn bus(&self) -> Arc<Bus> {
        Arc::clone(&self.bus)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<PreferenceStore> {
        Arc::clone(&self.store)
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Mounts the conversation engine if it is not already open and returns a
    /// handle to it.
    pub async fn open_chat(&self) -> ConversationEngine {
        let mut chat = self.chat.write().await;
        let engine = match chat.as_ref() {
            Some(engine) => engine.clone(),
            None => {
                let engine = ConversationEngine::new(Arc::new(ScriptedReplyGenerator::new()))
                    .with_reply_delay(self.config.reply_delay())
                    .with_bus(Arc::clone(&self.bus))
                    .with_greeting(CHAT_GREETING)
                    .await;
                *chat = Some(engine.clone());
                engine
            }
        };
        drop(chat);

        self.shell.write().await.set_chat_open(true);
        engine
    }

    /// Unmounts the chat. The engine is torn down, cancelling any pending
    /// reply, and its transcript is discarded.
    pub async fn close_chat(&self) {
        let engine = self.chat.write().await.take();
        if let Some(engine) = engine {
            engine.shutdown().await;
        }
        self.shell.write().await.set_chat_open(false);
    }

    pub async fn chat(&self) -> Option<ConversationEngine> {
        self.chat.read().await.clone()
    }

    pub async fn shell(&self) -> Shell {
        self.shell.read().await.clone()
    }

    pub async fn select_tab(&self, tab: Tab) {
        self.shell.write().await.select_tab(tab);
    }

    /// Flips balance visibility and returns the new value.
    pub async fn toggle_balances(&self) -> bool {
        self.shell.write().await.toggle_balances()
    }

    pub async fn select_card(&self, index: usize) {
        let card_count = portfolio::demo_cards().len();
        self.shell.write().await.select_card(index, card_count);
    }

    /// Tears down everything that can hold a timer or an in-flight task.
    pub async fn shutdown(&self) {
        self.close_chat().await;
        self.notifications.shutdown();
    }
}
