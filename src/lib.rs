pub mod audit;
pub mod config;
pub mod errors;
pub mod models;
pub mod notify;
pub mod planning;
pub mod router;
pub mod services;
pub mod session;
pub mod store;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, AppResult, AuthCode};
pub use crate::notify::Notifier;
pub use crate::router::{Route, Router, Screen, View};
pub use crate::session::{SessionState, SessionStore};
pub use crate::store::{Collections, DataStore};

use crate::services::gemini::GeminiClient;
use crate::services::{AuthProvider, DocumentStore};
use std::path::Path;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Wires the session store, data store, router and notification channel
/// together over the injected external services, and keeps the data store in
/// step with auth state: a new user triggers a full fetch, a cleared session
/// empties everything synchronously.
#[derive(Clone)]
pub struct App {
    pub config: AppConfig,
    pub session: Arc<SessionStore>,
    pub store: Arc<DataStore>,
    pub router: Router,
    pub notifier: Notifier,
}

impl App {
    pub fn new(
        config: AppConfig,
        auth: Arc<dyn AuthProvider>,
        docs: Arc<dyn DocumentStore>,
    ) -> Self {
        let router = Router::new();
        let notifier = Notifier::new();
        let store = Arc::new(DataStore::new(
            docs,
            notifier.clone(),
            router.clone(),
            config.short_link_domain.clone(),
        ));
        let session = SessionStore::new(auth);
        spawn_session_bridge(&session, &store, &router);

        Self {
            config,
            session,
            store,
            router,
            notifier,
        }
    }

    /// Gemini-backed generator for the planning flow. Fails when no API
    /// credential is configured.
    pub fn content_generator(&self) -> AppResult<GeminiClient> {
        let api_key = self
            .config
            .gemini_api_key
            .as_deref()
            .ok_or_else(|| AppError::Generation("GEMINI_API_KEY is not set".to_string()))?;
        Ok(GeminiClient::new(api_key, &self.config.gemini_model))
    }
}

fn spawn_session_bridge(session: &Arc<SessionStore>, store: &Arc<DataStore>, router: &Router) {
    let mut states = session.subscribe();
    let store = Arc::clone(store);
    let router = router.clone();
    tokio::spawn(async move {
        loop {
            let state = states.borrow_and_update().clone();
            match state {
                SessionState::SignedIn(user) => store.start_session(user).await,
                SessionState::SignedOut => {
                    router.reset();
                    store.clear_session();
                }
                SessionState::Resolving => {}
            }
            if states.changed().await.is_err() {
                break;
            }
        }
    });
}

pub fn init_tracing(app_data_dir: &Path) -> Result<(), String> {
    let log_dir = app_data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "rankdesk.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}
