use crate::errors::AppResult;
use crate::models::User;
use crate::services::{AuthProvider, AuthSnapshot};
use std::sync::Arc;
use tokio::sync::watch;

/// Local view of the auth provider's state. `Resolving` covers the window
/// before the provider reports whether a persisted session exists; the app
/// renders nothing at all until this leaves `Resolving`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Resolving,
    SignedOut,
    SignedIn(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

fn user_from(identity: &crate::services::AuthIdentity) -> User {
    User::new(&identity.uid, &identity.email, identity.display_name.as_deref())
}

/// Wraps the hosted auth provider: subscribes once to its state changes,
/// shapes identities into the local `User`, and exposes login, signup and
/// logout.
pub struct SessionStore {
    provider: Arc<dyn AuthProvider>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Arc<Self> {
        let (state, _) = watch::channel(SessionState::Resolving);
        let store = Arc::new(Self { provider, state });
        store.spawn_state_listener();
        store
    }

    fn spawn_state_listener(self: &Arc<Self>) {
        let store = Arc::clone(self);
        let mut changes = store.provider.state_changes();
        tokio::spawn(async move {
            loop {
                let next = match &*changes.borrow_and_update() {
                    AuthSnapshot::Pending => None,
                    AuthSnapshot::SignedOut => Some(SessionState::SignedOut),
                    AuthSnapshot::SignedIn(identity) => {
                        Some(SessionState::SignedIn(user_from(identity)))
                    }
                };
                if let Some(next) = next {
                    store.state.send_if_modified(|current| match (&*current, &next) {
                        // `signup` already installed the named user; the
                        // provider's notification for the same identity may
                        // still lack the display name.
                        (SessionState::SignedIn(current_user), SessionState::SignedIn(incoming))
                            if current_user.id == incoming.id =>
                        {
                            false
                        }
                        _ if *current == next => false,
                        _ => {
                            *current = next.clone();
                            true
                        }
                    });
                }
                if changes.changed().await.is_err() {
                    break;
                }
            }
        });
    }

    /// Delegates to the provider; the local state updates through the same
    /// subscription that tracks every other provider change.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<()> {
        self.provider.sign_in(email, password).await?;
        Ok(())
    }

    /// Creates the account, names the new identity, then updates local state
    /// synchronously so callers do not wait for the provider's next
    /// state-change notification.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> AppResult<()> {
        let identity = self.provider.create_account(email, password).await?;
        self.provider.set_display_name(&identity.uid, name).await?;

        let user = User::new(&identity.uid, &identity.email, Some(name));
        tracing::info!(uid = %user.id, "account created");
        self.state.send_replace(SessionState::SignedIn(user));
        Ok(())
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.provider.sign_out().await
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}
