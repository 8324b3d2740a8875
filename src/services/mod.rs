pub mod gemini;

use crate::errors::AppResult;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;

/// Collection names as stored in the hosted document database.
pub mod collections {
    pub const PROJECTS: &str = "projects";
    pub const INTERNAL_LINKS: &str = "internalLinks";
    pub const SMART_LINKS: &str = "smartLinks";
    pub const CONTENT_QUEUE: &str = "contentQueue";
    pub const CONTENT_PLANS: &str = "contentPlans";
    pub const AI_QUERIES: &str = "aiQueries";
    pub const PROJECT_SETTINGS: &str = "projectSettings";
}

/// Identity as reported by the auth provider, before it is shaped into the
/// local `User`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Provider-side auth state. `Pending` covers the window before the provider
/// has decided whether a persisted session exists; the app renders nothing
/// until it settles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthSnapshot {
    #[default]
    Pending,
    SignedOut,
    SignedIn(AuthIdentity),
}

/// Hosted authentication service seam. Errors carry a string code from a
/// small fixed vocabulary (see `AuthCode`); implementations must map their
/// native failures onto it.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// State-change notifications, including the initial session resolution.
    fn state_changes(&self) -> watch::Receiver<AuthSnapshot>;

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthIdentity>;

    async fn create_account(&self, email: &str, password: &str) -> AppResult<AuthIdentity>;

    async fn set_display_name(&self, uid: &str, name: &str) -> AppResult<()>;

    async fn sign_out(&self) -> AppResult<()>;
}

/// One document as returned by the remote store: server-assigned id plus the
/// stored fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

/// Equality filter on stored string fields, e.g. `&[("userId", uid)]`.
pub type FieldFilter<'a> = [(&'a str, &'a str)];

/// Hosted document database seam: per-collection CRUD plus a batch delete.
/// The batch delete is best-effort; callers do not handle partial failure.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn query(&self, collection: &str, filter: &FieldFilter<'_>) -> AppResult<Vec<Document>>;

    async fn insert(&self, collection: &str, fields: Value) -> AppResult<String>;

    async fn update(&self, collection: &str, id: &str, fields: Value) -> AppResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()>;

    async fn delete_matching(&self, collection: &str, filter: &FieldFilter<'_>) -> AppResult<()>;
}

/// Generative content API seam: prompt plus requested output shape in, raw
/// text out. The reply is untrusted; callers parse it as JSON themselves.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, response_schema: &Value) -> AppResult<String>;
}
