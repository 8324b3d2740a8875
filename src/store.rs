use crate::errors::{AppError, AppResult};
use crate::models::{
    AiQueryRecord, ContentPlanRecord, ContentQueueItem, CreateAiQueryPayload,
    CreateContentPlanPayload, CreateInternalLinkPayload, CreateProjectPayload, IntegrationService,
    InternalLinkRecord, ProjectRecord, ProjectSettingsRecord, SmartLinkDraft, SmartLinkRecord,
    User, WordpressStatus,
};
use crate::notify::Notifier;
use crate::router::{Route, Router, Screen, View};
use crate::services::{collections, Document, DocumentStore};
use chrono::Utc;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

const REFRESH_FAILED_NOTICE: &str = "Failed to load your data.";

/// In-memory snapshot of the seven per-user collections. Authoritative only
/// until the next write; every mutation re-reads the whole set from the
/// remote store rather than patching locally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub projects: Vec<ProjectRecord>,
    pub internal_links: Vec<InternalLinkRecord>,
    pub smart_links: Vec<SmartLinkRecord>,
    pub content_queue: Vec<ContentQueueItem>,
    pub content_plans: Vec<ContentPlanRecord>,
    pub ai_queries: Vec<AiQueryRecord>,
    pub project_settings: Vec<ProjectSettingsRecord>,
}

/// Owns the seven collections and every create/update/delete against them.
/// All access is gated on a user being present; the session layer calls
/// `start_session` / `clear_session` as the auth state moves.
pub struct DataStore {
    docs: Arc<dyn DocumentStore>,
    notifier: Notifier,
    router: Router,
    short_link_domain: String,
    user: RwLock<Option<User>>,
    collections: watch::Sender<Collections>,
}

impl DataStore {
    pub fn new(
        docs: Arc<dyn DocumentStore>,
        notifier: Notifier,
        router: Router,
        short_link_domain: impl Into<String>,
    ) -> Self {
        let (collections, _) = watch::channel(Collections::default());
        Self {
            docs,
            notifier,
            router,
            short_link_domain: short_link_domain.into(),
            user: RwLock::new(None),
            collections,
        }
    }

    pub fn snapshot(&self) -> Collections {
        self.collections.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Collections> {
        self.collections.subscribe()
    }

    /// Installs the session's user and loads their data.
    pub async fn start_session(&self, user: User) {
        let user_id = user.id.clone();
        if let Ok(mut slot) = self.user.write() {
            *slot = Some(user);
        }
        let _ = self.refresh_all(&user_id).await;
    }

    /// Drops the user and empties every collection synchronously, before any
    /// remote call could resolve.
    pub fn clear_session(&self) {
        if let Ok(mut slot) = self.user.write() {
            *slot = None;
        }
        self.collections.send_replace(Collections::default());
    }

    fn require_user(&self) -> AppResult<User> {
        self.user
            .read()
            .map_err(|_| AppError::Internal("session lock poisoned".to_string()))?
            .clone()
            .ok_or_else(|| AppError::Internal("mutation without an active session".to_string()))
    }

    /// Fetches all seven collections concurrently. Any single failure aborts
    /// the whole refresh and leaves the previous snapshot in place, so the
    /// in-memory copy is stale but never partially overwritten.
    pub async fn refresh_all(&self, user_id: &str) -> AppResult<()> {
        let fetched = tokio::try_join!(
            self.fetch::<ProjectRecord>(collections::PROJECTS, user_id),
            self.fetch::<InternalLinkRecord>(collections::INTERNAL_LINKS, user_id),
            self.fetch::<SmartLinkRecord>(collections::SMART_LINKS, user_id),
            self.fetch::<ContentQueueItem>(collections::CONTENT_QUEUE, user_id),
            self.fetch::<ContentPlanRecord>(collections::CONTENT_PLANS, user_id),
            self.fetch::<AiQueryRecord>(collections::AI_QUERIES, user_id),
            self.fetch::<ProjectSettingsRecord>(collections::PROJECT_SETTINGS, user_id),
        );

        match fetched {
            Ok((
                projects,
                internal_links,
                smart_links,
                content_queue,
                content_plans,
                ai_queries,
                project_settings,
            )) => {
                self.collections.send_replace(Collections {
                    projects,
                    internal_links,
                    smart_links,
                    content_queue,
                    content_plans,
                    ai_queries,
                    project_settings,
                });
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "collection refresh aborted; keeping previous snapshot");
                self.notifier.error(REFRESH_FAILED_NOTICE);
                Err(error)
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, collection: &str, user_id: &str) -> AppResult<Vec<T>> {
        let documents = self.docs.query(collection, &[("userId", user_id)]).await?;
        decode_records(documents)
    }

    /// Runs after every successful write. Refresh failures have already been
    /// surfaced as an error notice, so the mutation itself still succeeds.
    async fn refetch(&self, user_id: &str) {
        let _ = self.refresh_all(user_id).await;
    }

    // ─── Projects ───────────────────────────────────────────────────────────

    /// One Project insert plus one default-valued ProjectSettings insert in
    /// the same logical operation.
    pub async fn add_project(&self, payload: CreateProjectPayload) -> AppResult<()> {
        let user = self.require_user()?;
        let mut fields = owned_fields(&payload, &user)?;
        fields.insert("wordpressStatus".to_string(), json!(WordpressStatus::NotSynced));
        fields.insert("createdAt".to_string(), json!(Utc::now()));

        let project_id = self
            .docs
            .insert(collections::PROJECTS, Value::Object(fields))
            .await?;
        self.docs
            .insert(
                collections::PROJECT_SETTINGS,
                default_settings_fields(&user.id, &project_id),
            )
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Project created successfully!");
        self.router.navigate(Route::list(Screen::Projects));
        Ok(())
    }

    pub async fn update_project(&self, project: ProjectRecord) -> AppResult<()> {
        let user = self.require_user()?;
        self.docs
            .update(collections::PROJECTS, &project.id, update_fields(&project)?)
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Project updated successfully!");
        self.router.navigate(Route::list(Screen::Projects));
        Ok(())
    }

    /// Deletes the project, then best-effort batch-deletes its settings rows.
    pub async fn delete_project(&self, project_id: &str) -> AppResult<()> {
        let user = self.require_user()?;
        self.docs.delete(collections::PROJECTS, project_id).await?;
        self.docs
            .delete_matching(
                collections::PROJECT_SETTINGS,
                &[("projectId", project_id), ("userId", user.id.as_str())],
            )
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Project deleted successfully!");
        Ok(())
    }

    // ─── Internal links ─────────────────────────────────────────────────────

    pub async fn add_internal_link(&self, payload: CreateInternalLinkPayload) -> AppResult<()> {
        let user = self.require_user()?;
        let fields = owned_fields(&payload, &user)?;
        self.docs
            .insert(collections::INTERNAL_LINKS, Value::Object(fields))
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Internal link saved!");
        self.router.navigate(Route::list(Screen::InternalLinks));
        Ok(())
    }

    pub async fn update_internal_link(&self, link: InternalLinkRecord) -> AppResult<()> {
        let user = self.require_user()?;
        self.docs
            .update(collections::INTERNAL_LINKS, &link.id, update_fields(&link)?)
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Internal link updated!");
        self.router.navigate(Route::list(Screen::InternalLinks));
        Ok(())
    }

    pub async fn delete_internal_link(&self, link_id: &str) -> AppResult<()> {
        let user = self.require_user()?;
        self.docs.delete(collections::INTERNAL_LINKS, link_id).await?;

        self.refetch(&user.id).await;
        self.notifier.success("Internal link deleted!");
        Ok(())
    }

    // ─── Smart links ────────────────────────────────────────────────────────

    /// The short link is generated here, client-side: fixed domain plus a
    /// random base-36 suffix. Not guaranteed globally unique.
    pub async fn add_smart_link(&self, draft: SmartLinkDraft) -> AppResult<()> {
        let user = self.require_user()?;
        let mut fields = owned_fields(&draft, &user)?;
        fields.insert(
            "shortLink".to_string(),
            json!(format!("{}/{}", self.short_link_domain, short_link_slug())),
        );
        fields.insert("clicks".to_string(), json!(0));

        self.docs
            .insert(collections::SMART_LINKS, Value::Object(fields))
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Smart link saved!");
        self.router.navigate(Route::list(Screen::SmartLinks));
        Ok(())
    }

    pub async fn update_smart_link(&self, link: SmartLinkRecord) -> AppResult<()> {
        let user = self.require_user()?;
        self.docs
            .update(collections::SMART_LINKS, &link.id, update_fields(&link)?)
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Smart link updated!");
        self.router.navigate(Route::list(Screen::SmartLinks));
        Ok(())
    }

    pub async fn delete_smart_link(&self, link_id: &str) -> AppResult<()> {
        let user = self.require_user()?;
        self.docs.delete(collections::SMART_LINKS, link_id).await?;

        self.refetch(&user.id).await;
        self.notifier.success("Smart link deleted!");
        Ok(())
    }

    // ─── Content plans ──────────────────────────────────────────────────────

    pub async fn add_content_plan(&self, payload: CreateContentPlanPayload) -> AppResult<()> {
        let user = self.require_user()?;
        let mut fields = owned_fields(&payload, &user)?;
        fields.insert("createdAt".to_string(), json!(Utc::now()));

        self.docs
            .insert(collections::CONTENT_PLANS, Value::Object(fields))
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Content plan saved successfully!");
        self.router.navigate(Route::list(Screen::ContentPlanning));
        Ok(())
    }

    pub async fn delete_content_plan(&self, plan_id: &str) -> AppResult<()> {
        let user = self.require_user()?;
        self.docs.delete(collections::CONTENT_PLANS, plan_id).await?;

        self.refetch(&user.id).await;
        self.notifier.success("Content plan deleted!");
        Ok(())
    }

    // ─── AI queries ─────────────────────────────────────────────────────────

    pub async fn add_ai_query(&self, payload: CreateAiQueryPayload) -> AppResult<()> {
        let user = self.require_user()?;
        let fields = owned_fields(&payload, &user)?;
        self.docs
            .insert(collections::AI_QUERIES, Value::Object(fields))
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Query saved!");
        self.router
            .navigate(Route::new(Screen::AiOverview, View::Queries));
        Ok(())
    }

    pub async fn update_ai_query(&self, query: AiQueryRecord) -> AppResult<()> {
        let user = self.require_user()?;
        self.docs
            .update(collections::AI_QUERIES, &query.id, update_fields(&query)?)
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Query updated!");
        self.router
            .navigate(Route::new(Screen::AiOverview, View::Queries));
        Ok(())
    }

    pub async fn delete_ai_query(&self, query_id: &str) -> AppResult<()> {
        let user = self.require_user()?;
        self.docs.delete(collections::AI_QUERIES, query_id).await?;

        self.refetch(&user.id).await;
        self.notifier.success("Query deleted!");
        Ok(())
    }

    // ─── Project settings ───────────────────────────────────────────────────

    pub async fn update_project_settings(&self, settings: ProjectSettingsRecord) -> AppResult<()> {
        let user = self.require_user()?;
        self.docs
            .update(
                collections::PROJECT_SETTINGS,
                &settings.id,
                update_fields(&settings)?,
            )
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success("Settings saved!");
        Ok(())
    }

    /// Flips one integration on the project's settings record. Connecting
    /// fills `account` from the session user's email and `property` from the
    /// project's domain; disconnecting removes both.
    pub async fn toggle_integration(
        &self,
        project_id: &str,
        service: IntegrationService,
    ) -> AppResult<()> {
        let user = self.require_user()?;
        let snapshot = self.snapshot();
        let project = snapshot
            .projects
            .iter()
            .find(|project| project.id == project_id)
            .ok_or_else(|| AppError::NotFound(format!("project {project_id}")))?;
        let mut settings = snapshot
            .project_settings
            .iter()
            .find(|settings| settings.project_id == project_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("settings for project {project_id}")))?;

        let status = settings.integration_mut(service);
        status.connected = !status.connected;
        if status.connected {
            status.account = Some(user.email.clone());
            status.property = Some(project.domain.clone());
        } else {
            status.account = None;
            status.property = None;
        }
        let connected = status.connected;

        self.docs
            .update(
                collections::PROJECT_SETTINGS,
                &settings.id,
                update_fields(&settings)?,
            )
            .await?;

        self.refetch(&user.id).await;
        self.notifier.success(format!(
            "{} {} successfully!",
            service.display_name(),
            if connected { "connected" } else { "disconnected" }
        ));
        Ok(())
    }
}

fn decode_records<T: DeserializeOwned>(documents: Vec<Document>) -> AppResult<Vec<T>> {
    documents
        .into_iter()
        .map(|document| {
            let mut fields = document.fields;
            match fields.as_object_mut() {
                Some(map) => {
                    map.insert("id".to_string(), Value::String(document.id));
                }
                None => {
                    return Err(AppError::RemoteRead(format!(
                        "document {} is not an object",
                        document.id
                    )))
                }
            }
            serde_json::from_value(fields)
                .map_err(|error| AppError::RemoteRead(error.to_string()))
        })
        .collect()
}

/// Serializes a payload and stamps the owning user onto it.
fn owned_fields<T: Serialize>(payload: &T, user: &User) -> AppResult<Map<String, Value>> {
    let mut fields = to_object(serde_json::to_value(payload)?)?;
    fields.insert("userId".to_string(), Value::String(user.id.clone()));
    Ok(fields)
}

/// Full record minus its id, for an update write.
fn update_fields<T: Serialize>(record: &T) -> AppResult<Value> {
    let mut value = serde_json::to_value(record)?;
    if let Some(map) = value.as_object_mut() {
        map.remove("id");
    }
    Ok(value)
}

fn to_object(value: Value) -> AppResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Internal(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

fn default_settings_fields(user_id: &str, project_id: &str) -> Value {
    json!({
        "userId": user_id,
        "projectId": project_id,
        "integrations": {
            "googleSearchConsole": { "connected": false },
            "googleAnalytics": { "connected": false },
        },
        "wordpress": { "url": "", "username": "" },
        "authors": [],
    })
}

const SLUG_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn short_link_slug() -> String {
    let mut rng = rand::rng();
    (0..6)
        .map(|_| SLUG_CHARSET[rng.random_range(0..SLUG_CHARSET.len())] as char)
        .collect()
}
