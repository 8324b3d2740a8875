#![allow(dead_code)]

use async_trait::async_trait;
use rankdesk::errors::{AppError, AppResult};
use rankdesk::services::{
    AuthIdentity, AuthProvider, AuthSnapshot, ContentGenerator, Document, DocumentStore,
    FieldFilter,
};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;
use uuid::Uuid;

// ─── Auth provider fake ─────────────────────────────────────────────────────

struct Account {
    uid: String,
    password: String,
    display_name: Option<String>,
}

/// In-memory stand-in for the hosted auth service. State changes flow through
/// the same watch channel a real provider subscription would.
pub struct MemoryAuthProvider {
    accounts: Mutex<HashMap<String, Account>>,
    state: watch::Sender<AuthSnapshot>,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        let (state, _) = watch::channel(AuthSnapshot::Pending);
        Self {
            accounts: Mutex::new(HashMap::new()),
            state,
        }
    }

    /// Finish the initial session resolution with no persisted session.
    pub fn resolve_signed_out(&self) {
        self.state.send_replace(AuthSnapshot::SignedOut);
    }

    fn identity(email: &str, account: &Account) -> AuthIdentity {
        AuthIdentity {
            uid: account.uid.clone(),
            email: email.to_string(),
            display_name: account.display_name.clone(),
        }
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    fn state_changes(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthIdentity> {
        let accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get(email)
            .ok_or_else(|| AppError::auth("auth/user-not-found"))?;
        if account.password != password {
            return Err(AppError::auth("auth/wrong-password"));
        }
        let identity = Self::identity(email, account);
        self.state
            .send_replace(AuthSnapshot::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn create_account(&self, email: &str, password: &str) -> AppResult<AuthIdentity> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(AppError::auth("auth/email-already-in-use"));
        }
        if password.len() < 6 {
            return Err(AppError::auth("auth/weak-password"));
        }
        let account = Account {
            uid: Uuid::new_v4().to_string(),
            password: password.to_string(),
            display_name: None,
        };
        let identity = Self::identity(email, &account);
        accounts.insert(email.to_string(), account);
        self.state
            .send_replace(AuthSnapshot::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn set_display_name(&self, uid: &str, name: &str) -> AppResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .values_mut()
            .find(|account| account.uid == uid)
            .ok_or_else(|| AppError::auth("auth/user-not-found"))?;
        account.display_name = Some(name.to_string());
        Ok(())
    }

    async fn sign_out(&self) -> AppResult<()> {
        self.state.send_replace(AuthSnapshot::SignedOut);
        Ok(())
    }
}

// ─── Document store fake ────────────────────────────────────────────────────

/// In-memory stand-in for the hosted document database, with switches to
/// simulate read and write outages.
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    insert_counts: Mutex<HashMap<String, usize>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            insert_counts: Mutex::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn contents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn insert_count(&self, collection: &str) -> usize {
        *self
            .insert_counts
            .lock()
            .unwrap()
            .get(collection)
            .unwrap_or(&0)
    }

    /// Preload a document, bypassing the insert counters.
    pub fn seed(&self, collection: &str, id: &str, fields: Value) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.to_string(),
                fields,
            });
    }

    fn matches(document: &Document, filter: &FieldFilter<'_>) -> bool {
        filter
            .iter()
            .all(|(field, expected)| document.fields.get(*field).and_then(Value::as_str) == Some(*expected))
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query(&self, collection: &str, filter: &FieldFilter<'_>) -> AppResult<Vec<Document>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::RemoteRead("simulated read outage".to_string()));
        }
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| Self::matches(document, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, fields: Value) -> AppResult<String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::RemoteWrite("simulated write outage".to_string()));
        }
        let id = Uuid::new_v4().to_string();
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        *self
            .insert_counts
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default() += 1;
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::RemoteWrite("simulated write outage".to_string()));
        }
        let mut collections = self.collections.lock().unwrap();
        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|document| document.id == id))
            .ok_or_else(|| AppError::NotFound(format!("{collection}/{id}")))?;
        // Top-level merge, like a partial document update.
        if let (Some(target), Some(incoming)) =
            (document.fields.as_object_mut(), fields.as_object())
        {
            for (key, value) in incoming {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::RemoteWrite("simulated write outage".to_string()));
        }
        let mut collections = self.collections.lock().unwrap();
        if let Some(documents) = collections.get_mut(collection) {
            documents.retain(|document| document.id != id);
        }
        Ok(())
    }

    async fn delete_matching(&self, collection: &str, filter: &FieldFilter<'_>) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::RemoteWrite("simulated write outage".to_string()));
        }
        let mut collections = self.collections.lock().unwrap();
        if let Some(documents) = collections.get_mut(collection) {
            documents.retain(|document| !Self::matches(document, filter));
        }
        Ok(())
    }
}

// ─── Content generator fake ─────────────────────────────────────────────────

/// Replays scripted replies and records what it was asked.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<AppResult<String>>>,
    pub prompts: Mutex<Vec<String>>,
    pub schemas: Mutex<Vec<Value>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            schemas: Mutex::new(Vec::new()),
        }
    }

    pub fn push_reply(&self, reply: AppResult<String>) {
        self.replies.lock().unwrap().push_back(reply);
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, response_schema: &Value) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.schemas.lock().unwrap().push(response_schema.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Generation("no scripted reply".to_string())))
    }
}
