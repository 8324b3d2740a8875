use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user as the rest of the app sees it. Derived from the auth
/// provider's identity; `initials` is the first character of each
/// space-separated name token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub initials: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, display_name: Option<&str>) -> Self {
        let name = match display_name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => "User".to_string(),
        };
        let initials = initials_of(&name);
        Self {
            id: id.into(),
            email: email.into(),
            name,
            initials,
        }
    }
}

pub fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|token| token.chars().next())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Paused,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordpressStatus {
    Synced,
    NotSynced,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub domain: String,
    pub status: ProjectStatus,
    pub wordpress_status: WordpressStatus,
    pub auto_mode: bool,
    pub frequency: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    pub name: String,
    pub domain: String,
    pub status: ProjectStatus,
    pub auto_mode: bool,
    pub frequency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternalLinkRecord {
    pub id: String,
    pub user_id: String,
    pub keyword: String,
    pub destination_url: String,
    /// Denormalized project name, not an id reference. Breaks silently on
    /// project rename; kept to match the stored data shape.
    pub project: String,
    pub priority: LinkPriority,
    pub is_pillar: bool,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInternalLinkPayload {
    pub keyword: String,
    pub destination_url: String,
    pub project: String,
    pub priority: LinkPriority,
    pub is_pillar: bool,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmartLinkType {
    ExternalUrl,
    WhatsApp,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SmartLinkRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub link_type: SmartLinkType,
    pub short_link: String,
    pub clicks: u64,
    pub status: RecordStatus,
}

/// Smart link as submitted by the form. The short link slug and the click
/// counter are filled in at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartLinkDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub link_type: SmartLinkType,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueueStatus {
    Queued,
    Processing,
    Generated,
    Published,
}

/// Read-only from this core: populated by the publishing pipeline, never
/// mutated here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentQueueItem {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub project: String,
    pub status: QueueStatus,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanType {
    Manual,
    Smart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanStatus {
    Draft,
    Processing,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentPlanResult {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentPlanRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    pub status: PlanStatus,
    pub project: String,
    pub created_at: DateTime<Utc>,
    pub results: Vec<ContentPlanResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentPlanPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    pub status: PlanStatus,
    pub project: String,
    pub results: Vec<ContentPlanResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckFrequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiQueryRecord {
    pub id: String,
    pub user_id: String,
    pub keyword: String,
    pub question: String,
    pub frequency: CheckFrequency,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAiQueryPayload {
    pub keyword: String,
    pub question: String,
    pub frequency: CheckFrequency,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectIntegrations {
    #[serde(rename = "googleSearchConsole")]
    pub search_console: IntegrationStatus,
    #[serde(rename = "googleAnalytics")]
    pub analytics: IntegrationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationService {
    SearchConsole,
    Analytics,
}

impl IntegrationService {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::SearchConsole => "Google Search Console",
            Self::Analytics => "Google Analytics",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WordPressSettings {
    pub url: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecord {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Per-project settings, created alongside the project and never
/// independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettingsRecord {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub integrations: ProjectIntegrations,
    pub wordpress: WordPressSettings,
    pub authors: Vec<AuthorRecord>,
}

impl ProjectSettingsRecord {
    pub fn integration(&self, service: IntegrationService) -> &IntegrationStatus {
        match service {
            IntegrationService::SearchConsole => &self.integrations.search_console,
            IntegrationService::Analytics => &self.integrations.analytics,
        }
    }

    pub fn integration_mut(&mut self, service: IntegrationService) -> &mut IntegrationStatus {
        match service {
            IntegrationService::SearchConsole => &mut self.integrations.search_console,
            IntegrationService::Analytics => &mut self.integrations.analytics,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient toast-style notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{initials_of, User};

    #[test]
    fn initials_take_first_char_of_each_token() {
        assert_eq!(initials_of("Ada Lovelace"), "AL");
        assert_eq!(initials_of("Prince"), "P");
        assert_eq!(initials_of("  double  spaced  name "), "dsn");
    }

    #[test]
    fn missing_display_name_falls_back() {
        let user = User::new("uid-1", "a@b.com", None);
        assert_eq!(user.name, "User");
        assert_eq!(user.initials, "U");

        let blank = User::new("uid-2", "c@d.com", Some("   "));
        assert_eq!(blank.name, "User");
    }

    #[test]
    fn smart_link_type_field_serializes_as_type() {
        let record = super::SmartLinkRecord {
            id: "sl1".into(),
            user_id: "u1".into(),
            name: "Promo".into(),
            link_type: super::SmartLinkType::WhatsApp,
            short_link: "rankdesk.link/ab12cd".into(),
            clicks: 0,
            status: super::RecordStatus::Active,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "whats-app");
        assert_eq!(value["shortLink"], "rankdesk.link/ab12cd");
    }
}
