use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// API credential for the generative-content call. The only external
    /// credential this core consumes.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Domain prefixed onto generated smart-link slugs.
    pub short_link_domain: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            short_link_domain: "rankdesk.link".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()),
            gemini_model: std::env::var("RANKDESK_GEMINI_MODEL")
                .ok()
                .filter(|model| !model.is_empty())
                .unwrap_or(defaults.gemini_model),
            short_link_domain: std::env::var("RANKDESK_SHORT_LINK_DOMAIN")
                .ok()
                .filter(|domain| !domain.is_empty())
                .unwrap_or(defaults.short_link_domain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn defaults_are_usable_without_environment() {
        let config = AppConfig::default();
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.short_link_domain, "rankdesk.link");
    }
}
