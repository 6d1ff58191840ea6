//! Process-wide skill configuration
//!
//! Read once from the environment at startup and shared read-only afterwards.

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-latest";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration for the skill backend
#[derive(Debug, Clone)]
pub struct SkillConfig {
    /// Google API key; `None` when unset or empty
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub port: u16,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl SkillConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (tests avoid touching the real environment)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("GOOGLE_API_KEY"),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_empty("GEMINI_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            port: non_empty("SKILL_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}
