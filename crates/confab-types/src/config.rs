//! Configuration types for Confab.
//!
//! `GlobalConfig` is the on-disk `config.toml`; `ChatSettings` is the
//! runtime view the session orchestrator consults when naming sessions.

use serde::{Deserialize, Serialize};

/// Top-level configuration file.
///
/// Loaded from `{data_dir}/config.toml`. All fields have defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Never ask the describer for a session title.
    #[serde(default)]
    pub disable_session_titles: bool,

    /// Chat model selected at startup. Title generation needs one.
    #[serde(default)]
    pub default_chat_model: Option<String>,
}

impl GlobalConfig {
    /// Runtime settings derived from the file. Blank model names count as unset.
    pub fn chat_settings(&self) -> ChatSettings {
        ChatSettings {
            disable_session_titles: self.disable_session_titles,
            selected_chat_model: self
                .default_chat_model
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
        }
    }
}

/// Settings that influence session titling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub disable_session_titles: bool,
    pub selected_chat_model: Option<String>,
}

impl ChatSettings {
    /// Whether the describer may be asked for a title at all.
    pub fn can_describe(&self) -> bool {
        !self.disable_session_titles && self.selected_chat_model.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert!(!config.disable_session_titles);
        assert_eq!(config.default_chat_model, None);
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
disable_session_titles = true
default_chat_model = "claude-sonnet-4"
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert!(config.disable_session_titles);
        assert_eq!(config.default_chat_model.as_deref(), Some("claude-sonnet-4"));
    }

    #[test]
    fn test_chat_settings_blank_model_is_unset() {
        let config = GlobalConfig {
            disable_session_titles: false,
            default_chat_model: Some("   ".to_string()),
        };
        let settings = config.chat_settings();
        assert_eq!(settings.selected_chat_model, None);
        assert!(!settings.can_describe());
    }

    #[test]
    fn test_can_describe_requires_model_and_enabled_titles() {
        let mut settings = ChatSettings {
            disable_session_titles: false,
            selected_chat_model: Some("gpt-4o".to_string()),
        };
        assert!(settings.can_describe());
        settings.disable_session_titles = true;
        assert!(!settings.can_describe());
    }
}
