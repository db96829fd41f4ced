//! Global configuration loader for Confab.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`GlobalConfig`]. Falls back to defaults when the file is missing or
//! malformed; a bad config file never prevents sessions from working.

use std::path::Path;

use confab_core::store::{SessionAction, SessionStore};
use confab_types::config::{ChatSettings, GlobalConfig};

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`GlobalConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Load the config and push its chat settings into `store`.
///
/// Returns the settings that were applied.
pub async fn apply_global_config(data_dir: &Path, store: &SessionStore) -> ChatSettings {
    let settings = load_global_config(data_dir).await.chat_settings();
    tracing::info!(
        disable_session_titles = settings.disable_session_titles,
        model = ?settings.selected_chat_model,
        "Applying chat settings"
    );
    store.dispatch(SessionAction::SetChatSettings(settings.clone()));
    settings
}
