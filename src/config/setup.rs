//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when hikemeet is run for the first time.

use super::HikeConfig;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::Path;

/// Interactive first-time setup - prompts for the backend and the signed-in user
///
/// Guides the user through creating their configuration:
/// 1. Prompts for the backend base URL
/// 2. Prompts for an auth token (optional)
/// 3. Prompts for the current user id, excluded from people results (optional)
/// 4. Saves the configuration to `path`
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - User input cannot be read
/// - The configuration cannot be saved
pub fn first_time_setup(path: &Path) -> Result<HikeConfig, ConfigError> {
    println!("Welcome to hikemeet! Let's point it at your backend.\n");

    let defaults = HikeConfig::default();
    let theme = ColorfulTheme::default();

    let api_base_url: String = Input::with_theme(&theme)
        .with_prompt("Backend URL")
        .default(defaults.api_base_url.clone())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let auth_token: String = Input::with_theme(&theme)
        .with_prompt("Auth token (leave empty for none)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let current_user_id: String = Input::with_theme(&theme)
        .with_prompt("Your user id (leave empty to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let config = save_answers(path, &api_base_url, &auth_token, &current_user_id)?;

    println!("\nConfiguration saved to {}", path.display());
    Ok(config)
}

/// Apply the wizard's answers on top of the defaults and write them to `path`
///
/// Blank optional answers leave the setting unset.
fn save_answers(
    path: &Path,
    api_base_url: &str,
    auth_token: &str,
    current_user_id: &str,
) -> Result<HikeConfig, ConfigError> {
    let mut config = HikeConfig::default();
    config.set("api_base_url", api_base_url)?;
    config.set("auth_token", auth_token)?;
    config.set("current_user_id", current_user_id)?;
    config.save_to(path)?;
    Ok(config)
}
