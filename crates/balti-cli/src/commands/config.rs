use std::path::{Path, PathBuf};

use balti_core::config::default_config_path;
use balti_core::util::{is_http_url, normalize_text_option};
use balti_core::ClientConfig;

use crate::cli::ConfigCommands;
use crate::commands::common::{resolve_config, GlobalArgs};
use crate::error::CliError;

pub fn run_config(command: &ConfigCommands, args: &GlobalArgs<'_>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init => run_config_init(args),
        ConfigCommands::Show => run_config_show(args),
    }
}

fn config_path(args: &GlobalArgs<'_>) -> Result<PathBuf, CliError> {
    args.config_path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .ok_or_else(|| CliError::Config("Failed to resolve config directory".to_string()))
}

pub fn run_config_init(args: &GlobalArgs<'_>) -> Result<(), CliError> {
    let path = config_path(args)?;
    let existing = ClientConfig::load_from_path(&path)?;
    let updated = merge_init_values(existing, args.api_url.clone(), args.user.clone())?;

    updated.save_to_path(&path)?;
    println!("Saved config to {}", path.display());
    Ok(())
}

/// Apply `config init` flags on top of the stored config.
pub fn merge_init_values(
    mut config: ClientConfig,
    api_url: Option<String>,
    user: Option<String>,
) -> Result<ClientConfig, CliError> {
    if let Some(url) = normalize_text_option(api_url) {
        if !is_http_url(&url) {
            return Err(CliError::Config(
                "API URL must include http:// or https://".to_string(),
            ));
        }
        config.api_base_url = Some(url.trim_end_matches('/').to_string());
    }
    if let Some(user) = normalize_text_option(user) {
        config.user_id = Some(user);
    }
    if config.api_base_url.is_none() {
        return Err(CliError::Config(
            "Pass --api-url to set the dictionary API base URL".to_string(),
        ));
    }
    Ok(config)
}

fn run_config_show(args: &GlobalArgs<'_>) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
