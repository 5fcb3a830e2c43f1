use super::Context;
use crate::output::{styled_table, Output};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use deyeturn_config::Config;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, ctx: &Context, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(ctx, output),
        ConfigCommands::Init { force } => init_config(force, ctx, output),
        ConfigCommands::Token { token } => store_token(token, ctx, output),
    }
}

fn show_config(ctx: &Context, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    let token = ctx.credentials()?.resolve_tmdb_access_token();
    let token_display = token.as_deref().map(mask_string).unwrap_or_else(|| "<not set>".to_string());

    output.json(&json!({
        "configFile": config_file,
        "configFileExists": config_file.exists(),
        "storageDir": ctx.paths.storage_dir(),
        "credentialsFile": ctx.paths.credentials_file(),
        "tokenConfigured": token.is_some(),
        "config": ctx.config,
    }));

    if !output.is_human() {
        return Ok(());
    }
    if !config_file.exists() {
        output.warn(format!(
            "No config file at {}, using defaults. Run 'deyeturn config init' to create one.",
            config_file.display()
        ));
    }

    let config = &ctx.config;
    let mut table = styled_table(["Setting", "Value"]);
    let rows = [
        ("Config file", config_file.display().to_string()),
        ("Storage directory", ctx.paths.storage_dir().display().to_string()),
        ("storage.namespace", config.storage.namespace.clone()),
        ("storage.history_capacity", config.storage.history_capacity.to_string()),
        ("storage.continue_watching_capacity", config.storage.continue_watching_capacity.to_string()),
        ("playback.save_interval_secs", config.playback.save_interval_secs.to_string()),
        ("playback.resume_ceiling", config.playback.resume_ceiling.to_string()),
        ("playback.controls_hide_secs", config.playback.controls_hide_secs.to_string()),
        ("catalog.base_url", config.catalog.base_url.clone()),
        ("catalog.image_base_url", config.catalog.image_base_url.clone()),
        ("catalog.language", config.catalog.language.clone().unwrap_or_else(|| "-".to_string())),
        ("catalog token", token_display),
        ("logging.level", config.logging.level.clone()),
        ("logging.json", config.logging.json.to_string()),
        (
            "logging.file",
            config.logging.file.as_ref().map(|f| f.display().to_string()).unwrap_or_else(|| "-".to_string()),
        ),
    ];
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value]);
    }
    output.table(&table);
    Ok(())
}

fn init_config(force: bool, ctx: &Context, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Config file already exists at {}. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create profile directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default config to {}", config_file.display()));
    Ok(())
}

fn store_token(token: String, ctx: &Context, output: &Output) -> Result<()> {
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(eyre!("Token cannot be empty"));
    }

    let mut store = ctx.credentials()?;
    let masked = mask_string(&token);
    store.set_tmdb_access_token(token);
    store
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;
    output.success(format!("Stored metadata API token {}", masked));
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return "<not set>".to_string();
    }
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
