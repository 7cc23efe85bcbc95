//! dashprefs-form - Shared preferences form in the terminal
//!
//! Hosts the preferences form against a dashboard server: `show` loads and
//! prints the form, `set` loads it, applies the requested changes and
//! submits. After a successful submit the host "reloads" by loading a fresh
//! form and printing it.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use dashprefs_common::config::{resolve_client_config, ConfigOverrides};
use dashprefs_common::{ResourceScope, Theme, Timezone};
use dashprefs_form::{logging, HttpBackend, PageReload, PreferencesForm};
use tracing::info;

/// Command-line arguments for dashprefs-form
#[derive(Parser, Debug)]
#[command(name = "dashprefs-form")]
#[command(about = "View and edit shared dashboard preferences")]
#[command(version)]
struct Args {
    /// Dashboard server base URL (overrides DASHPREFS_SERVER_URL and config file)
    #[arg(long, global = true)]
    server: Option<String>,

    /// API token (overrides DASHPREFS_API_TOKEN and config file)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Resource whose preferences are edited: user, org or teams/<id>
    #[arg(short, long, global = true, default_value = "user")]
    resource: ResourceScope,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and print the preferences form
    Show,

    /// Change one or more preferences and save
    Set {
        /// default, dark or light
        #[arg(long)]
        theme: Option<Theme>,

        /// default, browser or utc
        #[arg(long)]
        timezone: Option<Timezone>,

        /// Dashboard id (0 = default)
        #[arg(long)]
        home_dashboard: Option<i64>,
    },
}

/// Reload hook recording that the host should redraw from scratch
#[derive(Default)]
struct TerminalReload {
    requested: AtomicBool,
}

#[async_trait]
impl PageReload for TerminalReload {
    async fn reload(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Tracing comes up before configuration so resolution warnings are visible
    let log_level = logging::init();

    info!(
        "Starting dashprefs-form v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let overrides = ConfigOverrides {
        config_path: args.config.clone(),
        server_url: args.server.clone(),
        api_token: args.token.clone(),
    };
    let config = resolve_client_config(&overrides).context("Failed to resolve configuration")?;

    log_level
        .apply_configured_level(&config.logging.level)
        .context("Failed to apply configured log level")?;

    info!("Configuration: {}", config.source);
    info!("Dashboard server: {}", config.server_url);

    let backend =
        Arc::new(HttpBackend::from_config(&config).context("Failed to create HTTP client")?);

    match args.command {
        Command::Show => {
            let form = load_form(args.resource, Arc::clone(&backend)).await?;
            println!("{}", form.view());
        }
        Command::Set {
            theme,
            timezone,
            home_dashboard,
        } => {
            let reload = Arc::new(TerminalReload::default());
            let mut form =
                PreferencesForm::new(args.resource, Arc::clone(&backend), Arc::clone(&reload));
            form.activate()
                .await
                .with_context(|| format!("Failed to load preferences for '{}'", args.resource))?;

            if let Some(theme) = theme {
                form.on_theme_changed(theme);
            }
            if let Some(timezone) = timezone {
                form.on_timezone_changed(timezone);
            }
            if let Some(id) = home_dashboard {
                form.on_home_dashboard_changed(id);
            }

            form.submit()
                .await
                .with_context(|| format!("Failed to save preferences for '{}'", args.resource))?;

            if reload.requested.load(Ordering::SeqCst) {
                let reloaded = load_form(args.resource, backend).await?;
                println!("{}", reloaded.view());
            }
        }
    }

    Ok(())
}

async fn load_form(
    scope: ResourceScope,
    backend: Arc<HttpBackend>,
) -> Result<PreferencesForm<Arc<HttpBackend>, TerminalReload>> {
    let mut form = PreferencesForm::new(scope, backend, TerminalReload::default());
    form.activate()
        .await
        .with_context(|| format!("Failed to load preferences for '{}'", scope))?;
    Ok(form)
}
