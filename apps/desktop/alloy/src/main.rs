use alloy::error::ShellError;
use alloy::host::HostService;
use alloy::logger::initialize as LoggerInitialize;
use alloy::state::ShellSession;

use profile_core::config::AppConfig;
use profile_core::surface::toolbar::{self, ButtonIcon};

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;
use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};

const APP_DIR_NAME: &str = "alloy";

/// Grace period for the first snapshot event to land before the toolbar is
/// rendered.
const BOOTSTRAP_SETTLE: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("alloy shell failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ShellError> {
    dotenvy::dotenv().ok();

    let data_dir = app_dir(dirs::data_local_dir(), "data")?;
    let log_dir = data_dir.join("logs");

    create_dir_all(&log_dir).map_err(|e| ShellError::Shell {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    LoggerInitialize(&log_dir)?;

    info!("Alloy shell starting");
    info!("Data directory: {}", data_dir.display());

    let config_dir = app_dir(dirs::config_dir(), "config")?;
    let config = AppConfig::load(&config_dir).unwrap_or_else(|e| {
        warn!("Falling back to default config: {e}");
        AppConfig::default()
    });

    let seed_demo = std::env::var("ALLOY_DEMO").is_ok();
    let host = HostService::spawn(data_dir, seed_demo);
    let session = ShellSession::connect(&config, host);

    // Bootstrap: the snapshot arrives as an event once the host answers.
    if let Err(e) = session.dispatcher.request_profile_list().await {
        warn!("Initial profile sync failed: {e}");
    }
    tokio::time::sleep(BOOTSTRAP_SETTLE).await;

    render_toolbar(&session).await;
    for notice in session.notices.drain() {
        info!("Notice [{:?}]: {}", notice.level, notice.message);
    }

    info!("Shell ready; press ctrl-c to exit");
    tokio::signal::ctrl_c().await.map_err(|e| ShellError::Shell {
        message: format!("Failed to wait for shutdown signal: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    info!("Shutting down");
    Ok(())
}

/// Resolve `<platform dir>/alloy`, failing when the platform offers no base
/// directory at all.
fn app_dir(base: Option<PathBuf>, role: &str) -> Result<PathBuf, ShellError> {
    base.map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| ShellError::Shell {
            message: format!("No platform {role} directory available"),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Log the toolbar the way a renderer would draw it.
async fn render_toolbar(session: &ShellSession) {
    let buttons = toolbar::render(&session.store).await;

    if buttons.is_empty() {
        info!("Toolbar: no profiles");
        return;
    }

    for button in buttons {
        let icon = match &button.icon {
            ButtonIcon::Image(path) => format!("icon {path}"),
            ButtonIcon::Glyph(glyph) => format!("glyph '{glyph}'"),
        };
        let marker = if button.active { " [active]" } else { "" };
        info!("Toolbar: {} ({}){}", button.label, icon, marker);
    }
}
