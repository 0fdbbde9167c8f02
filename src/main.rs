use std::path::{Path, PathBuf};

use anyhow::Result;

use upkeep::Updater;
use upkeep::config::UpdaterConfig;
use upkeep::install::DiskWriter;
use upkeep::notify::ConsoleNotifier;
use upkeep::remote::{self, HttpTransport, PluginMeta};

fn main() -> Result<()> {
    // Logging goes to a file, never stdout: the update prompt owns the terminal.
    let log_dir = directories::ProjectDirs::from("", "", "upkeep")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "upkeep.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter("upkeep=info")
        .init();

    tracing::info!("upkeep starting");

    let config = UpdaterConfig::load()?;
    let plugins_dir = config.plugins_dir();
    let current_version = resolve_current_version(&config, &plugins_dir).unwrap_or_default();

    let mut updater = Updater::with_ports(
        config.update.source_url.clone(),
        current_version.clone(),
        plugins_dir,
        Box::new(HttpTransport),
        Box::new(DiskWriter),
        Box::new(ConsoleNotifier),
    );
    if let Some(name) = config.plugin.name.clone() {
        updater = updater.with_display_name(name);
    }

    if !updater.check_and_offer() {
        // Check failures are logged, not shown; the user just sees "no update".
        if current_version.is_empty() {
            println!("no update available");
        } else {
            println!("no update available (installed version {current_version})");
        }
    }

    Ok(())
}

/// Configured version wins; otherwise parse the `@version` marker out of the
/// installed plugin file. An empty result makes the check fail closed with a
/// logged configuration error.
fn resolve_current_version(config: &UpdaterConfig, plugins_dir: &Path) -> Option<String> {
    if let Some(version) = config.current_version() {
        return Some(version.to_string());
    }

    let file_name = remote::file_name_from_url(&config.update.source_url)?;
    let installed = plugins_dir.join(file_name);
    let text = match std::fs::read_to_string(&installed) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!("cannot read installed plugin {}: {err}", installed.display());
            return None;
        }
    };

    let version = PluginMeta::parse(&text).version;
    match &version {
        Some(version) => {
            tracing::info!("installed version {version} read from {}", installed.display());
        }
        None => {
            tracing::warn!("no @version marker in {}", installed.display());
        }
    }
    version
}
