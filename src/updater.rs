use std::path::PathBuf;

use crate::error::UpdateError;
use crate::install::{self, DiskWriter, PluginWriter};
use crate::notify::{Notifier, PromptResponse, SilentNotifier};
use crate::remote::{self, HttpTransport, RemoteArtifact, Transport};
use crate::version;

/// Sequential check/offer/install orchestrator for a single plugin.
///
/// Holds the artifact from the most recent successful check as its only
/// mutable state. Staged state always reflects the latest check: a cycle
/// that finds nothing, or fails, clears it, so a stale offer never
/// outlives a newer "no update" verdict.
pub struct Updater {
    source_url: String,
    current_version: String,
    plugins_dir: PathBuf,
    display_name: Option<String>,
    transport: Box<dyn Transport>,
    writer: Box<dyn PluginWriter>,
    notifier: Box<dyn Notifier>,
    staged: Option<RemoteArtifact>,
}

impl Updater {
    /// Orchestrator with production collaborators: blocking HTTP, `std::fs`
    /// writes, log-only notifications.
    pub fn new(
        source_url: impl Into<String>,
        current_version: impl Into<String>,
        plugins_dir: impl Into<PathBuf>,
    ) -> Self {
        Self::with_ports(
            source_url,
            current_version,
            plugins_dir,
            Box::new(HttpTransport),
            Box::new(DiskWriter),
            Box::new(SilentNotifier),
        )
    }

    /// Orchestrator with explicit collaborators, for embedding hosts and
    /// tests.
    pub fn with_ports(
        source_url: impl Into<String>,
        current_version: impl Into<String>,
        plugins_dir: impl Into<PathBuf>,
        transport: Box<dyn Transport>,
        writer: Box<dyn PluginWriter>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            current_version: current_version.into(),
            plugins_dir: plugins_dir.into(),
            display_name: None,
            transport,
            writer,
            notifier,
            staged: None,
        }
    }

    /// Name used in notifications until the remote `@name` marker is seen.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// One check cycle: fetch, parse, compare. Any failure is logged and
    /// read as "no update available"; this never panics into the host.
    pub fn is_update_available(&mut self) -> bool {
        match self.try_check() {
            Ok(newer) => newer,
            Err(err) => {
                tracing::warn!("failed to check for updates: {err}");
                self.staged = None;
                false
            }
        }
    }

    fn try_check(&mut self) -> Result<bool, UpdateError> {
        if self.source_url.trim().is_empty() {
            return Err(UpdateError::MissingSource);
        }
        if self.current_version.trim().is_empty() {
            return Err(UpdateError::MissingCurrentVersion);
        }

        let artifact = remote::fetch(self.transport.as_ref(), &self.source_url)?;
        let newer = version::is_newer(&artifact.version, &self.current_version)?;
        tracing::info!(
            "remote version {} vs installed {}: {}",
            artifact.version,
            self.current_version,
            if newer { "update available" } else { "up to date" }
        );

        self.staged = newer.then_some(artifact);
        Ok(newer)
    }

    /// Writes the staged artifact into the plugins directory. Success and
    /// failure both surface as toasts naming the plugin; a failed install
    /// leaves the artifact staged so the caller may retry.
    pub fn install_update(&mut self) -> bool {
        let plugin = self.plugin_label();
        match self.try_install() {
            Ok(path) => {
                tracing::info!("installed {plugin} to {}", path.display());
                self.notifier.success(&format!("{plugin} updated"));
                self.staged = None;
                true
            }
            Err(err) => {
                tracing::error!("failed to install update for {plugin}: {err}");
                self.notifier
                    .error(&format!("failed to download and install update for {plugin}"));
                false
            }
        }
    }

    fn try_install(&mut self) -> Result<PathBuf, UpdateError> {
        let artifact = self.staged.as_ref().ok_or(UpdateError::NothingStaged)?;
        install::install(self.writer.as_ref(), &self.plugins_dir, artifact)
    }

    /// Check, then put up the banner when an update is staged. Accepting
    /// installs; ignoring keeps the artifact staged, so the offer comes
    /// back on the next cycle that still finds it. Returns whether an
    /// update was available.
    pub fn check_and_offer(&mut self) -> bool {
        if !self.is_update_available() {
            return false;
        }

        match self.notifier.prompt_update(&self.plugin_label()) {
            PromptResponse::Accepted => {
                self.install_update();
            }
            PromptResponse::Dismissed => {
                tracing::info!("update for {} ignored", self.plugin_label());
            }
        }
        true
    }

    /// The artifact from the most recent check, when it was newer than the
    /// installed version.
    pub fn staged(&self) -> Option<&RemoteArtifact> {
        self.staged.as_ref()
    }

    /// Best available name for user-facing messages: the staged artifact's
    /// `@name`, then the configured display name, then the file the URL
    /// points at.
    fn plugin_label(&self) -> String {
        if let Some(artifact) = &self.staged {
            return artifact.display_name().to_string();
        }
        if let Some(name) = &self.display_name {
            return name.clone();
        }
        remote::file_name_from_url(&self.source_url).unwrap_or_else(|| "plugin".to_string())
    }
}
