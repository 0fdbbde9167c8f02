use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct UpdaterConfig {
    #[serde(default)]
    pub plugin: PluginSection,
    pub update: UpdateSection,
    pub install: InstallSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct PluginSection {
    #[serde(default)]
    pub name: Option<String>,
    /// Absent or empty means: read the `@version` marker out of the
    /// installed plugin file instead.
    #[serde(default)]
    pub current_version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSection {
    pub source_url: String,
}

#[derive(Debug, Deserialize)]
pub struct InstallSection {
    pub plugins_dir: String,
}

impl UpdaterConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let defaults = include_str!("../config/default.toml");
        let mut config: UpdaterConfig = toml::from_str(defaults)?;

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "upkeep") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                let user_str = fs::read_to_string(&config_path)?;
                config = toml::from_str(&user_str)?; // TODO: deep merge instead of full replace
            }
        }

        // Expand ~ in plugins_dir
        if config.install.plugins_dir.starts_with('~') {
            let home = dirs_home().ok_or_else(|| anyhow!("cannot determine home directory"))?;
            config.install.plugins_dir =
                config
                    .install
                    .plugins_dir
                    .replacen('~', &home.to_string_lossy(), 1);
        }

        Ok(config)
    }

    pub fn plugins_dir(&self) -> PathBuf {
        PathBuf::from(&self.install.plugins_dir)
    }

    /// Configured version, with empty strings treated as unset.
    pub fn current_version(&self) -> Option<&str> {
        self.plugin
            .current_version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config: UpdaterConfig =
            toml::from_str(include_str!("../config/default.toml")).expect("defaults parse");
        assert!(config.update.source_url.is_empty());
        assert!(config.plugin.name.is_none());
        assert!(config.install.plugins_dir.starts_with('~'));
    }

    #[test]
    fn full_config_parses() {
        let config: UpdaterConfig = toml::from_str(
            r#"
            [plugin]
            name = "MyPlugin"
            current_version = "1.2.0"

            [update]
            source_url = "https://example.com/plugins/my-plugin.js"

            [install]
            plugins_dir = "/opt/plugins"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.plugin.name.as_deref(), Some("MyPlugin"));
        assert_eq!(config.current_version(), Some("1.2.0"));
        assert_eq!(config.plugins_dir(), PathBuf::from("/opt/plugins"));
    }

    #[test]
    fn blank_current_version_reads_as_unset() {
        let config: UpdaterConfig = toml::from_str(
            r#"
            [plugin]
            current_version = "  "

            [update]
            source_url = ""

            [install]
            plugins_dir = "/opt/plugins"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.current_version(), None);
    }
}
