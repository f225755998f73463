use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Environment variable that overrides `settings.admin_base`.
pub const ADMIN_BASE_ENV: &str = "GL_ADMIN_BASE";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    /// Administrative base directory. `~` and `$VARS` are expanded.
    #[serde(default)]
    pub admin_base: String,
    /// Rule registry, relative to `admin_base`.
    #[serde(default)]
    pub rule_registry: String,
    /// Compiled rule set, relative to `admin_base`.
    #[serde(default)]
    pub rules: String,
    #[serde(default)]
    pub log_level: String,
    /// Decision log file; empty disables it.
    #[serde(default)]
    pub log_file: String,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    admin_base: Option<String>,
    rule_registry: Option<String>,
    rules: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| shellexpand::tilde(path).into_owned());
    PathBuf::from(expanded)
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/refgate/config.toml (if exists)
    /// 3. `GL_ADMIN_BASE` from the environment, if set and non-empty
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config.apply_admin_base_override(std::env::var(ADMIN_BASE_ENV).ok());
        config
    }

    /// Try to load user overlay from ~/.config/refgate/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/refgate/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("refgate: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config. Only keys present override.
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        let fields = [
            (&mut self.settings.admin_base, s.admin_base),
            (&mut self.settings.rule_registry, s.rule_registry),
            (&mut self.settings.rules, s.rules),
            (&mut self.settings.log_level, s.log_level),
            (&mut self.settings.log_file, s.log_file),
        ];
        for (field, value) in fields {
            if let Some(v) = value {
                *field = v;
            }
        }
    }

    fn apply_admin_base_override(&mut self, value: Option<String>) {
        if let Some(base) = value.filter(|b| !b.is_empty()) {
            self.settings.admin_base = base;
        }
    }

    pub fn admin_base(&self) -> PathBuf {
        expand(&self.settings.admin_base)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.admin_base().join(&self.settings.rule_registry)
    }

    pub fn rules_path(&self) -> PathBuf {
        self.admin_base().join(&self.settings.rules)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        (!self.settings.log_file.is_empty()).then(|| expand(&self.settings.log_file))
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert_eq!(config.settings.admin_base, "~/.gitolite");
        assert_eq!(config.settings.rule_registry, "conf/rule_info");
        assert_eq!(config.settings.rules, "conf/rules.toml");
        assert_eq!(config.settings.log_level, "warn");
        assert!(config.log_file().is_none());
    }

    #[test]
    fn paths_hang_off_admin_base() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            admin_base = "/srv/git/.gitolite"
        "#,
        );
        assert_eq!(
            config.registry_path(),
            PathBuf::from("/srv/git/.gitolite/conf/rule_info")
        );
        assert_eq!(
            config.rules_path(),
            PathBuf::from("/srv/git/.gitolite/conf/rules.toml")
        );
    }

    #[test]
    fn tilde_is_expanded() {
        if std::env::var_os("HOME").is_none() {
            return;
        }
        let config = Config::default_config();
        assert!(!config.admin_base().starts_with("~"));
    }

    #[test]
    fn overlay_omitted_settings_unchanged() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            log_level = "debug"
        "#,
        );
        assert_eq!(config.settings.log_level, "debug");
        assert_eq!(config.settings.rule_registry, "conf/rule_info");
    }

    #[test]
    fn overlay_enables_log_file() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            log_file = "/var/log/refgate.log"
        "#,
        );
        assert_eq!(config.log_file(), Some(PathBuf::from("/var/log/refgate.log")));
    }

    #[test]
    fn env_override_wins_unless_empty() {
        let mut config = Config::default_config();
        config.apply_admin_base_override(Some(String::new()));
        assert_eq!(config.settings.admin_base, "~/.gitolite");
        config.apply_admin_base_override(Some("/tmp/admin".into()));
        assert_eq!(config.admin_base(), PathBuf::from("/tmp/admin"));
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert_eq!(config.settings.admin_base, "~/.gitolite");
        assert_eq!(config.settings.rules, "conf/rules.toml");
    }
}
