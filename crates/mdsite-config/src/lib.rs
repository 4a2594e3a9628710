//! Configuration management for mdsite.
//!
//! Parses `mdsite.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Path values support environment variable expansion (`${VAR}`,
//! `${VAR:-default}`) and `~` home-directory expansion; they are resolved
//! relative to the directory containing the config file. CLI settings can
//! be applied during load via [`CliSettings`] and take precedence over
//! file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdsite.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the markdown content directory.
    pub content_dir: Option<PathBuf>,
    /// Override the static asset directory.
    pub static_dir: Option<PathBuf>,
    /// Override the generated site output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the page template path.
    pub template: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    content_dir: Option<String>,
    static_dir: Option<String>,
    output_dir: Option<String>,
    template: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory containing markdown content.
    pub content_dir: PathBuf,
    /// Directory of static assets copied into the output as-is.
    pub static_dir: PathBuf,
    /// Directory the generated site is written to.
    pub output_dir: PathBuf,
    /// HTML page template with `{{ Title }}` and `{{ Content }}`
    /// placeholders.
    pub template: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.content_dir`").
        field: String,
        /// Error message (e.g., "${`SITE_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `mdsite.toml` in the current directory and parents,
    /// falling back to defaults rooted at the current directory.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist, parsing
    /// fails, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.site_resolved.content_dir.clone_from(content_dir);
        }
        if let Some(static_dir) = &settings.static_dir {
            self.site_resolved.static_dir.clone_from(static_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(template) = &settings.template {
            self.site_resolved.template.clone_from(template);
        }
    }

    /// Search for a config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to the current directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to the given base.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            site_resolved: SiteConfig {
                content_dir: base.join("content"),
                static_dir: base.join("static"),
                output_dir: base.join("public"),
                template: base.join("template.html"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the content and output
    /// directories coincide; generation would overwrite its own input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_resolved.content_dir == self.site_resolved.output_dir {
            return Err(ConfigError::Validation(
                "site.content_dir and site.output_dir must differ".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in path strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let fields = [
            (&mut self.site.content_dir, "site.content_dir"),
            (&mut self.site.static_dir, "site.static_dir"),
            (&mut self.site.output_dir, "site.output_dir"),
            (&mut self.site.template, "site.template"),
        ];
        for (value, field) in fields {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand(raw, field)?);
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on the config
    /// file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            content_dir: resolve(self.site.content_dir.as_deref(), "content"),
            static_dir: resolve(self.site.static_dir.as_deref(), "static"),
            output_dir: resolve(self.site.output_dir.as_deref(), "public"),
            template: resolve(self.site.template.as_deref(), "template.html"),
        };
    }
}

/// Expand `${VAR}` / `~` references in a config string.
fn expand(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full(value)
        .map(|expanded| expanded.into_owned())
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.site_resolved.content_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(
            config.site_resolved.static_dir,
            PathBuf::from("/test/static")
        );
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/test/public")
        );
        assert_eq!(
            config.site_resolved.template,
            PathBuf::from("/test/template.html")
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.site_resolved.content_dir,
            PathBuf::from("/project/content")
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
content_dir = "pages"
output_dir = "dist"
template = "layout.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.site_resolved.content_dir,
            PathBuf::from("/project/pages")
        );
        assert_eq!(
            config.site_resolved.static_dir,
            PathBuf::from("/project/static")
        );
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/project/dist")
        );
        assert_eq!(
            config.site_resolved.template,
            PathBuf::from("/project/layout.html")
        );
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let err = Config::load(Some(Path::new("/does/not/exist/mdsite.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdsite.toml");
        std::fs::write(&path, "[site]\ncontent_dir = \"docs\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.site_resolved.content_dir, dir.path().join("docs"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_apply_cli_settings_content_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            content_dir: Some(PathBuf::from("/custom/content")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.site_resolved.content_dir,
            PathBuf::from("/custom/content")
        );
        // Unchanged
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/test/public")
        );
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/out")),
            template: Some(PathBuf::from("/tpl.html")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/out"));
        assert_eq!(config.site_resolved.template, PathBuf::from("/tpl.html"));
    }

    #[test]
    fn test_apply_cli_settings_empty_is_noop() {
        let before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.site_resolved, before.site_resolved);
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDSITE_TEST_CONTENT", "expanded-content");
        }

        let toml = r#"
[site]
content_dir = "${MDSITE_TEST_CONTENT}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.site_resolved.content_dir,
            PathBuf::from("/project/expanded-content")
        );

        unsafe {
            std::env::remove_var("MDSITE_TEST_CONTENT");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDSITE_MISSING_VAR_TEST");
        }

        let toml = r#"
[site]
output_dir = "${MDSITE_MISSING_VAR_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("site.output_dir"));
        assert!(err.to_string().contains("MDSITE_MISSING_VAR_TEST"));
    }

    #[test]
    fn test_expand_env_vars_literal_unchanged() {
        let toml = r#"
[site]
content_dir = "plain-dir"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        assert_eq!(config.site.content_dir.as_deref(), Some("plain-dir"));
    }

    #[test]
    fn test_validate_content_equals_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.output_dir = config.site_resolved.content_dir.clone();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }
}
