//! Configuration system for policygen.
//!
//! Loads config from:
//! 1. Global: ~/.config/policygen/config.toml
//! 2. Per-project: .policygen/config.toml (overrides global)
//!
//! Command-line flags override both.
//!
//! Example config.toml:
//! ```toml
//! [discovery]
//! source_dir = "src/vs"
//! exclude_dirs = ["test", "fixtures"]
//!
//! [output]
//! dir = ".build/policies/win32"
//!
//! [translations]
//! languages = ["fr", "de", "ja"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where policy declarations are searched for.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Source subtree relative to the project root. Default: `src/vs`.
    pub source_dir: Option<String>,
    /// Directory names skipped anywhere below the source subtree. Default: `["test"]`.
    pub exclude_dirs: Option<Vec<String>>,
    /// Text a file must contain to be parsed. Default: `registerConfiguration`.
    pub marker: Option<String>,
}

impl DiscoveryConfig {
    pub fn source_dir(&self) -> &str {
        self.source_dir.as_deref().unwrap_or("src/vs")
    }

    pub fn exclude_dirs(&self) -> Vec<String> {
        self.exclude_dirs
            .clone()
            .unwrap_or_else(|| vec!["test".to_string()])
    }

    pub fn marker(&self) -> &str {
        self.marker.as_deref().unwrap_or("registerConfiguration")
    }

    fn merge(self, other: Self) -> Self {
        Self {
            source_dir: other.source_dir.or(self.source_dir),
            exclude_dirs: other.exclude_dirs.or(self.exclude_dirs),
            marker: other.marker.or(self.marker),
        }
    }
}

/// Where generated documents go.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, relative to the project root. Default: `.build/policies/win32`.
    pub dir: Option<PathBuf>,
    /// Also dump the extracted policies as JSON to this file.
    pub json: Option<PathBuf>,
}

impl OutputConfig {
    pub fn dir(&self, root: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) => root.join(dir),
            None => root.join(".build").join("policies").join("win32"),
        }
    }

    pub fn json(&self, root: &Path) -> Option<PathBuf> {
        self.json.as_ref().map(|path| root.join(path))
    }

    fn merge(self, other: Self) -> Self {
        Self {
            dir: other.dir.or(self.dir),
            json: other.json.or(self.json),
        }
    }
}

/// Language pack settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TranslationsConfig {
    /// Whether to fetch translations at all. Default: true.
    pub enabled: Option<bool>,
    /// Language-pack ids to render. Default: every published language.
    pub languages: Option<Vec<String>>,
    /// Overrides `extensionsGallery.resourceUrlTemplate` from product.json.
    pub resource_url_template: Option<String>,
    /// Language-pack version. Default: `<major>.<minor>.0` of package.json.
    pub version: Option<String>,
}

impl TranslationsConfig {
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn languages(&self) -> Vec<String> {
        match &self.languages {
            Some(languages) => languages.clone(),
            None => policygen_render::TARGET_LANGUAGES
                .iter()
                .map(|(id, _)| id.to_string())
                .collect(),
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            enabled: other.enabled.or(self.enabled),
            languages: other.languages.or(self.languages),
            resource_url_template: other.resource_url_template.or(self.resource_url_template),
            version: other.version.or(self.version),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PolicygenConfig {
    pub discovery: DiscoveryConfig,
    pub output: OutputConfig,
    pub translations: TranslationsConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl PolicygenConfig {
    /// Load configuration for a project.
    ///
    /// Missing files are skipped; unreadable or invalid ones are errors.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path()
            && let Some(global) = Self::load_file(&global_path)?
        {
            config = config.merge(global);
        }

        let project_path = root.join(".policygen").join("config.toml");
        if let Some(project) = Self::load_file(&project_path)? {
            config = config.merge(project);
        }

        Ok(config)
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("policygen").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Merge another config into this one. Values set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            discovery: self.discovery.merge(other.discovery),
            output: self.output.merge(other.output),
            translations: self.translations.merge(other.translations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PolicygenConfig::default();
        assert_eq!(config.discovery.source_dir(), "src/vs");
        assert_eq!(config.discovery.exclude_dirs(), ["test"]);
        assert_eq!(config.discovery.marker(), "registerConfiguration");
        assert!(config.translations.enabled());
        assert_eq!(config.translations.languages().len(), 13);
        assert_eq!(
            config.output.dir(Path::new("/repo")),
            Path::new("/repo/.build/policies/win32")
        );
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(".policygen");
        std::fs::create_dir_all(&config_dir).unwrap();

        let mut file = std::fs::File::create(config_dir.join("config.toml")).unwrap();
        writeln!(
            file,
            r#"
[discovery]
exclude_dirs = ["test", "fixtures"]

[translations]
languages = ["fr", "ja"]
"#
        )
        .unwrap();

        let config = PolicygenConfig::load(dir.path()).unwrap();
        assert_eq!(config.discovery.exclude_dirs(), ["test", "fixtures"]);
        assert_eq!(config.discovery.source_dir(), "src/vs"); // default
        assert_eq!(config.translations.languages(), ["fr", "ja"]);
    }

    #[test]
    fn test_invalid_project_config() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(".policygen");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), "[discovery\n").unwrap();

        let err = PolicygenConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_merge_prefers_set_values() {
        let base: PolicygenConfig = toml::from_str(
            r#"
[output]
dir = "out"
[translations]
enabled = false
version = "1.90.0"
"#,
        )
        .unwrap();
        let overlay: PolicygenConfig = toml::from_str(
            r#"
[translations]
enabled = true
"#,
        )
        .unwrap();

        let merged = base.merge(overlay);
        assert!(merged.translations.enabled());
        assert_eq!(merged.translations.version.as_deref(), Some("1.90.0"));
        assert_eq!(merged.output.dir(Path::new("/r")), Path::new("/r/out"));
    }
}
