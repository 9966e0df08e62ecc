//! Shared configuration loader for the mindmap toolchain.
//!
//! `defaults/mindmap.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`MindmapConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mindmap_babel::{
    ExportOptions, ImageResolverOptions, ImageSize, ImportOptions, TreeTransforms,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../defaults/mindmap.default.toml");

/// Name of the per-project file picked up from the working directory.
pub const PROJECT_CONFIG_FILE: &str = "mindmap.toml";

/// Top-level configuration consumed by mindmap applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MindmapConfig {
    pub import: ImportConfig,
    pub images: ImagesConfig,
    pub tree: TreeConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Markdown import knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub block_ref_scheme: String,
    pub placeholder_image: PlaceholderImageConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PlaceholderImageConfig {
    pub width: u32,
    pub height: u32,
}

impl From<&ImportConfig> for ImportOptions {
    fn from(config: &ImportConfig) -> Self {
        ImportOptions {
            block_ref_scheme: config.block_ref_scheme.clone(),
            placeholder_image_size: ImageSize {
                width: config.placeholder_image.width,
                height: config.placeholder_image.height,
            },
        }
    }
}

/// Image pass settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    pub resolve: bool,
    pub asset_base_url: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
}

impl From<&ImagesConfig> for ImageResolverOptions {
    fn from(config: &ImagesConfig) -> Self {
        ImageResolverOptions {
            asset_base_url: config.asset_base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            base_dir: config.base_dir.clone(),
        }
    }
}

/// Post-processing of converted trees.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeConfig {
    pub prune_empty: bool,
    pub max_level: usize,
    pub auto_number: bool,
}

impl From<&TreeConfig> for TreeTransforms {
    fn from(config: &TreeConfig) -> Self {
        TreeTransforms {
            prune_empty: config.prune_empty,
            max_level: config.max_level,
            auto_number: config.auto_number,
        }
    }
}

/// Markdown export knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub max_heading_level: usize,
    pub bullet_indent: String,
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        ExportOptions {
            max_heading_level: config.max_heading_level,
            bullet_indent: config.bullet_indent.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MindmapConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MindmapConfig, ConfigError> {
    Loader::new().build()
}
