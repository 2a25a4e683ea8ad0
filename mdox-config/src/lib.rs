//! Shared configuration loader for the mdox toolchain.
//!
//! `defaults/mdox.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdoxConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdox_babel::formats::docx::{PageSize, RenderOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdox.default.toml");

/// Top-level configuration consumed by mdox applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdoxConfig {
    pub document: DocumentConfig,
    pub page: PageConfig,
    pub fonts: FontsConfig,
    pub diagrams: DiagramsConfig,
    pub output: OutputConfig,
}

/// Title page and table of contents.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    pub default_title: String,
    pub toc_title: String,
    pub toc_levels: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub size: PageSize,
    /// Twips.
    pub margin: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontsConfig {
    pub body: String,
    pub code: String,
    pub body_size: usize,
    pub code_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagramsConfig {
    pub language: String,
    pub note: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub default_path: String,
}

impl From<&MdoxConfig> for RenderOptions {
    fn from(config: &MdoxConfig) -> Self {
        RenderOptions {
            default_title: config.document.default_title.clone(),
            toc_title: config.document.toc_title.clone(),
            toc_levels: config.document.toc_levels,
            page_size: config.page.size,
            margin: config.page.margin,
            body_font: config.fonts.body.clone(),
            code_font: config.fonts.code.clone(),
            body_size: config.fonts.body_size,
            code_size: config.fonts.code_size,
            diagram_language: config.diagrams.language.clone(),
            diagram_note: config.diagrams.note.clone(),
        }
    }
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
    pub fn build(self) -> Result<MdoxConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdoxConfig, ConfigError> {
    Loader::new().build()
}
