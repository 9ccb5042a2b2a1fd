//! Shared configuration loader for the vitae toolchain.
//!
//! `defaults/vitae.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`VitaeConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use vitae_babel::Toolchain;

const DEFAULT_TOML: &str = include_str!("../defaults/vitae.default.toml");

/// Name of the per-project file picked up from the working directory.
pub const PROJECT_FILE: &str = "vitae.toml";

/// Top-level configuration consumed by vitae applications.
#[derive(Debug, Clone, Deserialize)]
pub struct VitaeConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub cache: CacheConfig,
    pub convert: ConvertConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub stem: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub directory: PathBuf,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub latex: LatexConfig,
    pub pdf: PdfConfig,
    #[serde(default)]
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatexConfig {
    pub converter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub compiler: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HtmlConfig {
    #[serde(default)]
    pub custom_css: Option<PathBuf>,
}

impl From<&ConvertConfig> for Toolchain {
    fn from(config: &ConvertConfig) -> Self {
        Toolchain {
            converter: config.latex.converter.clone(),
            compiler: config.pdf.compiler.clone(),
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
    pub fn build(self) -> Result<VitaeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<VitaeConfig, ConfigError> {
    Loader::new().build()
}
