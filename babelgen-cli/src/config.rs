//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `babelgen.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use babelgen::{GeneratorConfig, IndentStyle, LineEnding};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "babelgen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Formatting of generated sources.
    pub format: FormatConfig,

    /// Output package per language id.
    pub packages: BTreeMap<String, String>,

    /// Attribute handling.
    pub attributes: AttributesConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Languages to generate.
    pub languages: Vec<String>,

    /// Whether to carry IDL comments into the generated code.
    pub generate_docs: bool,
}

/// Formatting configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Indentation (`tabs`, `spaces2` or `spaces4`).
    pub indent: String,

    /// Line endings (`lf` or `crlf`).
    pub line_ending: String,
}

/// Attribute configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AttributesConfig {
    /// Attribute scopes to emit.
    pub scopes: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            languages: vec!["java".to_string()],
            generate_docs: true,
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: "tabs".to_string(),
            line_ending: "lf".to_string(),
        }
    }
}

impl Config {
    /// Output package for a language, empty when none is configured.
    pub fn package_for(&self, language: &str) -> &str {
        self.packages.get(language).map(String::as_str).unwrap_or("")
    }

    /// Build the rendering options.
    pub fn generator_config(&self) -> CliResult<GeneratorConfig> {
        let indent = match self.format.indent.to_ascii_lowercase().as_str() {
            "tabs" => IndentStyle::Tabs,
            "spaces2" => IndentStyle::Spaces2,
            "spaces4" => IndentStyle::Spaces4,
            other => {
                return Err(ConfigError::invalid_value(
                    "format.indent",
                    format!("expected tabs, spaces2 or spaces4, found '{}'", other),
                )
                .into())
            }
        };
        let line_ending = match self.format.line_ending.to_ascii_lowercase().as_str() {
            "lf" => LineEnding::Lf,
            "crlf" => LineEnding::CrLf,
            other => {
                return Err(ConfigError::invalid_value(
                    "format.line_ending",
                    format!("expected lf or crlf, found '{}'", other),
                )
                .into())
            }
        };

        Ok(GeneratorConfig::new()
            .with_generate_docs(self.output.generate_docs)
            .with_indent(indent)
            .with_line_ending(line_ending)
            .with_scopes(self.attributes.scopes.iter().cloned()))
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// If the path is None, attempts to load from the default location.
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path, e.to_string()))?;

        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values. A package
    /// given on the command line applies to every selected language.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if !args.languages.is_empty() {
            config.output.languages = args.languages.clone();
        }

        if let Some(ref package) = args.package {
            for language in &config.output.languages {
                config.packages.insert(language.clone(), package.clone());
            }
        }

        if let Some(generate_docs) = args.generate_docs {
            config.output.generate_docs = generate_docs;
        }

        if let Some(ref indent) = args.indent {
            config.format.indent = indent.clone();
        }

        if !args.scopes.is_empty() {
            config.attributes.scopes = args.scopes.clone();
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# babelgen configuration file

[output]
# Output directory for generated sources
dir = "./generated"

# Languages to generate (java, go)
languages = ["java"]

# Whether to carry IDL comments into the generated code
generate_docs = true

[format]
# Indentation: tabs, spaces2 or spaces4
indent = "tabs"

# Line endings: lf or crlf
line_ending = "lf"

[packages]
# Output package per language
java = "com.example"
go = "github.com/example/api"

[attributes]
# Attribute scopes carried into the generated code (e.g. "java")
scopes = []
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Languages override.
    pub languages: Vec<String>,

    /// Package override for the selected languages.
    pub package: Option<String>,

    /// Generate docs override.
    pub generate_docs: Option<bool>,

    /// Indentation override.
    pub indent: Option<String>,

    /// Attribute scopes override.
    pub scopes: Vec<String>,
}
