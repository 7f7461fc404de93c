//! Source generation for a whole model.
//!
//! Loads an IDL document from JSON and renders it for every configured
//! language through [`babelgen::Generator`].

use crate::config::Config;
use crate::error::{CliError, CliResult, ModelError};
use babelgen::{Generator, IdlDocument};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A rendered file placed under the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Language id the file was rendered for.
    pub language: String,

    /// Path under the output directory.
    pub path: PathBuf,

    /// Complete file contents.
    pub contents: String,
}

/// Every file rendered for a model.
#[derive(Debug, Clone, Default)]
pub struct GeneratedOutput {
    pub files: Vec<GeneratedFile>,
}

impl GeneratedOutput {
    /// Number of files rendered for a language.
    pub fn count_for(&self, language: &str) -> usize {
        self.files.iter().filter(|f| f.language == language).count()
    }
}

/// Load an IDL document from a JSON file.
pub fn load_model(path: &Path) -> CliResult<IdlDocument> {
    if !path.exists() {
        return Err(ModelError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ModelError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let document = IdlDocument::from_json(&content).map_err(|e| ModelError::InvalidJson {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(
        path = %path.display(),
        declarations = document.declarations.len(),
        "loaded model"
    );
    Ok(document)
}

/// Renders models with the configured languages and packages.
pub struct ModelGenerator {
    config: Config,
    generator: Generator,
}

impl ModelGenerator {
    /// Create a generator, validating the configuration.
    pub fn new(config: Config) -> CliResult<Self> {
        let generator = Generator::new(config.generator_config()?);
        let available: Vec<String> = generator
            .dispatcher()
            .languages()
            .map(str::to_string)
            .collect();

        if let Some(language) = config
            .output
            .languages
            .iter()
            .find(|l| !generator.supports(l))
        {
            return Err(CliError::UnsupportedLanguage {
                language: language.clone(),
                available,
            });
        }

        Ok(Self { config, generator })
    }

    /// Render every construct of `document` for every configured language.
    pub fn generate(&self, document: &IdlDocument) -> CliResult<GeneratedOutput> {
        let mut output = GeneratedOutput::default();

        for language in &self.config.output.languages {
            let package = self.config.package_for(language);
            let files = self.generator.render_all(document, language, package)?;
            info!(language = %language, package, files = files.len(), "rendered model");

            output.files.extend(files.into_iter().map(|file| GeneratedFile {
                language: language.clone(),
                path: self.config.output.dir.join(&file.path),
                contents: file.contents,
            }));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CliArgs, ConfigManager};
    use babelgen::{Enum, Model, RenderError};

    fn config(languages: &[&str]) -> Config {
        ConfigManager::merge_cli_args(
            Config::default(),
            &CliArgs {
                output: Some(PathBuf::from("out")),
                languages: languages.iter().map(|l| l.to_string()).collect(),
                package: Some("acme".to_string()),
                ..Default::default()
            },
        )
    }

    fn document() -> IdlDocument {
        IdlDocument::new("acme.babel")
            .with_declaration(Enum::new("Color").with_value("Red", 1))
            .with_declaration(Model::new("Paint"))
    }

    #[test]
    fn test_generate_all_languages() {
        let generator = ModelGenerator::new(config(&["java", "go"])).unwrap();
        let output = generator.generate(&document()).unwrap();

        let paths: Vec<_> = output.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("out/acme/Color.java"),
                PathBuf::from("out/acme/Paint.java"),
                PathBuf::from("out/color.go"),
                PathBuf::from("out/paint.go"),
            ]
        );
        assert_eq!(output.count_for("go"), 2);
    }

    #[test]
    fn test_unsupported_language() {
        let err = ModelGenerator::new(config(&["csharp"])).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Unsupported language 'csharp' (available: go, java)"
        );
    }

    #[test]
    fn test_render_errors_propagate() {
        let doc = IdlDocument::new("t.babel")
            .with_declaration(Model::new("Circle").with_parent("Shape"));
        let generator = ModelGenerator::new(config(&["java"])).unwrap();
        assert!(matches!(
            generator.generate(&doc),
            Err(CliError::Render(RenderError::UnresolvedType { .. }))
        ));
    }
}
