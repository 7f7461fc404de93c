//! Template trait definitions.
//!
//! A target language is supported by a [`TemplateBundle`]: a set of
//! [`ConstructTemplate`]s, one per construct kind, plus the language's file
//! layout. Adding a language means implementing these two traits and
//! registering the bundle with the dispatcher; nothing else changes.

use std::path::PathBuf;

use crate::error::RenderResult;
use crate::ir::{Construct, ConstructKind, IdlDocument, Resolver};

/// Renders one kind of construct for one language.
///
/// # Example
///
/// ```rust,ignore
/// use babelgen::generator::{ConstructTemplate, RenderContext};
/// use babelgen::ir::{Construct, ConstructKind};
/// use babelgen::RenderResult;
///
/// struct PlainEnum;
///
/// impl ConstructTemplate for PlainEnum {
///     fn kind(&self) -> ConstructKind { ConstructKind::Enum }
///
///     fn render(&self, ctx: &RenderContext<'_>, construct: Construct<'_>) -> RenderResult<String> {
///         Ok(format!("// enum {}\n", construct.name()))
///     }
/// }
/// ```
pub trait ConstructTemplate: Send + Sync {
    /// The construct kind this template renders.
    fn kind(&self) -> ConstructKind;

    /// Render the construct to complete source text.
    ///
    /// Implementations must either return the whole file or an error;
    /// partial output is never returned.
    fn render(&self, ctx: &RenderContext<'_>, construct: Construct<'_>) -> RenderResult<String>;
}

/// The templates and file layout of one target language.
pub trait TemplateBundle: Send + Sync {
    /// Returns the unique identifier for this language.
    ///
    /// This is used to select the bundle and should be a short,
    /// lowercase string (e.g., "java", "go").
    fn id(&self) -> &'static str;

    /// Returns the human-readable name of this language.
    fn name(&self) -> &'static str;

    /// Returns the file extension for generated files.
    fn file_extension(&self) -> &'static str;

    /// Relative path of the file generated for a construct.
    fn file_path(&self, construct_name: &str, package: &str) -> RenderResult<PathBuf>;

    /// The templates this bundle provides.
    fn templates(&self) -> Vec<Box<dyn ConstructTemplate>>;
}

/// Everything a template may read during one render.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The document the construct belongs to.
    pub document: &'a IdlDocument,
    /// Output options.
    pub config: &'a GeneratorConfig,
    /// Output package, injected verbatim.
    pub package: &'a str,
    /// Named-type lookup for the document.
    pub resolver: &'a Resolver<'a>,
}

/// A rendered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the output directory.
    pub path: PathBuf,
    /// Complete file contents.
    pub contents: String,
}

/// Generator configuration options.
///
/// Controls output formatting and which attributes are carried into the
/// generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Whether to generate documentation comments
    pub generate_docs: bool,

    /// Indentation style
    pub indent: IndentStyle,

    /// Line ending style
    pub line_ending: LineEnding,

    /// Attribute scopes to emit (compared case-insensitively)
    pub scopes: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generate_docs: true,
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
            scopes: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to generate documentation comments.
    pub fn with_generate_docs(mut self, generate: bool) -> Self {
        self.generate_docs = generate;
        self
    }

    /// Set the indentation style.
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Set the line ending style.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Enable an attribute scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Replace the enabled attribute scopes.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Check if attributes of the given scope should be emitted.
    pub fn scope_enabled(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s.eq_ignore_ascii_case(scope))
    }

    /// Get the indentation string based on current settings.
    pub fn indent_str(&self) -> &'static str {
        self.indent.as_str()
    }

    /// Get the line ending string based on current settings.
    pub fn line_ending_str(&self) -> &'static str {
        self.line_ending.as_str()
    }
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    /// Use 2 spaces for indentation
    Spaces2,

    /// Use 4 spaces for indentation
    Spaces4,

    /// Use tabs for indentation (default)
    #[default]
    Tabs,
}

impl IndentStyle {
    /// Get the indentation string.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }
}

/// Line ending style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,

    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}
