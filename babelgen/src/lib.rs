//! # babelgen
//!
//! Rendering engine that turns a Babel IDL document into Java and Go source
//! code.
//!
//! The IDL text is parsed elsewhere; this crate takes the resulting
//! [`IdlDocument`] (built in code or deserialized from JSON) and renders one
//! source file per service, model, enum and constant block.
//!
//! ## Usage
//!
//! ```rust
//! use babelgen::{Field, Generator, IdlDocument, Literal, Model, Primitive, TypeRef};
//!
//! let doc = IdlDocument::new("geo.babel").with_declaration(
//!     Model::new("Point")
//!         .with_field(Field::new("x", TypeRef::Primitive(Primitive::Int32)).with_initializer(Literal::Int(0)))
//!         .with_field(Field::new("y", TypeRef::Primitive(Primitive::Int32)).with_initializer(Literal::Int(0))),
//! );
//!
//! let generator = Generator::default();
//! let files = generator.render_all(&doc, "java", "com.example.geo").unwrap();
//! assert_eq!(files[0].path.to_str(), Some("com/example/geo/Point.java"));
//! assert!(files[0].contents.starts_with("// AUTO-GENERATED FILE - DO NOT MODIFY\n"));
//! ```
//!
//! ## Languages
//!
//! | Id | Enum | Model | Service | Const | File |
//! |----|------|-------|---------|-------|------|
//! | `java` | `enum` with `findByValue` | Gson class with accessors | `Iface`, `Client`, `Invoker`, call objects | `final` class of `static final` fields | `<package dirs>/<Name>.java` |
//! | `go` | string type with `Get<Enum>` | struct with JSON tags and `Init()` | interface, request/response structs, dispatcher, client | `const` block | `<snake_name>.go` |
//!
//! ## Identifiers
//!
//! Declared names are normalized per target: `PascalCase` for types and
//! accessors, `camelCase` for members. Wire names (JSON tags, Gson
//! `@SerializedName`) always keep the declared spelling.
//!
//! ## Errors
//!
//! Every render is all-or-nothing and reports a [`RenderError`] naming the
//! construct and member at fault:
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | `InvalidIdentifier` | a name has no words, starts with a digit, or collides after normalization |
//! | `UnresolvedType` | a named type is neither a model nor an enum of the document, or `void` is used outside a method return |
//! | `DuplicateEnumValue` | two enum constants share a value or a case-insensitive name |
//! | `MissingTemplate` | no template is registered for the construct kind and language |
//! | `IndentationImbalance` | a template closes more scopes than it opened, or leaves one open |

pub mod error;
pub mod generator;
pub mod ir;
pub mod naming;

use tracing::debug;

pub use error::{Origin, RenderError, RenderResult};
pub use generator::{
    GeneratorConfig, GoBundle, IndentStyle, JavaBundle, LineEnding, RenderContext, SourceFile,
    TemplateBundle, TemplateDispatcher,
};
pub use ir::{
    Attribute, AttributeParam, AttributeTarget, Comment, Const, ConstValue, Construct,
    ConstructKind, Declaration, Enum, EnumValue, Field, IdlDocument, Literal, Method, Model,
    Parameter, Primitive, Resolution, Resolver, Service, TypeRef,
};

/// Renders constructs of a document through the registered template bundles.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    dispatcher: TemplateDispatcher,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl Generator {
    /// Create a generator with the Java and Go bundles registered.
    pub fn new(config: GeneratorConfig) -> Self {
        let dispatcher = TemplateDispatcher::new()
            .with_bundle(Box::new(JavaBundle))
            .with_bundle(Box::new(GoBundle));
        Self::with_dispatcher(config, dispatcher)
    }

    /// Create a generator with a custom set of bundles.
    pub fn with_dispatcher(config: GeneratorConfig, dispatcher: TemplateDispatcher) -> Self {
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &TemplateDispatcher {
        &self.dispatcher
    }

    /// Check if a language id has a registered bundle.
    pub fn supports(&self, language: &str) -> bool {
        self.dispatcher.bundle(language).is_some()
    }

    /// Render one construct of `document` for `language`.
    ///
    /// `package` is written verbatim into the generated header.
    pub fn generate(
        &self,
        document: &IdlDocument,
        construct: Construct<'_>,
        language: &str,
        package: &str,
    ) -> RenderResult<SourceFile> {
        let resolver = Resolver::new(document);
        self.render_with(&resolver, document, construct, language, package)
    }

    /// Render every construct of `document` in declaration order.
    ///
    /// Stops at the first construct that fails to render.
    pub fn render_all(
        &self,
        document: &IdlDocument,
        language: &str,
        package: &str,
    ) -> RenderResult<Vec<SourceFile>> {
        let resolver = Resolver::new(document);
        document
            .constructs()
            .map(|construct| self.render_with(&resolver, document, construct, language, package))
            .collect()
    }

    fn render_with(
        &self,
        resolver: &Resolver<'_>,
        document: &IdlDocument,
        construct: Construct<'_>,
        language: &str,
        package: &str,
    ) -> RenderResult<SourceFile> {
        debug!(
            construct = construct.name(),
            kind = %construct.kind(),
            language,
            package,
            "generating"
        );
        let ctx = RenderContext {
            document,
            config: &self.config,
            package,
            resolver,
        };
        self.dispatcher.render(&ctx, construct, language)
    }
}

impl IdlDocument {
    /// Render every construct with the default [`Generator`].
    pub fn render_all(&self, language: &str, package: &str) -> RenderResult<Vec<SourceFile>> {
        Generator::default().render_all(self, language, package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> IdlDocument {
        IdlDocument::new("shop.babel")
            .with_declaration(Enum::new("Status").with_value("Open", 1))
            .with_declaration(Model::new("Order"))
            .with_declaration(Service::new("Orders"))
            .with_declaration(Const::new("Limits").with_value("MaxItems", Literal::Int(10)))
    }

    #[test]
    fn test_default_languages() {
        let generator = Generator::default();
        assert_eq!(generator.dispatcher().languages().collect::<Vec<_>>(), vec!["go", "java"]);
        assert!(generator.supports("java"));
        assert!(!generator.supports("csharp"));
    }

    #[test]
    fn test_render_all_keeps_declaration_order() {
        let files = document().render_all("go", "github.com/acme/shop").unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.to_string_lossy().into_owned()).collect();
        assert_eq!(paths, vec!["status.go", "order.go", "orders.go", "limits.go"]);
        assert!(files[3].contents.contains("\tLimitsMaxItems = 10\n"));
    }

    #[test]
    fn test_generate_single_construct() {
        let doc = document();
        let file = Generator::default()
            .generate(&doc, doc.construct("Status").unwrap(), "java", "com.acme")
            .unwrap();
        assert_eq!(file.path, std::path::PathBuf::from("com/acme/Status.java"));
        assert!(file.contents.contains("package com.acme;"));
    }

    #[test]
    fn test_unknown_language() {
        let doc = document();
        let err = Generator::default()
            .generate(&doc, doc.construct("Order").unwrap(), "csharp", "x")
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingTemplate {
                kind: ConstructKind::Model,
                language: "csharp".to_string(),
            }
        );
    }
}
