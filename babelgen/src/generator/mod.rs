//! Code generator module.
//!
//! This module defines the template traits, the shared rendering machinery
//! (indentation, comments, type formatting, service planning) and the
//! template bundles for each target language.

pub mod comments;
pub mod dispatch;
pub mod go;
pub mod indent;
pub mod java;
pub mod plan;
pub mod traits;
pub mod type_format;
pub mod writer;

pub use dispatch::TemplateDispatcher;
pub use go::GoBundle;
pub use java::JavaBundle;
pub use traits::{
    ConstructTemplate, GeneratorConfig, IndentStyle, LineEnding, RenderContext, SourceFile,
    TemplateBundle,
};
pub use type_format::TypeFormatter;
pub use writer::{SourceWriter, GENERATED_MARKER};
