//! Language-neutral type formatting interface.
//!
//! Each bundle provides a [`TypeFormatter`] that turns [`TypeRef`]s and
//! [`Literal`]s into target syntax. Container types recurse into their
//! element types, so arbitrarily nested generics format correctly.

use crate::error::{RenderError, RenderResult};
use crate::ir::{Literal, Resolution, Resolver, TypeRef};

/// Formats types and literals for one target language.
pub trait TypeFormatter {
    /// Type syntax for a field, parameter or return type.
    fn format_type(&self, ty: &TypeRef) -> RenderResult<String>;

    /// A literal as written in an annotation or constant.
    fn format_literal(&self, literal: &Literal) -> RenderResult<String>;

    /// A literal as the initializer of a member of type `ty`.
    ///
    /// Languages that need typed numeric suffixes apply them here.
    fn format_initializer(&self, ty: &TypeRef, literal: &Literal) -> RenderResult<String> {
        let _ = ty;
        self.format_literal(literal)
    }

    /// Expression constructing a fresh empty container, or `None` for
    /// non-container types.
    fn format_container_constructor(&self, ty: &TypeRef) -> RenderResult<Option<String>>;

    /// Check if the type is the void sentinel.
    fn is_void(&self, ty: &TypeRef) -> bool {
        ty.is_void()
    }
}

/// Resolve a named type, failing with `UnresolvedType` when it is unknown.
pub fn require_named<'a>(resolver: &Resolver<'a>, name: &str) -> RenderResult<Resolution<'a>> {
    match resolver.resolve(name) {
        Resolution::Unresolved(name) => Err(RenderError::unresolved(name)),
        resolved => Ok(resolved),
    }
}

/// Escape a string for a double-quoted C-family literal.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Quote a character as a single-quoted C-family literal.
pub fn quote_char(c: char) -> String {
    match c {
        '\'' => "'\\''".to_string(),
        '\\' => "'\\\\'".to_string(),
        '\n' => "'\\n'".to_string(),
        '\r' => "'\\r'".to_string(),
        '\t' => "'\\t'".to_string(),
        other => format!("'{}'", other),
    }
}

/// Render a float so that it always reads as a floating-point literal.
pub fn float_literal(value: f64) -> String {
    format!("{:?}", value)
}
