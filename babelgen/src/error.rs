//! Error types for rendering.
//!
//! Every failure is local to a single render: a render returns complete text
//! or one of these errors, never a partial file. Errors carry the construct,
//! member and type names needed to point at the offending declaration.

use std::fmt;

use thiserror::Error;

use crate::ir::ConstructKind;

/// Result alias used throughout the rendering engine.
pub type RenderResult<T> = Result<T, RenderError>;

/// Where in the IDL document an error was raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin {
    /// The enclosing service, model or enum.
    pub construct: Option<String>,
    /// The method, field or parameter inside the construct.
    pub member: Option<String>,
}

impl Origin {
    /// Create an origin pointing at a construct.
    pub fn new(construct: impl Into<String>) -> Self {
        Self {
            construct: Some(construct.into()),
            member: None,
        }
    }

    /// Add member context.
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Check if no location is known.
    pub fn is_empty(&self) -> bool {
        self.construct.is_none() && self.member.is_none()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.construct, &self.member) {
            (None, None) => Ok(()),
            (Some(construct), None) => write!(f, " (in {})", construct),
            (None, Some(member)) => write!(f, " (in member {})", member),
            (Some(construct), Some(member)) => write!(f, " (in {}.{})", construct, member),
        }
    }
}

/// Error raised while rendering a construct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The identifier cannot be normalized into a target-language name.
    #[error("invalid identifier '{identifier}': {reason}{origin}")]
    InvalidIdentifier {
        identifier: String,
        reason: &'static str,
        origin: Origin,
    },

    /// A named type does not resolve to a model or enum of the document.
    #[error("unresolved type '{type_name}'{origin}")]
    UnresolvedType { type_name: String, origin: Origin },

    /// Two values of an enum share a backing value or a name.
    #[error("duplicate entry in enum '{enum_name}': {conflict}")]
    DuplicateEnumValue { enum_name: String, conflict: String },

    /// No template is registered for the construct kind and language.
    #[error("no template registered for {kind} in language '{language}'")]
    MissingTemplate {
        kind: ConstructKind,
        language: String,
    },

    /// An indentation scope was popped without a push, or left open.
    #[error("indentation imbalance: {detail}{origin}")]
    IndentationImbalance { detail: String, origin: Origin },
}

impl RenderError {
    /// Create an `InvalidIdentifier` error without location.
    pub fn invalid_identifier(identifier: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
            reason,
            origin: Origin::default(),
        }
    }

    /// Create an `UnresolvedType` error without location.
    pub fn unresolved(type_name: impl Into<String>) -> Self {
        Self::UnresolvedType {
            type_name: type_name.into(),
            origin: Origin::default(),
        }
    }

    /// Create an `IndentationImbalance` error without location.
    pub fn imbalance(detail: impl Into<String>) -> Self {
        Self::IndentationImbalance {
            detail: detail.into(),
            origin: Origin::default(),
        }
    }

    /// Fill in the construct name unless one is already recorded.
    pub fn at(mut self, construct: &str) -> Self {
        if let Some(origin) = self.origin_mut() {
            if origin.construct.is_none() {
                origin.construct = Some(construct.to_string());
            }
        }
        self
    }

    /// Fill in the member name unless one is already recorded.
    pub fn in_member(mut self, member: &str) -> Self {
        if let Some(origin) = self.origin_mut() {
            if origin.member.is_none() {
                origin.member = Some(member.to_string());
            }
        }
        self
    }

    /// The recorded location, for errors that carry one.
    pub fn origin(&self) -> Option<&Origin> {
        match self {
            Self::InvalidIdentifier { origin, .. }
            | Self::UnresolvedType { origin, .. }
            | Self::IndentationImbalance { origin, .. } => Some(origin),
            Self::DuplicateEnumValue { .. } | Self::MissingTemplate { .. } => None,
        }
    }

    fn origin_mut(&mut self) -> Option<&mut Origin> {
        match self {
            Self::InvalidIdentifier { origin, .. }
            | Self::UnresolvedType { origin, .. }
            | Self::IndentationImbalance { origin, .. } => Some(origin),
            Self::DuplicateEnumValue { .. } | Self::MissingTemplate { .. } => None,
        }
    }
}
