//! Intermediate Representation (IR) module.
//!
//! This module defines the in-memory form of an IDL document: services,
//! models, enums, type references, comments and attributes. The IR is
//! produced outside this crate and consumed read-only by the generators.

pub mod definitions;
pub mod resolve;
pub mod types;
pub mod validation;

pub use definitions::{
    Attribute, AttributeParam, AttributeTarget, Comment, Const, ConstValue, Construct,
    ConstructKind, Declaration, Enum, EnumValue, Field, IdlDocument, Method, Model, Parameter,
    Service,
};
pub use resolve::{Resolution, Resolver};
pub use types::{Literal, Primitive, TypeParseError, TypeRef};
pub use validation::{check_identifier, validate_construct, validate_enum};
