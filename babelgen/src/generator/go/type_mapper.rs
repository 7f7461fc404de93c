//! IDL to Go type mappings.
//!
//! Scalars, enums and models are pointers so an unset member marshals as
//! absent. Slices, maps and `[]byte` are already nillable.

use crate::error::RenderResult;
use crate::generator::type_format::{
    escape_string, float_literal, quote_char, require_named, TypeFormatter,
};
use crate::ir::{Literal, Primitive, Resolver, TypeRef};

/// Maps IDL types and literals to Go syntax.
#[derive(Debug, Clone, Copy)]
pub struct GoTypeMapper<'a> {
    resolver: &'a Resolver<'a>,
}

impl<'a> GoTypeMapper<'a> {
    pub fn new(resolver: &'a Resolver<'a>) -> Self {
        Self { resolver }
    }

    /// Value type of a primitive, without the pointer.
    pub fn primitive(primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::Bool => "bool",
            Primitive::Byte => "byte",
            Primitive::Int8 => "int8",
            Primitive::Int16 => "int16",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::String => "string",
            Primitive::Datetime => "time.Time",
            Primitive::Decimal => "big.Rat",
            Primitive::Char => "rune",
            Primitive::Binary => "[]byte",
        }
    }

    /// Map keys are compared by value, so they are never pointers.
    fn key_type(&self, key: &TypeRef) -> RenderResult<String> {
        match key {
            TypeRef::Primitive(p) => Ok(Self::primitive(*p).to_string()),
            other => {
                let formatted = self.format_type(other)?;
                Ok(formatted
                    .strip_prefix('*')
                    .map(str::to_string)
                    .unwrap_or(formatted))
            }
        }
    }
}

impl TypeFormatter for GoTypeMapper<'_> {
    fn format_type(&self, ty: &TypeRef) -> RenderResult<String> {
        Ok(match ty {
            TypeRef::Primitive(Primitive::Binary) => "[]byte".to_string(),
            TypeRef::Primitive(p) => format!("*{}", Self::primitive(*p)),
            TypeRef::Named(name) => {
                require_named(self.resolver, name)?;
                format!("*{}", name)
            }
            TypeRef::List(element) => format!("[]{}", self.format_type(element)?),
            TypeRef::Map { key, value } => {
                format!("map[{}]{}", self.key_type(key)?, self.format_type(value)?)
            }
            TypeRef::Void => String::new(),
        })
    }

    fn format_literal(&self, literal: &Literal) -> RenderResult<String> {
        Ok(match literal {
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) => float_literal(*f),
            Literal::Bool(b) => b.to_string(),
            Literal::String(s) => format!("\"{}\"", escape_string(s)),
            Literal::Char(c) => quote_char(*c),
            Literal::EnumRef(path) => {
                self.resolver.check_literal(literal)?;
                path.replace('.', "")
            }
        })
    }

    fn format_container_constructor(&self, ty: &TypeRef) -> RenderResult<Option<String>> {
        Ok(match ty {
            TypeRef::List(_) | TypeRef::Map { .. } => {
                Some(format!("make({}, 0)", self.format_type(ty)?))
            }
            _ => None,
        })
    }
}
