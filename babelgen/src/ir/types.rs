//! Type references and literal values.
//!
//! A [`TypeRef`] serializes as the IDL spelling of the type
//! (`"list<map<string,int32>>"`), which keeps JSON models readable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in scalar types of the IDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Bool,
    Byte,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    String,
    Datetime,
    Decimal,
    Char,
    Binary,
}

impl Primitive {
    /// Every primitive, in declaration order.
    pub const ALL: [Primitive; 13] = [
        Primitive::Bool,
        Primitive::Byte,
        Primitive::Int8,
        Primitive::Int16,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::Float32,
        Primitive::Float64,
        Primitive::String,
        Primitive::Datetime,
        Primitive::Decimal,
        Primitive::Char,
        Primitive::Binary,
    ];

    /// The IDL spelling of this primitive.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Byte => "byte",
            Primitive::Int8 => "int8",
            Primitive::Int16 => "int16",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::String => "string",
            Primitive::Datetime => "datetime",
            Primitive::Decimal => "decimal",
            Primitive::Char => "char",
            Primitive::Binary => "binary",
        }
    }

    /// Look a primitive up by its IDL spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reference to a type from a field, parameter or method return.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// A built-in scalar.
    Primitive(Primitive),
    /// A model or enum declared in the document, resolved at render time.
    Named(String),
    /// `list<T>`
    List(Box<TypeRef>),
    /// `map<K, V>`
    Map {
        key: Box<TypeRef>,
        value: Box<TypeRef>,
    },
    /// Absence of a return value. Only valid as a method return.
    #[default]
    Void,
}

impl TypeRef {
    /// Create a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Create a `list<T>` type reference.
    pub fn list(element: TypeRef) -> Self {
        TypeRef::List(Box::new(element))
    }

    /// Create a `map<K, V>` type reference.
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Check if this is the void sentinel.
    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Void)
    }

    /// Check if void appears anywhere in this type, including at the top.
    pub fn contains_void(&self) -> bool {
        match self {
            TypeRef::Void => true,
            TypeRef::List(element) => element.contains_void(),
            TypeRef::Map { key, value } => key.contains_void() || value.contains_void(),
            TypeRef::Primitive(_) | TypeRef::Named(_) => false,
        }
    }

    /// Check if the primitive appears anywhere in this type.
    pub fn uses_primitive(&self, primitive: Primitive) -> bool {
        match self {
            TypeRef::Primitive(p) => *p == primitive,
            TypeRef::List(element) => element.uses_primitive(primitive),
            TypeRef::Map { key, value } => {
                key.uses_primitive(primitive) || value.uses_primitive(primitive)
            }
            TypeRef::Named(_) | TypeRef::Void => false,
        }
    }

    /// Collect every named type referenced by this type, outermost first.
    pub fn named_types(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_named(&mut names);
        names
    }

    fn collect_named<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeRef::Named(name) => out.push(name),
            TypeRef::List(element) => element.collect_named(out),
            TypeRef::Map { key, value } => {
                key.collect_named(out);
                value.collect_named(out);
            }
            TypeRef::Primitive(_) | TypeRef::Void => {}
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{}", p),
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(element) => write!(f, "list<{}>", element),
            TypeRef::Map { key, value } => write!(f, "map<{},{}>", key, value),
            TypeRef::Void => f.write_str("void"),
        }
    }
}

/// Error returned when a type spelling cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type reference '{input}': {reason}")]
pub struct TypeParseError {
    pub input: String,
    pub reason: &'static str,
}

impl FromStr for TypeRef {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s).map_err(|reason| TypeParseError {
            input: s.to_string(),
            reason,
        })
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

fn parse_type(s: &str) -> Result<TypeRef, &'static str> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty type");
    }

    if let Some(inner) = generic_arguments(s, "list") {
        return Ok(TypeRef::list(parse_element(inner)?));
    }

    if let Some(inner) = generic_arguments(s, "map") {
        let (key, value) = split_top_level(inner).ok_or("map needs a key and a value type")?;
        return Ok(TypeRef::map(parse_element(key)?, parse_element(value)?));
    }

    if s == "void" {
        return Ok(TypeRef::Void);
    }

    if let Some(primitive) = Primitive::from_name(s) {
        return Ok(TypeRef::Primitive(primitive));
    }

    let valid_name = s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && !s.starts_with(|c: char| c.is_ascii_digit());
    if valid_name {
        Ok(TypeRef::named(s))
    } else {
        Err("not a primitive, container or type name")
    }
}

/// Parse a container argument, which can never be void.
fn parse_element(s: &str) -> Result<TypeRef, &'static str> {
    match parse_type(s)? {
        TypeRef::Void => Err("void cannot be a container element"),
        element => Ok(element),
    }
}

/// Return the text between `head<` and the final `>`.
fn generic_arguments<'a>(s: &'a str, head: &str) -> Option<&'a str> {
    s.strip_prefix(head)?
        .trim_start()
        .strip_prefix('<')?
        .strip_suffix('>')
}

/// Split `K,V` at the comma that is not nested inside angle brackets.
fn split_top_level(s: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => return Some((&s[..i], &s[i + 1..])),
            _ => {}
        }
    }
    None
}

/// A literal value used in initializers, enum references and attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Char(char),
    /// Reference to an enum value, spelled `Enum.Value`.
    EnumRef(String),
}

impl Literal {
    /// Split an enum reference into its enum and value names.
    pub fn enum_ref_parts(&self) -> Option<(&str, &str)> {
        match self {
            Literal::EnumRef(path) => path.rsplit_once('.'),
            _ => None,
        }
    }
}
