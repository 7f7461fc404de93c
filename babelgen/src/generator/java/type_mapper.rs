//! IDL to Java type mappings.
//!
//! Scalars map to their boxed classes so every member is nullable.
//!
//! | IDL type | Java type |
//! |----------|-----------|
//! | `bool` | `Boolean` |
//! | `byte`, `int8` | `Byte` |
//! | `int16` | `Short` |
//! | `int32` | `Integer` |
//! | `int64` | `Long` |
//! | `float32` | `Float` |
//! | `float64` | `Double` |
//! | `string` | `String` |
//! | `char` | `Character` |
//! | `datetime` | `java.util.Date` |
//! | `decimal` | `java.math.BigDecimal` |
//! | `binary` | `byte[]` |
//! | `list<T>` | `java.util.List<T>` |
//! | `map<K,V>` | `java.util.Map<K,V>` |
//! | models, enums | declared name |

use crate::error::RenderResult;
use crate::generator::type_format::{
    escape_string, float_literal, quote_char, require_named, TypeFormatter,
};
use crate::ir::{Literal, Primitive, Resolver, TypeRef};

/// Maps IDL types and literals to Java syntax.
#[derive(Debug, Clone, Copy)]
pub struct JavaTypeMapper<'a> {
    resolver: &'a Resolver<'a>,
}

impl<'a> JavaTypeMapper<'a> {
    pub fn new(resolver: &'a Resolver<'a>) -> Self {
        Self { resolver }
    }

    /// Boxed class name of a primitive.
    pub fn primitive(primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::Bool => "Boolean",
            Primitive::Byte | Primitive::Int8 => "Byte",
            Primitive::Int16 => "Short",
            Primitive::Int32 => "Integer",
            Primitive::Int64 => "Long",
            Primitive::Float32 => "Float",
            Primitive::Float64 => "Double",
            Primitive::String => "String",
            Primitive::Datetime => "java.util.Date",
            Primitive::Decimal => "java.math.BigDecimal",
            Primitive::Char => "Character",
            Primitive::Binary => "byte[]",
        }
    }
}

impl TypeFormatter for JavaTypeMapper<'_> {
    fn format_type(&self, ty: &TypeRef) -> RenderResult<String> {
        Ok(match ty {
            TypeRef::Primitive(p) => Self::primitive(*p).to_string(),
            TypeRef::Named(name) => {
                require_named(self.resolver, name)?;
                name.clone()
            }
            TypeRef::List(element) => format!("java.util.List<{}>", self.format_type(element)?),
            TypeRef::Map { key, value } => format!(
                "java.util.Map<{},{}>",
                self.format_type(key)?,
                self.format_type(value)?
            ),
            TypeRef::Void => "void".to_string(),
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
                path.clone()
            }
        })
    }

    fn format_initializer(&self, ty: &TypeRef, literal: &Literal) -> RenderResult<String> {
        let value = self.format_literal(literal)?;
        let numeric = matches!(literal, Literal::Int(_) | Literal::Float(_));
        Ok(match ty {
            TypeRef::Primitive(Primitive::Int64) if numeric => format!("{}L", value),
            TypeRef::Primitive(Primitive::Float32) if numeric => format!("{}f", value),
            TypeRef::Primitive(Primitive::Float64) if numeric => format!("{}d", value),
            TypeRef::Primitive(Primitive::Decimal) if numeric => {
                format!("new java.math.BigDecimal(\"{}\")", value)
            }
            _ => value,
        })
    }

    fn format_container_constructor(&self, ty: &TypeRef) -> RenderResult<Option<String>> {
        Ok(match ty {
            TypeRef::List(element) => Some(format!(
                "new java.util.ArrayList<{}>()",
                self.format_type(element)?
            )),
            TypeRef::Map { key, value } => Some(format!(
                "new java.util.HashMap<{},{}>()",
                self.format_type(key)?,
                self.format_type(value)?
            )),
            _ => None,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_type() -> impl Strategy<Value = TypeRef> {
        let leaf = prop::sample::select(Primitive::ALL.to_vec()).prop_map(TypeRef::Primitive);
        leaf.prop_recursive(6, 64, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(TypeRef::list),
                (inner.clone(), inner).prop_map(|(k, v)| TypeRef::map(k, v)),
            ]
        })
    }

    fn depth(ty: &TypeRef) -> usize {
        match ty {
            TypeRef::List(element) => 1 + depth(element),
            TypeRef::Map { key, value } => 1 + depth(key).max(depth(value)),
            _ => 0,
        }
    }

    proptest! {
        #[test]
        fn nested_types_have_balanced_brackets(ty in arb_type()) {
            let doc = crate::ir::IdlDocument::new("t.babel");
            let resolver = Resolver::new(&doc);
            let formatted = JavaTypeMapper::new(&resolver).format_type(&ty).unwrap();

            let mut open = 0i64;
            let mut max_open = 0i64;
            for c in formatted.chars() {
                match c {
                    '<' => { open += 1; max_open = max_open.max(open); }
                    '>' => open -= 1,
                    _ => {}
                }
                prop_assert!(open >= 0);
            }
            prop_assert_eq!(open, 0);
            prop_assert_eq!(max_open as usize, depth(&ty));
        }
    }
}
