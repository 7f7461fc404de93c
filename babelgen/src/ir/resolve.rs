//! Name resolution for named type references.
//!
//! Models refer to their parent and fields refer to other declarations by
//! name only. Before rendering, every name a construct mentions is looked up
//! here so that a dangling reference fails the render with full context
//! instead of surfacing as broken output.

use std::collections::HashMap;

use super::definitions::{Const, Construct, Enum, Field, IdlDocument, Model, Service};
use super::types::{Literal, TypeRef};
use crate::error::{RenderError, RenderResult};

/// Outcome of looking up a name.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Model(&'a Model),
    Enum(&'a Enum),
    Unresolved(String),
}

/// Lookup table of the models and enums of one document.
#[derive(Debug, Clone, Default)]
pub struct Resolver<'a> {
    models: HashMap<&'a str, &'a Model>,
    enums: HashMap<&'a str, &'a Enum>,
}

impl<'a> Resolver<'a> {
    /// Index the declarations of a document.
    pub fn new(document: &'a IdlDocument) -> Self {
        Self {
            models: document.models().map(|m| (m.name.as_str(), m)).collect(),
            enums: document.enums().map(|e| (e.name.as_str(), e)).collect(),
        }
    }

    /// Look a type name up.
    pub fn resolve(&self, name: &str) -> Resolution<'a> {
        if let Some(&model) = self.models.get(name) {
            Resolution::Model(model)
        } else if let Some(&e) = self.enums.get(name) {
            Resolution::Enum(e)
        } else {
            Resolution::Unresolved(name.to_string())
        }
    }

    /// Check every named type inside a type reference.
    pub fn check_type(&self, ty: &TypeRef) -> RenderResult<()> {
        for name in ty.named_types() {
            if let Resolution::Unresolved(name) = self.resolve(name) {
                return Err(RenderError::unresolved(name));
            }
        }
        Ok(())
    }

    /// Check that an enum reference names an existing enum and constant.
    pub fn check_literal(&self, literal: &Literal) -> RenderResult<()> {
        let Literal::EnumRef(path) = literal else {
            return Ok(());
        };
        let (enum_name, value_name) = literal
            .enum_ref_parts()
            .ok_or_else(|| RenderError::unresolved(path.clone()))?;
        match self.resolve(enum_name) {
            Resolution::Enum(e) if e.find_by_name(value_name).is_some() => Ok(()),
            _ => Err(RenderError::unresolved(path.clone())),
        }
    }

    /// Resolution pass over one construct.
    ///
    /// Fails with `UnresolvedType` naming the construct and member that holds
    /// the first dangling reference.
    pub fn check_construct(&self, construct: Construct<'_>) -> RenderResult<()> {
        let checked = match construct {
            Construct::Service(service) => self.check_service(service),
            Construct::Model(model) => self.check_model(model),
            Construct::Const(block) => self.check_const(block),
            Construct::Enum(_) => Ok(()),
        };
        checked.map_err(|e| e.at(construct.name()))
    }

    fn check_service(&self, service: &Service) -> RenderResult<()> {
        for method in &service.methods {
            let returns = &method.returns;
            if !returns.is_void() && returns.contains_void() {
                return Err(RenderError::unresolved("void").in_member(&method.name));
            }
            self.check_type(returns).map_err(|e| e.in_member(&method.name))?;
            for param in &method.params {
                self.check_field(param)
                    .map_err(|e| e.in_member(&format!("{}.{}", method.name, param.name)))?;
            }
        }
        Ok(())
    }

    fn check_model(&self, model: &Model) -> RenderResult<()> {
        if let Some(parent) = &model.parent {
            if !matches!(self.resolve(parent), Resolution::Model(_)) {
                return Err(RenderError::unresolved(parent.clone()).in_member("extends"));
            }
        }
        for field in &model.fields {
            self.check_field(field).map_err(|e| e.in_member(&field.name))?;
        }
        Ok(())
    }

    fn check_const(&self, block: &Const) -> RenderResult<()> {
        for value in &block.values {
            self.check_literal(&value.value)
                .map_err(|e| e.in_member(&value.name))?;
        }
        Ok(())
    }

    /// Fields and parameters must carry a value, so void is rejected here.
    fn check_field(&self, field: &Field) -> RenderResult<()> {
        if field.ty.contains_void() {
            return Err(RenderError::unresolved("void"));
        }
        self.check_type(&field.ty)?;
        if let Some(initializer) = &field.initializer {
            self.check_literal(initializer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Origin;
    use crate::ir::definitions::{Method, Parameter};
    use crate::ir::types::Primitive;

    fn document() -> IdlDocument {
        IdlDocument::new("test.babel")
            .with_declaration(Enum::new("Color").with_value("Red", 1))
            .with_declaration(Model::new("Shape"))
            .with_declaration(
                Model::new("Circle")
                    .with_parent("Shape")
                    .with_field(Field::new("color", TypeRef::named("Color"))
                        .with_initializer(Literal::EnumRef("Color.Red".to_string()))),
            )
    }

    #[test]
    fn test_resolve_kinds() {
        let doc = document();
        let resolver = Resolver::new(&doc);
        assert!(matches!(resolver.resolve("Shape"), Resolution::Model(m) if m.name == "Shape"));
        assert!(matches!(resolver.resolve("Color"), Resolution::Enum(_)));
        assert_eq!(
            resolver.resolve("Ghost"),
            Resolution::Unresolved("Ghost".to_string())
        );
    }

    #[test]
    fn test_check_construct_passes() {
        let doc = document();
        let resolver = Resolver::new(&doc);
        for construct in doc.constructs() {
            resolver.check_construct(construct).unwrap();
        }
    }

    #[test]
    fn test_unresolved_field_type_carries_context() {
        let doc = IdlDocument::new("test.babel").with_declaration(
            Model::new("Order").with_field(Field::new(
                "lines",
                TypeRef::list(TypeRef::named("OrderLine")),
            )),
        );
        let resolver = Resolver::new(&doc);
        let err = resolver
            .check_construct(doc.construct("Order").unwrap())
            .unwrap_err();

        assert_eq!(
            err,
            RenderError::UnresolvedType {
                type_name: "OrderLine".to_string(),
                origin: Origin::new("Order").with_member("lines"),
            }
        );
    }

    #[test]
    fn test_parent_must_be_a_model() {
        let doc = IdlDocument::new("test.babel")
            .with_declaration(Enum::new("Color"))
            .with_declaration(Model::new("Bad").with_parent("Color"));
        let resolver = Resolver::new(&doc);
        let err = resolver
            .check_construct(doc.construct("Bad").unwrap())
            .unwrap_err();
        assert!(matches!(err, RenderError::UnresolvedType { ref type_name, .. } if type_name == "Color"));
    }

    #[test]
    fn test_unknown_enum_constant() {
        let doc = document();
        let resolver = Resolver::new(&doc);
        assert!(resolver
            .check_literal(&Literal::EnumRef("Color.Blue".to_string()))
            .is_err());
        assert!(resolver
            .check_literal(&Literal::EnumRef("NoDot".to_string()))
            .is_err());
    }

    #[test]
    fn test_void_field_rejected() {
        let doc = IdlDocument::new("test.babel")
            .with_declaration(Model::new("Order").with_field(Field::new("nothing", TypeRef::Void)));
        let resolver = Resolver::new(&doc);
        let err = resolver
            .check_construct(doc.construct("Order").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::UnresolvedType {
                type_name: "void".to_string(),
                origin: Origin::new("Order").with_member("nothing"),
            }
        );
    }

    #[test]
    fn test_void_only_as_whole_return() {
        let doc = IdlDocument::new("test.babel").with_declaration(
            crate::ir::definitions::Service::new("Jobs")
                .with_method(Method::new("reset", TypeRef::Void))
                .with_method(Method::new("drain", TypeRef::list(TypeRef::Void))),
        );
        let resolver = Resolver::new(&doc);
        let err = resolver
            .check_construct(doc.construct("Jobs").unwrap())
            .unwrap_err();
        assert_eq!(err.origin(), Some(&Origin::new("Jobs").with_member("drain")));

        let doc = IdlDocument::new("test.babel").with_declaration(
            crate::ir::definitions::Service::new("Jobs").with_method(
                Method::new("run", TypeRef::Void).with_param(Parameter::new("input", TypeRef::Void)),
            ),
        );
        let resolver = Resolver::new(&doc);
        let err = resolver
            .check_construct(doc.construct("Jobs").unwrap())
            .unwrap_err();
        assert_eq!(err.origin(), Some(&Origin::new("Jobs").with_member("run.input")));
    }

    #[test]
    fn test_const_enum_reference_checked() {
        let doc = document().with_declaration(
            Const::new("Defaults")
                .with_value("Fill", Literal::EnumRef("Color.Red".to_string()))
                .with_value("Stroke", Literal::EnumRef("Color.Blue".to_string())),
        );
        let resolver = Resolver::new(&doc);
        let err = resolver
            .check_construct(doc.construct("Defaults").unwrap())
            .unwrap_err();
        assert_eq!(err.origin(), Some(&Origin::new("Defaults").with_member("Stroke")));
    }

    #[test]
    fn test_method_parameter_context() {
        let doc = IdlDocument::new("test.babel").with_declaration(
            crate::ir::definitions::Service::new("Calc").with_method(
                Method::new("sum", TypeRef::Primitive(Primitive::Int32))
                    .with_param(Parameter::new("a", TypeRef::named("Ghost"))),
            ),
        );
        let resolver = Resolver::new(&doc);
        let err = resolver
            .check_construct(doc.construct("Calc").unwrap())
            .unwrap_err();
        assert_eq!(err.origin(), Some(&Origin::new("Calc").with_member("sum.a")));
    }
}
