//! Structural checks the renderers depend on.
//!
//! Only what rendering needs is validated here: names that cannot become
//! target identifiers, members that would collide once normalized, and enums
//! whose reverse lookup would be ambiguous. Templates run
//! [`validate_construct`] before writing anything.

use std::collections::HashMap;

use super::definitions::{Const, Construct, Enum, Model, Service};
use crate::error::{RenderError, RenderResult};
use crate::naming;

/// Check that a name can be normalized into a target identifier.
pub fn check_identifier(identifier: &str) -> RenderResult<()> {
    naming::words(identifier).map(|_| ())
}

/// Validate one construct before it is rendered.
///
/// Errors carry the construct name, and the member name where one applies.
pub fn validate_construct(construct: Construct<'_>) -> RenderResult<()> {
    check_identifier(construct.name()).map_err(|e| e.at(construct.name()))?;
    let checked = match construct {
        Construct::Enum(e) => validate_enum(e),
        Construct::Model(model) => validate_model(model),
        Construct::Service(service) => validate_service(service),
        Construct::Const(block) => validate_const(block),
    };
    checked.map_err(|e| e.at(construct.name()))
}

/// Check that enum names are unique (ignoring case) and backing values distinct.
pub fn validate_enum(e: &Enum) -> RenderResult<()> {
    let mut names: HashMap<String, &str> = HashMap::new();
    let mut values: HashMap<i32, &str> = HashMap::new();

    for value in &e.values {
        check_identifier(&value.name).map_err(|err| err.in_member(&value.name))?;
        if let Some(previous) = names.insert(value.name.to_lowercase(), &value.name) {
            return Err(RenderError::DuplicateEnumValue {
                enum_name: e.name.clone(),
                conflict: format!("name '{}' collides with '{}'", value.name, previous),
            });
        }
        if let Some(previous) = values.insert(value.value, &value.name) {
            return Err(RenderError::DuplicateEnumValue {
                enum_name: e.name.clone(),
                conflict: format!(
                    "value {} is used by both '{}' and '{}'",
                    value.value, previous, value.name
                ),
            });
        }
    }

    Ok(())
}

/// Check field names, and that no two fields normalize to the same member.
pub fn validate_model(model: &Model) -> RenderResult<()> {
    if let Some(parent) = &model.parent {
        check_identifier(parent).map_err(|e| e.in_member("extends"))?;
    }
    unique_members(model.fields.iter().map(|f| f.name.as_str()))
}

/// Check method names and the parameter names of each method.
pub fn validate_service(service: &Service) -> RenderResult<()> {
    unique_members(service.methods.iter().map(|m| m.name.as_str()))?;
    for method in &service.methods {
        unique_members(method.params.iter().map(|p| p.name.as_str()))
            .map_err(|e| e.in_member(&method.name))?;
    }
    Ok(())
}

/// Check that constant names are valid and unique ignoring case.
pub fn validate_const(block: &Const) -> RenderResult<()> {
    unique_members(block.values.iter().map(|v| v.name.as_str()))
}

/// Names are treated as colliding when they agree ignoring case and underscores.
fn unique_members<'a>(names: impl Iterator<Item = &'a str>) -> RenderResult<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for name in names {
        let words = naming::words(name).map_err(|e| e.in_member(name))?;
        let key = words.concat().to_lowercase();
        if let Some(previous) = seen.insert(key, name) {
            return Err(RenderError::invalid_identifier(
                name,
                "collides with another member once normalized",
            )
            .in_member(previous));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Origin;
    use crate::ir::definitions::{Field, Method, Parameter};
    use crate::ir::types::{Literal, Primitive, TypeRef};

    fn int32() -> TypeRef {
        TypeRef::Primitive(Primitive::Int32)
    }

    #[test]
    fn test_valid_enum() {
        let e = Enum::new("Color").with_value("Red", 1).with_value("Green", 2);
        assert!(validate_enum(&e).is_ok());
        assert!(validate_enum(&Enum::new("Empty")).is_ok());
    }

    #[test]
    fn test_duplicate_value() {
        let e = Enum::new("Color").with_value("Red", 1).with_value("Crimson", 1);
        assert_eq!(
            validate_enum(&e).unwrap_err().to_string(),
            "duplicate entry in enum 'Color': value 1 is used by both 'Red' and 'Crimson'"
        );
    }

    #[test]
    fn test_duplicate_name_ignores_case() {
        let e = Enum::new("Color").with_value("Red", 1).with_value("RED", 2);
        assert!(matches!(
            validate_enum(&e),
            Err(RenderError::DuplicateEnumValue { .. })
        ));
    }

    #[test]
    fn test_enum_value_name_must_be_identifier() {
        let e = Enum::new("Color").with_value("dark red", 1);
        let err = validate_construct(Construct::Enum(&e)).unwrap_err();
        assert!(matches!(err, RenderError::InvalidIdentifier { ref identifier, .. } if identifier == "dark red"));
        assert_eq!(err.origin(), Some(&Origin::new("Color").with_member("dark red")));
    }

    #[test]
    fn test_field_names_colliding_after_normalization() {
        let model = Model::new("User")
            .with_field(Field::new("first_name", int32()))
            .with_field(Field::new("firstName", int32()));
        let err = validate_construct(Construct::Model(&model)).unwrap_err();
        assert_eq!(
            err,
            RenderError::InvalidIdentifier {
                identifier: "firstName".to_string(),
                reason: "collides with another member once normalized",
                origin: Origin::new("User").with_member("first_name"),
            }
        );
    }

    #[test]
    fn test_distinct_fields_pass() {
        let model = Model::new("User")
            .with_field(Field::new("first_name", int32()))
            .with_field(Field::new("last_name", int32()));
        assert!(validate_construct(Construct::Model(&model)).is_ok());
    }

    #[test]
    fn test_construct_and_parent_names() {
        let bad_name = Model::new("my model");
        assert!(matches!(
            validate_construct(Construct::Model(&bad_name)),
            Err(RenderError::InvalidIdentifier { ref identifier, .. }) if identifier == "my model"
        ));

        let bad_parent = Model::new("Circle").with_parent("9Shape");
        let err = validate_construct(Construct::Model(&bad_parent)).unwrap_err();
        assert_eq!(err.origin(), Some(&Origin::new("Circle").with_member("extends")));
    }

    #[test]
    fn test_service_parameter_collision() {
        let service = Service::new("Calc").with_method(
            Method::new("sum", int32())
                .with_param(Parameter::new("left_value", int32()))
                .with_param(Parameter::new("LeftValue", int32())),
        );
        let err = validate_construct(Construct::Service(&service)).unwrap_err();
        assert_eq!(err.origin(), Some(&Origin::new("Calc").with_member("left_value")));
    }

    #[test]
    fn test_const_names_unique_ignoring_case() {
        let block = Const::new("Limits")
            .with_value("Max", Literal::Int(1))
            .with_value("MAX", Literal::Int(2));
        assert!(matches!(
            validate_construct(Construct::Const(&block)),
            Err(RenderError::InvalidIdentifier { .. })
        ));
    }
}
