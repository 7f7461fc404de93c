//! Go template bundle.
//!
//! Generates one `.go` file per construct, named after the construct in
//! `snake_case`. The Go package name is the last `/` or `.` segment of the
//! output package, so `github.com/acme/shop` renders `package shop` and
//! `com.acme.shop` renders the same.

mod consts;
mod enums;
mod model;
mod service;
mod type_mapper;

use std::path::PathBuf;

pub use consts::GoConstTemplate;
pub use enums::GoEnumTemplate;
pub use model::GoModelTemplate;
pub use service::GoServiceTemplate;
pub use type_mapper::GoTypeMapper;

use super::comments::expand_comments;
use super::traits::{ConstructTemplate, RenderContext, TemplateBundle};
use super::type_format::{escape_string, TypeFormatter};
use super::writer::SourceWriter;
use crate::error::RenderResult;
use crate::ir::{check_identifier, Comment, Literal, Primitive, TypeRef};
use crate::naming::to_file_stem;

/// Go templates for enums, models, services and constant blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoBundle;

impl TemplateBundle for GoBundle {
    fn id(&self) -> &'static str {
        "go"
    }

    fn name(&self) -> &'static str {
        "Go"
    }

    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn file_path(&self, construct_name: &str, _package: &str) -> RenderResult<PathBuf> {
        Ok(PathBuf::from(format!(
            "{}.{}",
            to_file_stem(construct_name)?,
            self.file_extension()
        )))
    }

    fn templates(&self) -> Vec<Box<dyn ConstructTemplate>> {
        vec![
            Box::new(GoEnumTemplate),
            Box::new(GoModelTemplate),
            Box::new(GoServiceTemplate),
            Box::new(GoConstTemplate),
        ]
    }
}

/// Go package name for an import path or dotted package.
///
/// An empty package renders as `main`. The chosen segment must be a valid
/// identifier.
pub fn package_name(package: &str) -> RenderResult<&str> {
    let name = package
        .rsplit(|c| c == '/' || c == '.')
        .find(|segment| !segment.is_empty())
        .unwrap_or("main");
    check_identifier(name).map_err(|e| e.in_member("package"))?;
    Ok(name)
}

/// Imports needed by the standard-library types appearing in `types`.
fn type_imports<'t, I>(types: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'t TypeRef>,
{
    let (mut big, mut time) = (false, false);
    for ty in types {
        big |= ty.uses_primitive(Primitive::Decimal);
        time |= ty.uses_primitive(Primitive::Datetime);
    }
    let mut imports = Vec::new();
    if big {
        imports.push("math/big");
    }
    if time {
        imports.push("time");
    }
    imports
}

/// Header, document comments, package clause and import block.
fn write_preamble(w: &mut SourceWriter, ctx: &RenderContext<'_>, imports: &[&str]) -> RenderResult<()> {
    w.file_header(&ctx.document.filename);
    write_comment(w, ctx, &ctx.document.comments);
    w.blank();
    w.line(format!("package {}", package_name(ctx.package)?));
    w.blank();

    if !imports.is_empty() {
        let mut sorted = imports.to_vec();
        sorted.sort_unstable();
        w.line("import (");
        w.push();
        w.lines(sorted.iter().map(|i| format!("\"{}\"", i)));
        w.close_with(")")?;
        w.blank();
    }
    Ok(())
}

/// `//` comment lines for a declaration, when docs are enabled.
fn write_comment(w: &mut SourceWriter, ctx: &RenderContext<'_>, comment: &Comment) {
    if ctx.config.generate_docs {
        w.line_comments("//", &expand_comments(comment));
    }
}

/// Struct tag carrying the wire name.
fn json_tag(wire_name: &str, ty: &TypeRef) -> String {
    let options = match ty {
        TypeRef::Primitive(Primitive::Int64 | Primitive::Decimal) => ",string,omitempty",
        _ => ",omitempty",
    };
    format!("`json:\"{}{}\"`", wire_name, options)
}

/// Statements that give `target` its default value inside an `Init` method.
///
/// Scalars with an initializer are allocated and assigned; lists and maps
/// without one get a fresh empty container.
fn init_statements(
    types: &GoTypeMapper<'_>,
    target: &str,
    ty: &TypeRef,
    initializer: Option<&Literal>,
) -> RenderResult<Vec<String>> {
    let Some(literal) = initializer else {
        return Ok(types
            .format_container_constructor(ty)?
            .map(|ctor| vec![format!("{} = {}", target, ctor)])
            .unwrap_or_default());
    };

    let go_type = types.format_type(ty)?;
    let text = match literal {
        Literal::String(s) => s.clone(),
        other => types.format_literal(other)?,
    };
    Ok(match (ty, go_type.strip_prefix('*')) {
        (TypeRef::Primitive(Primitive::Decimal), _) => vec![
            format!("{} = new(big.Rat)", target),
            format!("{}.SetString(\"{}\")", target, escape_string(&text)),
        ],
        (TypeRef::Primitive(Primitive::Datetime), _) => vec![
            format!("{} = new(time.Time)", target),
            format!(
                "*{}, _ = time.Parse(time.RFC3339, \"{}\")",
                target,
                escape_string(&text)
            ),
        ],
        (_, Some(value_type)) => vec![
            format!("{} = new({})", target, value_type),
            format!("*{} = {}", target, types.format_initializer(ty, literal)?),
        ],
        (_, None) => vec![format!(
            "{} = {}",
            target,
            types.format_initializer(ty, literal)?
        )],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Enum, IdlDocument, Resolver};

    #[test]
    fn test_package_name() {
        assert_eq!(package_name("github.com/acme/shop").unwrap(), "shop");
        assert_eq!(package_name("shop/"), Ok("shop"));
        assert_eq!(package_name("shop"), Ok("shop"));
        assert_eq!(package_name(""), Ok("main"));
    }

    #[test]
    fn test_package_name_from_dotted_package() {
        assert_eq!(package_name("com.example"), Ok("example"));
        assert_eq!(package_name("com.acme.shop."), Ok("shop"));
        assert_eq!(package_name("github.com/acme/shop.v2"), Ok("v2"));
        assert!(matches!(
            package_name("github.com/acme/go-shop"),
            Err(crate::error::RenderError::InvalidIdentifier { ref identifier, .. }) if identifier == "go-shop"
        ));
    }

    #[test]
    fn test_file_path_is_snake_case() {
        assert_eq!(
            GoBundle.file_path("OrderLine", "github.com/acme/shop").unwrap(),
            PathBuf::from("order_line.go")
        );
    }

    #[test]
    fn test_bundle_covers_every_kind() {
        let kinds: Vec<_> = GoBundle.templates().iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                crate::ir::ConstructKind::Enum,
                crate::ir::ConstructKind::Model,
                crate::ir::ConstructKind::Service,
                crate::ir::ConstructKind::Const,
            ]
        );
    }

    #[test]
    fn test_json_tag() {
        assert_eq!(
            json_tag("total", &TypeRef::Primitive(Primitive::Int64)),
            "`json:\"total,string,omitempty\"`"
        );
        assert_eq!(
            json_tag("name", &TypeRef::Primitive(Primitive::String)),
            "`json:\"name,omitempty\"`"
        );
    }

    #[test]
    fn test_type_imports() {
        let fields = [
            TypeRef::list(TypeRef::Primitive(Primitive::Datetime)),
            TypeRef::map(
                TypeRef::Primitive(Primitive::String),
                TypeRef::Primitive(Primitive::Decimal),
            ),
        ];
        assert_eq!(type_imports(&fields), vec!["math/big", "time"]);
        assert!(type_imports(&[TypeRef::Primitive(Primitive::Int32)]).is_empty());
    }

    #[test]
    fn test_init_statements() {
        let doc = IdlDocument::new("t.babel").with_declaration(Enum::new("Color").with_value("Red", 1));
        let resolver = Resolver::new(&doc);
        let types = GoTypeMapper::new(&resolver);

        assert_eq!(
            init_statements(&types, "obj.X", &TypeRef::Primitive(Primitive::Int32), Some(&Literal::Int(0)))
                .unwrap(),
            vec!["obj.X = new(int32)", "*obj.X = 0"]
        );
        assert_eq!(
            init_statements(
                &types,
                "obj.C",
                &TypeRef::named("Color"),
                Some(&Literal::EnumRef("Color.Red".to_string()))
            )
            .unwrap(),
            vec!["obj.C = new(Color)", "*obj.C = ColorRed"]
        );
        assert_eq!(
            init_statements(
                &types,
                "obj.Price",
                &TypeRef::Primitive(Primitive::Decimal),
                Some(&Literal::Float(9.5))
            )
            .unwrap(),
            vec!["obj.Price = new(big.Rat)", "obj.Price.SetString(\"9.5\")"]
        );
        assert_eq!(
            init_statements(
                &types,
                "obj.Tags",
                &TypeRef::list(TypeRef::Primitive(Primitive::String)),
                None
            )
            .unwrap(),
            vec!["obj.Tags = make([]*string, 0)"]
        );
        assert!(init_statements(&types, "obj.X", &TypeRef::Primitive(Primitive::Int32), None)
            .unwrap()
            .is_empty());
    }
}
