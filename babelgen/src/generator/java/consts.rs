//! Java constant block template.

use tracing::debug;

use super::{write_doc, write_preamble, JavaTypeMapper};
use crate::error::{RenderError, RenderResult};
use crate::generator::traits::{ConstructTemplate, RenderContext};
use crate::generator::type_format::TypeFormatter;
use crate::generator::writer::SourceWriter;
use crate::ir::{validate_construct, Const, Construct, ConstructKind, Literal};

/// Renders a non-instantiable class of `public static final` fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaConstTemplate;

impl ConstructTemplate for JavaConstTemplate {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Const
    }

    fn render(&self, ctx: &RenderContext<'_>, construct: Construct<'_>) -> RenderResult<String> {
        let Construct::Const(block) = construct else {
            return Err(RenderError::MissingTemplate {
                kind: construct.kind(),
                language: "java".to_string(),
            });
        };
        validate_construct(construct)?;
        ctx.resolver.check_construct(construct)?;
        debug!(name = %block.name, values = block.values.len(), "rendering java constants");
        render_const(ctx, block).map_err(|err| err.at(&block.name))
    }
}

/// Declared type and initializer of one constant.
///
/// Integers that do not fit an `int` become `long`.
fn typed_value(types: &JavaTypeMapper<'_>, literal: &Literal) -> RenderResult<(String, String)> {
    let value = types.format_literal(literal)?;
    Ok(match literal {
        Literal::Int(i) if i32::try_from(*i).is_ok() => ("int".to_string(), value),
        Literal::Int(_) => ("long".to_string(), format!("{}L", value)),
        Literal::Float(_) => ("double".to_string(), value),
        Literal::Bool(_) => ("boolean".to_string(), value),
        Literal::String(_) => ("String".to_string(), value),
        Literal::Char(_) => ("char".to_string(), value),
        Literal::EnumRef(_) => {
            let (enum_name, _) = literal
                .enum_ref_parts()
                .ok_or_else(|| RenderError::unresolved(value.clone()))?;
            (enum_name.to_string(), value)
        }
    })
}

fn render_const(ctx: &RenderContext<'_>, block: &Const) -> RenderResult<String> {
    let types = JavaTypeMapper::new(ctx.resolver);
    let mut w = SourceWriter::new(ctx.config);

    write_preamble(&mut w, ctx, &[]);
    write_doc(&mut w, ctx, &block.comments);
    w.open(format!("public final class {}", block.name));

    for value in &block.values {
        let (ty, literal) =
            typed_value(&types, &value.value).map_err(|e| e.in_member(&value.name))?;
        write_doc(&mut w, ctx, &value.comments);
        w.line(format!("public static final {} {} = {};", ty, value.name, literal));
    }
    if !block.values.is_empty() {
        w.blank();
    }
    w.line(format!("private {}() {{}}", block.name));

    w.close()?;
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorConfig;
    use crate::ir::{Comment, Enum, IdlDocument, Resolver};

    fn render(doc: &IdlDocument, name: &str) -> RenderResult<String> {
        let resolver = Resolver::new(doc);
        let config = GeneratorConfig::default();
        let ctx = RenderContext {
            document: doc,
            config: &config,
            package: "com.example",
            resolver: &resolver,
        };
        JavaConstTemplate.render(&ctx, doc.construct(name).unwrap())
    }

    #[test]
    fn test_constant_class() {
        let doc = IdlDocument::new("limits.babel")
            .with_declaration(Enum::new("Color").with_value("Red", 1))
            .with_declaration(
                Const::new("Limits")
                    .with_comments(Comment::new(["Service limits"]))
                    .with_value("MaxItems", Literal::Int(100))
                    .with_value("MaxBytes", Literal::Int(5_000_000_000))
                    .with_value("Ratio", Literal::Float(0.5))
                    .with_value("Strict", Literal::Bool(true))
                    .with_value("Greeting", Literal::String("hi \"there\"".to_string()))
                    .with_value("Separator", Literal::Char(','))
                    .with_value("Fill", Literal::EnumRef("Color.Red".to_string())),
            );
        let out = render(&doc, "Limits").unwrap();

        let expected = "\
// AUTO-GENERATED FILE - DO NOT MODIFY
// Generated from limits.babel

package com.example;

/**
 * Service limits
 */
public final class Limits {
\tpublic static final int MaxItems = 100;
\tpublic static final long MaxBytes = 5000000000L;
\tpublic static final double Ratio = 0.5;
\tpublic static final boolean Strict = true;
\tpublic static final String Greeting = \"hi \\\"there\\\"\";
\tpublic static final char Separator = ',';
\tpublic static final Color Fill = Color.Red;

\tprivate Limits() {}
}
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_unknown_enum_constant_fails() {
        let doc = IdlDocument::new("t.babel")
            .with_declaration(Enum::new("Color").with_value("Red", 1))
            .with_declaration(
                Const::new("Defaults").with_value("Fill", Literal::EnumRef("Color.Blue".to_string())),
            );
        assert_eq!(
            render(&doc, "Defaults").unwrap_err().to_string(),
            "unresolved type 'Color.Blue' (in Defaults.Fill)"
        );
    }

    #[test]
    fn test_empty_block() {
        let doc = IdlDocument::new("t.babel").with_declaration(Const::new("Nothing"));
        let out = render(&doc, "Nothing").unwrap();
        assert!(out.ends_with("public final class Nothing {\n\tprivate Nothing() {}\n}\n"));
    }
}
