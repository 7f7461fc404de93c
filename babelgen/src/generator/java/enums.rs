//! Java enum template.

use tracing::debug;

use super::{write_annotations, write_doc, write_preamble, JavaTypeMapper};
use crate::error::{RenderError, RenderResult};
use crate::generator::traits::{ConstructTemplate, RenderContext};
use crate::generator::writer::SourceWriter;
use crate::ir::{validate_construct, AttributeTarget, Construct, ConstructKind, Enum};

/// Renders an enum with an `int` backing value per constant and a
/// `findByValue` reverse lookup that returns `null` for unknown values.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaEnumTemplate;

impl ConstructTemplate for JavaEnumTemplate {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Enum
    }

    fn render(&self, ctx: &RenderContext<'_>, construct: Construct<'_>) -> RenderResult<String> {
        let Construct::Enum(e) = construct else {
            return Err(RenderError::MissingTemplate {
                kind: construct.kind(),
                language: "java".to_string(),
            });
        };
        validate_construct(construct)?;
        debug!(name = %e.name, values = e.values.len(), "rendering java enum");
        render_enum(ctx, e).map_err(|err| err.at(&e.name))
    }
}

fn render_enum(ctx: &RenderContext<'_>, e: &Enum) -> RenderResult<String> {
    let types = JavaTypeMapper::new(ctx.resolver);
    let mut w = SourceWriter::new(ctx.config);

    write_preamble(&mut w, ctx, &["java.io.Serializable"]);
    write_doc(&mut w, ctx, &e.comments);
    write_annotations(&mut w, ctx, &types, &e.attributes, AttributeTarget::Enum)?;
    w.open(format!(
        "public enum {} implements com.concur.babel.model.BabelEnum, Serializable",
        e.name
    ));

    if e.values.is_empty() {
        w.line(";");
    }
    for (i, value) in e.values.iter().enumerate() {
        write_doc(&mut w, ctx, &value.comments);
        let terminator = if i + 1 == e.values.len() { ";" } else { "," };
        w.line(format!("{}({}){}", value.name, value.value, terminator));
    }
    w.blank();

    w.line("private final int value;");
    w.blank();
    w.line("public int getValue() { return this.value; }");
    w.blank();

    w.open(format!("private {}(int value)", e.name));
    w.line("this.value = value;");
    w.close()?;
    w.blank();

    w.open(format!("public static {} findByValue(int value)", e.name));
    w.open("switch (value)");
    for value in &e.values {
        w.line(format!("case {}:", value.value));
        w.push();
        w.line(format!("return {};", value.name));
        w.pop()?;
    }
    w.line("default:");
    w.push();
    w.line("return null;");
    w.pop()?;
    w.close()?;
    w.close()?;

    w.close()?;
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorConfig;
    use crate::ir::{Comment, IdlDocument, Resolver};

    fn render(doc: &IdlDocument, name: &str) -> RenderResult<String> {
        let resolver = Resolver::new(doc);
        let config = GeneratorConfig::default();
        let ctx = RenderContext {
            document: doc,
            config: &config,
            package: "com.example",
            resolver: &resolver,
        };
        JavaEnumTemplate.render(&ctx, doc.construct(name).unwrap())
    }

    #[test]
    fn test_enum_with_lookup() {
        let doc = IdlDocument::new("colors.babel").with_declaration(
            Enum::new("Color")
                .with_value("A", 1)
                .with_value("B", 2)
                .with_comments(Comment::new(["Primary colors"])),
        );
        let out = render(&doc, "Color").unwrap();

        let expected = "\
// AUTO-GENERATED FILE - DO NOT MODIFY
// Generated from colors.babel

package com.example;

import java.io.Serializable;

/**
 * Primary colors
 */
public enum Color implements com.concur.babel.model.BabelEnum, Serializable {
\tA(1),
\tB(2);

\tprivate final int value;

\tpublic int getValue() { return this.value; }

\tprivate Color(int value) {
\t\tthis.value = value;
\t}

\tpublic static Color findByValue(int value) {
\t\tswitch (value) {
\t\t\tcase 1:
\t\t\t\treturn A;
\t\t\tcase 2:
\t\t\t\treturn B;
\t\t\tdefault:
\t\t\t\treturn null;
\t\t}
\t}
}
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_enum_still_compiles() {
        let doc = IdlDocument::new("t.babel").with_declaration(Enum::new("Nothing"));
        let out = render(&doc, "Nothing").unwrap();
        assert!(out.contains("Serializable {\n\t;\n"));
        assert!(out.contains("\t\t\tdefault:\n\t\t\t\treturn null;"));
    }

    #[test]
    fn test_duplicate_values_are_rejected() {
        let doc = IdlDocument::new("t.babel")
            .with_declaration(Enum::new("Color").with_value("A", 1).with_value("B", 1));
        assert!(matches!(
            render(&doc, "Color"),
            Err(RenderError::DuplicateEnumValue { .. })
        ));
    }

    #[test]
    fn test_wrong_construct_kind() {
        let doc = IdlDocument::new("t.babel").with_declaration(crate::ir::Model::new("Point"));
        assert!(matches!(
            render(&doc, "Point"),
            Err(RenderError::MissingTemplate { kind: ConstructKind::Model, .. })
        ));
    }
}
