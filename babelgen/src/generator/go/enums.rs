//! Go enum template.

use tracing::debug;

use super::{write_comment, write_preamble};
use crate::error::{RenderError, RenderResult};
use crate::generator::traits::{ConstructTemplate, RenderContext};
use crate::generator::writer::SourceWriter;
use crate::ir::{validate_construct, Construct, ConstructKind, Enum};

/// Renders a string-backed enum type with typed constants, a
/// `Get<Enum>(int)` reverse lookup and a `Value()` forward lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoEnumTemplate;

impl ConstructTemplate for GoEnumTemplate {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Enum
    }

    fn render(&self, ctx: &RenderContext<'_>, construct: Construct<'_>) -> RenderResult<String> {
        let Construct::Enum(e) = construct else {
            return Err(RenderError::MissingTemplate {
                kind: construct.kind(),
                language: "go".to_string(),
            });
        };
        validate_construct(construct)?;
        debug!(name = %e.name, values = e.values.len(), "rendering go enum");
        render_enum(ctx, e).map_err(|err| err.at(&e.name))
    }
}

fn render_enum(ctx: &RenderContext<'_>, e: &Enum) -> RenderResult<String> {
    let mut w = SourceWriter::new(ctx.config);
    write_preamble(&mut w, ctx, &[])?;

    write_comment(&mut w, ctx, &e.comments);
    w.line(format!("type {} string", e.name));
    w.blank();

    w.line("const (");
    w.push();
    for value in &e.values {
        write_comment(&mut w, ctx, &value.comments);
        w.line(format!("{0}{1} {0} = \"{1}\"", e.name, value.name));
    }
    w.close_with(")")?;
    w.blank();

    w.line(format!("// Get{0} returns the {0} with the given value.", e.name));
    w.open(format!("func Get{0}(value int) ({0}, bool)", e.name));
    w.line("switch value {");
    for value in &e.values {
        w.line(format!("case {}:", value.value));
        w.push();
        w.line(format!("return {}{}, true", e.name, value.name));
        w.pop()?;
    }
    w.line("default:");
    w.push();
    w.line("return \"\", false");
    w.pop()?;
    w.line("}");
    w.close()?;
    w.blank();

    w.line("// Value returns the integer value of the enum.");
    w.open(format!("func (s *{}) Value() (int, bool)", e.name));
    w.open("if s == nil");
    w.line("return 0, false");
    w.close()?;
    w.line("switch *s {");
    for value in &e.values {
        w.line(format!("case {}{}:", e.name, value.name));
        w.push();
        w.line(format!("return {}, true", value.value));
        w.pop()?;
    }
    w.line("default:");
    w.push();
    w.line("return 0, false");
    w.pop()?;
    w.line("}");
    w.close()?;

    w.finish()
}
