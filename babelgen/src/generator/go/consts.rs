//! Go constant block template.

use tracing::debug;

use super::{write_comment, write_preamble, GoTypeMapper};
use crate::error::{RenderError, RenderResult};
use crate::generator::traits::{ConstructTemplate, RenderContext};
use crate::generator::type_format::TypeFormatter;
use crate::generator::writer::SourceWriter;
use crate::ir::{validate_construct, Const, Construct, ConstructKind};

/// Renders a `const` block whose names are prefixed with the block name.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoConstTemplate;

impl ConstructTemplate for GoConstTemplate {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Const
    }

    fn render(&self, ctx: &RenderContext<'_>, construct: Construct<'_>) -> RenderResult<String> {
        let Construct::Const(block) = construct else {
            return Err(RenderError::MissingTemplate {
                kind: construct.kind(),
                language: "go".to_string(),
            });
        };
        validate_construct(construct)?;
        ctx.resolver.check_construct(construct)?;
        debug!(name = %block.name, values = block.values.len(), "rendering go constants");
        render_const(ctx, block).map_err(|err| err.at(&block.name))
    }
}

fn render_const(ctx: &RenderContext<'_>, block: &Const) -> RenderResult<String> {
    let types = GoTypeMapper::new(ctx.resolver);
    let mut w = SourceWriter::new(ctx.config);
    write_preamble(&mut w, ctx, &[])?;

    write_comment(&mut w, ctx, &block.comments);
    w.line("const (");
    w.push();
    for value in &block.values {
        let literal = types
            .format_literal(&value.value)
            .map_err(|e| e.in_member(&value.name))?;
        write_comment(&mut w, ctx, &value.comments);
        w.line(format!("{}{} = {}", block.name, value.name, literal));
    }
    w.close_with(")")?;

    w.finish()
}
