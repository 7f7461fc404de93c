//! Go model template.

use tracing::debug;

use super::{init_statements, json_tag, type_imports, write_comment, write_preamble, GoTypeMapper};
use crate::error::{RenderError, RenderResult};
use crate::generator::traits::{ConstructTemplate, RenderContext};
use crate::generator::type_format::TypeFormatter;
use crate::generator::writer::SourceWriter;
use crate::ir::{
    validate_construct, Construct, ConstructKind, Field, Model, Primitive, Resolution, TypeRef,
};
use crate::naming::{to_member_case, to_type_case};

/// Renders a struct with JSON tags, an `Init()` that applies initializers
/// and a `String()` of the form `Point(x: 1, y: 2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoModelTemplate;

impl ConstructTemplate for GoModelTemplate {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Model
    }

    fn render(&self, ctx: &RenderContext<'_>, construct: Construct<'_>) -> RenderResult<String> {
        let Construct::Model(model) = construct else {
            return Err(RenderError::MissingTemplate {
                kind: construct.kind(),
                language: "go".to_string(),
            });
        };
        debug!(name = %model.name, fields = model.fields.len(), "rendering go model");
        validate_construct(construct)?;
        ctx.resolver.check_construct(construct)?;
        render_model(ctx, model).map_err(|err| err.at(&model.name))
    }
}

struct GoField<'a> {
    field: &'a Field,
    exported: String,
    label: String,
    ty: String,
}

impl<'a> GoField<'a> {
    fn new(types: &GoTypeMapper<'_>, field: &'a Field) -> RenderResult<Self> {
        Ok(Self {
            field,
            exported: to_type_case(&field.name)?,
            label: to_member_case(&field.name)?,
            ty: types.format_type(&field.ty)?,
        })
    }

    /// Expression printed by `String()` once the field is known to be set.
    fn display_value(&self, ctx: &RenderContext<'_>) -> String {
        let target = format!("obj.{}", self.exported);
        let by_pointer = match &self.field.ty {
            TypeRef::Primitive(Primitive::Decimal) => true,
            TypeRef::Named(name) => matches!(ctx.resolver.resolve(name), Resolution::Model(_)),
            _ => false,
        };
        if by_pointer || !self.ty.starts_with('*') {
            target
        } else {
            format!("*{}", target)
        }
    }
}

fn render_model(ctx: &RenderContext<'_>, model: &Model) -> RenderResult<String> {
    let types = GoTypeMapper::new(ctx.resolver);
    let fields = model
        .fields
        .iter()
        .map(|f| GoField::new(&types, f).map_err(|e| e.in_member(&f.name)))
        .collect::<RenderResult<Vec<_>>>()?;

    let mut imports = type_imports(model.fields.iter().map(|f| &f.ty));
    if !fields.is_empty() {
        imports.extend(["fmt", "strings"]);
    }

    let mut w = SourceWriter::new(ctx.config);
    write_preamble(&mut w, ctx, &imports)?;

    write_comment(&mut w, ctx, &model.comments);
    w.open(format!("type {} struct", model.name));
    if let Some(parent) = &model.parent {
        w.line(parent);
    }
    for field in &fields {
        write_comment(&mut w, ctx, &field.field.comments);
        w.line(format!(
            "{} {} {}",
            field.exported,
            field.ty,
            json_tag(&field.field.name, &field.field.ty)
        ));
    }
    w.close()?;
    w.blank();

    w.line("// Init sets default values and returns the object.");
    w.open(format!("func (obj *{0}) Init() *{0}", model.name));
    if let Some(parent) = &model.parent {
        w.line(format!("obj.{}.Init()", parent));
    }
    for field in &fields {
        let statements = init_statements(
            &types,
            &format!("obj.{}", field.exported),
            &field.field.ty,
            field.field.initializer.as_ref(),
        )
        .map_err(|e| e.in_member(&field.field.name))?;
        w.lines(statements);
    }
    w.line("return obj");
    w.close()?;
    w.blank();

    w.line("// String renders the object for diagnostics.");
    w.open(format!("func (obj *{}) String() string", model.name));
    if fields.is_empty() {
        w.line(format!("return \"{}()\"", model.name));
    } else {
        w.line("var sb strings.Builder");
        w.line(format!("sb.WriteString(\"{}(\")", model.name));
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                w.line("sb.WriteString(\", \")");
            }
            w.line(format!("sb.WriteString(\"{}: \")", field.label));
            let print = format!("fmt.Fprintf(&sb, \"%v\", {})", field.display_value(ctx));
            if field.ty.starts_with('*') {
                w.open(format!("if obj.{} != nil", field.exported));
                w.line(print);
                w.close_with("} else {")?;
                w.push();
                w.line("sb.WriteString(\"null\")");
                w.close()?;
            } else {
                w.line(print);
            }
        }
        w.line("sb.WriteString(\")\")");
        w.line("return sb.String()");
    }
    w.close()?;

    w.finish()
}
