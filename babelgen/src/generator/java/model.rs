//! Java model template.

use tracing::debug;

use super::{typed_list, write_annotations, write_doc, write_preamble, JavaTypeMapper};
use crate::error::{RenderError, RenderResult};
use crate::generator::traits::{ConstructTemplate, RenderContext};
use crate::generator::type_format::TypeFormatter;
use crate::generator::writer::SourceWriter;
use crate::ir::{validate_construct, AttributeTarget, Construct, ConstructKind, Field, Model};
use crate::naming::{to_member_case, to_type_case};

/// Renders a serializable class with Gson wire names, constructors,
/// accessors and a `toString` of the form `Point(x: 1, y: 2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaModelTemplate;

impl ConstructTemplate for JavaModelTemplate {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Model
    }

    fn render(&self, ctx: &RenderContext<'_>, construct: Construct<'_>) -> RenderResult<String> {
        let Construct::Model(model) = construct else {
            return Err(RenderError::MissingTemplate {
                kind: construct.kind(),
                language: "java".to_string(),
            });
        };
        debug!(name = %model.name, fields = model.fields.len(), "rendering java model");
        validate_construct(construct)?;
        ctx.resolver.check_construct(construct)?;
        render_model(ctx, model).map_err(|err| err.at(&model.name))
    }
}

/// A field with its Java spellings.
struct JavaField<'a> {
    field: &'a Field,
    member: String,
    accessor: String,
    ty: String,
}

impl<'a> JavaField<'a> {
    fn new(types: &JavaTypeMapper<'_>, field: &'a Field) -> RenderResult<Self> {
        Ok(Self {
            field,
            member: to_member_case(&field.name)?,
            accessor: to_type_case(&field.name)?,
            ty: types.format_type(&field.ty)?,
        })
    }

    /// Declared initializer, or a fresh container for lists and maps.
    fn default_value(&self, types: &JavaTypeMapper<'_>) -> RenderResult<Option<String>> {
        match &self.field.initializer {
            Some(literal) => types.format_initializer(&self.field.ty, literal).map(Some),
            None => types.format_container_constructor(&self.field.ty),
        }
    }
}

fn render_model(ctx: &RenderContext<'_>, model: &Model) -> RenderResult<String> {
    let types = JavaTypeMapper::new(ctx.resolver);
    let fields = model
        .fields
        .iter()
        .map(|f| JavaField::new(&types, f).map_err(|e| e.in_member(&f.name)))
        .collect::<RenderResult<Vec<_>>>()?;

    let mut w = SourceWriter::new(ctx.config);
    write_preamble(
        &mut w,
        ctx,
        &["com.google.gson.annotations.SerializedName", "java.io.Serializable"],
    );
    write_doc(&mut w, ctx, &model.comments);
    write_annotations(&mut w, ctx, &types, &model.attributes, AttributeTarget::Model)?;

    let mut header = String::from("public ");
    if model.is_abstract {
        header.push_str("abstract ");
    }
    header.push_str("class ");
    header.push_str(&model.name);
    if let Some(parent) = &model.parent {
        header.push_str(" extends ");
        header.push_str(parent);
    }
    header.push_str(" implements Serializable");
    w.open(header);

    for field in &fields {
        write_doc(&mut w, ctx, &field.field.comments);
        write_annotations(&mut w, ctx, &types, &field.field.attributes, AttributeTarget::Field)
            .map_err(|e| e.in_member(&field.field.name))?;
        w.line(format!("@SerializedName(\"{}\")", field.field.name));
        let default = field
            .default_value(&types)
            .map_err(|e| e.in_member(&field.field.name))?;
        match default {
            Some(value) => w.line(format!("private {} {} = {};", field.ty, field.member, value)),
            None => w.line(format!("private {} {};", field.ty, field.member)),
        }
        w.blank();
    }

    w.line(format!("public {}() {{}}", model.name));
    w.blank();

    if !fields.is_empty() {
        let params = typed_list(
            &types,
            fields.iter().map(|f| (&f.field.ty, f.member.as_str())),
        )?;
        w.open(format!("public {}({})", model.name, params));
        for field in &fields {
            w.line(format!("this.{0} = {0};", field.member));
        }
        w.close()?;
        w.blank();
    }

    for field in &fields {
        w.line(format!(
            "public {} get{}() {{ return this.{}; }}",
            field.ty, field.accessor, field.member
        ));
        w.blank();
        w.open(format!(
            "public void set{}({} {})",
            field.accessor, field.ty, field.member
        ));
        w.line(format!("this.{0} = {0};", field.member));
        w.close()?;
        w.blank();
    }

    w.line("@Override");
    w.open("public String toString()");
    if fields.is_empty() {
        w.line(format!("return \"{}()\";", model.name));
    } else {
        w.line(format!("StringBuilder sb = new StringBuilder(\"{}(\");", model.name));
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                w.line("sb.append(\", \");");
            }
            w.line(format!("sb.append(\"{}: \");", field.member));
            w.line(format!("sb.append(this.{});", field.member));
        }
        w.line("sb.append(\")\");");
        w.line("return sb.toString();");
    }
    w.close()?;

    w.close()?;
    w.finish()
}
