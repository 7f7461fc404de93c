//! Java template bundle.
//!
//! Generates one `.java` file per construct, placed under the directory
//! derived from the dotted package name. Models serialize through Gson
//! (`@SerializedName`) and services target the Babel Java runtime
//! (`com.concur.babel`).

mod consts;
mod enums;
mod model;
mod service;
mod type_mapper;

use std::path::PathBuf;

pub use consts::JavaConstTemplate;
pub use enums::JavaEnumTemplate;
pub use model::JavaModelTemplate;
pub use service::JavaServiceTemplate;
pub use type_mapper::JavaTypeMapper;

use super::comments::{expand_comments, format_attributes, AttributeFilter};
use super::traits::{ConstructTemplate, RenderContext, TemplateBundle};
use super::type_format::TypeFormatter;
use super::writer::SourceWriter;
use crate::error::RenderResult;
use crate::ir::{Attribute, AttributeTarget, Comment};

/// Java templates for enums, models, services and constant blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaBundle;

impl TemplateBundle for JavaBundle {
    fn id(&self) -> &'static str {
        "java"
    }

    fn name(&self) -> &'static str {
        "Java"
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }

    fn file_path(&self, construct_name: &str, package: &str) -> RenderResult<PathBuf> {
        let mut path: PathBuf = package.split('.').filter(|s| !s.is_empty()).collect();
        path.push(format!("{}.{}", construct_name, self.file_extension()));
        Ok(path)
    }

    fn templates(&self) -> Vec<Box<dyn ConstructTemplate>> {
        vec![
            Box::new(JavaEnumTemplate),
            Box::new(JavaModelTemplate),
            Box::new(JavaServiceTemplate),
            Box::new(JavaConstTemplate),
        ]
    }
}

/// Header, document comments, package declaration and imports.
fn write_preamble(w: &mut SourceWriter, ctx: &RenderContext<'_>, imports: &[&str]) {
    w.file_header(&ctx.document.filename);
    if ctx.config.generate_docs {
        w.line_comments("//", &expand_comments(&ctx.document.comments));
    }
    w.blank();
    if !ctx.package.is_empty() {
        w.line(format!("package {};", ctx.package));
        w.blank();
    }
    if !imports.is_empty() {
        w.lines(imports.iter().map(|i| format!("import {};", i)));
        w.blank();
    }
}

/// Javadoc block for a declaration, when docs are enabled.
fn write_doc(w: &mut SourceWriter, ctx: &RenderContext<'_>, comment: &Comment) {
    if ctx.config.generate_docs {
        w.doc_comment(&expand_comments(comment));
    }
}

/// Annotations for the attributes that apply to `target`.
fn write_annotations(
    w: &mut SourceWriter,
    ctx: &RenderContext<'_>,
    types: &JavaTypeMapper<'_>,
    attributes: &[Attribute],
    target: AttributeTarget,
) -> RenderResult<()> {
    let filter = AttributeFilter::new(ctx.config, target);
    let lines = format_attributes(attributes, |a| filter.accepts(a), "@", types)?;
    w.lines(lines);
    Ok(())
}

/// Render `Type name` pairs joined by commas.
fn typed_list<'p, I>(types: &JavaTypeMapper<'_>, params: I) -> RenderResult<String>
where
    I: IntoIterator<Item = (&'p crate::ir::TypeRef, &'p str)>,
{
    let parts = params
        .into_iter()
        .map(|(ty, name)| -> RenderResult<String> {
            Ok(format!("{} {}", types.format_type(ty)?, name))
        })
        .collect::<RenderResult<Vec<_>>>()?;
    Ok(parts.join(", "))
}
