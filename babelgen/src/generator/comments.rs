//! Comment and attribute materialization.
//!
//! Comments are expanded into plain lines; the caller decides on block
//! delimiters and indentation. Attributes become one annotation line each.

use super::traits::GeneratorConfig;
use super::type_format::TypeFormatter;
use crate::error::RenderResult;
use crate::ir::{Attribute, AttributeParam, AttributeTarget, Comment};

/// Expand a comment into one entry per line.
///
/// An entry with embedded newlines is split and each segment trimmed.
/// Blank segments are dropped at the start and end of the entry but kept
/// between text lines.
pub fn expand_comments(comment: &Comment) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in &comment.lines {
        let segments: Vec<&str> = entry.split('\n').collect();
        let last = segments.len() - 1;
        if last == 0 {
            lines.push(entry.trim().to_string());
            continue;
        }
        for (i, segment) in segments.iter().enumerate() {
            let segment = segment.trim();
            if !segment.is_empty() || (i != 0 && i < last) {
                lines.push(segment.to_string());
            }
        }
    }
    lines
}

/// Decides which attributes apply to the element being rendered.
#[derive(Debug, Clone, Copy)]
pub struct AttributeFilter<'a> {
    config: &'a GeneratorConfig,
    target: AttributeTarget,
}

impl<'a> AttributeFilter<'a> {
    pub fn new(config: &'a GeneratorConfig, target: AttributeTarget) -> Self {
        Self { config, target }
    }

    /// Keep attributes of an enabled scope whose targets include this element.
    pub fn accepts(&self, attribute: &Attribute) -> bool {
        self.config.scope_enabled(&attribute.scope)
            && (attribute.targets.is_empty() || attribute.targets.contains(&self.target))
    }
}

/// Format the attributes kept by `keep`, one annotation per line.
///
/// Keyed parameters render as `name = value` and positional ones as `value`.
/// An attribute without parameters renders without a parameter list.
pub fn format_attributes<F, T>(
    attributes: &[Attribute],
    keep: F,
    sigil: &str,
    formatter: &T,
) -> RenderResult<Vec<String>>
where
    F: Fn(&Attribute) -> bool,
    T: TypeFormatter + ?Sized,
{
    let mut lines = Vec::new();
    for attribute in attributes.iter().filter(|&a| keep(a)) {
        let mut line = format!("{}{}", sigil, attribute.name);
        if !attribute.params.is_empty() {
            let params = attribute
                .params
                .iter()
                .map(|param| match param {
                    AttributeParam::Keyed { name, value } => {
                        Ok(format!("{} = {}", name, formatter.format_literal(value)?))
                    }
                    AttributeParam::Positional(value) => formatter.format_literal(value),
                })
                .collect::<RenderResult<Vec<_>>>()?;
            line.push('(');
            line.push_str(&params.join(", "));
            line.push(')');
        }
        lines.push(line);
    }
    Ok(lines)
}
