//! Template dispatch.
//!
//! The dispatcher maps `(language, construct kind)` to a registered
//! template. Lookup is exact: an unregistered pair is a `MissingTemplate`
//! error, never a fallback to another language.

use std::collections::BTreeMap;

use tracing::trace;

use super::traits::{ConstructTemplate, RenderContext, SourceFile, TemplateBundle};
use crate::error::{RenderError, RenderResult};
use crate::ir::{Construct, ConstructKind};

/// A bundle with its templates indexed by construct kind.
struct Registered {
    bundle: Box<dyn TemplateBundle>,
    templates: BTreeMap<ConstructKind, Box<dyn ConstructTemplate>>,
}

impl Registered {
    fn new(bundle: Box<dyn TemplateBundle>) -> Self {
        let templates = bundle
            .templates()
            .into_iter()
            .map(|template| (template.kind(), template))
            .collect();
        Self { bundle, templates }
    }
}

/// Registry of template bundles keyed by language.
#[derive(Default)]
pub struct TemplateDispatcher {
    languages: BTreeMap<&'static str, Registered>,
}

impl TemplateDispatcher {
    /// Create a dispatcher with no languages registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bundle, replacing any bundle with the same id.
    pub fn register(&mut self, bundle: Box<dyn TemplateBundle>) {
        self.languages.insert(bundle.id(), Registered::new(bundle));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_bundle(mut self, bundle: Box<dyn TemplateBundle>) -> Self {
        self.register(bundle);
        self
    }

    /// Ids of the registered languages, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.languages.keys().copied()
    }

    /// Look up the bundle for a language.
    pub fn bundle(&self, language: &str) -> Option<&dyn TemplateBundle> {
        self.languages.get(language).map(|r| &*r.bundle)
    }

    /// Look up the template for a construct kind and language.
    pub fn lookup(&self, kind: ConstructKind, language: &str) -> RenderResult<&dyn ConstructTemplate> {
        trace!(%kind, language, "template lookup");
        self.languages
            .get(language)
            .and_then(|r| r.templates.get(&kind))
            .map(|template| &**template)
            .ok_or_else(|| RenderError::MissingTemplate {
                kind,
                language: language.to_string(),
            })
    }

    /// Render a construct with the template registered for `language`.
    pub fn render(
        &self,
        ctx: &RenderContext<'_>,
        construct: Construct<'_>,
        language: &str,
    ) -> RenderResult<SourceFile> {
        let template = self.lookup(construct.kind(), language)?;
        let bundle = self
            .bundle(language)
            .ok_or_else(|| RenderError::MissingTemplate {
                kind: construct.kind(),
                language: language.to_string(),
            })?;

        let contents = template.render(ctx, construct)?;
        let path = bundle
            .file_path(construct.name(), ctx.package)
            .map_err(|e| e.at(construct.name()))?;
        Ok(SourceFile { path, contents })
    }
}

impl std::fmt::Debug for TemplateDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (language, registered) in &self.languages {
            map.entry(language, &registered.templates.keys().collect::<Vec<_>>());
        }
        map.finish()
    }
}
