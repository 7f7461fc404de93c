//! Line-oriented source writer.
//!
//! [`SourceWriter`] owns the output buffer and the [`IndentTracker`] of one
//! render. Every line is prefixed with the tracker's current indentation and
//! terminated with the configured line ending.
//!
//! ```rust,ignore
//! let mut w = SourceWriter::new(&GeneratorConfig::default());
//! w.open("public class Point");
//! w.line("private int x;");
//! w.close()?;
//! let text = w.finish()?;
//! ```

use super::indent::IndentTracker;
use super::traits::GeneratorConfig;
use crate::error::RenderResult;

/// First line of every generated file.
pub const GENERATED_MARKER: &str = "// AUTO-GENERATED FILE - DO NOT MODIFY";

/// Buffer plus indentation state of a single render.
#[derive(Debug)]
pub struct SourceWriter {
    out: String,
    indent: IndentTracker,
    newline: &'static str,
}

impl SourceWriter {
    /// Create a writer using the indentation and line ending of `config`.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            out: String::new(),
            indent: IndentTracker::new(config.indent_str()),
            newline: config.line_ending_str(),
        }
    }

    /// Write one line at the current indentation.
    ///
    /// Empty lines are written without indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.out.push_str(self.indent.current());
            self.out.push_str(text);
        }
        self.out.push_str(self.newline);
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.out.push_str(self.newline);
    }

    /// Write several lines at the current indentation.
    pub fn lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line);
        }
    }

    /// Open an indentation scope.
    pub fn push(&mut self) {
        self.indent.push();
    }

    /// Close the innermost indentation scope.
    pub fn pop(&mut self) -> RenderResult<()> {
        self.indent.pop()
    }

    /// Write `header {` and open a scope.
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.push();
    }

    /// Close a scope and write `}`.
    pub fn close(&mut self) -> RenderResult<()> {
        self.close_with("}")
    }

    /// Close a scope and write a custom closing line.
    pub fn close_with(&mut self, closing: &str) -> RenderResult<()> {
        self.pop()?;
        self.line(closing);
        Ok(())
    }

    /// Write the generated-file marker and the schema file name.
    pub fn file_header(&mut self, schema_file: &str) {
        self.line(GENERATED_MARKER);
        self.line(format!("// Generated from {}", schema_file));
    }

    /// Write a `/** ... */` block at the current indentation.
    ///
    /// Nothing is written for an empty comment.
    pub fn doc_comment(&mut self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        self.line("/**");
        for line in lines {
            if line.is_empty() {
                self.line(" *");
            } else {
                self.line(format!(" * {}", line));
            }
        }
        self.line(" */");
    }

    /// Write each line as a `marker`-prefixed comment (e.g. `// text`).
    ///
    /// Blank lines are written as the bare marker.
    pub fn line_comments(&mut self, marker: &str, lines: &[String]) {
        for line in lines {
            if line.is_empty() {
                self.line(marker);
            } else {
                self.line(format!("{} {}", marker, line));
            }
        }
    }

    /// Finish the render, failing if a scope is still open.
    pub fn finish(self) -> RenderResult<String> {
        self.indent.finish()?;
        Ok(self.out)
    }
}
