//! Conversion direction, picked from the input and output file extensions.

use std::fmt;
use std::path::Path;

/// Which way a document is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    MarkdownToHtml,
    HtmlToMarkdown,
    Unsupported,
}

impl Direction {
    /// Compare the lower-cased extensions of `input` and `output`.
    ///
    /// Only `.md -> .html` and `.html -> .md` are recognized; anything else,
    /// including a missing extension, is `Unsupported`.
    pub fn detect(input: &Path, output: &Path) -> Self {
        match (extension(input).as_deref(), extension(output).as_deref()) {
            (Some("md"), Some("html")) => Direction::MarkdownToHtml,
            (Some("html"), Some("md")) => Direction::HtmlToMarkdown,
            _ => Direction::Unsupported,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::MarkdownToHtml => f.write_str("Markdown -> HTML"),
            Direction::HtmlToMarkdown => f.write_str("HTML -> Markdown"),
            Direction::Unsupported => f.write_str("unsupported"),
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}
