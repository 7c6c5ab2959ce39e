//! HTML to Markdown conversion using `fast_html2md`.

use tracing::{debug, warn};

/// Converts HTML source into Markdown text with ATX (`#`) headings.
pub trait HtmlToMarkdownRenderer {
    fn render(&self, source: &str) -> anyhow::Result<String>;
}

/// [`HtmlToMarkdownRenderer`] backed by the DOM-based `fast_html2md` parser.
///
/// The streaming `rewrite_html` backend wraps `<pre><code>` contents in
/// stray inline backticks, so `parse_html` is used instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2MdRenderer;

impl HtmlToMarkdownRenderer for Html2MdRenderer {
    fn render(&self, source: &str) -> anyhow::Result<String> {
        let _span = tracing::debug_span!("html_to_markdown").entered();

        let markdown = html2md::parse_html(source, false);

        if markdown.trim().is_empty() && !source.trim().is_empty() {
            warn!("HTML conversion produced empty output");
        }
        debug!(bytes = markdown.len(), "HTML converted to markdown");
        Ok(markdown)
    }
}
