//! Full HTML document assembly around a rendered Markdown fragment.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

/// Style sheet embedded by `--embed-css` when no custom file is given.
pub const DEFAULT_CSS: &str = r#"
/* basic page layout */
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial;
    max-width: 900px;
    margin: 40px auto;
    line-height: 1.6;
    padding: 0 20px;
    color: #111827;
    background: #ffffff;
}

/* headings */
h1, h2, h3, h4 { margin-top: 1.2em; }
h1 { font-size: 2.4rem; }

/* links */
a { color: #065f46; text-decoration: none; }
a:hover { text-decoration: underline; }

/* highlighted code blocks */
.codehilite { padding: 0.8rem; border-radius: 6px; overflow: auto; }

/* inline code */
code { background:#f3f4f6; padding: 0.15rem 0.25rem; border-radius:4px; font-size:0.95em; }

img { max-width: 100%; height: auto; display:block; margin: 10px 0; }

/* table of contents, rendered where the document has a [TOC] marker */
.toc { background: #f8fafc; padding: 12px; border-radius: 6px; margin-bottom: 18px; }
"#;

/// Where the page CSS comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSheet {
    /// A user-supplied file, used verbatim.
    Custom(PathBuf),
    /// The built-in [`DEFAULT_CSS`].
    Default,
    /// No page CSS; only the highlighting rules are emitted.
    Empty,
}

impl StyleSheet {
    /// A custom file always wins, even over `embed_default`.
    pub fn select(css_file: Option<&Path>, embed_default: bool) -> Self {
        match css_file {
            Some(path) => StyleSheet::Custom(path.to_path_buf()),
            None if embed_default => StyleSheet::Default,
            None => StyleSheet::Empty,
        }
    }

    pub fn load(&self) -> Result<Cow<'static, str>, ConvertError> {
        match self {
            StyleSheet::Custom(path) => fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| ConvertError::StyleSheet {
                    path: path.clone(),
                    source,
                }),
            StyleSheet::Default => Ok(Cow::Borrowed(DEFAULT_CSS)),
            StyleSheet::Empty => Ok(Cow::Borrowed("")),
        }
    }
}

/// The parts of a standalone HTML page.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub title: &'a str,
    pub css: &'a str,
    pub highlight_css: &'a str,
    pub body: &'a str,
}

impl Page<'_> {
    /// Wrap the body in an HTML5 document with one inline style block.
    pub fn assemble(&self) -> String {
        let title = escape_html(self.title);
        let Page {
            css,
            highlight_css,
            body,
            ..
        } = self;
        format!(
            r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width,initial-scale=1" />
<title>{title}</title>
<style>
{css}
{highlight_css}
</style>
</head>
<body>
<article>
{body}
</article>
</body>
</html>
"#
        )
    }
}

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
