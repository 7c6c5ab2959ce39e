//! One conversion run: read the input, pick a direction, render, write the output.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::direction::Direction;
use crate::error::ConvertError;
use crate::html::HtmlToMarkdownRenderer;
use crate::markdown::MarkdownRenderer;
use crate::page::{Page, StyleSheet};

/// Everything a single run needs, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Embed the built-in style sheet when no custom one is given.
    pub embed_css: bool,
    pub css_file: Option<PathBuf>,
    pub title: Option<String>,
}

impl ConversionRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            embed_css: false,
            css_file: None,
            title: None,
        }
    }

    /// The explicit title, or the input file name without its extension.
    pub fn title(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_owned(),
            _ => self
                .input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    pub fn style_sheet(&self) -> StyleSheet {
        StyleSheet::select(self.css_file.as_deref(), self.embed_css)
    }
}

/// Runs conversions with a pair of renderers.
pub struct Converter<M, H> {
    markdown: M,
    html: H,
}

impl<M: MarkdownRenderer, H: HtmlToMarkdownRenderer> Converter<M, H> {
    pub fn new(markdown: M, html: H) -> Self {
        Self { markdown, html }
    }

    /// Convert `request.input` into `request.output`.
    ///
    /// The input is checked for existence before the extensions are looked
    /// at, so a missing `.txt` file reports `InputNotFound`. Nothing is
    /// written unless the pair of extensions is supported.
    pub fn run(&self, request: &ConversionRequest) -> Result<Direction, ConvertError> {
        if !request.input.exists() {
            return Err(ConvertError::InputNotFound(request.input.clone()));
        }

        let text = fs::read_to_string(&request.input).map_err(|source| ConvertError::Read {
            path: request.input.clone(),
            source,
        })?;

        let direction = Direction::detect(&request.input, &request.output);
        debug!(%direction, input = %request.input.display(), "detected conversion direction");

        let rendered = match direction {
            Direction::MarkdownToHtml => self.markdown_to_html(request, &text)?,
            Direction::HtmlToMarkdown => self.html.render(&text)?,
            Direction::Unsupported => {
                return Err(ConvertError::Unsupported {
                    input: request.input.clone(),
                    output: request.output.clone(),
                });
            }
        };

        write_output(&request.output, &rendered)?;
        info!(output = %request.output.display(), bytes = rendered.len(), "wrote output");
        Ok(direction)
    }

    fn markdown_to_html(
        &self,
        request: &ConversionRequest,
        text: &str,
    ) -> Result<String, ConvertError> {
        let body = self.markdown.render(text)?;
        let style_sheet = request.style_sheet();
        debug!(?style_sheet, "selected page style sheet");
        let css = style_sheet.load()?;
        let highlight_css = self.markdown.highlight_css()?;
        let title = request.title();

        Ok(Page {
            title: &title,
            css: &css,
            highlight_css: &highlight_css,
            body: &body,
        }
        .assemble())
    }
}

/// Write `contents` to `path`, creating missing parent directories first.
fn write_output(path: &Path, contents: &str) -> Result<(), ConvertError> {
    let write_err = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}
