//! Code highlighting markup and the matching style sheet.
//!
//! Code blocks are emitted as class-annotated spans inside a
//! `<div class="codehilite">` container; [`Highlighter::style_defs`]
//! produces the CSS rules for those classes, scoped under the same
//! container class.

use std::fmt::Write;

use anyhow::Context;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::page::escape_html;

/// CSS class of the element wrapping every highlighted code block.
pub const CONTAINER_CLASS: &str = "codehilite";

const THEME: &str = "InspiredGitHub";

/// Syntax definitions plus the theme used for the generated style sheet.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults();
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme: themes.themes.remove(THEME).unwrap_or_default(),
        }
    }

    /// Render one code block as highlighted HTML.
    ///
    /// `lang` is the first word of the fence info string. Unknown or missing
    /// languages fall back to a guess from the first line when `guess_lang`
    /// is set, then to plain text.
    pub fn highlight(
        &self,
        code: &str,
        lang: Option<&str>,
        guess_lang: bool,
        line_numbers: bool,
    ) -> anyhow::Result<String> {
        let (syntax, label) = self.resolve_syntax(code, lang, guess_lang);

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        let mut line_count = 0;
        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .with_context(|| {
                    format!("failed to highlight code block ({})", syntax.name)
                })?;
            line_count += 1;
        }
        let mut body = generator.finalize();
        if line_numbers {
            body = number_lines(&body, line_count);
        }

        let code_open = match label {
            Some(label) => format!(r#"<code class="language-{}">"#, escape_html(&label)),
            None => "<code>".to_owned(),
        };
        Ok(format!(
            "<div class=\"{CONTAINER_CLASS}\"><pre><span></span>{code_open}{body}</code></pre></div>\n"
        ))
    }

    /// Style rules for the highlighting classes, scoped under the container class.
    ///
    /// The theme's root rule applies to the container itself.
    pub fn style_defs(&self) -> anyhow::Result<String> {
        let css = css_for_theme_with_class_style(&self.theme, ClassStyle::Spaced)
            .context("failed to generate highlighting style sheet")?;

        let mut scoped = String::with_capacity(css.len() * 2);
        for line in css.lines() {
            match line.strip_suffix(" {") {
                Some(selectors) if !line.starts_with(char::is_whitespace) => {
                    let selectors = selectors
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(scope_selector)
                        .collect::<Vec<_>>()
                        .join(", ");
                    scoped.push_str(&selectors);
                    scoped.push_str(" {");
                }
                _ => scoped.push_str(line),
            }
            scoped.push('\n');
        }
        writeln!(
            scoped,
            ".{CONTAINER_CLASS} .linenos {{ color: #6e7781; padding-right: 10px; \
             user-select: none; }}"
        )?;
        Ok(scoped)
    }

    fn resolve_syntax<'s>(
        &'s self,
        code: &str,
        lang: Option<&str>,
        guess_lang: bool,
    ) -> (&'s SyntaxReference, Option<String>) {
        if let Some(lang) = lang {
            if let Some(syntax) = self.syntaxes.find_syntax_by_token(lang) {
                return (syntax, Some(lang.to_owned()));
            }
        }
        if guess_lang {
            if let Some(syntax) = self.syntaxes.find_syntax_by_first_line(code) {
                return (syntax, Some(syntax.name.to_lowercase()));
            }
        }
        (
            self.syntaxes.find_syntax_plain_text(),
            lang.map(str::to_owned),
        )
    }
}

fn scope_selector(selector: &str) -> String {
    if selector == ".code" {
        format!(".{CONTAINER_CLASS}")
    } else {
        format!(".{CONTAINER_CLASS} {selector}")
    }
}

/// Prefix each of the first `line_count` lines with a line number span.
fn number_lines(body: &str, line_count: usize) -> String {
    let mut out = String::with_capacity(body.len() + line_count * 32);
    let mut line = 0;
    let mut at_line_start = true;
    for c in body.chars() {
        if at_line_start && line < line_count {
            line += 1;
            write!(out, r#"<span class="linenos">{line}</span>"#).ok();
            at_line_start = false;
        }
        out.push(c);
        if c == '\n' {
            at_line_start = true;
        }
    }
    out
}
