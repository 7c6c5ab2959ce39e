//! Markdown to HTML rendering.
//!
//! [`PulldownRenderer`] parses with pulldown-cmark and rewrites the event
//! stream before handing it to pulldown-cmark's HTML writer:
//! - fenced and indented code blocks become highlighted `codehilite` blocks
//! - headings get unique `id` anchors
//! - a paragraph holding only `[TOC]` becomes a nested table of contents

use std::collections::HashSet;
use std::fmt::Write;

use pulldown_cmark::{
    CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use tracing::debug;

use crate::highlight::Highlighter;
use crate::page::escape_html;

const TOC_MARKER: &str = "[TOC]";

/// Converts Markdown source into an HTML fragment.
pub trait MarkdownRenderer {
    fn render(&self, source: &str) -> anyhow::Result<String>;

    /// Style rules for the highlighting markup emitted by [`render`](Self::render).
    fn highlight_css(&self) -> anyhow::Result<String>;
}

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Emit highlighting markup for code blocks.
    pub highlight: bool,
    /// Give headings anchors and expand `[TOC]` markers.
    pub toc: bool,
    /// Guess the language of unlabeled code blocks from their first line.
    pub guess_lang: bool,
    pub line_numbers: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            highlight: true,
            toc: true,
            guess_lang: true,
            line_numbers: false,
        }
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// [`MarkdownRenderer`] backed by pulldown-cmark and syntect.
pub struct PulldownRenderer {
    options: MarkdownOptions,
    highlighter: Highlighter,
}

impl Default for PulldownRenderer {
    fn default() -> Self {
        Self::new(MarkdownOptions::default())
    }
}

impl PulldownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self {
            options,
            highlighter: Highlighter::new(),
        }
    }

    fn highlight_blocks<'a>(&self, events: Vec<Event<'a>>) -> anyhow::Result<Vec<Event<'a>>> {
        let mut out = Vec::with_capacity(events.len());
        let mut code: Option<(Option<String>, String)> = None;

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => {
                            info.split_whitespace().next().map(str::to_owned)
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, buffer)) = code.take() {
                        let html = self.highlighter.highlight(
                            &buffer,
                            lang.as_deref(),
                            self.options.guess_lang,
                            self.options.line_numbers,
                        )?;
                        out.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Text(text) if code.is_some() => {
                    if let Some((_, buffer)) = code.as_mut() {
                        buffer.push_str(&text);
                    }
                }
                other => out.push(other),
            }
        }
        Ok(out)
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, source: &str) -> anyhow::Result<String> {
        let mut events: Vec<Event<'_>> = Parser::new_ext(source, Options::empty()).collect();

        if self.options.toc {
            let toc = assign_heading_ids(&mut events);
            debug!(headings = toc.len(), "assigned heading anchors");
            events = expand_toc_markers(events, &toc);
        }
        if self.options.highlight {
            events = self.highlight_blocks(events)?;
        }

        let mut html = String::with_capacity(source.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());
        Ok(html)
    }

    fn highlight_css(&self) -> anyhow::Result<String> {
        self.highlighter.style_defs()
    }
}

/// Give every heading a unique slug `id` and return the entries in document order.
fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<TocEntry> {
    let mut toc = Vec::new();
    let mut used = HashSet::new();

    let mut i = 0;
    while i < events.len() {
        let Event::Start(Tag::Heading { level, .. }) = &events[i] else {
            i += 1;
            continue;
        };
        let level = *level;

        let mut title = String::new();
        let mut j = i + 1;
        while j < events.len() {
            match &events[j] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(text) | Event::Code(text) => title.push_str(text),
                _ => {}
            }
            j += 1;
        }

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            let anchor = match id {
                Some(existing) => existing.to_string(),
                None => unique_id(slugify(&title), &mut used),
            };
            used.insert(anchor.clone());
            *id = Some(CowStr::from(anchor.clone()));
            toc.push(TocEntry {
                level: heading_level_to_num(level),
                title: title.trim().to_owned(),
                id: anchor,
            });
        }
        i = j;
    }
    toc
}

/// Replace each paragraph consisting solely of `[TOC]` with the rendered table.
fn expand_toc_markers<'a>(events: Vec<Event<'a>>, toc: &[TocEntry]) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut i = 0;
    while i < events.len() {
        if matches!(events[i], Event::Start(Tag::Paragraph)) {
            let mut text = String::new();
            let mut j = i + 1;
            while let Some(Event::Text(t)) = events.get(j) {
                text.push_str(t);
                j += 1;
            }
            if matches!(events.get(j), Some(Event::End(TagEnd::Paragraph)))
                && text.trim() == TOC_MARKER
            {
                out.push(Event::Html(CowStr::from(render_toc(toc))));
                i = j + 1;
                continue;
            }
        }
        out.push(events[i].clone());
        i += 1;
    }
    out
}

/// Render entries as nested `<ul>` lists inside a `toc` container.
pub fn render_toc(entries: &[TocEntry]) -> String {
    let mut out = String::from("<div class=\"toc\">\n");
    if entries.is_empty() {
        out.push_str("<ul></ul>\n</div>\n");
        return out;
    }

    let mut open: Vec<u8> = Vec::new();
    for entry in entries {
        match open.last().copied() {
            None => {
                out.push_str("<ul>\n");
                open.push(entry.level);
            }
            Some(last) if entry.level > last => {
                out.push_str("\n<ul>\n");
                open.push(entry.level);
            }
            Some(_) => {
                out.push_str("</li>\n");
                while let &[.., parent, top] = open.as_slice() {
                    if entry.level >= top {
                        break;
                    }
                    if entry.level > parent {
                        // Skipped level: stay in the parent's sublist.
                        open.pop();
                        open.push(entry.level);
                        break;
                    }
                    out.push_str("</ul>\n</li>\n");
                    open.pop();
                }
            }
        }
        write!(
            out,
            r##"<li><a href="#{}">{}</a>"##,
            escape_html(&entry.id),
            escape_html(&entry.title)
        )
        .ok();
    }

    out.push_str("</li>\n");
    while open.len() > 1 {
        out.push_str("</ul>\n</li>\n");
        open.pop();
    }
    out.push_str("</ul>\n</div>\n");
    out
}

/// Lower-case, keep word characters, collapse whitespace and hyphen runs to `-`.
///
/// Non-ASCII characters are dropped rather than transliterated. A heading
/// with no word characters yields an empty slug, which [`unique_id`] turns
/// into `_1`.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }
    slug
}

/// Make `id` unique and non-empty.
///
/// A taken id ending in `_<n>` gets its counter bumped, anything else gets
/// `_1` appended; repeated until unused.
fn unique_id(id: String, used: &mut HashSet<String>) -> String {
    let mut id = id;
    while id.is_empty() || used.contains(&id) {
        id = match id.rsplit_once('_') {
            Some((base, n)) if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => {
                let next = n.parse::<u64>().map_or(1, |n| n + 1);
                format!("{base}_{next}")
            }
            _ => format!("{id}_1"),
        };
    }
    id
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
