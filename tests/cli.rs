use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn mdhtml(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mdhtml"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run mdhtml")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn style_block(html: &str) -> &str {
    let start = html.find("<style>").unwrap();
    let end = html.find("</style>").unwrap();
    &html[start..end]
}

#[test]
fn test_markdown_to_html_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("guide.md");
    let output = dir.path().join("out/site/guide.html");
    fs::write(&input, "# Guide\n\n```python\nprint('hi')\n```\n").unwrap();

    let result = mdhtml(&["-i", path_str(&input), "-o", path_str(&output)]);

    assert_eq!(result.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("(Markdown -> HTML)"), "stdout: {stdout}");
    assert!(stdout.contains(path_str(&input)));
    assert!(stdout.contains(path_str(&output)));

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<!doctype html>"));
    assert!(html.contains("<article>"));
    assert!(html.contains("<title>guide</title>"));
    assert!(html.contains(r#"<h1 id="guide">Guide</h1>"#));
    assert!(html.contains(r#"<div class="codehilite">"#));
}

#[test]
fn test_html_to_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.html");
    let output = dir.path().join("page.md");
    fs::write(&input, "<h1>Hi</h1>").unwrap();

    let result = mdhtml(&["--input", path_str(&input), "--output", path_str(&output)]);

    assert_eq!(result.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&result.stdout).contains("(HTML -> Markdown)"));
    let markdown = fs::read_to_string(&output).unwrap();
    assert!(markdown.contains("# Hi"), "markdown: {markdown:?}");
    assert!(!markdown.contains('<'));
}

#[test]
fn test_unsupported_pair_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    let output = dir.path().join("notes.html");
    fs::write(&input, "plain text").unwrap();

    let result = mdhtml(&["-i", path_str(&input), "-o", path_str(&output)]);

    assert_eq!(result.status.code(), Some(3));
    assert_eq!(
        String::from_utf8_lossy(&result.stderr).trim_end(),
        "❌ Unsupported conversion: input must be .md -> .html or .html -> .md"
    );
    assert!(!output.exists());
}

#[test]
fn test_missing_input_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.md");
    let output = dir.path().join("missing.html");

    let result = mdhtml(&["-i", path_str(&input), "-o", path_str(&output)]);

    assert_eq!(result.status.code(), Some(2));
    assert_eq!(
        String::from_utf8_lossy(&result.stderr).trim_end(),
        format!("Input file not found: {}", input.display())
    );
    assert!(!output.exists());
}

#[test]
fn test_custom_css_is_embedded_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.md");
    let css = dir.path().join("custom.css");
    let output = dir.path().join("doc.html");
    fs::write(&input, "text").unwrap();
    let custom = "/* custom */\nbody { color: rebeccapurple; }\n";
    fs::write(&css, custom).unwrap();

    let result = mdhtml(&[
        "-i",
        path_str(&input),
        "-o",
        path_str(&output),
        "--embed-css",
        "--css-file",
        path_str(&css),
    ]);

    assert_eq!(result.status.code(), Some(0));
    let html = fs::read_to_string(&output).unwrap();
    let style = style_block(&html);
    assert!(style.contains(custom));
    assert!(!style.contains("padding: 0.8rem"));
}

#[test]
fn test_embed_css_uses_default_style_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.md");
    let output = dir.path().join("doc.html");
    fs::write(&input, "text").unwrap();

    let result = mdhtml(&["-i", path_str(&input), "-o", path_str(&output), "--embed-css"]);

    assert_eq!(result.status.code(), Some(0));
    let html = fs::read_to_string(&output).unwrap();
    assert!(style_block(&html).contains(".codehilite { padding: 0.8rem"));
}

#[test]
fn test_no_css_flags_keep_only_highlighting_rules() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.md");
    let output = dir.path().join("doc.html");
    fs::write(&input, "text").unwrap();

    let result = mdhtml(&["-i", path_str(&input), "-o", path_str(&output)]);

    assert_eq!(result.status.code(), Some(0));
    let html = fs::read_to_string(&output).unwrap();
    let style = style_block(&html);
    assert!(!style.contains("padding: 0.8rem"));
    assert!(!style.contains("font-family"));
    assert!(style.contains(".codehilite "));
}

#[test]
fn test_title_flag() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.md");
    let output = dir.path().join("doc.html");
    fs::write(&input, "text").unwrap();

    let result = mdhtml(&[
        "-i",
        path_str(&input),
        "-o",
        path_str(&output),
        "--title",
        "Release Notes",
    ]);

    assert_eq!(result.status.code(), Some(0));
    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("<title>Release Notes</title>"));
}

#[test]
fn test_round_trip_is_lossy_but_keeps_content() {
    // Markdown -> HTML -> Markdown is not byte-stable; only the text survives.
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.md");
    let html = dir.path().join("doc.html");
    let back = dir.path().join("back.md");
    let source = "# Title\n\nSome *emphasis* here.\n\n```rust\nlet x = 1;\n```\n";
    fs::write(&input, source).unwrap();

    assert_eq!(
        mdhtml(&["-i", path_str(&input), "-o", path_str(&html)]).status.code(),
        Some(0)
    );
    assert_eq!(
        mdhtml(&["-i", path_str(&html), "-o", path_str(&back)]).status.code(),
        Some(0)
    );

    let markdown = fs::read_to_string(&back).unwrap();
    assert!(markdown.contains("Title"));
    assert!(markdown.contains("emphasis"));
    assert!(markdown.contains("```"), "markdown: {markdown:?}");
    assert!(markdown.contains("let x = 1;"), "markdown: {markdown:?}");
    assert!(!markdown.contains("`let"), "markdown: {markdown:?}");
}
