use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mdhtml::{
    ConversionRequest, ConvertError, Converter, Html2MdRenderer, MarkdownOptions,
    PulldownRenderer,
};

/// Markdown <-> HTML converter (auto-detects direction from file extensions)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file (.md or .html)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (.html or .md)
    #[arg(short, long)]
    output: PathBuf,

    /// Embed the default CSS directly into the HTML
    #[arg(long)]
    embed_css: bool,

    /// Custom CSS file to include (takes precedence over --embed-css)
    #[arg(long)]
    css_file: Option<PathBuf>,

    /// HTML title (defaults to the input file name)
    #[arg(long)]
    title: Option<String>,

    /// Number the lines of highlighted code blocks
    #[arg(long)]
    line_numbers: bool,

    /// Log what the converter is doing
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // --verbose enables DEBUG, otherwise use RUST_LOG or default to WARN
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = MarkdownOptions {
        line_numbers: args.line_numbers,
        ..MarkdownOptions::default()
    };
    let converter = Converter::new(PulldownRenderer::new(options), Html2MdRenderer);

    let request = ConversionRequest {
        input: args.input,
        output: args.output,
        embed_css: args.embed_css,
        css_file: args.css_file,
        title: args.title,
    };

    match converter.run(&request) {
        Ok(direction) => {
            println!(
                "Converted {} -> {} ({direction})",
                request.input.display(),
                request.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err {
                ConvertError::Unsupported { .. } => eprintln!("❌ {err}"),
                ConvertError::InputNotFound(_) => eprintln!("{err}"),
                _ => eprintln!("Error: {err}"),
            }
            ExitCode::from(err.exit_code())
        }
    }
}
