// Chunk: docs/chunks/headless_cli - Command-line inspection of a document
//!
//! gapedit: open a file, optionally edit it, and print what the document model
//! derived from it.
//!
//! ```text
//! gapedit src/main.rs --line 3 --spans
//! gapedit notes.txt --append "done" --write
//! ```

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use gapedit::{EditorConfig, Session};
use gapedit_buffer::Document;
use gapedit_syntax::TreeSitterClassifier;

#[derive(Debug, Parser)]
#[command(name = "gapedit")]
#[command(about = "Inspect and edit a file through the gapedit document model")]
struct Cli {
    /// File to open
    file: PathBuf,

    /// Print the highlight spans
    #[arg(long)]
    spans: bool,

    /// Print a single line (0-based) with its display width
    #[arg(long, value_name = "N")]
    line: Option<usize>,

    /// Type TEXT at the end of the document
    #[arg(long, value_name = "TEXT")]
    append: Option<String>,

    /// Save the document after editing
    #[arg(long)]
    write: bool,

    /// Load configuration from a specific file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count)]
    verbosity: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let config = match &cli.config_file {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::load_or_default(),
    };
    let mut session = Session::new(config, Rc::new(TreeSitterClassifier::default()));

    let doc_id = session
        .open(&cli.file)
        .with_context(|| format!("could not open {}", cli.file.display()))?;
    let view = session.open_view(doc_id)?;

    if let Some(text) = &cli.append {
        session.set_cursor(view, usize::MAX, false)?;
        session.insert_str(view, text)?;
    }

    let Some(doc) = session.document(doc_id) else {
        bail!("document closed unexpectedly");
    };
    print_summary(doc);

    if let Some(line) = cli.line {
        if line >= doc.line_count() {
            bail!("line {} out of range (document has {})", line, doc.line_count());
        }
        println!(
            "{:>6} | {} ({} columns)",
            line,
            doc.line_content(line).trim_end_matches('\n'),
            doc.line_columns(line)
        );
    }

    if cli.spans {
        print_spans(doc);
    }

    if cli.write {
        session.save(doc_id)?;
    } else if cli.append.is_some() {
        log::warn!("--append without --write; changes discarded");
    }

    Ok(())
}

fn print_summary(doc: &Document) {
    println!("name:        {}", doc.name());
    println!("language:    {}", doc.language());
    println!(
        "encoding:    {}{}",
        doc.encoding(),
        if doc.has_bom() { " (bom)" } else { "" }
    );
    println!("line ending: {}", doc.line_ending());
    println!("length:      {}", doc.len());
    println!("lines:       {}", doc.line_count());
    if doc.is_highlight_stale() {
        println!("highlight:   stale");
    }
}

fn print_spans(doc: &Document) {
    for span in doc.highlight_spans() {
        let pos = doc.position_of(span.offset);
        println!(
            "{:>5}:{:<4} {:<12} {:?}",
            pos.line + 1,
            pos.col + 1,
            span.category.as_str(),
            doc.slice(span.offset..span.end())
        );
    }
}
