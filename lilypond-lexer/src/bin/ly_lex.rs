//! Prints the tokens or the block tree of a LilyPond, Scheme, HTML,
//! Texinfo or text file.

use clap::{ArgAction, Parser};
use document_framework::Document;
use lilypond_lexer::report::{format_tokens, format_tree, token_records, tree_record};
use lilypond_lexer::Mode;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ly-lex", version)]
#[command(about = "Tokenize LilyPond and Scheme source")]
struct Args {
    /// Input file; standard input when omitted
    file: Option<PathBuf>,

    /// Grammar to lex with (lilypond, scheme, html, texinfo, text); guessed
    /// from the extension or the content when omitted
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Print the tree of nested blocks instead of the tokens
    #[arg(long)]
    tree: bool,

    /// Print JSON
    #[arg(long)]
    json: bool,

    /// Leave whitespace tokens out of the token list
    #[arg(long)]
    skip_space: bool,

    /// More logging: -v for debug, -vv for trace. RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let text = read_input(args.file.as_ref())?;
    let mode = args
        .mode
        .or_else(|| args.file.as_ref().and_then(Mode::from_path))
        .unwrap_or_else(|| Mode::guess(&text));
    tracing::debug!(%mode, bytes = text.len(), "ly_lex.input");

    let document = Document::new(mode.grammar()?, text);
    let output = match (args.tree, args.json) {
        (true, true) => serde_json::to_string_pretty(&tree_record(&document))?,
        (true, false) => format_tree(&tree_record(&document)),
        (false, true) => {
            serde_json::to_string_pretty(&token_records(&document, args.skip_space))?
        }
        (false, false) => format_tokens(&token_records(&document, args.skip_space)),
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
