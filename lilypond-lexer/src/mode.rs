use crate::grammar;
use crate::kind::LyKind;
use lexer_framework::{Grammar, GrammarError};
use once_cell::sync::Lazy;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

type SharedGrammar = Result<Arc<Grammar<LyKind>>, GrammarError>;

static LILYPOND: Lazy<SharedGrammar> = Lazy::new(|| grammar::lilypond().map(Arc::new));
static SCHEME: Lazy<SharedGrammar> = Lazy::new(|| grammar::scheme().map(Arc::new));
static HTML: Lazy<SharedGrammar> = Lazy::new(|| grammar::html().map(Arc::new));
static TEXINFO: Lazy<SharedGrammar> = Lazy::new(|| grammar::texinfo().map(Arc::new));
static TEXT: Lazy<SharedGrammar> = Lazy::new(|| grammar::text().map(Arc::new));

/// The kind of source a document holds, selecting the grammar it is
/// lexed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    LilyPond,
    Scheme,
    Html,
    Texinfo,
    Text,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown mode `{0}`, expected one of: lilypond, scheme, html, texinfo, text")]
pub struct UnknownMode(pub String);

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::LilyPond,
        Mode::Scheme,
        Mode::Html,
        Mode::Texinfo,
        Mode::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mode::LilyPond => "lilypond",
            Mode::Scheme => "scheme",
            Mode::Html => "html",
            Mode::Texinfo => "texinfo",
            Mode::Text => "text",
        }
    }

    /// The grammar for this mode. Each grammar is built on first use and
    /// shared afterwards.
    pub fn grammar(self) -> Result<Arc<Grammar<LyKind>>, &'static GrammarError> {
        let shared = match self {
            Mode::LilyPond => &*LILYPOND,
            Mode::Scheme => &*SCHEME,
            Mode::Html => &*HTML,
            Mode::Texinfo => &*TEXINFO,
            Mode::Text => &*TEXT,
        };
        shared.as_ref().map(Arc::clone)
    }

    /// Picks a mode from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Mode> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "ly" | "ily" | "lyi" => Some(Mode::LilyPond),
            "scm" => Some(Mode::Scheme),
            "html" | "htm" => Some(Mode::Html),
            "texi" | "texinfo" | "itexi" | "tely" | "itely" => Some(Mode::Texinfo),
            "txt" => Some(Mode::Text),
            _ => None,
        }
    }

    /// Guesses the mode from the start of the text.
    ///
    /// Scheme files start with a comment or a list, HTML with a tag and
    /// Texinfo with a command. LaTeX is lexed as plain text. Everything
    /// else is LilyPond.
    pub fn guess(text: &str) -> Mode {
        let text = text.trim_start();
        if text.starts_with("#!") || text.starts_with(';') || text.starts_with('(') {
            return Mode::Scheme;
        }
        if text.starts_with('\\') {
            let latex = text.contains("\\documentclass") || text.contains("\\begin{document}");
            if latex && !text.contains("\\version") {
                return Mode::Text;
            }
            return Mode::LilyPond;
        }
        if text.starts_with("<<") {
            return Mode::LilyPond;
        }
        if text.starts_with('<') {
            return Mode::Html;
        }
        if text.starts_with('@') {
            return Mode::Texinfo;
        }
        Mode::LilyPond
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lilypond" | "ly" => Ok(Mode::LilyPond),
            "scheme" | "scm" => Ok(Mode::Scheme),
            "html" | "htm" => Ok(Mode::Html),
            "texinfo" | "texi" => Ok(Mode::Texinfo),
            "text" | "txt" | "plain" => Ok(Mode::Text),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}
