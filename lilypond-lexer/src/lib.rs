//! LilyPond Lexer
//!
//! Grammars for LilyPond, the Scheme embedded in it, HTML and Texinfo
//! documents with LilyPond blocks and plain text, built on
//! `lexer-framework`, and the `ly-lex` tool that prints the tokens or block
//! tree of a file.
//!
//! ```ignore
//! let grammar = Mode::guess(&source).grammar()?;
//! let mut document = Document::new(grammar, source);
//! document.apply_edit(offset, 0, "#(define x 1)")?;
//! ```

pub mod grammar;
pub mod kind;
pub mod mode;
pub mod report;
mod words;

pub use kind::LyKind;
pub use mode::{Mode, UnknownMode};
