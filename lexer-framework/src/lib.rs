//! Lexer Framework
//!
//! A stateful, restartable lexer driven by immutable grammars. A grammar is a
//! set of named states, each an ordered list of rules; rules may enter, leave
//! or replace states, which lets one grammar describe languages embedded in
//! one another.

pub mod context;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod rule;
pub mod state;
pub mod token;
pub mod traits;

pub use common_framework::{Position, Span};
pub use context::LexContext;
pub use cursor::Cursor;
pub use error::GrammarError;
pub use grammar::{Action, Grammar, GrammarBuilder, LexerState, RuleMatch, StateId, StateOptions};
pub use lexer::{tokenize, Lexer};
pub use rule::{Pattern, Rule, Transition};
pub use state::StateStack;
pub use token::Token;
pub use traits::{MatchRole, TokenKind};
