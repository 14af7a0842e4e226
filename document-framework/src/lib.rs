//! Document Framework
//!
//! Keeps the tokens and the nested token tree of a text buffer current
//! while it is edited, re-lexing only the lines an edit can affect.

pub mod config;
pub mod document;
pub mod edit;
mod line;
pub mod runner;
pub mod tree;

pub use common_framework::{Checkpoint, Position, Span};
pub use config::DocumentConfig;
pub use document::{Document, TokenRef, Tokens};
pub use edit::{Bias, Edit, EditError, EditSummary};
pub use runner::Runner;
pub use tree::{build_tree, Children, Nodes, TokenTree, TreeBuilder, TreeChild, TreeNode};
