//! Common Framework
//!
//! Value types shared by `lexer-framework` and `document-framework`.

pub mod checkpoint;
pub mod position;
pub mod span;

pub use checkpoint::Checkpoint;
pub use position::Position;
pub use span::Span;
