use std::fmt::Debug;
use std::hash::Hash;

/// Whether a token opens or closes a bracket-like construct.
///
/// The `&'static str` names the construct, so that `(`/`)` and `#{`/`#}`
/// never pair with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchRole {
    Open(&'static str),
    Close(&'static str),
}

/// The closed set of token kinds a grammar can produce.
///
/// Each grammar family defines one enum implementing this trait, so
/// consumers such as highlighters can match on kinds exhaustively.
pub trait TokenKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// A short stable name, used for display and serialization.
    fn name(&self) -> &'static str;

    /// Returns true if this kind represents whitespace.
    fn is_whitespace(&self) -> bool {
        false
    }

    /// Returns true if this kind is part of a comment.
    fn is_comment(&self) -> bool {
        false
    }

    /// Returns true if this kind marks input the grammar could not make
    /// sense of.
    fn is_error(&self) -> bool {
        false
    }

    /// Bracket matching information, if any.
    fn match_role(&self) -> Option<MatchRole> {
        None
    }
}
