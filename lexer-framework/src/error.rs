use thiserror::Error;

/// Errors raised while registering or building a grammar.
///
/// Lexing itself never fails; every one of these is detected before the
/// first token is produced.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("state `{0}` is already defined in this grammar")]
    DuplicateState(String),

    #[error("rule in state `{from}` refers to undefined state `{target}`")]
    UndefinedState { from: String, target: String },

    #[error("invalid pattern `{pattern}` in state `{state}`: {source}")]
    InvalidPattern {
        state: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule in state `{0}` has an empty pattern")]
    EmptyPattern(String),

    #[error("capture group `{group}` is not defined by pattern `{pattern}`")]
    UnknownCaptureGroup { group: String, pattern: String },

    #[error("initial state `{0}` is not defined")]
    UnknownInitialState(String),

    #[error("grammar `{0}` defines no states")]
    NoStates(String),
}
