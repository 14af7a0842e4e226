/// Tuning knobs for a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DocumentConfig {
    /// How many lines past an edit are re-lexed while looking for a line
    /// whose start state is unchanged. Once exceeded, the rest of the
    /// document is re-lexed without comparing states.
    pub resync_lookahead: usize,
}

impl DocumentConfig {
    pub const DEFAULT_RESYNC_LOOKAHEAD: usize = 10_000;

    pub fn with_resync_lookahead(mut self, lines: usize) -> Self {
        self.resync_lookahead = lines;
        self
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            resync_lookahead: Self::DEFAULT_RESYNC_LOOKAHEAD,
        }
    }
}
