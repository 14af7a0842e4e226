use crate::config::DocumentConfig;
use crate::edit::{Edit, EditError, EditSummary};
use crate::line::Line;
use crate::tree::{TokenTree, TreeBuilder};
use common_framework::{Position, Span};
use lexer_framework::{Grammar, StateStack, Token, TokenKind};
use std::ops::Range;
use std::sync::Arc;

/// A text buffer together with its tokens and token tree, kept up to date
/// across edits.
///
/// Tokens are stored per line. After an edit, lexing restarts at the start
/// of the line holding the edit, in the state that line started in, and
/// stops at the first later line whose start state is what it was before
/// the edit; the lines after it are reused as they are.
///
/// A document has a single owner. Reads borrow it, so no query can observe
/// a half-applied edit.
#[derive(Debug)]
pub struct Document<K> {
    grammar: Arc<Grammar<K>>,
    config: DocumentConfig,
    text: String,
    lines: Vec<Line<K>>,
    token_count: usize,
    tree: TokenTree,
}

impl<K: TokenKind> Document<K> {
    pub fn new(grammar: Arc<Grammar<K>>, text: impl Into<String>) -> Self {
        Self::with_config(grammar, text, DocumentConfig::default())
    }

    pub fn with_config(
        grammar: Arc<Grammar<K>>,
        text: impl Into<String>,
        config: DocumentConfig,
    ) -> Self {
        let tree = TreeBuilder::new(grammar.initial_stack()).finish();
        let mut document = Self {
            grammar,
            config,
            text: text.into(),
            lines: Vec::new(),
            token_count: 0,
            tree,
        };
        document.relex_all();
        document
    }

    pub fn grammar(&self) -> &Arc<Grammar<K>> {
        &self.grammar
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn tree(&self) -> &TokenTree {
        &self.tree
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Number of lines; a text ending in a newline has an empty last line.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Replaces the whole text and lexes it from scratch.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.relex_all();
    }

    /// Switches to another grammar and lexes the text from scratch.
    pub fn set_grammar(&mut self, grammar: Arc<Grammar<K>>) {
        self.grammar = grammar;
        self.relex_all();
    }

    /// Replaces `removed` bytes at `start` with `inserted` and brings tokens
    /// and tree up to date.
    ///
    /// Fails only if the range lies outside the text or does not fall on
    /// character boundaries; the document is then left untouched.
    pub fn apply_edit(
        &mut self,
        start: usize,
        removed: usize,
        inserted: &str,
    ) -> Result<EditSummary, EditError> {
        let end = self.check_range(start, removed)?;
        Ok(self.replace(start, end, inserted))
    }

    /// Applies several edits, all given in offsets of the current text.
    ///
    /// The edits must not overlap; two edits at the same offset count as
    /// overlapping. They are applied from the back of the text to the
    /// front and their summaries are returned in that order, so mapping an
    /// offset through the summaries in turn follows it across the batch.
    /// Nothing is applied if any edit is invalid.
    pub fn apply_edits(
        &mut self,
        edits: impl IntoIterator<Item = Edit>,
    ) -> Result<Vec<EditSummary>, EditError> {
        let mut edits: Vec<Edit> = edits.into_iter().collect();
        for edit in &edits {
            self.check_range(edit.start, edit.removed)?;
        }
        edits.sort_by_key(|edit| edit.start);
        for pair in edits.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            if first.range().end > second.start || first.start == second.start {
                return Err(EditError::Overlapping {
                    first: first.range(),
                    second: second.range(),
                });
            }
        }

        Ok(edits
            .iter()
            .rev()
            .map(|edit| self.replace(edit.start, edit.start + edit.removed, &edit.inserted))
            .collect())
    }

    /// The token covering `offset`, if the offset is inside the text.
    pub fn token_at(&self, offset: usize) -> Option<TokenRef<'_, K>> {
        self.tokens_in_range(offset..offset.saturating_add(1)).next()
    }

    /// Tokens overlapping `range`, in order. An empty range yields the
    /// token it falls strictly inside, if any.
    pub fn tokens_in_range(&self, range: Range<usize>) -> Tokens<'_, K> {
        let line = self.line_of(range.start);
        let base = self.lines[line].start;
        let slot = self.lines[line]
            .tokens
            .partition_point(|token| base + token.end() <= range.start);
        Tokens {
            document: self,
            line,
            slot,
            range,
        }
    }

    /// All tokens, in order.
    pub fn tokens(&self) -> Tokens<'_, K> {
        Tokens {
            document: self,
            line: 0,
            slot: 0,
            range: 0..usize::MAX,
        }
    }

    /// The token with sequence number `index`.
    pub fn token(&self, index: usize) -> Option<TokenRef<'_, K>> {
        self.tokens_from(index).next()
    }

    /// Tokens from sequence number `index` onward.
    pub fn tokens_from(&self, index: usize) -> Tokens<'_, K> {
        let line = self
            .lines
            .partition_point(|line| line.first_token + line.tokens.len() <= index);
        let slot = self
            .lines
            .get(line)
            .map_or(0, |line| index.saturating_sub(line.first_token));
        Tokens {
            document: self,
            line,
            slot,
            range: 0..usize::MAX,
        }
    }

    /// Line and column of `offset`. Offsets past the end map to the end;
    /// offsets inside a character map to its start.
    pub fn position_of(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_of(offset);
        let start = self.lines[line].start;
        let column = self.text[start..offset].chars().count() + 1;
        Position::at(line + 1, column, offset)
    }

    /// Index of the line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.lines
            .partition_point(|line| line.start <= offset)
            .saturating_sub(1)
    }

    /// Byte range of line `line`, including its newline.
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        self.lines.get(line).map(|line| line.start..line.end())
    }

    /// The tokens of line `line`, with spans relative to the line start.
    pub fn line_tokens(&self, line: usize) -> Option<&[Token<K>]> {
        self.lines.get(line).map(|line| &line.tokens[..])
    }

    /// The state stack line `line` starts in.
    pub fn state_at_line(&self, line: usize) -> Option<StateStack> {
        match line {
            0 => Some(self.grammar.initial_stack()),
            _ => self
                .lines
                .get(line - 1)
                .map(|previous| previous.end_state.clone()),
        }
    }

    fn check_range(&self, start: usize, removed: usize) -> Result<usize, EditError> {
        let len = self.text.len();
        let end = start
            .checked_add(removed)
            .filter(|end| *end <= len)
            .ok_or(EditError::OutOfBounds {
                start,
                end: start.saturating_add(removed),
                len,
            })?;
        for offset in [start, end] {
            if !self.text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary(offset));
            }
        }
        Ok(end)
    }

    fn start_state(&self, line: usize) -> StateStack {
        self.state_at_line(line)
            .unwrap_or_else(|| self.grammar.initial_stack())
    }

    fn relex_all(&mut self) {
        let mut lines = Vec::new();
        let mut state = self.grammar.initial_stack();
        let mut offset = 0;
        let mut first_token = 0;
        loop {
            let mut line = Line::lex(&self.grammar, &self.text, offset, state);
            line.first_token = first_token;
            first_token += line.tokens.len();
            offset = line.end();
            state = line.end_state.clone();
            let more = line.has_newline(&self.text);
            lines.push(line);
            if !more {
                break;
            }
        }
        self.lines = lines;
        self.token_count = first_token;

        let mut builder = TreeBuilder::new(self.grammar.initial_stack());
        for token in self.tokens() {
            builder.push(token.index(), token.span(), token.state(), token.scope());
        }
        self.tree = builder.finish();
        self.tree
            .set_root_extent(Span::new(0, self.text.len()), self.token_count);

        tracing::debug!(
            grammar = self.grammar.name(),
            lines = self.lines.len(),
            tokens = self.token_count,
            "document.lexed"
        );
    }

    /// Replaces `start..end` with `inserted`; the range is already checked.
    fn replace(&mut self, start: usize, end: usize, inserted: &str) -> EditSummary {
        let old_count = self.token_count;
        let first = self.line_of(start);
        let last = self.line_of(end);
        let anchor = self.lines[first].start;
        let delta = inserted.len() as isize - (end - start) as isize;
        let region_end = self.lines[last].end().wrapping_add_signed(delta);

        self.text.replace_range(start..end, inserted);

        let mut state = self.start_state(first);
        let mut offset = anchor;
        let mut relexed: Vec<Line<K>> = Vec::new();
        let mut next_old = last + 1;
        let mut compared = 0;
        let mut comparing = true;
        let mut resynced = false;
        let mut exhausted = false;
        loop {
            // Past the edited lines every boundary is the shifted start of
            // old line `next_old`.
            if offset >= region_end {
                if next_old >= self.lines.len() {
                    break;
                }
                if comparing {
                    if self.lines[next_old - 1].end_state == state {
                        resynced = true;
                        break;
                    }
                    compared += 1;
                    if compared > self.config.resync_lookahead {
                        tracing::warn!(
                            line = next_old,
                            lookahead = self.config.resync_lookahead,
                            "document.resync_lookahead_exhausted"
                        );
                        comparing = false;
                        exhausted = true;
                    }
                }
                next_old += 1;
            }
            let line = Line::lex(&self.grammar, &self.text, offset, state);
            offset = line.end();
            state = line.end_state.clone();
            relexed.push(line);
        }
        if !resynced
            && relexed
                .last()
                .map_or(true, |line| line.has_newline(&self.text))
        {
            relexed.push(Line::lex(&self.grammar, &self.text, offset, state));
        }

        let old_tokens = self.lines[first].first_token
            ..self
                .lines
                .get(next_old)
                .map_or(old_count, |line| line.first_token);
        let mut index = old_tokens.start;
        for line in &mut relexed {
            line.first_token = index;
            index += line.tokens.len();
        }
        let new_tokens = old_tokens.start..index;
        let token_delta = new_tokens.len() as isize - old_tokens.len() as isize;
        let relexed_lines = first..first + relexed.len();
        let relexed_bytes = anchor..relexed.last().map_or(anchor, Line::end);

        self.lines.splice(first..next_old, relexed);
        for line in &mut self.lines[relexed_lines.end..] {
            line.start = line.start.wrapping_add_signed(delta);
            line.first_token = line.first_token.wrapping_add_signed(token_delta);
        }
        self.token_count = old_count.wrapping_add_signed(token_delta);

        let regrouped = self.update_tree(old_tokens, old_count, delta, token_delta);

        tracing::debug!(
            start,
            removed = end - start,
            inserted = inserted.len(),
            anchor_line = first,
            relexed_lines = relexed_lines.len(),
            token_delta,
            resynced,
            "document.edit"
        );

        EditSummary {
            start,
            removed: end - start,
            inserted: inserted.len(),
            relexed: relexed_bytes,
            relexed_lines,
            tokens: new_tokens,
            resynced,
            lookahead_exhausted: exhausted,
            regrouped,
        }
    }

    /// Rebuilds the part of the tree the replaced tokens `old_tokens`
    /// (indices before the edit) can affect and moves what follows.
    ///
    /// The rebuild happens inside the innermost node holding the tokens
    /// just before and just after the replaced run, as long as a build from
    /// scratch would keep the new tokens inside that node; otherwise it
    /// moves out one level at a time, up to the root. Returns the indices
    /// of the regrouped tokens.
    fn update_tree(
        &mut self,
        old_tokens: Range<usize>,
        old_count: usize,
        delta: isize,
        token_delta: isize,
    ) -> Range<usize> {
        let before = old_tokens.start.checked_sub(1);
        let after = (old_tokens.end < old_count).then_some(old_tokens.end);
        let mut path = self.tree.path_between(before, after);
        let (window, children, regrouped) = loop {
            let window = self.tree.window(&path, before, after);
            let count = window.tokens.len().wrapping_add_signed(token_delta);
            let regrouped = window.tokens.start..window.tokens.start + count;
            let tokens = self.tokens_from(window.tokens.start).take(count);
            if window.is_root() || window.admits(tokens.clone().map(|t| (t.state(), t.scope()))) {
                let mut builder = TreeBuilder::within(&window);
                for token in tokens {
                    builder.push(token.index(), token.span(), token.state(), token.scope());
                }
                break (window, builder.into_children(), regrouped);
            }
            path.pop();
        };
        tracing::trace!(
            depth = path.len() + 1,
            tokens = window.tokens.len(),
            "document.tree_window"
        );
        self.tree.splice(window, children, delta, token_delta);
        self.tree
            .set_root_extent(Span::new(0, self.text.len()), self.token_count);
        regrouped
    }
}

/// A token of a [`Document`], borrowed from it, with its span in document
/// offsets.
#[derive(Debug, Clone, Copy)]
pub struct TokenRef<'d, K> {
    index: usize,
    line: usize,
    base: usize,
    token: &'d Token<K>,
    text: &'d str,
}

impl<'d, K: TokenKind> TokenRef<'d, K> {
    /// Sequence number of the token in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index of the line holding the token.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn kind(&self) -> K {
        self.token.kind
    }

    pub fn span(&self) -> Span {
        self.token.span.offset_by(self.base)
    }

    pub fn start(&self) -> usize {
        self.base + self.token.start()
    }

    pub fn end(&self) -> usize {
        self.base + self.token.end()
    }

    pub fn text(&self) -> &'d str {
        &self.text[self.span().range()]
    }

    /// The state stack the token was matched in.
    pub fn state(&self) -> &'d StateStack {
        &self.token.state
    }

    /// The state stack of the block the token belongs to.
    pub fn scope(&self) -> &'d StateStack {
        &self.token.scope
    }

    pub fn depth(&self) -> usize {
        self.token.depth()
    }

    /// An owned copy with document offsets.
    pub fn to_token(&self) -> Token<K> {
        self.token.offset_by(self.base)
    }
}

/// Iterator over the tokens of a [`Document`], see
/// [`Document::tokens_in_range`].
///
/// Cloning it yields an independent iterator starting where this one is.
#[derive(Debug)]
pub struct Tokens<'d, K> {
    document: &'d Document<K>,
    line: usize,
    slot: usize,
    range: Range<usize>,
}

impl<K> Clone for Tokens<'_, K> {
    fn clone(&self) -> Self {
        Self {
            document: self.document,
            line: self.line,
            slot: self.slot,
            range: self.range.clone(),
        }
    }
}

impl<'d, K: TokenKind> Iterator for Tokens<'d, K> {
    type Item = TokenRef<'d, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        loop {
            let line = document.lines.get(self.line)?;
            let Some(token) = line.tokens.get(self.slot) else {
                self.line += 1;
                self.slot = 0;
                continue;
            };
            if !token.span.offset_by(line.start).overlaps(&self.range) {
                return None;
            }
            let item = TokenRef {
                index: line.first_token + self.slot,
                line: self.line,
                base: line.start,
                token,
                text: &document.text,
            };
            self.slot += 1;
            return Some(item);
        }
    }
}
