use common_framework::Span;
use lexer_framework::{StateStack, Token};
use std::ops::Range;

/// Stored form of a node. Byte offsets and token indices are relative to
/// the parent node, so moving a block moves everything under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    scope: StateStack,
    offset: usize,
    len: usize,
    first: usize,
    count: usize,
    children: Vec<Block>,
}

impl Block {
    fn shift(&mut self, bytes: isize, tokens: isize) {
        self.offset = self.offset.wrapping_add_signed(bytes);
        self.first = self.first.wrapping_add_signed(tokens);
    }

    fn grow(&mut self, bytes: isize, tokens: isize) {
        self.len = self.len.wrapping_add_signed(bytes);
        self.count = self.count.wrapping_add_signed(tokens);
    }
}

/// A contiguous run of tokens lexed inside one nested state, borrowed from
/// its [`TokenTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode<'t> {
    block: &'t Block,
    start: usize,
    first: usize,
}

impl<'t> TreeNode<'t> {
    fn new(block: &'t Block, parent_start: usize, parent_first: usize) -> Self {
        Self {
            block,
            start: parent_start + block.offset,
            first: parent_first + block.first,
        }
    }

    /// The state stack shared by every token directly inside this node.
    pub fn scope(&self) -> &'t StateStack {
        &self.block.scope
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.start + self.block.len)
    }

    /// Indices of all tokens under this node.
    pub fn tokens(&self) -> Range<usize> {
        self.first..self.first + self.block.count
    }

    /// Nesting depth; the root has depth 1.
    pub fn depth(&self) -> usize {
        self.block.scope.depth()
    }

    /// Token leaves and child nodes, in text order.
    pub fn children(&self) -> Children<'t> {
        Children {
            node: *self,
            token: self.first,
            child: 0,
        }
    }

    /// Child nodes, skipping token leaves.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = TreeNode<'t>> + ExactSizeIterator {
        let (start, first) = (self.start, self.first);
        self.block
            .children
            .iter()
            .map(move |block| TreeNode::new(block, start, first))
    }

    fn child(&self, position: usize) -> TreeNode<'t> {
        TreeNode::new(&self.block.children[position], self.start, self.first)
    }

    /// Position of the child node holding token `index`.
    fn child_holding(&self, index: usize) -> Option<usize> {
        let relative = index.checked_sub(self.first)?;
        let children = &self.block.children;
        let position = children.partition_point(|block| block.first + block.count <= relative);
        children
            .get(position)
            .filter(|block| block.first <= relative)
            .map(|_| position)
    }

    /// The child node whose span contains `offset`.
    fn child_at(&self, offset: usize) -> Option<TreeNode<'t>> {
        let relative = offset.checked_sub(self.start)?;
        let children = &self.block.children;
        let position = children.partition_point(|block| block.offset + block.len <= relative);
        children
            .get(position)
            .filter(|block| block.offset <= relative)
            .map(|_| self.child(position))
    }
}

/// A leaf or a nested block inside a [`TreeNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeChild<'t> {
    /// A token, by its index in the document's token sequence.
    Token(usize),
    Node(TreeNode<'t>),
}

/// Iterator over the children of a [`TreeNode`].
#[derive(Debug, Clone)]
pub struct Children<'t> {
    node: TreeNode<'t>,
    token: usize,
    child: usize,
}

impl<'t> Iterator for Children<'t> {
    type Item = TreeChild<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.token >= self.node.tokens().end {
            return None;
        }
        if let Some(block) = self.node.block.children.get(self.child) {
            if self.node.first + block.first == self.token {
                self.child += 1;
                self.token += block.count;
                return Some(TreeChild::Node(TreeNode::new(
                    block,
                    self.node.start,
                    self.node.first,
                )));
            }
        }
        let index = self.token;
        self.token += 1;
        Some(TreeChild::Token(index))
    }
}

/// The depth a token keeps open: a token that enters a state is matched
/// one level above the block it opens.
fn kept_depth(state: &StateStack, scope: &StateStack) -> usize {
    if scope.depth() > state.depth() {
        state.depth()
    } else {
        scope.depth()
    }
}

/// A node under construction. Children keep their absolute start and first
/// token until this node closes.
#[derive(Debug)]
struct Open {
    scope: StateStack,
    start: usize,
    end: usize,
    first: usize,
    count: usize,
    children: Vec<Block>,
}

impl Open {
    fn new(scope: StateStack, start: usize, first: usize) -> Self {
        Self {
            scope,
            start,
            end: start,
            first,
            count: 0,
            children: Vec::new(),
        }
    }

    fn depth(&self) -> usize {
        self.scope.depth()
    }

    fn into_block(self) -> Block {
        let mut children = self.children;
        for child in &mut children {
            child.offset -= self.start;
            child.first -= self.first;
        }
        Block {
            scope: self.scope,
            offset: self.start,
            len: self.end - self.start,
            first: self.first,
            count: self.count,
            children,
        }
    }
}

/// Groups a token sequence by nesting depth.
///
/// Tokens are fed in order with [`push`](Self::push). A token whose scope is
/// deeper than the innermost open node opens nodes down to its depth; a
/// token that belongs to a shallower or different scope closes nodes first.
/// A token that enters a state also closes whatever was open at its own
/// depth, so two adjacent blocks of the same kind stay separate.
#[derive(Debug)]
pub struct TreeBuilder {
    stack: Vec<Open>,
}

impl TreeBuilder {
    pub fn new(root_scope: StateStack) -> Self {
        Self {
            stack: vec![Open::new(root_scope, 0, 0)],
        }
    }

    /// A builder for the children of the node a [`Window`] lies in.
    pub(crate) fn within(window: &Window) -> Self {
        Self {
            stack: vec![Open::new(window.scope.clone(), window.start, window.first)],
        }
    }

    /// Adds the token with sequence number `index`.
    ///
    /// `state` is the stack the token was matched in and `scope` the stack
    /// of the block it belongs to (see [`Token`]).
    pub fn push(&mut self, index: usize, span: Span, state: &StateStack, scope: &StateStack) {
        let keep = kept_depth(state, scope);
        while self.stack.len() > 1 {
            let open = self.innermost();
            if open.depth() <= keep && open.scope.is_prefix_of(scope) {
                break;
            }
            self.close();
        }

        let mut depth = self.innermost().depth();
        while depth < scope.depth() {
            depth += 1;
            self.stack
                .push(Open::new(scope.truncated(depth), span.start, index));
        }

        let open = self.innermost_mut();
        open.end = span.end;
        open.count += 1;
    }

    /// Closes every open node and returns the tree.
    pub fn finish(self) -> TokenTree {
        TokenTree {
            root: self.into_root(),
        }
    }

    pub(crate) fn into_children(self) -> Vec<Block> {
        self.into_root().children
    }

    fn into_root(mut self) -> Block {
        while self.stack.len() > 1 {
            self.close();
        }
        let root = self.stack.remove(0);
        root.into_block()
    }

    fn close(&mut self) {
        if let Some(open) = self.stack.pop() {
            let block = open.into_block();
            let parent = self.innermost_mut();
            parent.end = block.offset + block.len;
            parent.count += block.count;
            parent.children.push(block);
        }
    }

    fn innermost(&self) -> &Open {
        &self.stack[self.stack.len() - 1]
    }

    fn innermost_mut(&mut self) -> &mut Open {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

/// The children of one node that an edit forces to be rebuilt.
#[derive(Debug, Clone)]
pub(crate) struct Window {
    /// Child positions leading from the root to the node.
    path: Vec<usize>,
    /// Positions of the affected children.
    children: Range<usize>,
    /// Indices of the tokens under those children, before the edit.
    pub(crate) tokens: Range<usize>,
    scope: StateStack,
    start: usize,
    first: usize,
}

impl Window {
    pub(crate) fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether a build from scratch keeps the tokens, given as
    /// `(state, scope)` pairs in order, inside the window's node.
    ///
    /// The first token is known to stay: it precedes the edit.
    pub(crate) fn admits<'a>(
        &self,
        tokens: impl IntoIterator<Item = (&'a StateStack, &'a StateStack)>,
    ) -> bool {
        let depth = self.scope.depth();
        tokens.into_iter().enumerate().all(|(i, (state, scope))| {
            self.scope.is_prefix_of(scope) && (i == 0 || kept_depth(state, scope) >= depth)
        })
    }
}

/// The nested structure of a token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTree {
    root: Block,
}

impl TokenTree {
    pub fn root(&self) -> TreeNode<'_> {
        TreeNode::new(&self.root, 0, 0)
    }

    /// The greatest nesting depth of any node; 1 for a flat sequence.
    pub fn depth(&self) -> usize {
        self.nodes().map(|node| node.depth()).max().unwrap_or(1)
    }

    /// The innermost node whose span contains `offset`, or the root.
    pub fn node_at(&self, offset: usize) -> TreeNode<'_> {
        let mut node = self.root();
        while let Some(child) = node.child_at(offset) {
            node = child;
        }
        node
    }

    /// All nodes in pre-order, starting with the root.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            pending: vec![self.root()],
        }
    }

    /// Child positions down to the innermost node holding both tokens.
    ///
    /// `before` is the last token kept ahead of an edit and `after` the
    /// first token kept behind it; without either the root is returned.
    pub(crate) fn path_between(&self, before: Option<usize>, after: Option<usize>) -> Vec<usize> {
        let mut path = Vec::new();
        let (Some(before), Some(after)) = (before, after) else {
            return path;
        };
        let mut node = self.root();
        while let Some(position) = node.child_holding(before) {
            let child = node.child(position);
            if !child.tokens().contains(&after) {
                break;
            }
            path.push(position);
            node = child;
        }
        path
    }

    /// The children of the node at `path` from the one holding `before`
    /// through the one holding `after`.
    pub(crate) fn window(&self, path: &[usize], before: Option<usize>, after: Option<usize>) -> Window {
        let mut node = self.root();
        for &position in path {
            node = node.child(position);
        }
        let blocks = &node.block.children;
        let starting_after =
            |index: usize| blocks.partition_point(|block| node.first + block.first <= index);

        let (child_start, token_start) = match before {
            Some(before) => match node.child_holding(before) {
                Some(position) => (position, node.child(position).tokens().start),
                None => (starting_after(before), before),
            },
            None => (0, node.first),
        };
        let (child_end, token_end) = match after {
            Some(after) => match node.child_holding(after) {
                Some(position) => (position + 1, node.child(position).tokens().end),
                None => (starting_after(after), after + 1),
            },
            None => (blocks.len(), node.tokens().end),
        };

        Window {
            path: path.to_vec(),
            children: child_start..child_end,
            tokens: token_start..token_end,
            scope: node.block.scope.clone(),
            start: node.start,
            first: node.first,
        }
    }

    /// Puts `children` in place of the window's children and moves or
    /// resizes everything after them and around them by `bytes` and
    /// `tokens`.
    pub(crate) fn splice(&mut self, window: Window, children: Vec<Block>, bytes: isize, tokens: isize) {
        let mut block = &mut self.root;
        for &position in &window.path {
            let current = block;
            current.grow(bytes, tokens);
            for later in &mut current.children[position + 1..] {
                later.shift(bytes, tokens);
            }
            block = &mut current.children[position];
        }
        block.grow(bytes, tokens);
        let end = window.children.start + children.len();
        block.children.splice(window.children, children);
        for later in &mut block.children[end..] {
            later.shift(bytes, tokens);
        }
    }

    pub(crate) fn set_root_extent(&mut self, span: Span, count: usize) {
        self.root.offset = span.start;
        self.root.len = span.len();
        self.root.count = count;
    }
}

/// Pre-order iterator over the nodes of a [`TokenTree`].
#[derive(Debug, Clone)]
pub struct Nodes<'t> {
    pending: Vec<TreeNode<'t>>,
}

impl<'t> Iterator for Nodes<'t> {
    type Item = TreeNode<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        self.pending.extend(node.nodes().rev());
        Some(node)
    }
}

/// Builds the tree of a freshly lexed token sequence.
pub fn build_tree<'t, K: Copy + 't>(
    tokens: impl IntoIterator<Item = &'t Token<K>>,
    root_scope: StateStack,
) -> TokenTree {
    let mut builder = TreeBuilder::new(root_scope);
    for (index, token) in tokens.into_iter().enumerate() {
        builder.push(index, token.span, &token.state, &token.scope);
    }
    builder.finish()
}
