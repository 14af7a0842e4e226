//! Printable views of a lexed document, used by the `ly-lex` tool.

use crate::kind::LyKind;
use document_framework::{Document, TreeNode};
use lexer_framework::TokenKind;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord<'d> {
    pub index: usize,
    pub kind: &'static str,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub text: &'d str,
    /// State names of the block the token belongs to, outermost first.
    pub scope: Vec<&'d str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRecord<'d> {
    pub scope: Vec<&'d str>,
    pub start: usize,
    pub end: usize,
    pub first_token: usize,
    pub token_count: usize,
    pub children: Vec<NodeRecord<'d>>,
}

/// One record per token, optionally leaving out whitespace.
pub fn token_records(document: &Document<LyKind>, skip_space: bool) -> Vec<TokenRecord<'_>> {
    let grammar = document.grammar();
    document
        .tokens()
        .filter(|token| !(skip_space && token.kind().is_whitespace()))
        .map(|token| {
            let position = document.position_of(token.start());
            TokenRecord {
                index: token.index(),
                kind: token.kind().name(),
                start: token.start(),
                end: token.end(),
                line: position.line,
                column: position.column,
                text: token.text(),
                scope: token.scope().names(grammar),
            }
        })
        .collect()
}

/// The block structure of the document; tokens are summarized by range.
pub fn tree_record(document: &Document<LyKind>) -> NodeRecord<'_> {
    node_record(document, document.tree().root())
}

fn node_record<'d>(document: &'d Document<LyKind>, node: TreeNode<'_>) -> NodeRecord<'d> {
    let tokens = node.tokens();
    NodeRecord {
        scope: node.scope().names(document.grammar()),
        start: node.span().start,
        end: node.span().end,
        first_token: tokens.start,
        token_count: tokens.len(),
        children: node.nodes().map(|child| node_record(document, child)).collect(),
    }
}

/// `line:column kind text`, one token per line.
pub fn format_tokens(records: &[TokenRecord<'_>]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{}:{}\t{}\t{:?}",
            record.line, record.column, record.kind, record.text
        );
    }
    out
}

/// An indented outline of the nested blocks.
pub fn format_tree(record: &NodeRecord<'_>) -> String {
    let mut out = String::new();
    write_node(&mut out, record, 0);
    out
}

fn write_node(out: &mut String, record: &NodeRecord<'_>, indent: usize) {
    let _ = writeln!(
        out,
        "{:indent$}{} {}..{} ({} tokens)",
        "",
        record.scope.last().copied().unwrap_or_default(),
        record.start,
        record.end,
        record.token_count,
        indent = indent * 2
    );
    for child in &record.children {
        write_node(out, child, indent + 1);
    }
}
