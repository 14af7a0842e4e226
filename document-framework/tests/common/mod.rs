#![allow(dead_code)]

use document_framework::Document;
use lexer_framework::{Grammar, Rule, StateOptions, Token, TokenKind};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Word,
    Number,
    Space,
    Comment,
    String,
    Escape,
    Open,
    Close,
    Paren,
    Hash,
    Unknown,
}

impl TokenKind for Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Word => "word",
            Kind::Number => "number",
            Kind::Space => "space",
            Kind::Comment => "comment",
            Kind::String => "string",
            Kind::Escape => "escape",
            Kind::Open => "open",
            Kind::Close => "close",
            Kind::Paren => "paren",
            Kind::Hash => "hash",
            Kind::Unknown => "unknown",
        }
    }

    fn is_whitespace(&self) -> bool {
        matches!(self, Kind::Space)
    }

    fn is_comment(&self) -> bool {
        matches!(self, Kind::Comment)
    }

    fn is_error(&self) -> bool {
        matches!(self, Kind::Unknown)
    }
}

fn shared(close: Rule<Kind>) -> Vec<Rule<Kind>> {
    vec![
        Rule::regex(r"\s+", Kind::Space),
        Rule::literal("%{", Kind::Comment).push("comment"),
        Rule::regex(r"%[^\n]*", Kind::Comment),
        Rule::literal("#{", Kind::Open).push("inner"),
        close,
        Rule::literal("#", Kind::Hash).push("expr"),
        Rule::literal("\"", Kind::String).push("string"),
        Rule::regex(r"[()]", Kind::Paren),
        Rule::regex(r"[a-z]+", Kind::Word),
        Rule::regex(r"[0-9]+", Kind::Number),
    ]
}

/// Words and numbers with `%` line comments, `%{ %}` block comments,
/// strings, `#{ #}` embedded blocks and `#` single-item expressions.
pub fn grammar() -> Arc<Grammar<Kind>> {
    let mut builder = Grammar::builder("toy");
    builder
        .define_state(
            "outer",
            shared(Rule::literal("#}", Kind::Close)),
            Kind::Unknown,
        )
        .unwrap();
    builder
        .define_state(
            "inner",
            shared(Rule::literal("#}", Kind::Close).pop()),
            Kind::Unknown,
        )
        .unwrap();
    builder
        .define_state(
            "comment",
            vec![
                Rule::literal("%}", Kind::Comment).pop(),
                Rule::regex(r"[^%]+", Kind::Comment),
            ],
            Kind::Comment,
        )
        .unwrap();
    builder
        .define_state(
            "string",
            vec![
                Rule::literal("\"", Kind::String).pop().ends_argument(),
                Rule::regex(r"\\.", Kind::Escape),
                Rule::regex(r#"[^"\\]+"#, Kind::String),
            ],
            Kind::String,
        )
        .unwrap();
    builder
        .define_state_with(
            "expr",
            vec![
                Rule::regex(r"[a-z]+", Kind::Word).ends_argument(),
                Rule::regex(r"[0-9]+", Kind::Number).ends_argument(),
                Rule::literal("\"", Kind::String).push("string"),
                Rule::literal("#{", Kind::Open).push("inner"),
            ],
            Kind::Unknown,
            StateOptions::single_argument().fallthrough(),
        )
        .unwrap();
    Arc::new(builder.build().unwrap())
}

/// Owned copies of every token, in document offsets.
pub fn snapshot(document: &Document<Kind>) -> Vec<Token<Kind>> {
    document.tokens().map(|token| token.to_token()).collect()
}

/// Checks `document` against one lexed from scratch.
pub fn assert_consistent(document: &Document<Kind>) {
    let fresh = Document::new(Arc::clone(document.grammar()), document.text());
    let tokens = snapshot(document);

    let mut offset = 0;
    for token in &tokens {
        assert_eq!(token.start(), offset, "gap or overlap before {token:?}");
        assert!(!token.is_empty());
        offset = token.end();
    }
    assert_eq!(offset, document.len());

    assert_eq!(tokens, snapshot(&fresh));
    assert_eq!(document.token_count(), fresh.token_count());
    assert_eq!(document.line_count(), fresh.line_count());
    for line in 0..document.line_count() {
        assert_eq!(document.state_at_line(line), fresh.state_at_line(line));
        assert_eq!(document.line_range(line), fresh.line_range(line));
    }
    assert_eq!(document.tree(), fresh.tree());
}
