#![allow(dead_code)]

use lexer_framework::{Grammar, MatchRole, Rule, StateOptions, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toy {
    Word,
    Keyword,
    Number,
    Space,
    Open,
    Close,
    Paren,
    Hash,
    Unknown,
}

impl TokenKind for Toy {
    fn name(&self) -> &'static str {
        match self {
            Toy::Word => "word",
            Toy::Keyword => "keyword",
            Toy::Number => "number",
            Toy::Space => "space",
            Toy::Open => "open",
            Toy::Close => "close",
            Toy::Paren => "paren",
            Toy::Hash => "hash",
            Toy::Unknown => "unknown",
        }
    }

    fn is_whitespace(&self) -> bool {
        matches!(self, Toy::Space)
    }

    fn is_error(&self) -> bool {
        matches!(self, Toy::Unknown)
    }

    fn match_role(&self) -> Option<MatchRole> {
        match self {
            Toy::Open => Some(MatchRole::Open("embed")),
            Toy::Close => Some(MatchRole::Close("embed")),
            _ => None,
        }
    }
}

/// Two states that embed each other with `#{ ... #}`.
pub fn embed_grammar() -> Grammar<Toy> {
    let mut builder = Grammar::builder("embed");
    builder
        .define_state(
            "outer",
            vec![
                Rule::regex(r"\s+", Toy::Space),
                Rule::literal("#{", Toy::Open).push("inner"),
                Rule::literal("#}", Toy::Close).pop(),
                Rule::regex(r"[a-z]+", Toy::Word),
            ],
            Toy::Unknown,
        )
        .unwrap();
    builder
        .define_state(
            "inner",
            vec![
                Rule::regex(r"\s+", Toy::Space),
                Rule::literal("#{", Toy::Open).push("outer"),
                Rule::literal("#}", Toy::Close).pop(),
                Rule::regex(r"[()]", Toy::Paren),
                Rule::regex(r"[a-z]+", Toy::Word),
            ],
            Toy::Unknown,
        )
        .unwrap();
    builder.build().unwrap()
}

fn keyword(text: &str) -> Option<Toy> {
    matches!(text, "define" | "lambda").then_some(Toy::Keyword)
}

/// `#` introduces one expression: a word, a number or a parenthesized list.
pub fn argument_grammar() -> Grammar<Toy> {
    let mut builder = Grammar::builder("argument");
    builder
        .define_state(
            "main",
            vec![
                Rule::regex(r"\s+", Toy::Space),
                Rule::literal("#", Toy::Hash).push("expr"),
                Rule::regex(r"[a-z]+", Toy::Word),
            ],
            Toy::Unknown,
        )
        .unwrap();
    builder
        .define_state_with(
            "expr",
            vec![
                Rule::literal("(", Toy::Paren).push("list"),
                Rule::regex(r"[a-z]+", Toy::Word)
                    .classify(keyword)
                    .ends_argument(),
                Rule::regex(r"[0-9]+", Toy::Number).ends_argument(),
            ],
            Toy::Unknown,
            StateOptions::single_argument().fallthrough(),
        )
        .unwrap();
    builder
        .define_state(
            "list",
            vec![
                Rule::regex(r"\s+", Toy::Space),
                Rule::literal("(", Toy::Paren).push("list"),
                Rule::literal(")", Toy::Paren).pop().ends_argument(),
                Rule::literal("#", Toy::Hash).push("expr"),
                Rule::regex(r"[a-z]+", Toy::Word).classify(keyword),
                Rule::regex(r"[0-9]+", Toy::Number),
            ],
            Toy::Unknown,
        )
        .unwrap();
    builder.build().unwrap()
}

/// Asserts that the token spans are contiguous and cover `text` exactly.
pub fn assert_covers<K: TokenKind>(tokens: &[lexer_framework::Token<K>], text: &str) {
    let mut offset = 0;
    for token in tokens {
        assert_eq!(token.start(), offset, "gap or overlap before {token:?}");
        assert!(!token.is_empty(), "empty token {token:?}");
        offset = token.end();
    }
    assert_eq!(offset, text.len());
}
