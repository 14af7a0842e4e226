mod common;

use common::{assert_covers, embed_grammar, Toy};
use lexer_framework::{Lexer, TokenKind};

#[test]
fn test_embedded_blocks_depth_sequence() {
    let grammar = embed_grammar();
    let text = "a #{ (b #{ c #} ) #} d";
    let tokens = Lexer::new(&grammar, text).tokenize();
    assert_covers(&tokens, text);

    let visible: Vec<_> = tokens
        .iter()
        .filter(|t| !t.kind.is_whitespace() && t.text(text) != "(")
        .collect();
    let texts: Vec<&str> = visible.iter().map(|t| t.text(text)).collect();
    let depths: Vec<usize> = visible.iter().map(|t| t.depth()).collect();

    assert_eq!(texts, vec!["a", "#{", "b", "#{", "c", "#}", ")", "#}", "d"]);
    assert_eq!(depths, vec![1, 2, 2, 3, 3, 3, 2, 2, 1]);
}

#[test]
fn test_embedded_blocks_state_names() {
    let grammar = embed_grammar();
    let text = "#{#{x";
    let tokens = Lexer::new(&grammar, text).tokenize();
    assert_eq!(
        tokens[2].scope.names(&grammar),
        vec!["outer", "inner", "outer"]
    );
    // Equal sequences compare equal regardless of where they were built.
    assert_eq!(
        tokens[2].scope,
        grammar.stack_of(&["outer", "inner", "outer"]).unwrap()
    );
}

#[test]
fn test_open_and_close_share_scope() {
    let grammar = embed_grammar();
    let text = "x #{ y #} z";
    let tokens = Lexer::new(&grammar, text).tokenize();
    let open = tokens.iter().find(|t| t.kind == Toy::Open).unwrap();
    let close = tokens.iter().find(|t| t.kind == Toy::Close).unwrap();
    assert_eq!(open.scope, close.scope);
    assert_eq!(open.kind.match_role(), Some(lexer_framework::MatchRole::Open("embed")));
    assert_eq!(close.kind.match_role(), Some(lexer_framework::MatchRole::Close("embed")));
}
