use document_framework::Document;
use lexer_framework::Lexer;
use lilypond_lexer::Mode;
use proptest::prelude::*;
use proptest::sample::Index;

fn fragment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("c4"),
        Just("es'"),
        Just(" "),
        Just("\n"),
        Just("{"),
        Just("}"),
        Just("<<"),
        Just(">>"),
        Just("<"),
        Just(">"),
        Just("#"),
        Just("#("),
        Just(")"),
        Just("#{"),
        Just("#}"),
        Just("\""),
        Just("\\markup"),
        Just("\\bold"),
        Just("%{"),
        Just("%}"),
        Just("% x"),
        Just(";"),
        Just("define"),
        Just("é"),
        Just("<p a=b>"),
        Just("<lilypond>"),
        Just("</lilypond>"),
        Just("<!--"),
        Just("-->"),
        Just("&amp;"),
        Just("'"),
        Just("@lilypond"),
        Just("@end lilypond"),
        Just("@emph{"),
        Just("@c x"),
        Just("@ignore"),
        Just("@end ignore"),
    ]
}

fn source(max: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(fragment(), 0..max).prop_map(|parts| parts.concat())
}

fn floor_boundary(text: &str, mut offset: usize) -> usize {
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn prop_every_mode_covers_input(text in source(60)) {
        for mode in Mode::ALL {
            let grammar = mode.grammar().unwrap();
            let mut end = 0;
            for token in Lexer::new(&grammar, &text) {
                prop_assert_eq!(token.start(), end);
                prop_assert!(token.end() > token.start());
                end = token.end();
            }
            prop_assert_eq!(end, text.len());
        }
    }

    #[test]
    fn prop_edits_match_fresh_lex(
        mode in proptest::sample::select(Mode::ALL.to_vec()),
        text in source(40),
        edits in proptest::collection::vec((any::<Index>(), 0usize..8, source(4)), 1..8),
    ) {
        let grammar = mode.grammar().unwrap();
        let mut document = Document::new(grammar.clone(), text);
        for (at, removed, inserted) in edits {
            let len = document.len();
            let start = floor_boundary(document.text(), at.index(len + 1));
            let end = floor_boundary(document.text(), (start + removed).min(len));
            document.apply_edit(start, end - start, &inserted).unwrap();

            let fresh = Document::new(grammar.clone(), document.text());
            let ours: Vec<_> = document.tokens().map(|t| t.to_token()).collect();
            let theirs: Vec<_> = fresh.tokens().map(|t| t.to_token()).collect();
            prop_assert_eq!(ours, theirs);
            prop_assert_eq!(document.tree(), fresh.tree());
        }
    }
}
