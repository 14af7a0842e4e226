mod common;

use common::{assert_consistent, grammar};
use document_framework::{Bias, Document, DocumentConfig};
use proptest::prelude::*;
use proptest::sample::Index;

fn fragment() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("#{"),
        Just("#}"),
        Just("#"),
        Just("%{"),
        Just("%}"),
        Just("% note"),
        Just("\""),
        Just("\\"),
        Just("("),
        Just(")"),
        Just(" "),
        Just("\n"),
        Just("ab"),
        Just("42"),
        Just("é"),
        Just("!"),
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
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_incremental_matches_fresh(
        text in source(40),
        edits in proptest::collection::vec((any::<Index>(), 0usize..12, source(6)), 1..10),
        lookahead in 0usize..4,
    ) {
        let config = DocumentConfig::default().with_resync_lookahead(lookahead);
        let mut document = Document::with_config(grammar(), text, config);
        for (at, removed, inserted) in edits {
            let len = document.len();
            let start = floor_boundary(document.text(), at.index(len + 1));
            let end = floor_boundary(document.text(), (start + removed).min(len));
            let summary = document.apply_edit(start, end - start, &inserted).unwrap();
            prop_assert_eq!(summary.map_offset(len, Bias::Right), document.len());
            assert_consistent(&document);
        }
    }

    #[test]
    fn prop_typing_from_empty_matches_fresh(text in source(30), split in any::<Index>()) {
        // Type the text in two chunks, the second in front of the first.
        let mut document = Document::new(grammar(), "");
        let cut = floor_boundary(&text, split.index(text.len() + 1));
        document.apply_edit(0, 0, &text[cut..]).unwrap();
        document.apply_edit(0, 0, &text[..cut]).unwrap();
        prop_assert_eq!(document.text(), text.as_str());
        assert_consistent(&document);
    }
}
