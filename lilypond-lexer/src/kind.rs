use lexer_framework::{MatchRole, TokenKind};

/// Every token kind the LilyPond, Scheme, HTML, Texinfo and text grammars
/// produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LyKind {
    Space,
    /// Input no rule of the active state accepts.
    Unparsed,

    Comment,
    BlockCommentStart,
    BlockComment,
    BlockCommentEnd,

    StringQuote,
    String,
    StringEscape,

    /// A reserved word such as `\header` or `\version`.
    Keyword,
    Command,
    Dynamic,
    /// `\markup` or `\markuplist`.
    Markup,
    MarkupCommand,
    MarkupWord,
    MarkupStart,
    MarkupEnd,

    Identifier,
    Note,
    Rest,
    Duration,
    Octave,
    Accidental,
    Articulation,
    Direction,
    Tie,
    Slur,
    PhrasingSlur,
    Beam,
    BarCheck,
    Delimiter,
    SequentialStart,
    SequentialEnd,
    SimultaneousStart,
    SimultaneousEnd,
    ChordStart,
    ChordEnd,

    /// The `#` or `$` introducing a Scheme expression.
    SchemeStart,
    SchemeOpenParen,
    SchemeCloseParen,
    SchemeVectorStart,
    SchemeQuote,
    SchemeDot,
    SchemeWord,
    SchemeKeyword,
    SchemeFunction,
    SchemeConstant,
    SchemeNumber,
    SchemeBool,
    SchemeChar,
    SchemeComment,
    SchemeBlockCommentStart,
    SchemeBlockComment,
    SchemeBlockCommentEnd,
    /// Start of embedded LilyPond: `#{` in Scheme, `<lilypond` in HTML,
    /// `@lilypond` in Texinfo.
    LilyPondStart,
    /// `#}`, `</lilypond>`, `@end lilypond` and the like.
    LilyPondEnd,

    /// `<div`: the name of an HTML tag with its opening bracket.
    TagStart,
    /// `>` or `/>`.
    TagEnd,
    AttributeName,
    AttributeValue,
    /// A character reference such as `&amp;` or a Texinfo escape like `@@`.
    Entity,
    /// `@node`, `@end` and the other Texinfo commands.
    TexinfoCommand,
    /// `@emph{` and other commands taking a braced argument.
    TexinfoBlockStart,
    TexinfoBlockEnd,
    Verbatim,

    Text,
}

impl LyKind {
    /// Returns true for kinds only produced inside Scheme code.
    pub fn is_scheme(&self) -> bool {
        matches!(
            self,
            LyKind::SchemeStart
                | LyKind::SchemeOpenParen
                | LyKind::SchemeCloseParen
                | LyKind::SchemeVectorStart
                | LyKind::SchemeQuote
                | LyKind::SchemeDot
                | LyKind::SchemeWord
                | LyKind::SchemeKeyword
                | LyKind::SchemeFunction
                | LyKind::SchemeConstant
                | LyKind::SchemeNumber
                | LyKind::SchemeBool
                | LyKind::SchemeChar
                | LyKind::SchemeComment
                | LyKind::SchemeBlockCommentStart
                | LyKind::SchemeBlockComment
                | LyKind::SchemeBlockCommentEnd
        )
    }
}

impl TokenKind for LyKind {
    fn name(&self) -> &'static str {
        match self {
            LyKind::Space => "space",
            LyKind::Unparsed => "unparsed",
            LyKind::Comment => "comment",
            LyKind::BlockCommentStart => "block-comment-start",
            LyKind::BlockComment => "block-comment",
            LyKind::BlockCommentEnd => "block-comment-end",
            LyKind::StringQuote => "string-quote",
            LyKind::String => "string",
            LyKind::StringEscape => "string-escape",
            LyKind::Keyword => "keyword",
            LyKind::Command => "command",
            LyKind::Dynamic => "dynamic",
            LyKind::Markup => "markup",
            LyKind::MarkupCommand => "markup-command",
            LyKind::MarkupWord => "markup-word",
            LyKind::MarkupStart => "markup-start",
            LyKind::MarkupEnd => "markup-end",
            LyKind::Identifier => "identifier",
            LyKind::Note => "note",
            LyKind::Rest => "rest",
            LyKind::Duration => "duration",
            LyKind::Octave => "octave",
            LyKind::Accidental => "accidental",
            LyKind::Articulation => "articulation",
            LyKind::Direction => "direction",
            LyKind::Tie => "tie",
            LyKind::Slur => "slur",
            LyKind::PhrasingSlur => "phrasing-slur",
            LyKind::Beam => "beam",
            LyKind::BarCheck => "bar-check",
            LyKind::Delimiter => "delimiter",
            LyKind::SequentialStart => "sequential-start",
            LyKind::SequentialEnd => "sequential-end",
            LyKind::SimultaneousStart => "simultaneous-start",
            LyKind::SimultaneousEnd => "simultaneous-end",
            LyKind::ChordStart => "chord-start",
            LyKind::ChordEnd => "chord-end",
            LyKind::SchemeStart => "scheme-start",
            LyKind::SchemeOpenParen => "scheme-open-paren",
            LyKind::SchemeCloseParen => "scheme-close-paren",
            LyKind::SchemeVectorStart => "scheme-vector-start",
            LyKind::SchemeQuote => "scheme-quote",
            LyKind::SchemeDot => "scheme-dot",
            LyKind::SchemeWord => "scheme-word",
            LyKind::SchemeKeyword => "scheme-keyword",
            LyKind::SchemeFunction => "scheme-function",
            LyKind::SchemeConstant => "scheme-constant",
            LyKind::SchemeNumber => "scheme-number",
            LyKind::SchemeBool => "scheme-bool",
            LyKind::SchemeChar => "scheme-char",
            LyKind::SchemeComment => "scheme-comment",
            LyKind::SchemeBlockCommentStart => "scheme-block-comment-start",
            LyKind::SchemeBlockComment => "scheme-block-comment",
            LyKind::SchemeBlockCommentEnd => "scheme-block-comment-end",
            LyKind::LilyPondStart => "lilypond-start",
            LyKind::LilyPondEnd => "lilypond-end",
            LyKind::TagStart => "tag-start",
            LyKind::TagEnd => "tag-end",
            LyKind::AttributeName => "attribute-name",
            LyKind::AttributeValue => "attribute-value",
            LyKind::Entity => "entity",
            LyKind::TexinfoCommand => "texinfo-command",
            LyKind::TexinfoBlockStart => "texinfo-block-start",
            LyKind::TexinfoBlockEnd => "texinfo-block-end",
            LyKind::Verbatim => "verbatim",
            LyKind::Text => "text",
        }
    }

    fn is_whitespace(&self) -> bool {
        matches!(self, LyKind::Space)
    }

    fn is_comment(&self) -> bool {
        matches!(
            self,
            LyKind::Comment
                | LyKind::BlockCommentStart
                | LyKind::BlockComment
                | LyKind::BlockCommentEnd
                | LyKind::SchemeComment
                | LyKind::SchemeBlockCommentStart
                | LyKind::SchemeBlockComment
                | LyKind::SchemeBlockCommentEnd
        )
    }

    fn is_error(&self) -> bool {
        matches!(self, LyKind::Unparsed)
    }

    fn match_role(&self) -> Option<MatchRole> {
        let role = match self {
            LyKind::SequentialStart => MatchRole::Open("sequential"),
            LyKind::SequentialEnd => MatchRole::Close("sequential"),
            LyKind::SimultaneousStart => MatchRole::Open("simultaneous"),
            LyKind::SimultaneousEnd => MatchRole::Close("simultaneous"),
            LyKind::ChordStart => MatchRole::Open("chord"),
            LyKind::ChordEnd => MatchRole::Close("chord"),
            LyKind::MarkupStart => MatchRole::Open("markup"),
            LyKind::MarkupEnd => MatchRole::Close("markup"),
            LyKind::SchemeOpenParen | LyKind::SchemeVectorStart => MatchRole::Open("scheme"),
            LyKind::SchemeCloseParen => MatchRole::Close("scheme"),
            LyKind::LilyPondStart => MatchRole::Open("lilypond"),
            LyKind::LilyPondEnd => MatchRole::Close("lilypond"),
            LyKind::BlockCommentStart => MatchRole::Open("comment"),
            LyKind::BlockCommentEnd => MatchRole::Close("comment"),
            LyKind::SchemeBlockCommentStart => MatchRole::Open("scheme-comment"),
            LyKind::SchemeBlockCommentEnd => MatchRole::Close("scheme-comment"),
            LyKind::TagStart => MatchRole::Open("tag"),
            LyKind::TagEnd => MatchRole::Close("tag"),
            LyKind::TexinfoBlockStart => MatchRole::Open("texinfo-block"),
            LyKind::TexinfoBlockEnd => MatchRole::Close("texinfo-block"),
            _ => return None,
        };
        Some(role)
    }
}
