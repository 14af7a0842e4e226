//! State definitions for LilyPond, the Scheme embedded in it, the HTML and
//! Texinfo documents LilyPond is embedded in, and plain text.
//!
//! LilyPond and Scheme share one set of states and only differ in where
//! lexing starts:
//!
//! ```text
//! lilypond ─┬─ music ─── chord
//!           ├─ markup ── markup-group
//!           ├─ string
//!           ├─ block-comment
//!           └─ scheme-expr ─┬─ scheme-list ─ scheme-lilypond ─ (music items)
//!                           ├─ scheme-string
//!                           └─ scheme-block-comment
//! ```
//!
//! The HTML and Texinfo grammars add their own top states, which enter the
//! same music states inside `<lilypond>` and `@lilypond` blocks.

use crate::kind::LyKind;
use crate::words;
use lexer_framework::{Grammar, GrammarBuilder, GrammarError, Rule, StateOptions, Transition};

pub const LILYPOND: &str = "lilypond";
pub const MUSIC: &str = "music";
pub const CHORD: &str = "chord";
pub const STRING: &str = "string";
pub const BLOCK_COMMENT: &str = "block-comment";
pub const MARKUP: &str = "markup";
pub const MARKUP_GROUP: &str = "markup-group";
pub const SCHEME: &str = "scheme";
pub const SCHEME_EXPR: &str = "scheme-expr";
pub const SCHEME_LIST: &str = "scheme-list";
pub const SCHEME_STRING: &str = "scheme-string";
pub const SCHEME_BLOCK_COMMENT: &str = "scheme-block-comment";
pub const SCHEME_LILYPOND: &str = "scheme-lilypond";
pub const HTML: &str = "html";
pub const HTML_TAG: &str = "html-tag";
pub const HTML_VALUE: &str = "html-value";
pub const HTML_STRING: &str = "html-string";
pub const HTML_SINGLE_STRING: &str = "html-single-string";
pub const HTML_COMMENT: &str = "html-comment";
pub const HTML_LILYPOND_TAG: &str = "html-lilypond-tag";
pub const HTML_LILYPOND: &str = "html-lilypond";
pub const HTML_LILYPOND_INLINE: &str = "html-lilypond-inline";
pub const TEXINFO: &str = "texinfo";
pub const TEXINFO_BLOCK: &str = "texinfo-block";
pub const TEXINFO_IGNORE: &str = "texinfo-ignore";
pub const TEXINFO_VERBATIM: &str = "texinfo-verbatim";
pub const TEXINFO_LILYPOND_BLOCK: &str = "texinfo-lilypond-block";
pub const TEXINFO_LILYPOND: &str = "texinfo-lilypond";
pub const TEXT: &str = "text";

const COMMAND: &str = r"\\[A-Za-z]+(?:-[A-Za-z]+)*";
const SCHEME_WORD: &str = r#"[^()"{}\s;#'`,][^()"{}\s;]*"#;
const HTML_ATTRIBUTE: &str = r"\w+(?:[-_:]\w+)*";
const HTML_ENTITY: &str = r"&(?:#[0-9]+|#[xX][0-9A-Fa-f]+|[A-Za-z_:][\w.:-]*);";
const TEXINFO_ACCENT: &str = r#"@['",=^`~](?:\{[A-Za-z]\}|[A-Za-z]\b)"#;
const TEXINFO_OPTIONS: &str = r"(?:\[[^\]\n]*\])?";

/// Whitespace, comments, strings and Scheme: valid wherever LilyPond is.
fn common() -> Vec<Rule<LyKind>> {
    vec![
        Rule::regex(r"\s+", LyKind::Space),
        Rule::literal("%{", LyKind::BlockCommentStart).push(BLOCK_COMMENT),
        Rule::regex(r"%[^\n]*", LyKind::Comment),
        Rule::literal("\"", LyKind::StringQuote).push(STRING),
        Rule::regex(r"[#$]", LyKind::SchemeStart).push(SCHEME_EXPR),
    ]
}

/// Notes, durations and the small punctuation of music input.
fn note_items() -> Vec<Rule<LyKind>> {
    vec![
        Rule::regex(r"\\[()]", LyKind::PhrasingSlur),
        Rule::regex(r"\\[!<>]", LyKind::Dynamic),
        Rule::literal("\\\\", LyKind::Delimiter),
        Rule::regex(
            format!(r"\\(?P<markup>markup(?:list)?)\b|{COMMAND}"),
            LyKind::Command,
        )
        .on_capture(
            "markup",
            LyKind::Markup,
            Some(Transition::Push(MARKUP.to_string())),
        )
        .classify(words::command),
        Rule::regex(r"[A-Za-z]+", LyKind::Identifier).classify(words::music_word),
        Rule::regex(r"[0-9]+\.*", LyKind::Duration),
        Rule::regex(r"\*[0-9]+(?:/[0-9]+)?", LyKind::Duration),
        Rule::regex(r"[',]+", LyKind::Octave),
        Rule::regex(r"[!?]", LyKind::Accidental),
        Rule::regex(r"[-^_](?:[-.>^+|_!]|[0-9])", LyKind::Articulation),
        Rule::regex(r"[-^_]", LyKind::Direction),
        Rule::literal("~", LyKind::Tie),
        Rule::regex(r"[()]", LyKind::Slur),
        Rule::regex(r"[\[\]]", LyKind::Beam),
        Rule::literal("|", LyKind::BarCheck),
        Rule::regex(r"[=./]", LyKind::Delimiter),
    ]
}

/// Everything that may appear in a music expression, including the
/// openers of nested expressions.
fn music_items() -> Vec<Rule<LyKind>> {
    let mut rules = common();
    rules.extend([
        Rule::literal("<<", LyKind::SimultaneousStart).push(MUSIC),
        Rule::literal("{", LyKind::SequentialStart).push(MUSIC),
        Rule::literal("<", LyKind::ChordStart).push(CHORD),
    ]);
    rules.extend(note_items());
    rules
}

fn with_closers(closers: Vec<Rule<LyKind>>, items: Vec<Rule<LyKind>>) -> Vec<Rule<LyKind>> {
    closers.into_iter().chain(items).collect()
}

fn define_lilypond(builder: &mut GrammarBuilder<LyKind>) -> Result<(), GrammarError> {
    builder.define_state(LILYPOND, music_items(), LyKind::Unparsed)?;
    builder.define_state(
        MUSIC,
        with_closers(
            vec![
                Rule::literal("}", LyKind::SequentialEnd).pop(),
                Rule::literal(">>", LyKind::SimultaneousEnd).pop(),
            ],
            music_items(),
        ),
        LyKind::Unparsed,
    )?;
    let mut chord = vec![Rule::literal(">", LyKind::ChordEnd).pop()];
    chord.extend(common());
    chord.extend(note_items());
    builder.define_state(CHORD, chord, LyKind::Unparsed)?;

    builder.define_state(
        STRING,
        vec![
            Rule::literal("\"", LyKind::StringQuote).pop().ends_argument(),
            Rule::regex(r"\\.", LyKind::StringEscape),
            Rule::regex(r#"[^"\\]+"#, LyKind::String),
        ],
        LyKind::String,
    )?;
    builder.define_state(
        BLOCK_COMMENT,
        vec![
            Rule::literal("%}", LyKind::BlockCommentEnd).pop(),
            Rule::regex(r"[^%]+", LyKind::BlockComment),
        ],
        LyKind::BlockComment,
    )?;
    Ok(())
}

fn markup_items() -> Vec<Rule<LyKind>> {
    let mut rules = common();
    rules.extend([
        Rule::literal("{", LyKind::MarkupStart).push(MARKUP_GROUP),
        Rule::regex(COMMAND, LyKind::MarkupCommand),
        Rule::regex(r#"[^\s{}"\\#$%]+"#, LyKind::MarkupWord).ends_argument(),
    ]);
    rules
}

fn define_markup(builder: &mut GrammarBuilder<LyKind>) -> Result<(), GrammarError> {
    // `\markup` takes exactly one argument; commands inside it do not
    // complete it, a word, a string, a group or a Scheme value does.
    builder.define_state_with(
        MARKUP,
        markup_items(),
        LyKind::Unparsed,
        StateOptions::single_argument().fallthrough(),
    )?;
    builder.define_state(
        MARKUP_GROUP,
        with_closers(
            vec![Rule::literal("}", LyKind::MarkupEnd).pop().ends_argument()],
            markup_items(),
        ),
        LyKind::Unparsed,
    )?;
    Ok(())
}

/// One Scheme datum.
fn scheme_items() -> Vec<Rule<LyKind>> {
    vec![
        Rule::literal("#{", LyKind::LilyPondStart).push(SCHEME_LILYPOND),
        Rule::literal("#(", LyKind::SchemeVectorStart).push(SCHEME_LIST),
        Rule::regex(r"#(?:true|false|t|f)\b", LyKind::SchemeBool).ends_argument(),
        Rule::regex(r"#\\(?:[A-Za-z]+|.)", LyKind::SchemeChar).ends_argument(),
        Rule::regex(r#"#:[^()"{}\s;]+"#, LyKind::SchemeConstant).ends_argument(),
        Rule::regex(r"#(?:b[01]+|o[0-7]+|x[0-9A-Fa-f]+)\b", LyKind::SchemeNumber).ends_argument(),
        Rule::literal("(", LyKind::SchemeOpenParen).push(SCHEME_LIST),
        Rule::regex(r",@|['`,]", LyKind::SchemeQuote),
        Rule::literal("\"", LyKind::StringQuote).push(SCHEME_STRING),
        Rule::regex(SCHEME_WORD, LyKind::SchemeWord)
            .classify(words::scheme_word)
            .ends_argument(),
    ]
}

/// Whitespace, comments and data: the body of a list or a Scheme file.
fn scheme_body() -> Vec<Rule<LyKind>> {
    let mut rules = vec![
        Rule::regex(r"\s+", LyKind::Space),
        Rule::regex(r";[^\n]*", LyKind::SchemeComment),
        Rule::literal("#!", LyKind::SchemeBlockCommentStart).push(SCHEME_BLOCK_COMMENT),
    ];
    rules.extend(scheme_items());
    rules
}

fn define_scheme(builder: &mut GrammarBuilder<LyKind>) -> Result<(), GrammarError> {
    builder.define_state(SCHEME, scheme_body(), LyKind::Unparsed)?;
    // Whitespace and comments between `#` and its value do not complete it.
    builder.define_state_with(
        SCHEME_EXPR,
        scheme_body(),
        LyKind::Unparsed,
        StateOptions::single_argument().fallthrough(),
    )?;
    builder.define_state(
        SCHEME_LIST,
        with_closers(
            vec![Rule::literal(")", LyKind::SchemeCloseParen).pop().ends_argument()],
            scheme_body(),
        ),
        LyKind::Unparsed,
    )?;
    builder.define_state(
        SCHEME_STRING,
        vec![
            Rule::literal("\"", LyKind::StringQuote).pop().ends_argument(),
            Rule::regex(r#"\\[\\"]"#, LyKind::StringEscape),
            Rule::regex(r#"[^"\\]+"#, LyKind::String),
        ],
        LyKind::String,
    )?;
    builder.define_state(
        SCHEME_BLOCK_COMMENT,
        vec![
            Rule::literal("!#", LyKind::SchemeBlockCommentEnd).pop(),
            Rule::regex(r"[^!]+", LyKind::SchemeBlockComment),
        ],
        LyKind::SchemeBlockComment,
    )?;
    builder.define_state(
        SCHEME_LILYPOND,
        with_closers(
            vec![Rule::literal("#}", LyKind::LilyPondEnd).pop().ends_argument()],
            music_items(),
        ),
        LyKind::Unparsed,
    )?;
    Ok(())
}

/// The grammar for LilyPond source files.
pub fn lilypond() -> Result<Grammar<LyKind>, GrammarError> {
    let mut builder = Grammar::builder(LILYPOND);
    define_lilypond(&mut builder)?;
    define_markup(&mut builder)?;
    define_scheme(&mut builder)?;
    builder.initial(LILYPOND);
    builder.build()
}

/// The grammar for Scheme source files, with `#{ #}` LilyPond blocks.
pub fn scheme() -> Result<Grammar<LyKind>, GrammarError> {
    let mut builder = Grammar::builder(SCHEME);
    define_lilypond(&mut builder)?;
    define_markup(&mut builder)?;
    define_scheme(&mut builder)?;
    builder.initial(SCHEME);
    builder.build()
}

/// Attributes inside a tag, up to one of `ends`.
fn html_attributes(ends: Vec<Rule<LyKind>>) -> Vec<Rule<LyKind>> {
    let mut rules = vec![Rule::regex(r"\s+", LyKind::Space)];
    rules.extend(ends);
    rules.extend([
        Rule::regex(HTML_ATTRIBUTE, LyKind::AttributeName),
        Rule::literal("=", LyKind::Delimiter).push(HTML_VALUE),
        Rule::literal("\"", LyKind::StringQuote).push(HTML_STRING),
        Rule::literal("'", LyKind::StringQuote).push(HTML_SINGLE_STRING),
    ]);
    rules
}

fn html_string(quote: &'static str) -> Vec<Rule<LyKind>> {
    vec![
        Rule::literal(quote, LyKind::StringQuote).pop(),
        Rule::regex(HTML_ENTITY, LyKind::Entity),
        Rule::regex(format!("[^{quote}&]+"), LyKind::String),
    ]
}

fn define_html(builder: &mut GrammarBuilder<LyKind>) -> Result<(), GrammarError> {
    builder.define_state(
        HTML,
        vec![
            Rule::regex(r"\s+", LyKind::Space),
            Rule::regex(r"<lilypond\b", LyKind::LilyPondStart).push(HTML_LILYPOND_TAG),
            Rule::literal("<!--", LyKind::BlockCommentStart).push(HTML_COMMENT),
            Rule::regex(r"</?[A-Za-z][-_:\w]*", LyKind::TagStart).push(HTML_TAG),
            Rule::regex(HTML_ENTITY, LyKind::Entity),
            Rule::regex(r"[^<&\s]+", LyKind::Text),
        ],
        LyKind::Text,
    )?;
    builder.define_state(
        HTML_TAG,
        html_attributes(vec![Rule::regex(r"/?>", LyKind::TagEnd).pop()]),
        LyKind::Unparsed,
    )?;
    // An unquoted value; a quoted one is left to the tag.
    builder.define_state_with(
        HTML_VALUE,
        vec![
            Rule::regex(r"\s+", LyKind::Space),
            Rule::regex(r#"[^\s"'=<>`]+"#, LyKind::AttributeValue).ends_argument(),
        ],
        LyKind::Unparsed,
        StateOptions::single_argument().fallthrough(),
    )?;
    builder.define_state(HTML_STRING, html_string("\""), LyKind::String)?;
    builder.define_state(HTML_SINGLE_STRING, html_string("'"), LyKind::String)?;
    builder.define_state(
        HTML_COMMENT,
        vec![
            Rule::literal("-->", LyKind::BlockCommentEnd).pop(),
            Rule::regex(r"[^-]+", LyKind::BlockComment),
        ],
        LyKind::BlockComment,
    )?;
    // `<lilypond options>music</lilypond>` or `<lilypond options: music />`.
    builder.define_state(
        HTML_LILYPOND_TAG,
        html_attributes(vec![
            Rule::literal(">", LyKind::Delimiter).switch(HTML_LILYPOND),
            Rule::literal(":", LyKind::Delimiter).switch(HTML_LILYPOND_INLINE),
        ]),
        LyKind::Unparsed,
    )?;
    builder.define_state(
        HTML_LILYPOND,
        with_closers(
            vec![Rule::literal("</lilypond>", LyKind::LilyPondEnd).pop()],
            music_items(),
        ),
        LyKind::Unparsed,
    )?;
    builder.define_state(
        HTML_LILYPOND_INLINE,
        with_closers(
            vec![Rule::regex(r"/?>", LyKind::LilyPondEnd).pop()],
            music_items(),
        ),
        LyKind::Unparsed,
    )?;
    Ok(())
}

/// Escapes, accents and commands, valid in running Texinfo text.
fn texinfo_items() -> Vec<Rule<LyKind>> {
    vec![
        Rule::regex(r"\s+", LyKind::Space),
        Rule::regex(TEXINFO_ACCENT, LyKind::Entity),
        Rule::regex(r"@[@{}]", LyKind::Entity),
        Rule::regex(
            format!(r"@lilypond{TEXINFO_OPTIONS}\{{"),
            LyKind::LilyPondStart,
        )
        .push(TEXINFO_LILYPOND_BLOCK),
        Rule::regex(format!(r"@lilypond\b{TEXINFO_OPTIONS}"), LyKind::LilyPondStart)
            .push(TEXINFO_LILYPOND),
        Rule::regex(
            format!(r"@lilypondfile{TEXINFO_OPTIONS}\{{"),
            LyKind::TexinfoBlockStart,
        )
        .push(TEXINFO_BLOCK),
        Rule::regex(r"@[A-Za-z]+\{", LyKind::TexinfoBlockStart).push(TEXINFO_BLOCK),
        Rule::regex(r"@verbatim\b", LyKind::TexinfoCommand).push(TEXINFO_VERBATIM),
        Rule::regex(r"@[A-Za-z]+", LyKind::TexinfoCommand),
        Rule::regex(r"[^@{}\s]+", LyKind::Text),
    ]
}

fn define_texinfo(builder: &mut GrammarBuilder<LyKind>) -> Result<(), GrammarError> {
    let mut top = vec![
        Rule::regex(r"@c(?:omment)?\b[^\n]*", LyKind::Comment),
        Rule::regex(r"@ignore\b", LyKind::BlockCommentStart).push(TEXINFO_IGNORE),
    ];
    top.extend(texinfo_items());
    builder.define_state(TEXINFO, top, LyKind::Text)?;
    builder.define_state(
        TEXINFO_BLOCK,
        with_closers(
            vec![Rule::literal("}", LyKind::TexinfoBlockEnd).pop()],
            texinfo_items(),
        ),
        LyKind::Text,
    )?;
    builder.define_state(
        TEXINFO_IGNORE,
        vec![
            Rule::regex(r"@end[ \t]+ignore\b", LyKind::BlockCommentEnd).pop(),
            Rule::regex(r"[^@]+", LyKind::BlockComment),
        ],
        LyKind::BlockComment,
    )?;
    builder.define_state(
        TEXINFO_VERBATIM,
        vec![
            Rule::regex(r"@end[ \t]+verbatim\b", LyKind::TexinfoCommand).pop(),
            Rule::regex(r"[^@]+", LyKind::Verbatim),
        ],
        LyKind::Verbatim,
    )?;
    builder.define_state(
        TEXINFO_LILYPOND_BLOCK,
        with_closers(
            vec![Rule::literal("}", LyKind::LilyPondEnd).pop()],
            music_items(),
        ),
        LyKind::Unparsed,
    )?;
    builder.define_state(
        TEXINFO_LILYPOND,
        with_closers(
            vec![Rule::regex(r"@end[ \t]+lilypond\b", LyKind::LilyPondEnd).pop()],
            music_items(),
        ),
        LyKind::Unparsed,
    )?;
    Ok(())
}

/// The grammar for HTML pages with `<lilypond>` blocks.
pub fn html() -> Result<Grammar<LyKind>, GrammarError> {
    let mut builder = Grammar::builder(HTML);
    define_html(&mut builder)?;
    define_lilypond(&mut builder)?;
    define_markup(&mut builder)?;
    define_scheme(&mut builder)?;
    builder.initial(HTML);
    builder.build()
}

/// The grammar for Texinfo documents with `@lilypond` blocks.
pub fn texinfo() -> Result<Grammar<LyKind>, GrammarError> {
    let mut builder = Grammar::builder(TEXINFO);
    define_texinfo(&mut builder)?;
    define_lilypond(&mut builder)?;
    define_markup(&mut builder)?;
    define_scheme(&mut builder)?;
    builder.initial(TEXINFO);
    builder.build()
}

/// Words and whitespace, nothing nested.
pub fn text() -> Result<Grammar<LyKind>, GrammarError> {
    let mut builder = Grammar::builder(TEXT);
    builder.define_state(
        TEXT,
        vec![
            Rule::regex(r"\s+", LyKind::Space),
            Rule::regex(r"\S+", LyKind::Text),
        ],
        LyKind::Text,
    )?;
    builder.build()
}
