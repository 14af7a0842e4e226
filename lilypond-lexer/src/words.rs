//! Reserved words and the classifiers that use them.

use crate::kind::LyKind;
use once_cell::sync::Lazy;
use std::collections::HashSet;

static LILYPOND_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "accepts",
        "alias",
        "book",
        "bookpart",
        "consists",
        "context",
        "defaultchild",
        "denies",
        "description",
        "etc",
        "header",
        "hide",
        "include",
        "inherit-acceptability",
        "language",
        "layout",
        "midi",
        "name",
        "omit",
        "once",
        "override",
        "paper",
        "remove",
        "revert",
        "score",
        "set",
        "tagGroup",
        "temporary",
        "type",
        "undo",
        "unset",
        "version",
        "with",
    ]
    .into_iter()
    .collect()
});

static DYNAMICS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ppppp", "pppp", "ppp", "pp", "p", "mp", "mf", "f", "ff", "fff", "ffff", "fffff", "fp",
        "sf", "sff", "sp", "spp", "sfz", "rfz", "n", "cresc", "decresc", "dim", "endcresc",
        "enddecresc", "enddim", "cr", "decr",
    ]
    .into_iter()
    .collect()
});

static SCHEME_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "and",
        "begin",
        "case",
        "cond",
        "define",
        "define*",
        "define-public",
        "define-markup-command",
        "define-music-function",
        "define-scheme-function",
        "define-void-function",
        "delay",
        "do",
        "else",
        "if",
        "lambda",
        "lambda*",
        "let",
        "let*",
        "letrec",
        "or",
        "quasiquote",
        "quote",
        "set!",
        "unless",
        "unquote",
        "when",
    ]
    .into_iter()
    .collect()
});

static SCHEME_FUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "append",
        "apply",
        "assoc",
        "assq",
        "car",
        "cdr",
        "cadr",
        "cons",
        "display",
        "eq?",
        "equal?",
        "filter",
        "for-each",
        "length",
        "list",
        "list-ref",
        "make-music",
        "map",
        "markup",
        "member",
        "not",
        "null?",
        "number->string",
        "pair?",
        "reverse",
        "string-append",
        "string?",
        "symbol?",
        "vector",
        "ly:music?",
        "ly:pitch?",
        "ly:make-moment",
        "ly:make-pitch",
        "ly:music-property",
    ]
    .into_iter()
    .collect()
});

static SCHEME_CONSTANTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "UP",
        "DOWN",
        "LEFT",
        "RIGHT",
        "CENTER",
        "minimum-distance",
        "basic-distance",
        "padding",
        "stretchability",
    ]
    .into_iter()
    .collect()
});

/// Dutch note names: `c`, `cis`, `ces`, `cisis`, `ceses`, and the short
/// `as`/`es` forms.
fn is_pitch(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(step) = chars.next() else {
        return false;
    };
    if !('a'..='g').contains(&step) {
        return false;
    }
    matches!(
        chars.as_str(),
        "" | "is" | "es" | "isis" | "eses" | "ih" | "eh" | "s" | "ses"
    ) && (!chars.as_str().starts_with('s') || matches!(step, 'a' | 'e'))
}

/// Numbers as Scheme reads them: an optional sign, then digits with an
/// optional fraction, decimal part or exponent, or one of the infinities
/// and NaN. Radix-prefixed numbers start with `#` and have their own rule.
fn is_scheme_number(word: &str) -> bool {
    let unsigned = word.strip_prefix(['-', '+']).unwrap_or(word);
    if unsigned == "nan.0" || (unsigned == "inf.0" && unsigned.len() < word.len()) {
        return true;
    }
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if let Some((numerator, denominator)) = unsigned.split_once('/') {
        return all_digits(numerator) && all_digits(denominator);
    }
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let mantissa = match mantissa.split_once('.') {
        Some((int, frac)) => {
            (!int.is_empty() || !frac.is_empty())
                && (int.is_empty() || all_digits(int))
                && (frac.is_empty() || all_digits(frac))
        }
        None => all_digits(mantissa),
    };
    mantissa
        && exponent.map_or(true, |exponent| {
            all_digits(exponent.strip_prefix(['-', '+']).unwrap_or(exponent))
        })
}

/// Letters inside music: notes, rests and skips; anything else is an
/// identifier.
pub(crate) fn music_word(word: &str) -> Option<LyKind> {
    match word {
        "r" | "R" | "s" => Some(LyKind::Rest),
        "q" => Some(LyKind::Note),
        _ if is_pitch(word) => Some(LyKind::Note),
        _ => None,
    }
}

/// Backslash commands: reserved words and dynamics get their own kinds.
pub(crate) fn command(text: &str) -> Option<LyKind> {
    let word = text.strip_prefix('\\')?;
    if LILYPOND_KEYWORDS.contains(word) {
        Some(LyKind::Keyword)
    } else if DYNAMICS.contains(word) {
        Some(LyKind::Dynamic)
    } else {
        None
    }
}

pub(crate) fn scheme_word(word: &str) -> Option<LyKind> {
    if word == "." {
        Some(LyKind::SchemeDot)
    } else if is_scheme_number(word) {
        Some(LyKind::SchemeNumber)
    } else if SCHEME_KEYWORDS.contains(word) {
        Some(LyKind::SchemeKeyword)
    } else if SCHEME_FUNCTIONS.contains(word) {
        Some(LyKind::SchemeFunction)
    } else if SCHEME_CONSTANTS.contains(word) {
        Some(LyKind::SchemeConstant)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitches() {
        for word in ["c", "cis", "ces", "eses", "as", "es", "ases", "bisis", "fih"] {
            assert!(is_pitch(word), "{word}");
        }
        for word in ["h", "cs", "bs", "cess", "x", "", "melody"] {
            assert!(!is_pitch(word), "{word}");
        }
    }

    #[test]
    fn test_scheme_numbers() {
        for word in [
            "1", "-2", "+3", "1/2", "0.5", ".5", "5.", "1e3", "2.5E-2", "+inf.0", "-inf.0",
            "nan.0", "-nan.0",
        ] {
            assert!(is_scheme_number(word), "{word}");
        }
        for word in [
            "-", ".", "1/", "1a", "a1", "1.2.3", "/2", "e", "1e", "inf.0", "define", "nan",
        ] {
            assert!(!is_scheme_number(word), "{word}");
        }
    }

    #[test]
    fn test_commands() {
        assert_eq!(command("\\version"), Some(LyKind::Keyword));
        assert_eq!(command("\\ff"), Some(LyKind::Dynamic));
        assert_eq!(command("\\relative"), None);
        assert_eq!(command("relative"), None);
    }

    #[test]
    fn test_scheme_words() {
        assert_eq!(scheme_word("define"), Some(LyKind::SchemeKeyword));
        assert_eq!(scheme_word("car"), Some(LyKind::SchemeFunction));
        assert_eq!(scheme_word("UP"), Some(LyKind::SchemeConstant));
        assert_eq!(scheme_word("-1/4"), Some(LyKind::SchemeNumber));
        assert_eq!(scheme_word("."), Some(LyKind::SchemeDot));
        assert_eq!(scheme_word("my-var"), None);
    }
}
