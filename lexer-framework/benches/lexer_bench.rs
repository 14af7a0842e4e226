use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lexer_framework::{Grammar, Lexer, Rule, TokenKind};

// --- Token Definition ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BenchKind {
    Number,
    Identifier,
    Operator,
    Whitespace,
    EmbedOpen,
    EmbedClose,
    Unknown,
}

impl TokenKind for BenchKind {
    fn name(&self) -> &'static str {
        match self {
            BenchKind::Number => "number",
            BenchKind::Identifier => "identifier",
            BenchKind::Operator => "operator",
            BenchKind::Whitespace => "whitespace",
            BenchKind::EmbedOpen => "embed-open",
            BenchKind::EmbedClose => "embed-close",
            BenchKind::Unknown => "unknown",
        }
    }

    fn is_whitespace(&self) -> bool {
        matches!(self, BenchKind::Whitespace)
    }
}

fn rules() -> Vec<Rule<BenchKind>> {
    vec![
        Rule::regex(r"\s+", BenchKind::Whitespace),
        Rule::regex(r"[0-9]+", BenchKind::Number),
        Rule::literal("#{", BenchKind::EmbedOpen).push("embedded"),
        Rule::literal("#}", BenchKind::EmbedClose).pop(),
        Rule::regex(r"[\p{Alphabetic}_][\p{Alphabetic}0-9_]*", BenchKind::Identifier),
        Rule::regex(r"[-+*/=<>!&|;]", BenchKind::Operator),
    ]
}

fn grammar() -> Grammar<BenchKind> {
    let mut builder = Grammar::builder("bench");
    builder
        .define_state("main", rules(), BenchKind::Unknown)
        .expect("valid state");
    builder
        .define_state("embedded", rules(), BenchKind::Unknown)
        .expect("valid state");
    builder.build().expect("valid grammar")
}

// --- Data Generation ---

fn generate_english(size_kb: usize) -> String {
    let words = [
        "function", "let", "var", "const", "if", "else", "while", "return",
    ];
    let mut s = String::with_capacity(size_kb * 1024);
    while s.len() < size_kb * 1024 {
        for w in words {
            s.push_str(w);
            s.push_str(" x_Variable = 12345;\n");
        }
    }
    s
}

fn generate_nested(size_kb: usize) -> String {
    let mut s = String::with_capacity(size_kb * 1024);
    while s.len() < size_kb * 1024 {
        s.push_str("outer #{ inner #{ deepest 1 #} inner 2 #} outer 3;\n");
    }
    s
}

fn generate_chinese(size_kb: usize) -> String {
    let words = ["定义", "变量", "如果", "否则", "循环", "返回"];
    let mut s = String::with_capacity(size_kb * 1024);
    while s.len() < size_kb * 1024 {
        for w in words {
            s.push_str(w);
            s.push_str(" 变量名_甲 = 67890;\n");
        }
    }
    s
}

fn generate_emoji(size_kb: usize) -> String {
    // Emoji are not alphabetic, so every one of them is a fallback token.
    let emojis = ["😀", "🚀", "🦀", "💻", "🔥", "✨"];
    let mut s = String::with_capacity(size_kb * 1024);
    while s.len() < size_kb * 1024 {
        for e in emojis {
            s.push_str(e);
            s.push_str(" + ");
        }
        s.push('\n');
    }
    s
}

// --- Benchmarks ---

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_batch");
    let grammar = grammar();

    // ~100KB per input for stable throughput
    let size_kb = 100;
    let inputs = [
        ("english_100kb", generate_english(size_kb)),
        ("nested_100kb", generate_nested(size_kb)),
        ("chinese_100kb", generate_chinese(size_kb)),
        ("emoji_100kb", generate_emoji(size_kb)),
    ];

    for (name, text) in &inputs {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(*name, |b| {
            b.iter(|| {
                let tokens: Vec<_> = Lexer::new(&grammar, text.as_str()).collect();
                tokens.len()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
