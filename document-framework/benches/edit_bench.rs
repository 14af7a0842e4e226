use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use document_framework::Document;
use lexer_framework::{Grammar, Rule, TokenKind};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BenchKind {
    Word,
    Space,
    Comment,
    Open,
    Close,
    Unknown,
}

impl TokenKind for BenchKind {
    fn name(&self) -> &'static str {
        match self {
            BenchKind::Word => "word",
            BenchKind::Space => "space",
            BenchKind::Comment => "comment",
            BenchKind::Open => "open",
            BenchKind::Close => "close",
            BenchKind::Unknown => "unknown",
        }
    }
}

fn grammar() -> Arc<Grammar<BenchKind>> {
    let rules = |close: Rule<BenchKind>| {
        vec![
            Rule::regex(r"\s+", BenchKind::Space),
            Rule::literal("%{", BenchKind::Comment).push("comment"),
            Rule::literal("#{", BenchKind::Open).push("embedded"),
            close,
            Rule::regex(r"\w+", BenchKind::Word),
        ]
    };
    let mut builder = Grammar::builder("bench");
    builder
        .define_state("main", rules(Rule::literal("#}", BenchKind::Close)), BenchKind::Unknown)
        .expect("valid state");
    builder
        .define_state(
            "embedded",
            rules(Rule::literal("#}", BenchKind::Close).pop()),
            BenchKind::Unknown,
        )
        .expect("valid state");
    builder
        .define_state(
            "comment",
            vec![
                Rule::literal("%}", BenchKind::Comment).pop(),
                Rule::regex(r"[^%]+", BenchKind::Comment),
            ],
            BenchKind::Comment,
        )
        .expect("valid state");
    Arc::new(builder.build().expect("valid grammar"))
}

fn generate(lines: usize) -> String {
    let mut s = String::new();
    for i in 0..lines {
        match i % 4 {
            0 => s.push_str("melody #{ c d e f #} words\n"),
            1 => s.push_str("%{ a comment that spans\n"),
            2 => s.push_str("   two lines %} after\n"),
            _ => s.push_str("plain text line\n"),
        }
    }
    s
}

fn bench_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_edit");
    let grammar = grammar();
    let text = generate(10_000);
    let middle = text.len() / 2;
    let middle = text[middle..].find('\n').map_or(middle, |i| middle + i + 1);

    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("full_lex_10k_lines", |b| {
        b.iter(|| Document::new(Arc::clone(&grammar), text.as_str()).token_count())
    });

    group.throughput(Throughput::Elements(2));
    group.bench_function("keystroke_10k_lines", |b| {
        let mut document = Document::new(Arc::clone(&grammar), text.as_str());
        b.iter(|| {
            document.apply_edit(middle, 0, "x").expect("valid edit");
            document.apply_edit(middle, 1, "").expect("valid edit")
        })
    });

    group.bench_function("open_comment_10k_lines", |b| {
        b.iter_batched(
            || Document::new(Arc::clone(&grammar), text.as_str()),
            |mut document| document.apply_edit(middle, 0, "%{").expect("valid edit"),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_edits);
criterion_main!(benches);
