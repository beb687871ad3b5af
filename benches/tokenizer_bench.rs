use std::fmt::Write;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rdn::{CommentHandling, Reader, ReaderOptions, TokenKind};

struct Corpus {
    name: &'static str,
    source: Vec<u8>,
}

fn build_flat_object_corpus() -> Vec<u8> {
    let mut src = String::with_capacity(256_000);
    src.push('{');
    for i in 0..4_000usize {
        if i > 0 {
            src.push(',');
        }
        let _ = write!(src, "\"field_{i}\":{i}");
    }
    src.push('}');
    src.into_bytes()
}

fn build_nested_array_corpus() -> Vec<u8> {
    let mut src = String::with_capacity(256_000);
    src.push('[');
    for i in 0..3_000usize {
        if i > 0 {
            src.push(',');
        }
        let _ = write!(src, "[{}, {}, {}]", i, i + 1, i + 2);
    }
    src.push(']');
    src.into_bytes()
}

fn build_string_heavy_corpus() -> Vec<u8> {
    let mut src = String::with_capacity(256_000);
    src.push('[');
    for i in 0..2_500usize {
        if i > 0 {
            src.push(',');
        }
        let _ = write!(
            src,
            "\"line\\n\\tquote:\\\" slash:\\\\ value_{i} done\""
        );
    }
    src.push(']');
    src.into_bytes()
}

fn build_extended_literal_corpus() -> Vec<u8> {
    let mut src = String::with_capacity(256_000);
    src.push_str("Set{");
    for i in 0..1_500usize {
        if i > 0 {
            src.push(',');
        }
        let _ = write!(
            src,
            "{{\"n\":{i}n,\"t\":@2024-01-0{}T00:00:00,\"re\":/ab+c/i,\"bin\":x\"{:04x}\"}}",
            (i % 9) + 1,
            i
        );
    }
    src.push('}');
    src.into_bytes()
}

fn build_corpora() -> Vec<Corpus> {
    vec![
        Corpus { name: "flat_object", source: build_flat_object_corpus() },
        Corpus { name: "nested_array", source: build_nested_array_corpus() },
        Corpus { name: "string_escape_heavy", source: build_string_heavy_corpus() },
        Corpus { name: "extended_literal_heavy", source: build_extended_literal_corpus() },
    ]
}

fn tokenize_all(input: &[u8]) -> usize {
    let options = ReaderOptions::default().with_comment_handling(CommentHandling::Allow);
    let mut reader = Reader::with_options(input, true, options);
    let mut count = 0usize;
    loop {
        match reader.read() {
            Ok(true) => count += 1,
            Ok(false) => break,
            Err(_) => break,
        }
        if reader.token_kind() == TokenKind::None {
            break;
        }
    }
    count
}

fn bench_tokenize_whole_buffer(c: &mut Criterion) {
    let corpora = build_corpora();
    let mut group = c.benchmark_group("tokenizer/read_loop");

    for corpus in &corpora {
        let input = corpus.source.as_slice();
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(corpus.name), input, |b, input| {
            b.iter(|| {
                let token_count = tokenize_all(black_box(input));
                black_box(token_count);
            });
        });
    }

    group.finish();
}

fn bench_skip_top_level_values(c: &mut Criterion) {
    let corpora = build_corpora();
    let mut group = c.benchmark_group("tokenizer/skip_top_level");

    for corpus in &corpora {
        let input = corpus.source.as_slice();
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(corpus.name), input, |b, input| {
            b.iter(|| {
                let options = ReaderOptions::default().with_comment_handling(CommentHandling::Allow);
                let mut reader = Reader::with_options(black_box(input), true, options);
                let read = reader.read().unwrap_or(false);
                if read {
                    let _ = reader.skip();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize_whole_buffer, bench_skip_top_level_values);
criterion_main!(benches);
