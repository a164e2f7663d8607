use bidi_engine::{get_embedding_levels, log2vis, BidiConfig, Direction, Outputs};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box as std_black_box;

/// Paragraphs with different mixes of directions
fn generate_test_data() -> Vec<(&'static str, Vec<char>)> {
    vec![
        // Left to right only
        (
            "ltr_text",
            "The quick brown fox jumps over the lazy dog, twice."
                .chars()
                .collect(),
        ),
        // Hebrew only
        (
            "rtl_text",
            "\u{05E9}\u{05DC}\u{05D5}\u{05DD} \u{05E2}\u{05D5}\u{05DC}\u{05DD} \u{05D6}\u{05D4} \u{05D8}\u{05E7}\u{05E1}\u{05D8}"
                .chars()
                .collect(),
        ),
        // English sentence quoting Arabic with numbers
        (
            "mixed_text",
            "Order \u{0637}\u{0644}\u{0628} 42 (\u{0631}\u{0642}\u{0645} 1,234.50) shipped."
                .chars()
                .collect(),
        ),
        // Explicit embeddings and overrides
        (
            "explicit_codes",
            "a\u{202B}b \u{05D0}\u{202D}cd\u{202C} 12\u{202C}e\u{202E}fg\u{202C}"
                .chars()
                .collect(),
        ),
        // Numbers, separators and terminators
        (
            "digits",
            "$1,000.00 + 25% - 3/4 = \u{0661}\u{0662}\u{0663} 9:30"
                .chars()
                .collect(),
        ),
        // Long mixed paragraph
        ("large_text", {
            let mut data = String::new();
            for i in 0..200 {
                data.push_str(&format!(
                    "Line {i}: hello \u{05E9}\u{05DC}\u{05D5}\u{05DD} world \u{0645}\u{0631}\u{062D}\u{0628}\u{0627} ({i}) "
                ));
            }
            data.chars().collect()
        }),
    ]
}

fn bench_log2vis(c: &mut Criterion) {
    let test_data = generate_test_data();
    let config = BidiConfig::default();

    let mut group = c.benchmark_group("log2vis");

    for (name, data) in test_data.iter() {
        group.bench_with_input(BenchmarkId::new("all_outputs", name), data, |b, data| {
            b.iter(|| {
                log2vis(
                    std_black_box(data),
                    Direction::Auto,
                    Outputs::ALL,
                    &config,
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("visual_only", name), data, |b, data| {
            b.iter(|| {
                log2vis(
                    std_black_box(data),
                    Direction::Auto,
                    Outputs::VISUAL,
                    &config,
                )
            });
        });
    }

    group.finish();
}

fn bench_log2vis_reorder_nsm(c: &mut Criterion) {
    let config = BidiConfig::default().with_reorder_nsm(true);
    // Pointed Hebrew: every letter followed by marks.
    let data: Vec<char> = "\u{05E9}\u{05C1}\u{05B8}\u{05DC}\u{05D5}\u{05B9}\u{05DD} "
        .repeat(50)
        .chars()
        .collect();

    c.bench_function("log2vis_reorder_nsm", |b| {
        b.iter(|| {
            log2vis(
                std_black_box(&data),
                Direction::Rtl,
                Outputs::ALL,
                &config,
            )
        });
    });
}

fn bench_embedding_levels(c: &mut Criterion) {
    let test_data = generate_test_data();

    let mut group = c.benchmark_group("embedding_levels");

    for (name, data) in test_data.iter() {
        group.bench_with_input(BenchmarkId::new("levels", name), data, |b, data| {
            b.iter(|| get_embedding_levels(std_black_box(data), Direction::Auto));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_log2vis,
    bench_log2vis_reorder_nsm,
    bench_embedding_levels
);
criterion_main!(benches);
