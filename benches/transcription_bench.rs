use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hq_description::{NameEntry, NameNormalizer, ResultParser, TimestampTranscriber};

fn sample_names() -> NameNormalizer {
    let entries = (0..40)
        .map(|i| NameEntry::new(format!("選手{}", i), format!("Fencer{:02}", i)))
        .chain([NameEntry::new("和田", "Wada"), NameEntry::new("大和田", "Oowada")])
        .collect();
    NameNormalizer::from_entries(entries).unwrap()
}

fn sample_results() -> Vec<String> {
    (1..=120)
        .map(|i| format!("M{:02}: 選手{} vs 選手{}", i, i % 40, (i + 7) % 40))
        .collect()
}

fn sample_timestamps() -> Vec<String> {
    (1..=120)
        .flat_map(|i| {
            [
                format!("0:{:02}:{:02} M{:02}: Player1 - Zygmunt vs Player2 - Marie", i / 60, i % 60, i),
                "Settings".to_string(),
                format!("Player{} win by 3:{}", i % 2 + 1, i % 3),
            ]
        })
        .collect()
}

fn bench_name_normalizer(c: &mut Criterion) {
    let names = sample_names();

    c.bench_function("normalizer_exact_lookup", |b| {
        b.iter(|| {
            black_box(names.normalize("選手12"));
            black_box(names.normalize("unknown"));
        })
    });

    c.bench_function("normalizer_substitute", |b| {
        b.iter(|| black_box(names.substitute("大和田 vs 和田, then 選手3 vs 選手33")))
    });
}

fn bench_result_parsing(c: &mut Criterion) {
    let names = sample_names();
    let parser = ResultParser::new(&names).unwrap();
    let lines = sample_results();

    c.bench_function("result_parse_120_matches", |b| {
        b.iter(|| black_box(parser.parse(&lines)))
    });
}

fn bench_transcription(c: &mut Criterion) {
    let names = sample_names();
    let parsed = ResultParser::new(&names).unwrap().parse(sample_results());
    let transcriber = TimestampTranscriber::new().unwrap();
    let lines = sample_timestamps();

    c.bench_function("transcribe_360_lines", |b| {
        b.iter(|| black_box(transcriber.transcribe(&lines, &parsed.matches)))
    });
}

criterion_group!(benches, bench_name_normalizer, bench_result_parsing, bench_transcription);
criterion_main!(benches);
