//! Benchmarks for chatsift parsing and post-processing.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- whatsapp`

use std::io::{Cursor, Write};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatsift::Message;
use chatsift::config::ParseOptions;
use chatsift::core::{
    DateRange, participants_from_messages, replace_encryption_message_author,
};
use chatsift::import::{messages_from_file_with, parse_transcript};
use chatsift::notify::SilentNotifier;
use chatsift::parser::TranscriptGrammar;
use chatsift::parsers::WhatsAppParser;
use chatsift::source::ChatFile;

use chrono::{Duration, TimeZone, Utc};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_whatsapp_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count + 1);
    lines.push(
        "[15.01.24, 09:00:00] Alice: \u{200E}Messages and calls are end-to-end encrypted.".to_string(),
    );
    for i in 0..count {
        let sender = if i % 3 == 0 { "Bob" } else { "Alice" };
        let day = 15 + (i / 1440) % 10;
        let hour = (i / 60) % 24;
        let minute = i % 60;
        lines.push(format!(
            "[{:02}.01.24, {:02}:{:02}:00] {}: Message number {}",
            day, hour, minute, sender, i
        ));
        if i % 10 == 0 {
            lines.push("continued on the next line".to_string());
        }
    }
    lines.join("\n")
}

fn generate_archive(count: usize) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("IMG-20240115-WA0001.jpg", options).unwrap();
    writer.write_all(&[0xff, 0xd8, 0xff]).unwrap();
    writer.start_file("WhatsApp Chat with Bob.txt", options).unwrap();
    writer.write_all(generate_whatsapp_txt(count).as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn generate_messages(count: usize) -> Vec<Message> {
    let base_time = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let author = match i % 4 {
                0 => None,
                1 => Some("Alice"),
                2 => Some("Bob"),
                _ => Some("Carol"),
            };
            let ts = base_time + Duration::minutes(i as i64);
            Message::new(i, ts, author, format!("Message number {}", i))
        })
        .collect()
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_whatsapp_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("whatsapp");
    let parser = WhatsAppParser::new().with_timezone(Utc);

    for size in [100_usize, 1_000, 10_000] {
        let txt = generate_whatsapp_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| parser.parse_str(black_box(txt), ParseOptions::new()).unwrap());
        });
    }
    group.finish();
}

fn bench_parse_transcript(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_transcript");
    let parser = WhatsAppParser::new().with_timezone(Utc);

    for size in [1_000_usize, 10_000] {
        let txt = generate_whatsapp_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| parse_transcript(&parser, black_box(txt), true).unwrap());
        });
    }
    group.finish();
}

// =============================================================================
// Post-processing Benchmarks
// =============================================================================

fn bench_redaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("redaction");

    for size in [1_000_usize, 100_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, msgs| {
            b.iter(|| replace_encryption_message_author(black_box(msgs.clone())));
        });
    }
    group.finish();
}

fn bench_participants(c: &mut Criterion) {
    let mut group = c.benchmark_group("participants");

    for size in [1_000_usize, 100_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, msgs| {
            b.iter(|| participants_from_messages(black_box(msgs)));
        });
    }
    group.finish();
}

fn bench_filter_by_date(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_date");
    let range = DateRange::from_date_inputs_in("2024-01-16", "2024-01-20", &Utc).unwrap();

    for size in [1_000_usize, 100_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, msgs| {
            b.iter(|| range.filter(black_box(msgs)));
        });
    }
    group.finish();
}

// =============================================================================
// Full Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let parser = WhatsAppParser::new().with_timezone(Utc);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    for size in [1_000_usize, 10_000] {
        let bytes = generate_archive(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bytes, |b, bytes| {
            b.iter(|| {
                // archive -> transcript -> messages -> redaction
                let file = ChatFile::archive(bytes.clone());
                let messages = runtime
                    .block_on(messages_from_file_with(Some(&file), &parser, &SilentNotifier))
                    .unwrap();
                black_box(participants_from_messages(&messages))
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_whatsapp_parsing,
    bench_parse_transcript,
    bench_redaction,
    bench_participants,
    bench_filter_by_date,
    bench_full_pipeline,
);

criterion_main!(benches);
