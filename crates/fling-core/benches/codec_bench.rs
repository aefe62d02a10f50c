//! Criterion benchmarks for the FlingCast JSON codec.
//!
//! Measures stringify and parse+decode latency for each message shape and
//! for the concatenated batch form. The codec sits on the session's message
//! callback, so per-message cost should stay comfortably sub-millisecond
//! even on TV-class hardware.
//!
//! Run with:
//! ```bash
//! cargo bench --package fling-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fling_core::{parse, stringify, stringify_batch, CastingMessage, PlaybackStatus};
use serde_json::json;

// ── Message fixtures ──────────────────────────────────────────────────────────

fn make_load() -> CastingMessage {
    CastingMessage::Load {
        seq: 1,
        url: "http://media.example.com/library/episode-042.webm".to_string(),
    }
}

fn make_play() -> CastingMessage {
    CastingMessage::Play { seq: 2 }
}

fn make_seek() -> CastingMessage {
    CastingMessage::Seek { seq: 3, time: 1275.5 }
}

fn make_ack() -> CastingMessage {
    CastingMessage::Ack { seq: 3, error: None }
}

fn make_status() -> CastingMessage {
    CastingMessage::Status {
        seq: 17,
        status: PlaybackStatus::Playing,
        time: 1275.5,
        error: None,
        detail: None,
    }
}

fn make_status_with_detail() -> CastingMessage {
    CastingMessage::Status {
        seq: 18,
        status: PlaybackStatus::Error,
        time: 1275.5,
        error: Some("3".to_string()),
        detail: Some(json!({ "src": "http://media.example.com/library/episode-042.webm" })),
    }
}

fn make_command_batch(len: u64) -> Vec<CastingMessage> {
    (1..=len)
        .map(|seq| match seq % 3 {
            0 => CastingMessage::Play { seq },
            1 => CastingMessage::Seek {
                seq,
                time: seq as f64 * 10.0,
            },
            _ => CastingMessage::Pause { seq },
        })
        .collect()
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_stringify(c: &mut Criterion) {
    let mut group = c.benchmark_group("stringify");

    let fixtures: [(&str, CastingMessage); 6] = [
        ("load", make_load()),
        ("play", make_play()),
        ("seek", make_seek()),
        ("ack", make_ack()),
        ("status", make_status()),
        ("status_detail", make_status_with_detail()),
    ];

    for (name, msg) in &fixtures {
        group.bench_with_input(BenchmarkId::from_parameter(name), msg, |b, msg| {
            b.iter(|| stringify(black_box(msg)).unwrap());
        });
    }

    group.finish();
}

fn bench_parse_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_decode");

    let fixtures: [(&str, CastingMessage); 6] = [
        ("load", make_load()),
        ("play", make_play()),
        ("seek", make_seek()),
        ("ack", make_ack()),
        ("status", make_status()),
        ("status_detail", make_status_with_detail()),
    ];

    for (name, msg) in &fixtures {
        let text = stringify(msg).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |b, text| {
            b.iter(|| {
                let envelopes = parse(black_box(text)).unwrap();
                envelopes[0].decode().unwrap()
            });
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");

    for len in [2u64, 10, 50] {
        let batch = make_command_batch(len);
        let text = stringify_batch(&batch).unwrap();

        group.bench_with_input(BenchmarkId::new("parse_decode", len), &text, |b, text| {
            b.iter(|| {
                parse(black_box(text))
                    .unwrap()
                    .iter()
                    .map(|e| e.decode().unwrap())
                    .collect::<Vec<_>>()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stringify, bench_parse_decode, bench_batch);
criterion_main!(benches);
