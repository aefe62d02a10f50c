//! Integration tests for the fling-core casting codec.
//!
//! These tests exercise complete round trips of every message shape through
//! the public API — stringify, parse, decode, and the sequence counter
//! together — including the concatenated batch form the transport delivers.

use fling_core::{
    parse, stringify, stringify_batch, CastingMessage, CodecError, PlaybackStatus, SequenceCounter,
};
use serde_json::json;

/// Stringifies a message and parses it back, asserting the decoded message
/// matches the original.
fn roundtrip(msg: CastingMessage) -> CastingMessage {
    let text = stringify(&msg).expect("stringify must succeed");
    let envelopes = parse(&text).expect("parse must succeed");
    assert_eq!(envelopes.len(), 1, "one message must parse to one envelope");
    envelopes[0].decode().expect("decode must succeed")
}

#[test]
fn test_roundtrip_load_message() {
    let original = CastingMessage::Load {
        seq: 1,
        url: "http://www.example.com/dummy.webm".to_string(),
    };

    assert_eq!(original, roundtrip(original.clone()));
}

#[test]
fn test_roundtrip_play_and_pause_messages() {
    let play = CastingMessage::Play { seq: 2 };
    let pause = CastingMessage::Pause { seq: 3 };

    assert_eq!(play, roundtrip(play.clone()));
    assert_eq!(pause, roundtrip(pause.clone()));
}

#[test]
fn test_roundtrip_seek_message() {
    let original = CastingMessage::Seek {
        seq: 4,
        time: 127.75,
    };

    assert_eq!(original, roundtrip(original.clone()));
}

#[test]
fn test_roundtrip_ack_message() {
    let clean = CastingMessage::Ack { seq: 5, error: None };
    let rejected = CastingMessage::Ack {
        seq: 6,
        error: Some("Controller does not provide the url to load.".to_string()),
    };

    assert_eq!(clean, roundtrip(clean.clone()));
    assert_eq!(rejected, roundtrip(rejected.clone()));
}

#[test]
fn test_roundtrip_every_status_vocabulary_word() {
    for status in [
        PlaybackStatus::Loaded,
        PlaybackStatus::Buffering,
        PlaybackStatus::Buffered,
        PlaybackStatus::Playing,
        PlaybackStatus::Seeked,
        PlaybackStatus::Stopped,
        PlaybackStatus::Error,
    ] {
        let original = CastingMessage::Status {
            seq: 0,
            status,
            time: 42.0,
            error: None,
            detail: None,
        };
        assert_eq!(original, roundtrip(original.clone()));
    }
}

#[test]
fn test_roundtrip_status_with_error_and_detail() {
    let original = CastingMessage::Status {
        seq: 8,
        status: PlaybackStatus::Error,
        time: 12.0,
        error: Some("3".to_string()),
        detail: Some(json!({ "code": 3, "src": "http://example.com/a.webm" })),
    };

    assert_eq!(original, roundtrip(original.clone()));
}

#[test]
fn test_roundtrip_batch_preserves_each_member() {
    let counter = SequenceCounter::starting_at(1);
    let batch = vec![
        CastingMessage::Load {
            seq: counter.next(),
            url: "http://example.com/v.webm".to_string(),
        },
        CastingMessage::Play { seq: counter.next() },
        CastingMessage::Seek {
            seq: counter.next(),
            time: 30.0,
        },
        CastingMessage::Pause { seq: counter.next() },
    ];

    let text = stringify_batch(&batch).expect("batch stringify must succeed");
    let envelopes = parse(&text).expect("batch parse must succeed");

    assert_eq!(envelopes.len(), batch.len());
    for (envelope, original) in envelopes.iter().zip(&batch) {
        assert_eq!(envelope.decode().expect("decode"), *original);
    }
}

#[test]
fn test_sequence_counter_numbers_consecutive_messages() {
    let counter = SequenceCounter::new();

    let first = CastingMessage::Status {
        seq: counter.next(),
        status: PlaybackStatus::Loaded,
        time: 0.0,
        error: None,
        detail: None,
    };
    let second = CastingMessage::Status {
        seq: counter.next(),
        status: PlaybackStatus::Playing,
        time: 1.0,
        error: None,
        detail: None,
    };

    assert_eq!(first.seq(), 0);
    assert_eq!(second.seq(), 1);

    // The numbers survive the wire.
    assert_eq!(roundtrip(first.clone()).seq(), 0);
    assert_eq!(roundtrip(second.clone()).seq(), 1);
}

#[test]
fn test_batch_with_trailing_garbage_is_rejected_wholesale() {
    let mut text = stringify(&CastingMessage::Play { seq: 1 }).unwrap();
    text.push_str("garbage");

    assert!(matches!(
        parse(&text),
        Err(CodecError::MalformedMessage(_))
    ));
}
