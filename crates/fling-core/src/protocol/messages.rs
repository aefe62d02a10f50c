//! All FlingCast casting-protocol message types.
//!
//! The wire unit is a single JSON object tagged by a `"type"` field; the six
//! known types split by direction:
//!
//! - **Controller → receiver**: `load`, `play`, `pause`, `seek` — commands
//!   for the TV-side player, each carrying the controller's per-direction
//!   sequence number.
//! - **Receiver → controller**: `ack` — receipt of one inbound command,
//!   echoing its `seq` and carrying an error string on rejection — and
//!   `status` — playback status push, numbered by the receiver's own
//!   sequence counter.
//!
//! Serde's `#[serde(tag = "type")]` attribute produces exactly the
//! `{"type":"load","seq":3,"url":"…"}` shape the controller speaks.
//! Deserialization deliberately does NOT go through serde derive: inbound
//! objects are validated field by field in [`crate::protocol::codec`] so a
//! rejected message can still name its offending field and be acknowledged
//! by `seq`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Playback status vocabulary ────────────────────────────────────────────────

/// Status values the receiver reports while driving the video element.
///
/// This is the complete vocabulary the player layer emits: `loaded` after
/// metadata arrives, `buffering`/`buffered` around stalls, `playing` and
/// `seeked` on the corresponding media events, `stopped` on pause or end of
/// stream, and `error` with the media error code attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Loaded,
    Buffering,
    Buffered,
    Playing,
    Seeked,
    Stopped,
    Error,
}

impl PlaybackStatus {
    /// The wire string for this status, as it appears in the JSON envelope.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Loaded => "loaded",
            PlaybackStatus::Buffering => "buffering",
            PlaybackStatus::Buffered => "buffered",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Seeked => "seeked",
            PlaybackStatus::Stopped => "stopped",
            PlaybackStatus::Error => "error",
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaybackStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loaded" => Ok(PlaybackStatus::Loaded),
            "buffering" => Ok(PlaybackStatus::Buffering),
            "buffered" => Ok(PlaybackStatus::Buffered),
            "playing" => Ok(PlaybackStatus::Playing),
            "seeked" => Ok(PlaybackStatus::Seeked),
            "stopped" => Ok(PlaybackStatus::Stopped),
            "error" => Ok(PlaybackStatus::Error),
            _ => Err(()),
        }
    }
}

// ── Top-level message enum ────────────────────────────────────────────────────

/// All valid casting messages, discriminated by the `"type"` tag.
///
/// Every variant carries `seq`, the per-direction monotonically increasing
/// sequence number assigned by its sender. Optional fields are omitted from
/// the wire form entirely rather than serialized as `null`, matching what
/// remote controllers expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CastingMessage {
    /// Controller asks the receiver to load a video.
    Load { seq: u64, url: String },

    /// Controller asks the receiver to start or resume playback.
    Play { seq: u64 },

    /// Controller asks the receiver to pause playback.
    Pause { seq: u64 },

    /// Controller asks the receiver to seek. `time` is in seconds and must
    /// be strictly positive.
    Seek { seq: u64, time: f64 },

    /// Receiver acknowledges one inbound message, echoing its `seq`.
    /// `error` is present exactly when the message was rejected.
    Ack {
        seq: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    /// Receiver reports playback status. `time` is the current playback
    /// position in seconds; `error` carries the media error code when
    /// `status` is [`PlaybackStatus::Error`]; `detail` is free-form context
    /// for the controller UI.
    Status {
        seq: u64,
        status: PlaybackStatus,
        time: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<serde_json::Value>,
    },
}

impl CastingMessage {
    /// Returns the sender-assigned sequence number of this message.
    pub fn seq(&self) -> u64 {
        match self {
            CastingMessage::Load { seq, .. }
            | CastingMessage::Play { seq }
            | CastingMessage::Pause { seq }
            | CastingMessage::Seek { seq, .. }
            | CastingMessage::Ack { seq, .. }
            | CastingMessage::Status { seq, .. } => *seq,
        }
    }

    /// Returns the wire `"type"` tag for this message.
    pub fn message_type(&self) -> &'static str {
        match self {
            CastingMessage::Load { .. } => "load",
            CastingMessage::Play { .. } => "play",
            CastingMessage::Pause { .. } => "pause",
            CastingMessage::Seek { .. } => "seek",
            CastingMessage::Ack { .. } => "ack",
            CastingMessage::Status { .. } => "status",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
