//! JSON codec for encoding and decoding casting messages.
//!
//! Wire format: one JSON object per message. When several messages share a
//! single transport payload they are concatenated directly, with no
//! delimiter:
//!
//! ```text
//! {"type":"load","seq":1,"url":"…"}{"type":"play","seq":2}
//! ```
//!
//! [`parse`] recovers exactly these concatenations. Decoding is split in
//! two stages so that a schema-invalid message can still be acknowledged:
//!
//! 1. [`parse`] turns the payload text into [`Envelope`]s — JSON objects
//!    with a usable `seq` — failing wholesale only when the text itself is
//!    not a concatenation of JSON objects (or an object has no `seq`, in
//!    which case the sequencing contract cannot be honored at all).
//! 2. [`Envelope::decode`] validates one envelope's fields and produces a
//!    typed [`CastingMessage`], naming the offending field on rejection.
//!    One envelope's failure never affects its batch siblings.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::protocol::messages::{CastingMessage, PlaybackStatus};

/// Errors that can occur while encoding, parsing, or validating messages.
#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    /// The payload text is not a concatenation of JSON objects carrying
    /// sequence numbers. Nothing in such a payload is processed.
    #[error("malformed message text: {0}")]
    MalformedMessage(String),

    /// A parsed message violates the schema for its type. The offending
    /// field is named so the controller sees it in the ack's error string.
    #[error("illegal `{field}` field in casting message: {reason}")]
    IllegalField { field: &'static str, reason: String },

    /// The `type` tag is not one of the six known message types.
    #[error("unknown casting message type `{0}`")]
    UnknownMessageType(String),

    /// The message could not be serialized to JSON.
    #[error("failed to serialize casting message: {0}")]
    Serialize(String),
}

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Encodes one [`CastingMessage`] as a single JSON object.
///
/// # Errors
///
/// Returns [`CodecError::Serialize`] if JSON serialization fails.
///
/// # Examples
///
/// ```rust
/// use fling_core::protocol::codec::{parse, stringify};
/// use fling_core::protocol::messages::CastingMessage;
///
/// let msg = CastingMessage::Play { seq: 4 };
/// let text = stringify(&msg).unwrap();
/// let envelopes = parse(&text).unwrap();
/// assert_eq!(envelopes[0].decode().unwrap(), msg);
/// ```
pub fn stringify(msg: &CastingMessage) -> Result<String, CodecError> {
    serde_json::to_string(msg).map_err(|e| CodecError::Serialize(e.to_string()))
}

/// Encodes a sequence of messages as the direct concatenation of their
/// JSON forms, the batched shape [`parse`] is defined to recover.
pub fn stringify_batch(msgs: &[CastingMessage]) -> Result<String, CodecError> {
    let mut text = String::new();
    for msg in msgs {
        text.push_str(&stringify(msg)?);
    }
    Ok(text)
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parses a transport payload into one or more [`Envelope`]s.
///
/// The payload must be a concatenation of JSON objects (a single object is
/// the common case; the transport may coalesce several). Envelopes are
/// returned in payload order — callers that care about sequence order sort
/// by [`Envelope::seq`] before processing.
///
/// # Errors
///
/// Returns [`CodecError::MalformedMessage`] when the text is not a
/// concatenation of JSON objects, contains no object at all, or contains an
/// object without a non-negative integer `seq`.
pub fn parse(text: &str) -> Result<Vec<Envelope>, CodecError> {
    let mut envelopes = Vec::new();

    for item in serde_json::Deserializer::from_str(text).into_iter::<Value>() {
        let value = item.map_err(|e| CodecError::MalformedMessage(e.to_string()))?;
        envelopes.push(Envelope::from_value(value)?);
    }

    if envelopes.is_empty() {
        return Err(CodecError::MalformedMessage(
            "payload contains no messages".to_string(),
        ));
    }

    Ok(envelopes)
}

/// A parsed but not yet validated casting message.
///
/// An envelope is guaranteed to be a JSON object with a non-negative
/// integer `seq`; everything else — including whether `type` is present,
/// known, and consistent with the other fields — is checked by [`decode`].
/// This split lets the receiver acknowledge (by `seq`) messages it must
/// reject.
///
/// [`decode`]: Envelope::decode
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    seq: u64,
    body: Map<String, Value>,
}

impl Envelope {
    fn from_value(value: Value) -> Result<Self, CodecError> {
        let body = match value {
            Value::Object(map) => map,
            other => {
                return Err(CodecError::MalformedMessage(format!(
                    "expected a JSON object, got {other}"
                )))
            }
        };

        let seq = body.get("seq").and_then(Value::as_u64).ok_or_else(|| {
            CodecError::MalformedMessage(
                "message has no non-negative integer `seq` field".to_string(),
            )
        })?;

        Ok(Self { seq, body })
    }

    /// The sender-assigned sequence number.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The raw `"type"` tag, if present and a string.
    pub fn message_type(&self) -> Option<&str> {
        self.body.get("type").and_then(Value::as_str)
    }

    /// Validates this envelope's fields and builds the typed message.
    ///
    /// # Errors
    ///
    /// - [`CodecError::IllegalField`] naming the offending field when a
    ///   required field is missing or has the wrong type/range: `load`
    ///   needs a string `url`; `seek` needs a number `time` > 0; `status`
    ///   needs a vocabulary `status` and a finite number `time` >= 0;
    ///   `error` must be a string wherever it appears.
    /// - [`CodecError::UnknownMessageType`] when `type` names none of the
    ///   six known types.
    pub fn decode(&self) -> Result<CastingMessage, CodecError> {
        let kind = match self.body.get("type") {
            Some(Value::String(s)) => s.as_str(),
            Some(_) => {
                return Err(CodecError::IllegalField {
                    field: "type",
                    reason: "must be a string".to_string(),
                })
            }
            None => {
                return Err(CodecError::IllegalField {
                    field: "type",
                    reason: "missing".to_string(),
                })
            }
        };

        match kind {
            "load" => {
                let url = self.require_str("url")?;
                Ok(CastingMessage::Load {
                    seq: self.seq,
                    url: url.to_string(),
                })
            }

            "play" => Ok(CastingMessage::Play { seq: self.seq }),

            "pause" => Ok(CastingMessage::Pause { seq: self.seq }),

            "seek" => {
                let time = self.require_number("time")?;
                // `!(time > 0.0)` also rejects a NaN smuggled in by a
                // non-conforming JSON parser upstream.
                if !(time > 0.0) {
                    return Err(CodecError::IllegalField {
                        field: "time",
                        reason: format!("seek time must be > 0, got {time}"),
                    });
                }
                Ok(CastingMessage::Seek { seq: self.seq, time })
            }

            "ack" => {
                let error = self.optional_str("error")?;
                Ok(CastingMessage::Ack { seq: self.seq, error })
            }

            "status" => {
                let raw = self.require_str("status")?;
                let status: PlaybackStatus = raw.parse().map_err(|_| {
                    CodecError::IllegalField {
                        field: "status",
                        reason: format!("unrecognized status `{raw}`"),
                    }
                })?;
                let time = self.require_number("time")?;
                if !time.is_finite() || time < 0.0 {
                    return Err(CodecError::IllegalField {
                        field: "time",
                        reason: format!("status time must be a finite number >= 0, got {time}"),
                    });
                }
                let error = self.optional_str("error")?;
                let detail = self.body.get("detail").cloned();
                Ok(CastingMessage::Status {
                    seq: self.seq,
                    status,
                    time,
                    error,
                    detail,
                })
            }

            other => Err(CodecError::UnknownMessageType(other.to_string())),
        }
    }

    // ── Field helpers ─────────────────────────────────────────────────────────

    fn require_str(&self, field: &'static str) -> Result<&str, CodecError> {
        match self.body.get(field) {
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(CodecError::IllegalField {
                field,
                reason: "must be a string".to_string(),
            }),
            None => Err(CodecError::IllegalField {
                field,
                reason: "missing".to_string(),
            }),
        }
    }

    fn require_number(&self, field: &'static str) -> Result<f64, CodecError> {
        match self.body.get(field) {
            Some(value) => value.as_f64().ok_or(CodecError::IllegalField {
                field,
                reason: "must be a number".to_string(),
            }),
            None => Err(CodecError::IllegalField {
                field,
                reason: "missing".to_string(),
            }),
        }
    }

    fn optional_str(&self, field: &'static str) -> Result<Option<String>, CodecError> {
        match self.body.get(field) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(CodecError::IllegalField {
                field,
                reason: "must be a string when present".to_string(),
            }),
            None => Ok(None),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
