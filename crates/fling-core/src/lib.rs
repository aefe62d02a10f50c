//! # fling-core
//!
//! Shared casting-protocol library for FlingCast: the JSON wire envelope,
//! its validation rules, and the sequence-number bookkeeping used by both
//! ends of a casting session.
//!
//! A casting session connects a **controller** (the remote device that
//! initiates the cast — a phone or browser) to a **receiver** (the TV-side
//! player). The controller sends `load`/`play`/`pause`/`seek` commands;
//! the receiver answers every command with an `ack` and pushes `status`
//! reports as playback progresses. Each direction numbers its messages
//! independently so the other end can detect stale, duplicated, or
//! out-of-order delivery.
//!
//! This crate has zero dependencies on OS APIs, transports, or async
//! runtimes. It defines:
//!
//! - **`protocol::messages`** – the typed message set and the playback
//!   status vocabulary.
//! - **`protocol::codec`** – JSON encoding, the concatenated-object batch
//!   format, and per-field validation.
//! - **`protocol::sequence`** – the outgoing sequence counter.
//!
//! The session layer that applies the sequencing contract lives in the
//! `fling-receiver` crate.

pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `fling_core::CastingMessage` instead of the full module path.
pub use protocol::codec::{parse, stringify, stringify_batch, CodecError, Envelope};
pub use protocol::messages::{CastingMessage, PlaybackStatus};
pub use protocol::sequence::SequenceCounter;
