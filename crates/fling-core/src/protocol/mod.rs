//! Protocol module containing message types, the JSON codec, and the
//! sequence counter.

pub mod codec;
pub mod messages;
pub mod sequence;

pub use codec::{parse, stringify, stringify_batch, CodecError, Envelope};
pub use messages::{CastingMessage, PlaybackStatus};
pub use sequence::SequenceCounter;
