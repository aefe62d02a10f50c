//! Events the connector emits to the player layer.
//!
//! The vocabulary is fixed and enumerable, so it is a closed variant type
//! rather than a string-keyed event bus: the player matches exhaustively
//! and the compiler flags any variant it forgot to handle.

/// A validated, deduplicated command from the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlRequest {
    /// Load the video at `url` and prepare playback.
    Load { url: String },
    /// Start or resume playback.
    Play,
    /// Pause playback.
    Pause,
    /// Seek to `time` seconds (always > 0; validated on the wire).
    Seek { time: f64 },
}

/// Everything a [`SessionConnector`] reports to its listeners.
///
/// Events are delivered synchronously, in registration order, on the
/// thread that drove the connector.
///
/// [`SessionConnector`]: crate::application::connector::SessionConnector
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectorEvent {
    /// The session became usable; commands and status reports may flow.
    Connected,
    /// The controller issued a command.
    Request(ControlRequest),
    /// The session closed or terminated. The layer above surfaces this as
    /// its "cast session lost" condition; no further events follow.
    Closed,
}
