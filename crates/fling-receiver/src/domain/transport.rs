//! The injected presentation-transport contract.
//!
//! The receiver never opens its own connection: the platform hands it a
//! presentation-style transport that owns the session lifecycle and the
//! framed-text channel. This module specifies that collaborator as traits;
//! concrete adapters (the actual Presentation API binding, a WebSocket
//! shim, a test fake) live with the embedding application.
//!
//! # Notification points
//!
//! The adapter forwards the transport's three notifications into the
//! connector:
//!
//! | transport notification      | connector entry point              |
//! |-----------------------------|------------------------------------|
//! | session became available    | `SessionConnector::on_session_ready` |
//! | session state changed       | `SessionConnector::on_session_state_change` |
//! | text frame received         | `SessionConnector::on_message`     |
//!
//! The connector never calls [`TransportSession::send`] before the session
//! reports [`SessionState::Connected`].

use std::fmt;
use thiserror::Error;

/// Lifecycle state of the underlying transport session.
///
/// These are the session's own states, as reported by the transport; the
/// connector keeps its own, coarser state machine on top of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The session exists but the channel is not yet usable.
    Connecting,
    /// The channel is open; frames can be sent and received.
    Connected,
    /// The channel was closed by either end.
    Closed,
    /// The session was torn down and cannot be revived.
    Terminated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Connecting => "connecting",
            SessionState::Connected => "connected",
            SessionState::Closed => "closed",
            SessionState::Terminated => "terminated",
        };
        f.write_str(s)
    }
}

/// Errors surfaced by a transport adapter.
#[derive(Debug, Error, PartialEq)]
pub enum TransportError {
    /// The session is not in a state that allows sending.
    #[error("transport session is not connected")]
    NotConnected,

    /// The underlying channel rejected the frame.
    #[error("transport send failed: {0}")]
    Send(String),
}

/// One live session on a transport.
///
/// The session handle is owned by the [`Transport`]; the connector only
/// borrows it for the duration of a call.
pub trait TransportSession {
    /// The session's current lifecycle state.
    fn state(&self) -> SessionState;

    /// Sends one framed text payload to the remote end.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the session is not connected or the
    /// channel rejects the frame.
    fn send(&mut self, payload: &str) -> Result<(), TransportError>;
}

/// The presentation-style transport a connector is bound to.
pub trait Transport {
    /// The session handle type this transport produces.
    type Session: TransportSession;

    /// The currently active session, if one exists yet.
    ///
    /// Before the controller connects there is no session; the transport
    /// raises its session-ready notification once one appears.
    fn session(&mut self) -> Option<&mut Self::Session>;
}
