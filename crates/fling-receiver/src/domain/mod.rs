//! Domain layer for fling-receiver.
//!
//! Pure types with no I/O: the transport contract the connector consumes,
//! the event vocabulary it emits, and its handling policy. Nothing here
//! touches a socket, a runtime, or the filesystem — concrete transport
//! adapters live with the embedding application.

pub mod config;
pub mod events;
pub mod transport;

pub use config::ConnectorPolicy;
pub use events::{ConnectorEvent, ControlRequest};
pub use transport::{SessionState, Transport, TransportError, TransportSession};
