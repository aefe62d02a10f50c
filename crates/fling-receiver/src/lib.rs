//! # fling-receiver
//!
//! Receiver-side session layer for FlingCast: the component that turns a
//! presentation-style transport into an ordered, validated, acknowledged
//! command stream for the TV-side player.
//!
//! # Architecture
//!
//! ```text
//! Controller (remote device)
//!         ↕  framed JSON text (fling-core envelope)
//! presentation transport  — injected, implements domain::transport
//!         ↕
//! [fling-receiver]
//!   ├── domain/        Pure types: transport contract, events, policy
//!   └── application/   SessionConnector: lifecycle + sequencing pipeline
//!         ↓  ConnectorEvent (Connected / Request / Closed)
//! player layer (video element wrapper, UI) — out of scope here
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no external dependencies beyond error derivation: no
//!   I/O, no async, no frameworks.
//! - `application` depends on `domain` and `fling-core` only.
//! - There is deliberately no infrastructure layer in this crate: the
//!   concrete transport adapter (the actual Presentation API binding) is
//!   platform glue owned by the embedding application, which forwards the
//!   transport's session-ready / state-change / message callbacks into the
//!   connector and subscribes to its events.
//!
//! # Typical wiring
//!
//! ```rust,ignore
//! let mut connector = SessionConnector::new(platform_transport);
//! connector.on_event(|event| match event {
//!     ConnectorEvent::Request(ControlRequest::Load { url }) => player.queue_load(url),
//!     ConnectorEvent::Connected => ui.show_ready(),
//!     ConnectorEvent::Closed => ui.show_session_lost(),
//!     _ => {}
//! });
//! connector.init()?;
//! // later, from media callbacks:
//! connector.report_status(PlaybackStatus::Playing, &StatusReport::at(t))?;
//! ```

pub mod application;
pub mod domain;

pub use application::connector::{ConnectorError, ConnectorState, SessionConnector, StatusReport};
pub use domain::config::ConnectorPolicy;
pub use domain::events::{ConnectorEvent, ControlRequest};
pub use domain::transport::{SessionState, Transport, TransportError, TransportSession};
