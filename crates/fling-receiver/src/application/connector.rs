//! The receiver-side session connector.
//!
//! [`SessionConnector`] owns the message-sequencing contract over one
//! transport session, in both directions:
//!
//! - **Inbound** (controller → receiver): parse the payload, order by
//!   sequence number, drop stale duplicates, validate, dispatch the typed
//!   [`ControlRequest`] to listeners, and answer every accepted message
//!   with exactly one `ack`.
//! - **Outbound** (receiver → controller): number every `status` push from
//!   the connector's own counter, with no gaps and no repeats.
//!
//! All handling is single-threaded event dispatch: the embedding adapter
//! calls [`on_session_ready`], [`on_session_state_change`], and
//! [`on_message`] from the transport's callbacks, and the player layer
//! calls [`report_status`] from its media callbacks. Each message is
//! processed to completion (ack sent) before the next is considered.
//!
//! [`on_session_ready`]: SessionConnector::on_session_ready
//! [`on_session_state_change`]: SessionConnector::on_session_state_change
//! [`on_message`]: SessionConnector::on_message
//! [`report_status`]: SessionConnector::report_status

use fling_core::protocol::codec::{self, CodecError, Envelope};
use fling_core::protocol::messages::{CastingMessage, PlaybackStatus};
use fling_core::protocol::sequence::SequenceCounter;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::config::ConnectorPolicy;
use crate::domain::events::{ConnectorEvent, ControlRequest};
use crate::domain::transport::{SessionState, Transport, TransportError, TransportSession};

// ── Connector state machine ───────────────────────────────────────────────────

/// Lifecycle state of a [`SessionConnector`].
///
/// `Uninitialized → AwaitingSession → Connected → Closed`, with `Closed`
/// terminal. A connector that starts with an already-connected session
/// skips `AwaitingSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorState {
    /// Constructed but [`SessionConnector::init`] has not run yet.
    Uninitialized,
    /// Waiting for the transport's session to appear or become connected.
    AwaitingSession,
    /// The session is usable; messages flow in both directions.
    Connected,
    /// The session closed or terminated. No further processing happens.
    Closed,
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors raised to the connector's local callers.
///
/// Inbound schema violations never appear here — those are converted into
/// error-carrying acks for the controller to react to. What does appear is
/// local misuse (calling before the session is up, reporting an impossible
/// playback time) and failures of the payload text or transport itself.
#[derive(Debug, Error, PartialEq)]
pub enum ConnectorError {
    /// [`SessionConnector::init`] was called more than once.
    #[error("connector already initialized")]
    AlreadyInitialized,

    /// The operation needs a connected session.
    #[error("connector is not connected (state: {state:?})")]
    NotConnected { state: ConnectorState },

    /// A status report's playback time is not a finite number >= 0.
    #[error("illegal status report time: must be a finite number >= 0, got {0}")]
    IllegalTime(f64),

    /// The wire payload or a message failed codec-level handling.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The transport rejected a send.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// ── Status reports ────────────────────────────────────────────────────────────

/// Data attached to one outgoing status push.
///
/// `time` is the current playback position in seconds. `error` carries the
/// media error code when reporting [`PlaybackStatus::Error`]; `detail` is
/// free-form context for the controller UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusReport {
    pub time: f64,
    pub error: Option<String>,
    pub detail: Option<Value>,
}

impl StatusReport {
    /// A report at playback position `time` with no error or detail.
    pub fn at(time: f64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// A report at `time` carrying an error string.
    pub fn with_error(time: f64, error: impl Into<String>) -> Self {
        Self {
            time,
            error: Some(error.into()),
            detail: None,
        }
    }
}

// ── SessionConnector ──────────────────────────────────────────────────────────

/// Listener invoked synchronously for every [`ConnectorEvent`].
pub type EventListener = Box<dyn FnMut(&ConnectorEvent)>;

/// The receiver's session connector. One instance per active session; all
/// sequencing state lives in private fields, never in shared statics.
pub struct SessionConnector<T: Transport> {
    transport: T,
    policy: ConnectorPolicy,
    state: ConnectorState,
    /// Numbers outgoing status pushes. The sole source of receiver →
    /// controller sequence numbers.
    outgoing_seq: SequenceCounter,
    /// Highest inbound sequence number seen so far; `None` until the first
    /// message arrives. Only ever increases.
    last_received_seq: Option<u64>,
    listeners: Vec<EventListener>,
}

impl<T: Transport> SessionConnector<T> {
    /// Creates a connector bound to `transport` with the default policy.
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, ConnectorPolicy::default())
    }

    /// Creates a connector bound to `transport` with an explicit policy.
    pub fn with_policy(transport: T, policy: ConnectorPolicy) -> Self {
        Self {
            transport,
            policy,
            state: ConnectorState::Uninitialized,
            outgoing_seq: SequenceCounter::new(),
            last_received_seq: None,
            listeners: Vec::new(),
        }
    }

    /// The connector's current lifecycle state.
    pub fn state(&self) -> ConnectorState {
        self.state
    }

    /// Highest inbound sequence number accepted so far, if any.
    pub fn last_received_seq(&self) -> Option<u64> {
        self.last_received_seq
    }

    /// Registers a listener for connector events. Listeners run
    /// synchronously, in registration order, on the thread driving the
    /// connector.
    pub fn on_event(&mut self, listener: impl FnMut(&ConnectorEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Initializes the connector, once.
    ///
    /// If the transport already has a connected session the connector goes
    /// straight to [`ConnectorState::Connected`]; otherwise it waits for
    /// the transport's session-ready or state-change notification.
    ///
    /// # Errors
    ///
    /// [`ConnectorError::AlreadyInitialized`] on a second call.
    pub fn init(&mut self) -> Result<(), ConnectorError> {
        if self.state != ConnectorState::Uninitialized {
            return Err(ConnectorError::AlreadyInitialized);
        }

        debug!("initializing casting connector");
        if self.transport.session().is_some() {
            self.adopt_session();
        } else {
            debug!("no session yet; awaiting session-ready");
            self.state = ConnectorState::AwaitingSession;
        }
        Ok(())
    }

    /// Transport notification: a session became available.
    pub fn on_session_ready(&mut self) {
        match self.state {
            ConnectorState::AwaitingSession => self.adopt_session(),
            _ => debug!("ignoring session-ready in state {:?}", self.state),
        }
    }

    /// Transport notification: the session's state changed.
    ///
    /// A transition to connected finishes session setup; a transition to
    /// closed or terminated makes the connector [`ConnectorState::Closed`]
    /// for good.
    pub fn on_session_state_change(&mut self) {
        if matches!(
            self.state,
            ConnectorState::Uninitialized | ConnectorState::Closed
        ) {
            return;
        }

        let Some(session) = self.transport.session() else {
            return;
        };
        match session.state() {
            SessionState::Connected => {
                if self.state != ConnectorState::Connected {
                    self.enter_connected();
                }
            }
            SessionState::Connecting => {}
            SessionState::Closed | SessionState::Terminated => self.enter_closed(),
        }
    }

    fn adopt_session(&mut self) {
        let Some(session) = self.transport.session() else {
            self.state = ConnectorState::AwaitingSession;
            return;
        };
        match session.state() {
            SessionState::Connected => self.enter_connected(),
            SessionState::Connecting => {
                debug!("session still connecting; awaiting state change");
                self.state = ConnectorState::AwaitingSession;
            }
            state @ (SessionState::Closed | SessionState::Terminated) => {
                warn!("session already {state} at adoption; closing connector");
                self.enter_closed();
            }
        }
    }

    fn enter_connected(&mut self) {
        debug!("casting session connected");
        self.state = ConnectorState::Connected;
        self.emit(&ConnectorEvent::Connected);
    }

    fn enter_closed(&mut self) {
        if self.state == ConnectorState::Closed {
            return;
        }
        debug!("casting session closed");
        self.state = ConnectorState::Closed;
        self.emit(&ConnectorEvent::Closed);
    }

    fn emit(&mut self, event: &ConnectorEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    fn require_connected(&self) -> Result<(), ConnectorError> {
        if self.state == ConnectorState::Connected {
            Ok(())
        } else {
            Err(ConnectorError::NotConnected { state: self.state })
        }
    }

    // ── Outbound ──────────────────────────────────────────────────────────────

    /// Serializes `msg` and sends it through the transport session.
    ///
    /// No sequencing is imposed here; callers needing numbered messages use
    /// [`reply_ack`] and [`report_status`].
    ///
    /// # Errors
    ///
    /// [`ConnectorError::NotConnected`] unless the connector is connected
    /// (the transport's `send` is never attempted), otherwise codec or
    /// transport failures.
    ///
    /// [`reply_ack`]: SessionConnector::reply_ack
    /// [`report_status`]: SessionConnector::report_status
    pub fn send_message(&mut self, msg: &CastingMessage) -> Result<(), ConnectorError> {
        self.require_connected()?;
        let text = codec::stringify(msg)?;
        let session = self
            .transport
            .session()
            .ok_or(ConnectorError::NotConnected { state: self.state })?;
        session.send(&text)?;
        Ok(())
    }

    /// Acknowledges the inbound message numbered `original_seq`, carrying
    /// `error` exactly when that message was rejected.
    pub fn reply_ack(
        &mut self,
        original_seq: u64,
        error: Option<String>,
    ) -> Result<(), ConnectorError> {
        self.send_message(&CastingMessage::Ack {
            seq: original_seq,
            error,
        })
    }

    /// Reports playback status to the controller.
    ///
    /// Claims the next outgoing sequence number and sends
    /// `status { seq, status, time, error?, detail? }`. The claim is the
    /// first side effect after validation, so no two reports can share a
    /// number and none is skipped.
    ///
    /// # Errors
    ///
    /// [`ConnectorError::NotConnected`] before the session is up (no send
    /// is attempted and no number is consumed);
    /// [`ConnectorError::IllegalTime`] unless `report.time` is a finite
    /// number >= 0.
    pub fn report_status(
        &mut self,
        status: PlaybackStatus,
        report: &StatusReport,
    ) -> Result<(), ConnectorError> {
        self.require_connected()?;
        if !report.time.is_finite() || report.time < 0.0 {
            return Err(ConnectorError::IllegalTime(report.time));
        }

        let seq = self.outgoing_seq.next();
        debug!("reporting status {status} at {} (seq {seq})", report.time);
        self.send_message(&CastingMessage::Status {
            seq,
            status,
            time: report.time,
            error: report.error.clone(),
            detail: report.detail.clone(),
        })
    }

    // ── Inbound ───────────────────────────────────────────────────────────────

    /// Transport notification: a text payload arrived.
    ///
    /// The payload may hold several concatenated messages; they are
    /// processed in ascending sequence order regardless of concatenation
    /// order, each running the full pipeline independently.
    ///
    /// # Errors
    ///
    /// [`ConnectorError::NotConnected`] when the connector is closed or
    /// not yet connected; [`CodecError::MalformedMessage`] when the
    /// payload is not a concatenation of JSON messages (nothing is
    /// processed and `last_received_seq` is untouched — whether to drop
    /// the session is the transport boundary's call); transport failures
    /// from the acks themselves.
    pub fn on_message(&mut self, payload: &str) -> Result<(), ConnectorError> {
        self.require_connected()?;

        let mut envelopes = codec::parse(payload)?;
        envelopes.sort_by_key(Envelope::seq);

        for envelope in &envelopes {
            self.handle_remote_message(envelope)?;
        }
        Ok(())
    }

    /// Runs one inbound message through the pipeline: stale check,
    /// validation, dispatch, ack.
    ///
    /// Validation failures do not surface here — they become the ack's
    /// error string (except an unknown type under the
    /// `ack_unknown_types = false` policy, which is raised to the adapter
    /// instead).
    pub fn handle_remote_message(&mut self, envelope: &Envelope) -> Result<(), ConnectorError> {
        let seq = envelope.seq();

        // Stale duplicates are acknowledged (so the retransmitting
        // controller gets its receipt) but never re-dispatched, and the
        // high-water mark stays put.
        if let Some(last) = self.last_received_seq {
            if seq <= last {
                debug!("dropping stale casting message seq {seq} (last received {last})");
                if self.policy.ack_stale_messages {
                    return self.reply_ack(
                        seq,
                        Some(format!(
                            "stale message: seq {seq} not newer than last received {last}"
                        )),
                    );
                }
                return Ok(());
            }
        }
        self.last_received_seq = Some(seq);

        let error = match envelope.decode() {
            Ok(message) => {
                self.dispatch_request(message);
                None
            }
            Err(err) => {
                if matches!(err, CodecError::UnknownMessageType(_)) && !self.policy.ack_unknown_types
                {
                    return Err(err.into());
                }
                warn!("rejecting casting message seq {seq}: {err}");
                Some(err.to_string())
            }
        };

        self.reply_ack(seq, error)
    }

    fn dispatch_request(&mut self, message: CastingMessage) {
        let request = match message {
            CastingMessage::Load { url, .. } => Some(ControlRequest::Load { url }),
            CastingMessage::Play { .. } => Some(ControlRequest::Play),
            CastingMessage::Pause { .. } => Some(ControlRequest::Pause),
            CastingMessage::Seek { time, .. } => Some(ControlRequest::Seek { time }),
            // Acks and status reports travel receiver → controller; one
            // arriving here is recorded and acknowledged but asks nothing
            // of the player.
            CastingMessage::Ack { .. } | CastingMessage::Status { .. } => None,
        };

        if let Some(request) = request {
            debug!("dispatching {request:?}");
            self.emit(&ConnectorEvent::Request(request));
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
