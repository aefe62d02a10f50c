//! Connector policy knobs.
//!
//! Two inbound-handling behaviors varied across historical revisions of
//! the casting receiver; [`ConnectorPolicy`] pins each one explicitly,
//! defaulting to the ack-always resolution. Keeping the policy as a plain
//! struct (no global state, no environment reads) means a test or embedder
//! states its choice at construction time and nothing else can change it.

/// Inbound-handling policy for a [`SessionConnector`].
///
/// | Field               | Default | Meaning                                   |
/// |---------------------|---------|-------------------------------------------|
/// | `ack_stale_messages` | `true` | ack (with a stale notice) messages whose `seq` was already seen |
/// | `ack_unknown_types`  | `true` | ack (with an error) messages of unrecognized type instead of surfacing the failure to the adapter |
///
/// With `ack_stale_messages` disabled, stale messages are dropped without
/// a reply — the retransmitting controller gets no receipt. With
/// `ack_unknown_types` disabled, an unrecognized type aborts that
/// message's handling with an error returned to the transport adapter.
///
/// [`SessionConnector`]: crate::application::connector::SessionConnector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorPolicy {
    /// Reply with an ack when an already-seen sequence number arrives.
    pub ack_stale_messages: bool,
    /// Reply with an error-carrying ack for unrecognized message types.
    pub ack_unknown_types: bool,
}

impl Default for ConnectorPolicy {
    fn default() -> Self {
        Self {
            ack_stale_messages: true,
            ack_unknown_types: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_acks_stale_messages() {
        // The retransmitting controller needs a receipt, so acking stale
        // messages is the default.
        assert!(ConnectorPolicy::default().ack_stale_messages);
    }

    #[test]
    fn test_default_acks_unknown_types() {
        // Consistent with schema-violation handling: the remote peer is
        // the one that must see and react to the failure.
        assert!(ConnectorPolicy::default().ack_unknown_types);
    }

    #[test]
    fn test_policy_is_copyable() {
        let policy = ConnectorPolicy {
            ack_stale_messages: false,
            ack_unknown_types: true,
        };
        let copy = policy;
        assert_eq!(policy, copy);
    }
}
