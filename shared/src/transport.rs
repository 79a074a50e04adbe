use crate::types::PeerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Ordered, guaranteed delivery
    Reliable,
    /// Latest-wins state, may be dropped
    Unreliable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Server,
    Peer(PeerId),
    Broadcast,
    BroadcastExcept(PeerId),
}

/// The dual-channel connection a session sends through.
///
/// Receiving is pull-based: the host hands incoming bytes to
/// `SyncSession::handle_incoming` together with the sender.
pub trait Transport {
    /// Whether a server connection is up (always true on the server itself)
    fn has_server(&self) -> bool;
    fn send(&mut self, target: Target, channel: Channel, bytes: &[u8]);
}
