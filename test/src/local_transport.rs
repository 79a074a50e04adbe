use tandem_shared::{Channel, Target, Transport};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outgoing {
    pub target: Target,
    pub channel: Channel,
    pub bytes: Vec<u8>,
}

/// Collects everything a session sends until the test network routes it
pub struct LocalTransport {
    is_server: bool,
    connected: bool,
    outbox: Vec<Outgoing>,
}

impl LocalTransport {
    pub fn server() -> Self {
        Self {
            is_server: true,
            connected: true,
            outbox: Vec::new(),
        }
    }

    pub fn client() -> Self {
        Self {
            is_server: false,
            connected: true,
            outbox: Vec::new(),
        }
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn has_connection(&self) -> bool {
        self.connected
    }

    pub fn outbox(&self) -> &[Outgoing] {
        &self.outbox
    }

    pub fn take_outbox(&mut self) -> Vec<Outgoing> {
        std::mem::take(&mut self.outbox)
    }
}

impl Transport for LocalTransport {
    fn has_server(&self) -> bool {
        self.is_server || self.connected
    }

    fn send(&mut self, target: Target, channel: Channel, bytes: &[u8]) {
        self.outbox.push(Outgoing {
            target,
            channel,
            bytes: bytes.to_vec(),
        });
    }
}
