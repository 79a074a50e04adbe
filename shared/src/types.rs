use tandem_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

/// Frames counted by the variable-rate update loop
pub type FrameCount = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostType {
    Server,
    Client,
}

impl HostType {
    pub fn is_server(self) -> bool {
        self == HostType::Server
    }
}

/// Compact per-session identifier of a connected peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(pub u8);

impl PeerId {
    /// The hosting server always takes the first id
    pub const SERVER: PeerId = PeerId(0);

    pub fn is_server(&self) -> bool {
        *self == Self::SERVER
    }
}

impl Serde for PeerId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(PeerId(u8::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for PeerId {
    fn const_bit_length() -> u32 {
        <u8 as ConstBitLength>::const_bit_length()
    }
}

/// Engine-side handle of a live local object (scene node, rigid body, grip).
///
/// Handles are process-local and never sent over the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u64);
