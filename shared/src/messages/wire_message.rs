use tandem_serde::{BitReader, BitWrite, Serde, MAX_STRING_BYTES};

use crate::{
    messages::{
        GripEvent, MessageError, MessageTag, OwnershipRequest, OwnershipTransfer, PoseUpdate,
        PropCreation, ZoneEncounterEvent,
    },
    transport::Channel,
};

/// Every message peers exchange: a tag byte followed by the payload
#[derive(Clone, Debug, PartialEq)]
pub enum WireMessage {
    OwnershipRequest(OwnershipRequest),
    OwnershipTransfer(OwnershipTransfer),
    PoseUpdate(PoseUpdate),
    GripEvent(GripEvent),
    ZoneEncounterEvent(ZoneEncounterEvent),
    PropCreation(PropCreation),
}

impl WireMessage {
    pub fn tag(&self) -> MessageTag {
        match self {
            WireMessage::OwnershipRequest(_) => MessageTag::OwnershipRequest,
            WireMessage::OwnershipTransfer(_) => MessageTag::OwnershipTransfer,
            WireMessage::PoseUpdate(_) => MessageTag::PoseUpdate,
            WireMessage::GripEvent(_) => MessageTag::GripEvent,
            WireMessage::ZoneEncounterEvent(_) => MessageTag::ZoneEncounterEvent,
            WireMessage::PropCreation(_) => MessageTag::PropCreation,
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            WireMessage::PoseUpdate(_) => Channel::Unreliable,
            _ => Channel::Reliable,
        }
    }

    /// Checks the limits `read` enforces on the receiving side
    pub fn validate(&self) -> Result<(), MessageError> {
        if let WireMessage::ZoneEncounterEvent(event) = self {
            let length = event.full_path.len();
            if length > MAX_STRING_BYTES {
                return Err(MessageError::Oversized {
                    tag: self.tag(),
                    length,
                    limit: MAX_STRING_BYTES,
                });
            }
        }
        Ok(())
    }

    pub fn write(&self, writer: &mut dyn BitWrite) {
        writer.write_byte(self.tag().to_byte());
        match self {
            WireMessage::OwnershipRequest(payload) => payload.ser(writer),
            WireMessage::OwnershipTransfer(payload) => payload.ser(writer),
            WireMessage::PoseUpdate(payload) => payload.ser(writer),
            WireMessage::GripEvent(payload) => payload.ser(writer),
            WireMessage::ZoneEncounterEvent(payload) => payload.ser(writer),
            WireMessage::PropCreation(payload) => payload.ser(writer),
        }
    }

    pub fn read(bytes: &[u8]) -> Result<Self, MessageError> {
        let mut reader = BitReader::new(bytes);
        let tag_byte = reader.read_byte().map_err(|_| MessageError::Empty)?;
        let tag = MessageTag::from_byte(tag_byte)?;

        let result = match tag {
            MessageTag::OwnershipRequest => {
                OwnershipRequest::de(&mut reader).map(WireMessage::OwnershipRequest)
            }
            MessageTag::OwnershipTransfer => {
                OwnershipTransfer::de(&mut reader).map(WireMessage::OwnershipTransfer)
            }
            MessageTag::PoseUpdate => PoseUpdate::de(&mut reader).map(WireMessage::PoseUpdate),
            MessageTag::GripEvent => GripEvent::de(&mut reader).map(WireMessage::GripEvent),
            MessageTag::ZoneEncounterEvent => {
                ZoneEncounterEvent::de(&mut reader).map(WireMessage::ZoneEncounterEvent)
            }
            MessageTag::PropCreation => {
                PropCreation::de(&mut reader).map(WireMessage::PropCreation)
            }
        };

        let message = result.map_err(|source| MessageError::Payload { tag, source })?;
        if reader.bytes_remaining() > 0 {
            return Err(MessageError::TrailingBytes { tag });
        }
        Ok(message)
    }
}
