use crate::messages::MessageError;

/// First byte of every message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageTag {
    OwnershipRequest = 1,
    OwnershipTransfer = 2,
    PoseUpdate = 3,
    GripEvent = 4,
    ZoneEncounterEvent = 5,
    PropCreation = 6,
}

impl MessageTag {
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Result<Self, MessageError> {
        match byte {
            1 => Ok(Self::OwnershipRequest),
            2 => Ok(Self::OwnershipTransfer),
            3 => Ok(Self::PoseUpdate),
            4 => Ok(Self::GripEvent),
            5 => Ok(Self::ZoneEncounterEvent),
            6 => Ok(Self::PropCreation),
            other => Err(MessageError::UnknownTag(other)),
        }
    }
}
