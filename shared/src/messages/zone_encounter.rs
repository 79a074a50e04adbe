use tandem_serde::{BitReader, BitWrite, Serde, SerdeErr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ZoneEncounterEventType {
    Unknown = 0,
    StartEncounter = 1,
    PauseEncounter = 2,
    CompleteEncounter = 3,
}

impl Serde for ZoneEncounterEventType {
    fn ser(&self, writer: &mut dyn BitWrite) {
        (*self as u8).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match u8::de(reader)? {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::StartEncounter),
            2 => Ok(Self::PauseEncounter),
            3 => Ok(Self::CompleteEncounter),
            value => Err(SerdeErr::UnknownVariant {
                type_name: "ZoneEncounterEventType",
                value: u32::from(value),
            }),
        }
    }
}

/// A zone encounter changed state. The zone is addressed by its full scene
/// path, since zones are never spawned as entities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneEncounterEvent {
    pub event_type: ZoneEncounterEventType,
    pub full_path: String,
}

impl Serde for ZoneEncounterEvent {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.event_type.ser(writer);
        self.full_path.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let event_type = ZoneEncounterEventType::de(reader)?;
        let full_path = String::de(reader)?;
        Ok(Self {
            event_type,
            full_path,
        })
    }
}
