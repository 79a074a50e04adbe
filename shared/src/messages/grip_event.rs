use tandem_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::{
    entity::entity_id::EntityId, hierarchy::hierarchy_hasher::HierarchyHash, types::PeerId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GripEventType {
    Unknown = 0,
    Attach = 1,
    Detach = 2,
    TriggerDown = 3,
    MenuTap = 4,
}

impl Serde for GripEventType {
    fn ser(&self, writer: &mut dyn BitWrite) {
        (*self as u8).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match u8::de(reader)? {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Attach),
            2 => Ok(Self::Detach),
            3 => Ok(Self::TriggerDown),
            4 => Ok(Self::MenuTap),
            value => Err(SerdeErr::UnknownVariant {
                type_name: "GripEventType",
                value: u32::from(value),
            }),
        }
    }
}

/// Which grip a grip event refers to: one owned by a networked entity, or a
/// scene-baked grip located through its identity hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityTarget {
    Networked(EntityId),
    Static { hash: HierarchyHash, slot: u16 },
}

impl Serde for EntityTarget {
    fn ser(&self, writer: &mut dyn BitWrite) {
        match self {
            EntityTarget::Networked(entity) => {
                writer.write_bit(true);
                entity.ser(writer);
            }
            EntityTarget::Static { hash, slot } => {
                writer.write_bit(false);
                hash.ser(writer);
                UnsignedVariableInteger::<3>::new(*slot).ser(writer);
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        if reader.read_bit()? {
            Ok(EntityTarget::Networked(EntityId::de(reader)?))
        } else {
            let hash = HierarchyHash::de(reader)?;
            let slot = UnsignedVariableInteger::<3>::de(reader)?.to::<u16>()?;
            Ok(EntityTarget::Static { hash, slot })
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GripEvent {
    pub player: PeerId,
    pub target: EntityTarget,
    pub grip_index: u8,
    pub event_type: GripEventType,
}

impl Serde for GripEvent {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.player.ser(writer);
        self.target.ser(writer);
        self.grip_index.ser(writer);
        self.event_type.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            player: PeerId::de(reader)?,
            target: EntityTarget::de(reader)?,
            grip_index: u8::de(reader)?,
            event_type: GripEventType::de(reader)?,
        })
    }
}
