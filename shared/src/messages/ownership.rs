use tandem_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::{entity::entity_id::EntityId, types::PeerId};

/// Client asks the server to become the authoritative peer of an entity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnershipRequest {
    pub entity: EntityId,
    pub requester: PeerId,
}

impl Serde for OwnershipRequest {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.entity.ser(writer);
        self.requester.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let entity = EntityId::de(reader)?;
        let requester = PeerId::de(reader)?;
        Ok(Self { entity, requester })
    }
}

/// Server decision naming the new owner of an entity. `owner` is `None` when
/// the entity was released.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnershipTransfer {
    pub entity: EntityId,
    pub owner: Option<PeerId>,
    pub epoch: u32,
}

impl Serde for OwnershipTransfer {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.entity.ser(writer);
        self.owner.ser(writer);
        UnsignedVariableInteger::<7>::new(self.epoch).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let entity = EntityId::de(reader)?;
        let owner = Option::<PeerId>::de(reader)?;
        let epoch = UnsignedVariableInteger::<7>::de(reader)?.to::<u32>()?;
        Ok(Self {
            entity,
            owner,
            epoch,
        })
    }
}
