use tandem_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::{
    entity::entity_id::EntityId, hierarchy::hierarchy_hasher::HierarchyHash, types::PeerId,
};

/// Turns a scene-baked body into a networked entity.
///
/// Clients send it without an id to ask for the spawn; the server answers
/// with the allocated id to every peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropCreation {
    pub entity: Option<EntityId>,
    pub hash: HierarchyHash,
    pub slot: u16,
    pub owner: PeerId,
}

impl Serde for PropCreation {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.entity.ser(writer);
        self.hash.ser(writer);
        UnsignedVariableInteger::<3>::new(self.slot).ser(writer);
        self.owner.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let entity = Option::<EntityId>::de(reader)?;
        let hash = HierarchyHash::de(reader)?;
        let slot = UnsignedVariableInteger::<3>::de(reader)?.to::<u16>()?;
        let owner = PeerId::de(reader)?;
        Ok(Self {
            entity,
            hash,
            slot,
            owner,
        })
    }
}
