use std::collections::{HashSet, VecDeque};

use tandem_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

use crate::entity::error::EntityError;

/// Session-wide identifier of a `NetworkEntity`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u16);

impl EntityId {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl Serde for EntityId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u16::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for EntityId {
    fn const_bit_length() -> u32 {
        <u16 as ConstBitLength>::const_bit_length()
    }
}

const ID_SPACE: usize = u16::MAX as usize + 1;

/// Hands out entity ids, reusing freed ones oldest first
#[derive(Default)]
pub struct EntityIdAllocator {
    next_fresh: usize,
    recycled: VecDeque<u16>,
    in_use: HashSet<u16>,
}

impl EntityIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&mut self) -> Result<EntityId, EntityError> {
        let value = match self.recycled.pop_front() {
            Some(value) => value,
            None => {
                if self.next_fresh >= ID_SPACE {
                    return Err(EntityError::IdSpaceExhausted(ID_SPACE));
                }
                let value = self.next_fresh as u16;
                self.next_fresh += 1;
                value
            }
        };

        self.in_use.insert(value);
        Ok(EntityId(value))
    }

    /// Returns an id to the pool. Ids this allocator never handed out are
    /// ignored.
    pub fn recycle(&mut self, id: EntityId) {
        if self.in_use.remove(&id.0) {
            self.recycled.push_back(id.0);
        }
    }

    pub fn in_use(&self) -> usize {
        self.in_use.len()
    }
}
