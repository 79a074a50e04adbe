use glam::{Quat, Vec3};
use tandem_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::entity::entity_id::EntityId;

/// Latest physics state of an entity, sent by its owner every fixed step
#[derive(Clone, Debug, PartialEq)]
pub struct PoseUpdate {
    pub entity: EntityId,
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Receivers snap instead of blending from the previous target
    pub teleport: bool,
}

impl Serde for PoseUpdate {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.entity.ser(writer);
        self.position.ser(writer);
        self.rotation.ser(writer);
        self.velocity.ser(writer);
        self.angular_velocity.ser(writer);
        self.teleport.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            entity: EntityId::de(reader)?,
            position: Vec3::de(reader)?,
            rotation: Quat::de(reader)?,
            velocity: Vec3::de(reader)?,
            angular_velocity: Vec3::de(reader)?,
            teleport: bool::de(reader)?,
        })
    }
}
