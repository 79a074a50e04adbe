use thiserror::Error;

use crate::{entity::entity_id::EntityId, types::ObjectHandle};

/// Errors that can occur while spawning or looking up entities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Every id in the compact id space is in use
    #[error("Entity id space exhausted - all {0} ids are in use")]
    IdSpaceExhausted(usize),

    /// An entity with this id already exists
    #[error("Entity {0:?} already exists")]
    AlreadyExists(EntityId),

    /// The object already belongs to another entity
    #[error("Object {object:?} already belongs to entity {entity:?}")]
    RootAlreadyBound {
        object: ObjectHandle,
        entity: EntityId,
    },

    /// No entity with this id exists
    #[error("Entity {0:?} does not exist")]
    NotFound(EntityId),
}
