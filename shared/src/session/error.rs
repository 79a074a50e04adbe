use thiserror::Error;

use crate::{
    entity::error::EntityError,
    messages::MessageError,
    ownership::error::OwnershipError,
    registry::error::{ExtenderError, RegistryError},
    types::ObjectHandle,
};

/// Errors that can occur while driving a `SyncSession`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Extender(#[from] ExtenderError),

    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Message(#[from] MessageError),

    /// The object is not (or no longer) part of the scene
    #[error("Object {0:?} is not in the scene")]
    NotInScene(ObjectHandle),

    /// The grip is neither on an entity nor registered as a static grip
    #[error("Grip {0:?} is not known to the session")]
    UnknownGrip(ObjectHandle),

    /// The operation can only run on the server
    #[error("Only the server can do this")]
    NotServer,
}
