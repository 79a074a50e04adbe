use thiserror::Error;

use crate::entity::entity_id::EntityId;

/// Errors that can occur during ownership arbitration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// Ownership can only change through a connected server
    #[error("No server connection - ownership cannot be requested")]
    NoServer,

    /// Only the server decides transfers
    #[error("Ownership transfers can only be decided by the server")]
    NotServer,

    /// The entity refuses transfers while locked
    #[error("Entity {0:?} is owner-locked")]
    OwnerLocked(EntityId),

    /// The entity has gone through every epoch
    #[error("Entity {0:?} has run out of ownership epochs")]
    EpochExhausted(EntityId),
}
