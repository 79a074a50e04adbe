use thiserror::Error;

use crate::hierarchy::hierarchy_hasher::HierarchyHash;

/// Errors that can occur while indexing components by identity hash
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The component is already present in the table
    #[error("Component {component} is already registered under hash {hash:?} at slot {slot}")]
    AlreadyRegistered {
        component: String,
        hash: HierarchyHash,
        slot: u16,
    },

    /// Every collision slot for this hash is taken
    #[error("Hash {hash:?} has no collision slot left")]
    SlotsExhausted { hash: HierarchyHash },
}

/// Errors that can occur while building or installing the extender table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtenderError {
    /// The same extender type was added twice
    #[error("Extender type {name} was already registered")]
    DuplicateExtender { name: &'static str },

    /// A table is already installed for this process
    #[error("An extender registry is already installed. Call ExtenderRegistry::reset() first")]
    AlreadyInstalled,

    /// No table has been installed yet
    #[error("No extender registry has been installed")]
    NotInstalled,

    /// The process-wide slot lock is poisoned
    #[error("Extender registry lock is poisoned - a panic occurred while holding it")]
    LockPoisoned,
}
