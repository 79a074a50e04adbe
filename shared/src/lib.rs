//! # Tandem Shared
//! Entity identity, ownership arbitration, motion reconciliation and entity
//! events shared by tandem servers and clients.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub use tandem_serde::{
    BitReader, BitWrite, BitWriter, ConstBitLength, PooledWriter, Serde, SerdeErr,
    SignedInteger, SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger, WriterPool,
    MAX_STRING_BYTES,
};

mod config;
mod deferred_queue;
mod entity;
mod events;
mod hierarchy;
mod messages;
mod motion;
mod ownership;
mod registry;
mod session;
mod transport;
mod types;

pub use config::SyncConfig;
pub use deferred_queue::DeferredQueue;
pub use entity::{
    entity_id::{EntityId, EntityIdAllocator},
    entity_manager::EntityManager,
    error::EntityError,
    grip_extender::{DefaultExtendersPlugin, GripExtender, GRIP_COMPONENT},
    network_entity::NetworkEntity,
};
pub use events::{
    DispatchError, DispatchOutcome, EntityEventDispatcher, GripEventHandler, GripEventSender,
    GripHand, GripState, HandInput, Handedness, PatchFlag, PatchGuard, ZoneEncounterHandler,
};
pub use hierarchy::{
    hierarchy_hasher::{HierarchyHash, HierarchyHasher},
    scene_graph::SceneGraph,
};
pub use messages::{
    EntityTarget, GripEvent, GripEventType, MessageError, MessageTag, OwnershipRequest,
    OwnershipTransfer, PoseUpdate, PropCreation, WireMessage, ZoneEncounterEvent,
    ZoneEncounterEventType,
};
pub use motion::{
    AxisGains, BodyState, FrameGains, MotionBounds, MotionConfig, MotionReconciler, PdController,
    PdGains, PhysicsHost, PoseTarget, StepGains, WorldBounds,
};
pub use ownership::{
    error::OwnershipError,
    ownership_arbiter::{Ownership, OwnershipAction, OwnershipArbiter, OwnershipChange},
};
pub use registry::{
    component_hash_table::ComponentHashTable,
    error::{ExtenderError, RegistryError},
    extender_registry::{
        EntityExtender, ExtenderContext, ExtenderPlugin, ExtenderRegistry,
        ExtenderRegistryBuilder,
    },
};
pub use session::{ImpactOutcome, SessionError, SyncSession};
pub use transport::{Channel, Target, Transport};
pub use types::{FrameCount, HostType, ObjectHandle, PeerId};
