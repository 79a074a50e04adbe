use std::{
    any::Any,
    panic::{catch_unwind, AssertUnwindSafe},
};

use log::{debug, warn};

use crate::{
    entity::{entity_manager::EntityManager, grip_extender::GripExtender},
    events::{DispatchError, GripEventHandler, PatchFlag, ZoneEncounterHandler},
    hierarchy::scene_graph::SceneGraph,
    messages::{EntityTarget, GripEvent, GripEventType, ZoneEncounterEvent, ZoneEncounterEventType},
    registry::component_hash_table::ComponentHashTable,
    types::{HostType, ObjectHandle},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran and succeeded
    Applied,
    /// Unknown subtype, nothing to do
    NoOp,
    /// The event targets something that is not here (yet)
    Unresolved,
    /// The event is not meant for this host
    Ignored,
    Failed(DispatchError),
}

/// Resolves decoded entity events to local objects and hands them to the
/// registered handlers under the patch flag.
pub struct EntityEventDispatcher {
    host_type: HostType,
    patches: PatchFlag,
}

impl EntityEventDispatcher {
    pub fn new(host_type: HostType, patches: PatchFlag) -> Self {
        Self { host_type, patches }
    }

    pub fn patches(&self) -> &PatchFlag {
        &self.patches
    }

    /// Finds the grip an event refers to
    pub fn resolve_grip(
        event: &GripEvent,
        entities: &EntityManager,
        static_grips: &ComponentHashTable<ObjectHandle>,
    ) -> Option<ObjectHandle> {
        match event.target {
            EntityTarget::Networked(entity) => entities
                .get(&entity)?
                .get_extender::<GripExtender>()?
                .grip(event.grip_index),
            EntityTarget::Static { hash, slot } => static_grips.lookup(&hash, slot),
        }
    }

    pub fn dispatch_grip(
        &self,
        event: &GripEvent,
        entities: &mut EntityManager,
        static_grips: &ComponentHashTable<ObjectHandle>,
        handler: &mut dyn GripEventHandler,
    ) -> DispatchOutcome {
        if event.event_type == GripEventType::Unknown {
            return DispatchOutcome::NoOp;
        }

        let Some(grip) = Self::resolve_grip(event, entities, static_grips) else {
            debug!("Grip event for unresolved target {:?}", event.target);
            return DispatchOutcome::Unresolved;
        };

        if let EntityTarget::Networked(entity) = event.target {
            let held = match event.event_type {
                GripEventType::Attach => Some(true),
                GripEventType::Detach => Some(false),
                _ => None,
            };
            if let Some(held) = held {
                if let Some(extender) = entities
                    .get_mut(&entity)
                    .and_then(|entity| entity.get_extender_mut::<GripExtender>())
                {
                    extender.set_held(event.grip_index, held);
                }
            }
        }

        self.apply("grip event", || {
            handler.on_grip_event(grip, event.player, event.event_type)
        })
    }

    pub fn dispatch_zone(
        &self,
        event: &ZoneEncounterEvent,
        scene: &dyn SceneGraph,
        handler: &mut dyn ZoneEncounterHandler,
    ) -> DispatchOutcome {
        if self.host_type.is_server() {
            return DispatchOutcome::Ignored;
        }
        if event.event_type == ZoneEncounterEventType::Unknown {
            return DispatchOutcome::NoOp;
        }

        let Some(zone) = scene.find(&event.full_path) else {
            debug!("Zone {} not found", event.full_path);
            return DispatchOutcome::Unresolved;
        };

        self.apply("zone encounter", || {
            handler.on_zone_encounter(zone, event.event_type)
        })
    }

    fn apply<F: FnOnce() -> Result<(), DispatchError>>(
        &self,
        context: &str,
        handle: F,
    ) -> DispatchOutcome {
        let _guard = self.patches.suppress();

        match catch_unwind(AssertUnwindSafe(handle)) {
            Ok(Ok(())) => DispatchOutcome::Applied,
            Ok(Err(error)) => {
                warn!("Failed to apply {}: {}", context, error);
                DispatchOutcome::Failed(error)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("Panic while applying {}: {}", context, message);
                DispatchOutcome::Failed(DispatchError::Panicked(message))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
