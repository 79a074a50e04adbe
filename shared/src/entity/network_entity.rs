use crate::{
    entity::entity_id::EntityId, registry::extender_registry::EntityExtender, types::ObjectHandle,
};

/// One synchronized object: its id, the local scene object it is rooted at,
/// and whatever capabilities attached to it at spawn.
pub struct NetworkEntity {
    id: EntityId,
    root: ObjectHandle,
    extenders: Vec<Box<dyn EntityExtender>>,
    alive: bool,
}

impl NetworkEntity {
    pub fn new(id: EntityId, root: ObjectHandle) -> Self {
        Self {
            id,
            root,
            extenders: Vec::new(),
            alive: true,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn root(&self) -> ObjectHandle {
        self.root
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn attach_extenders(&mut self, extenders: Vec<Box<dyn EntityExtender>>) {
        self.extenders.extend(extenders);
    }

    pub fn extender_count(&self) -> usize {
        self.extenders.len()
    }

    pub fn get_extender<T: EntityExtender>(&self) -> Option<&T> {
        self.extenders
            .iter()
            .find_map(|extender| extender.as_any().downcast_ref::<T>())
    }

    pub fn get_extender_mut<T: EntityExtender>(&mut self) -> Option<&mut T> {
        self.extenders
            .iter_mut()
            .find_map(|extender| extender.as_any_mut().downcast_mut::<T>())
    }

    pub fn has_extender<T: EntityExtender>(&self) -> bool {
        self.get_extender::<T>().is_some()
    }

    pub(crate) fn despawn(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        for extender in &mut self.extenders {
            extender.unregister();
        }
    }
}
