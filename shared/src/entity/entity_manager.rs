use std::collections::HashMap;

use log::info;

use crate::{
    entity::{
        entity_id::{EntityId, EntityIdAllocator},
        error::EntityError,
        network_entity::NetworkEntity,
    },
    types::ObjectHandle,
};

/// Live entities of one session, indexed by id and by root object
#[derive(Default)]
pub struct EntityManager {
    entities: HashMap<EntityId, NetworkEntity>,
    by_root: HashMap<ObjectHandle, EntityId>,
    ids: EntityIdAllocator,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entity with a freshly allocated id
    pub fn spawn(&mut self, root: ObjectHandle) -> Result<EntityId, EntityError> {
        self.check_root(root)?;
        let id = self.ids.generate()?;
        self.insert(NetworkEntity::new(id, root));
        Ok(id)
    }

    /// Creates an entity with an id assigned by the server
    pub fn spawn_with_id(&mut self, id: EntityId, root: ObjectHandle) -> Result<(), EntityError> {
        if self.entities.contains_key(&id) {
            return Err(EntityError::AlreadyExists(id));
        }
        self.check_root(root)?;
        self.insert(NetworkEntity::new(id, root));
        Ok(())
    }

    pub fn despawn(&mut self, id: &EntityId) -> Option<NetworkEntity> {
        let mut entity = self.entities.remove(id)?;
        self.by_root.remove(&entity.root());
        self.ids.recycle(*id);
        entity.despawn();
        info!("Despawned entity {:?}", id);
        Some(entity)
    }

    pub fn get(&self, id: &EntityId) -> Option<&NetworkEntity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut NetworkEntity> {
        self.entities.get_mut(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn entity_for_root(&self, root: &ObjectHandle) -> Option<EntityId> {
        self.by_root.get(root).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkEntity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn check_root(&self, root: ObjectHandle) -> Result<(), EntityError> {
        match self.by_root.get(&root) {
            Some(entity) => Err(EntityError::RootAlreadyBound {
                object: root,
                entity: *entity,
            }),
            None => Ok(()),
        }
    }

    fn insert(&mut self, entity: NetworkEntity) {
        self.by_root.insert(entity.root(), entity.id());
        self.entities.insert(entity.id(), entity);
    }
}
