use std::{
    any::{type_name, Any, TypeId},
    sync::{Arc, RwLock},
};

use log::{debug, info};

use crate::{
    entity::entity_id::EntityId, hierarchy::scene_graph::SceneGraph,
    registry::error::ExtenderError, types::ObjectHandle,
};

/// An optional capability attached to a `NetworkEntity` (grips, zones ...).
///
/// A fresh instance is built for every spawned entity and offered the
/// entity's scene objects; only instances that accept are kept.
pub trait EntityExtender: Any {
    /// Inspect the entity's objects and claim whatever this extender manages.
    /// Returns false if the entity has nothing for it.
    fn try_register(&mut self, context: &ExtenderContext<'_>) -> bool;

    /// Called once when the owning entity is despawned
    fn unregister(&mut self) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// What an extender gets to look at while registering
pub struct ExtenderContext<'a> {
    pub entity: EntityId,
    /// Root objects making up the entity
    pub parents: &'a [ObjectHandle],
    pub scene: &'a dyn SceneGraph,
}

// Extender Plugin
pub trait ExtenderPlugin {
    fn build(&self, builder: &mut ExtenderRegistryBuilder);
}

type ExtenderFactory = fn() -> Box<dyn EntityExtender>;

fn construct<T: EntityExtender + Default>() -> Box<dyn EntityExtender> {
    Box::new(T::default())
}

#[derive(Clone)]
struct ExtenderKind {
    type_id: TypeId,
    name: &'static str,
    factory: ExtenderFactory,
}

#[derive(Default)]
pub struct ExtenderRegistryBuilder {
    kinds: Vec<ExtenderKind>,
}

impl ExtenderRegistryBuilder {
    pub fn add_plugin<P: ExtenderPlugin>(&mut self, plugin: P) -> &mut Self {
        plugin.build(self);
        self
    }

    /// Register an extender type
    ///
    /// # Panics
    ///
    /// Panics if the type was already registered.
    /// Consider using `try_add_extender` for non-panicking error handling.
    pub fn add_extender<T: EntityExtender + Default>(&mut self) -> &mut Self {
        if let Err(error) = self.try_add_extender::<T>() {
            panic!("{}", error);
        }
        self
    }

    /// Register an extender type
    ///
    /// Returns an error if the type was already registered.
    pub fn try_add_extender<T: EntityExtender + Default>(
        &mut self,
    ) -> Result<&mut Self, ExtenderError> {
        let type_id = TypeId::of::<T>();
        let name = type_name::<T>();

        if self.kinds.iter().any(|kind| kind.type_id == type_id) {
            return Err(ExtenderError::DuplicateExtender { name });
        }

        self.kinds.push(ExtenderKind {
            type_id,
            name,
            factory: construct::<T>,
        });
        Ok(self)
    }

    pub fn lock(&mut self) -> ExtenderRegistry {
        ExtenderRegistry {
            kinds: std::mem::take(&mut self.kinds),
        }
    }
}

// Only written at startup and teardown.
static INSTALLED: RwLock<Option<Arc<ExtenderRegistry>>> = RwLock::new(None);

/// Immutable table of every extender type an entity may be given
pub struct ExtenderRegistry {
    kinds: Vec<ExtenderKind>,
}

impl ExtenderRegistry {
    pub fn builder() -> ExtenderRegistryBuilder {
        ExtenderRegistryBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn contains<T: EntityExtender>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.kinds.iter().any(|kind| kind.type_id == type_id)
    }

    /// Builds one of every registered extender and keeps those that accept
    /// the entity, in registration order.
    pub fn instantiate_all(&self, context: &ExtenderContext<'_>) -> Vec<Box<dyn EntityExtender>> {
        let mut output = Vec::new();
        for kind in &self.kinds {
            let mut extender = (kind.factory)();
            if extender.try_register(context) {
                debug!("{} attached to entity {:?}", kind.name, context.entity);
                output.push(extender);
            }
        }
        output
    }

    /// Makes this registry the process-wide table
    ///
    /// Returns an error if one is already installed.
    pub fn install(self) -> Result<Arc<Self>, ExtenderError> {
        let mut slot = INSTALLED.write().map_err(|_| ExtenderError::LockPoisoned)?;
        if slot.is_some() {
            return Err(ExtenderError::AlreadyInstalled);
        }

        let registry = Arc::new(self);
        *slot = Some(registry.clone());
        info!("Installed extender registry with {} kinds", registry.len());
        Ok(registry)
    }

    pub fn installed() -> Result<Arc<Self>, ExtenderError> {
        let slot = INSTALLED.read().map_err(|_| ExtenderError::LockPoisoned)?;
        slot.clone().ok_or(ExtenderError::NotInstalled)
    }

    /// Clears the process-wide table. Sessions already holding it keep their
    /// copy.
    pub fn reset() -> Result<(), ExtenderError> {
        let mut slot = INSTALLED.write().map_err(|_| ExtenderError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}
