use std::{any::Any, collections::HashSet};

use crate::{
    registry::extender_registry::{
        EntityExtender, ExtenderContext, ExtenderPlugin, ExtenderRegistryBuilder,
    },
    types::ObjectHandle,
};

/// Scene component kind marking a grabbable point
pub const GRIP_COMPONENT: &str = "grip";

/// Tracks the grab points of an entity and which of them are currently held.
///
/// Grips are indexed in depth-first sibling order beneath each root, so the
/// same index refers to the same grip on every peer.
#[derive(Default)]
pub struct GripExtender {
    grips: Vec<ObjectHandle>,
    held: HashSet<u8>,
}

impl GripExtender {
    pub fn grips(&self) -> &[ObjectHandle] {
        &self.grips
    }

    pub fn grip(&self, index: u8) -> Option<ObjectHandle> {
        self.grips.get(usize::from(index)).copied()
    }

    pub fn index_of(&self, grip: ObjectHandle) -> Option<u8> {
        let index = self.grips.iter().position(|candidate| *candidate == grip)?;
        u8::try_from(index).ok()
    }

    /// Marks a grip as held or released. Returns false for an unknown index.
    pub fn set_held(&mut self, index: u8, held: bool) -> bool {
        if usize::from(index) >= self.grips.len() {
            return false;
        }
        if held {
            self.held.insert(index);
        } else {
            self.held.remove(&index);
        }
        true
    }

    pub fn is_held(&self, index: u8) -> bool {
        self.held.contains(&index)
    }

    /// Whether any hand is on any of the grips
    pub fn check_held(&self) -> bool {
        !self.held.is_empty()
    }
}

impl EntityExtender for GripExtender {
    fn try_register(&mut self, context: &ExtenderContext<'_>) -> bool {
        self.grips = context
            .parents
            .iter()
            .flat_map(|parent| context.scene.descendants_with(*parent, GRIP_COMPONENT))
            .take(usize::from(u8::MAX) + 1)
            .collect();
        !self.grips.is_empty()
    }

    fn unregister(&mut self) {
        self.held.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Adds the extenders every session needs
pub struct DefaultExtendersPlugin;

impl ExtenderPlugin for DefaultExtendersPlugin {
    fn build(&self, builder: &mut ExtenderRegistryBuilder) {
        builder.add_extender::<GripExtender>();
    }
}
