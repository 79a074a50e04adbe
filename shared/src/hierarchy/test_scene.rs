use std::collections::{HashMap, HashSet};

use crate::{hierarchy::scene_graph::SceneGraph, types::ObjectHandle};

struct Node {
    name: String,
    parent: Option<ObjectHandle>,
    children: Vec<ObjectHandle>,
    components: HashSet<String>,
}

/// Arena-backed hierarchy used by unit tests. Handles start at `first_handle`
/// so two scenes built side by side never share handle values.
pub(crate) struct TestScene {
    nodes: HashMap<ObjectHandle, Node>,
    roots: Vec<ObjectHandle>,
    next_handle: u64,
}

impl TestScene {
    pub(crate) fn new(first_handle: u64) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            next_handle: first_handle,
        }
    }

    pub(crate) fn add(&mut self, parent: Option<ObjectHandle>, name: &str) -> ObjectHandle {
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;

        self.nodes.insert(
            handle,
            Node {
                name: name.to_string(),
                parent,
                children: Vec::new(),
                components: HashSet::new(),
            },
        );

        match parent {
            Some(parent) => self
                .nodes
                .get_mut(&parent)
                .expect("parent must exist")
                .children
                .push(handle),
            None => self.roots.push(handle),
        }

        handle
    }

    pub(crate) fn add_component(&mut self, object: ObjectHandle, kind: &str) {
        self.nodes
            .get_mut(&object)
            .expect("object must exist")
            .components
            .insert(kind.to_string());
    }

    pub(crate) fn rename(&mut self, object: ObjectHandle, name: &str) {
        self.nodes.get_mut(&object).expect("object must exist").name = name.to_string();
    }
}

impl SceneGraph for TestScene {
    fn parent(&self, object: ObjectHandle) -> Option<ObjectHandle> {
        self.nodes.get(&object)?.parent
    }

    fn name(&self, object: ObjectHandle) -> Option<&str> {
        self.nodes.get(&object).map(|node| node.name.as_str())
    }

    fn sibling_index(&self, object: ObjectHandle) -> Option<usize> {
        let node = self.nodes.get(&object)?;
        let siblings = match node.parent {
            Some(parent) => &self.nodes.get(&parent)?.children,
            None => &self.roots,
        };
        siblings.iter().position(|sibling| *sibling == object)
    }

    fn children(&self, object: ObjectHandle) -> Vec<ObjectHandle> {
        self.nodes
            .get(&object)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn roots(&self) -> Vec<ObjectHandle> {
        self.roots.clone()
    }

    fn has_component(&self, object: ObjectHandle, kind: &str) -> bool {
        self.nodes
            .get(&object)
            .is_some_and(|node| node.components.contains(kind))
    }
}
