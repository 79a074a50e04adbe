use std::collections::{HashMap, HashSet};

use tandem_shared::{ObjectHandle, SceneGraph};

struct Node {
    name: String,
    parent: Option<ObjectHandle>,
    children: Vec<ObjectHandle>,
    components: HashSet<String>,
}

/// In-memory transform hierarchy.
///
/// Handles start at a caller-chosen base so two peers loading the same level
/// end up with different handles for the same objects, like real engines.
pub struct TestScene {
    next_handle: u64,
    nodes: HashMap<ObjectHandle, Node>,
    roots: Vec<ObjectHandle>,
}

impl TestScene {
    pub fn new(first_handle: u64) -> Self {
        Self {
            next_handle: first_handle,
            nodes: HashMap::new(),
            roots: Vec::new(),
        }
    }

    pub fn add(&mut self, parent: Option<ObjectHandle>, name: &str) -> ObjectHandle {
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

    pub fn add_component(&mut self, object: ObjectHandle, kind: &str) {
        self.nodes
            .get_mut(&object)
            .expect("object must exist")
            .components
            .insert(kind.to_string());
    }

    pub fn rename(&mut self, object: ObjectHandle, name: &str) {
        self.nodes.get_mut(&object).expect("object must exist").name = name.to_string();
    }

    /// Removes the object and everything beneath it
    pub fn destroy(&mut self, object: ObjectHandle) {
        let Some(node) = self.nodes.remove(&object) else {
            return;
        };
        match node.parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(&parent) {
                    parent.children.retain(|child| *child != object);
                }
            }
            None => self.roots.retain(|root| *root != object),
        }
        for child in node.children {
            self.destroy(child);
        }
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
