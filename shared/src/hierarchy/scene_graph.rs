use crate::types::ObjectHandle;

/// Read access to the host engine's transform hierarchy.
///
/// Every query takes a handle that may already be gone; implementations
/// return `None` (or an empty list) rather than assuming liveness.
pub trait SceneGraph {
    fn parent(&self, object: ObjectHandle) -> Option<ObjectHandle>;
    fn name(&self, object: ObjectHandle) -> Option<&str>;
    /// Position of the object among its parent's children (or among the roots)
    fn sibling_index(&self, object: ObjectHandle) -> Option<usize>;
    /// Children in sibling order
    fn children(&self, object: ObjectHandle) -> Vec<ObjectHandle>;
    /// Root objects in load order
    fn roots(&self) -> Vec<ObjectHandle>;
    /// Whether the object carries an engine component of the given kind
    fn has_component(&self, object: ObjectHandle, kind: &str) -> bool;

    /// Resolves a `/`-separated name path from a root object. The first
    /// sibling with a matching name wins at each level.
    fn find(&self, path: &str) -> Option<ObjectHandle> {
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());

        let root_name = segments.next()?;
        let mut current = self
            .roots()
            .into_iter()
            .find(|root| self.name(*root) == Some(root_name))?;

        for segment in segments {
            current = self
                .children(current)
                .into_iter()
                .find(|child| self.name(*child) == Some(segment))?;
        }

        Some(current)
    }

    /// The object and all of its descendants carrying `kind`, depth-first in
    /// sibling order.
    fn descendants_with(&self, root: ObjectHandle, kind: &str) -> Vec<ObjectHandle> {
        let mut output = Vec::new();
        let mut stack = vec![root];

        while let Some(object) = stack.pop() {
            if self.has_component(object, kind) {
                output.push(object);
            }
            let mut children = self.children(object);
            children.reverse();
            stack.extend(children);
        }

        output
    }
}
