use log::warn;
use tandem_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

use crate::{hierarchy::scene_graph::SceneGraph, types::ObjectHandle};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

// Deeper chains are treated as a broken (cyclic) hierarchy.
const MAX_DEPTH: usize = 512;

/// Structural fingerprint of a scene object: its name path and sibling
/// indices up to the root. Peers that loaded the same scene content compute
/// the same value for corresponding objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HierarchyHash(u32);

impl HierarchyHash {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Serde for HierarchyHash {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u32::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        Self::const_bit_length()
    }
}

impl ConstBitLength for HierarchyHash {
    fn const_bit_length() -> u32 {
        <u32 as ConstBitLength>::const_bit_length()
    }
}

pub struct HierarchyHasher;

impl HierarchyHasher {
    /// Hashes the object's path from the root down, folding in each level's
    /// name and sibling index. Returns `None` if the object (or one of its
    /// ancestors) is no longer in the scene.
    pub fn hash(scene: &dyn SceneGraph, object: ObjectHandle) -> Option<HierarchyHash> {
        let path = Self::path_to_root(scene, object)?;

        let mut hash = FNV_OFFSET_BASIS;
        for level in path.iter().rev() {
            let name = scene.name(*level)?;
            let sibling_index = scene.sibling_index(*level)?;

            hash = fnv1a(hash, name.as_bytes());
            // separator keeps ("ab", 1) and ("a", "b1") apart
            hash = fnv1a(hash, &[0xFF]);
            hash = fnv1a(hash, &(sibling_index as u32).to_le_bytes());
            hash = fnv1a(hash, b"/");
        }

        Some(HierarchyHash(hash))
    }

    /// `/`-joined object names from the root, e.g. `Level/Arena/Encounter`
    pub fn full_path(scene: &dyn SceneGraph, object: ObjectHandle) -> Option<String> {
        let path = Self::path_to_root(scene, object)?;

        let mut names = Vec::with_capacity(path.len());
        for level in path.iter().rev() {
            names.push(scene.name(*level)?);
        }

        Some(names.join("/"))
    }

    // object first, root last
    fn path_to_root(scene: &dyn SceneGraph, object: ObjectHandle) -> Option<Vec<ObjectHandle>> {
        scene.name(object)?;

        let mut path = vec![object];
        let mut current = object;

        while let Some(parent) = scene.parent(current) {
            if path.len() >= MAX_DEPTH {
                warn!(
                    "Hierarchy above {:?} is deeper than {} levels, refusing to hash it",
                    object, MAX_DEPTH
                );
                return None;
            }
            path.push(parent);
            current = parent;
        }

        Some(path)
    }
}

fn fnv1a(mut hash: u32, bytes: &[u8]) -> u32 {
    for byte in bytes {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
