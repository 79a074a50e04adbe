use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::{hierarchy::hierarchy_hasher::HierarchyHash, registry::error::RegistryError};

/// Bijective index between identity hashes and live local components of a
/// single component type.
///
/// Structurally identical objects share a hash; they are told apart by a slot
/// index handed out in discovery order. A freed slot is reused by the next
/// registration under the same hash, so peers that discover the same objects
/// in the same order agree on every `(hash, slot)` pair.
pub struct ComponentHashTable<C: Copy + Eq + Hash + Debug> {
    chains: HashMap<HierarchyHash, Vec<Option<C>>>,
    reverse: HashMap<C, (HierarchyHash, u16)>,
}

impl<C: Copy + Eq + Hash + Debug> Default for ComponentHashTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Copy + Eq + Hash + Debug> ComponentHashTable<C> {
    pub fn new() -> Self {
        Self {
            chains: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    /// Register a component under its identity hash, returning its slot
    ///
    /// # Panics
    ///
    /// Panics if the component is already registered.
    /// Consider using `try_register` for non-panicking error handling.
    pub fn register(&mut self, hash: HierarchyHash, component: C) -> u16 {
        match self.try_register(hash, component) {
            Ok(slot) => slot,
            Err(error) => panic!("{}", error),
        }
    }

    /// Register a component under its identity hash, returning its slot
    ///
    /// Returns an error if the component is already registered.
    pub fn try_register(&mut self, hash: HierarchyHash, component: C) -> Result<u16, RegistryError> {
        if let Some((existing_hash, existing_slot)) = self.reverse.get(&component) {
            return Err(RegistryError::AlreadyRegistered {
                component: format!("{:?}", component),
                hash: *existing_hash,
                slot: *existing_slot,
            });
        }

        let chain = self.chains.entry(hash).or_default();

        let slot = match chain.iter().position(Option::is_none) {
            Some(vacant) => vacant,
            None => {
                chain.push(None);
                chain.len() - 1
            }
        };

        let Ok(slot_index) = u16::try_from(slot) else {
            chain.pop();
            return Err(RegistryError::SlotsExhausted { hash });
        };

        chain[slot] = Some(component);
        self.reverse.insert(component, (hash, slot_index));

        if slot_index > 0 {
            report_collision(&component, hash, slot_index);
        }

        Ok(slot_index)
    }

    /// First live component registered under the hash
    pub fn lookup_first(&self, hash: &HierarchyHash) -> Option<C> {
        self.chains.get(hash)?.iter().flatten().next().copied()
    }

    pub fn lookup(&self, hash: &HierarchyHash, slot: u16) -> Option<C> {
        *self.chains.get(hash)?.get(usize::from(slot))?
    }

    /// The `(hash, slot)` a component was registered under
    pub fn reverse_lookup(&self, component: &C) -> Option<(HierarchyHash, u16)> {
        self.reverse.get(component).copied()
    }

    pub fn contains(&self, component: &C) -> bool {
        self.reverse.contains_key(component)
    }

    pub fn remove(&mut self, component: &C) -> Option<(HierarchyHash, u16)> {
        let (hash, slot) = self.reverse.remove(component)?;

        if let Some(chain) = self.chains.get_mut(&hash) {
            if let Some(entry) = chain.get_mut(usize::from(slot)) {
                *entry = None;
            }
            while chain.last().is_some_and(Option::is_none) {
                chain.pop();
            }
            if chain.is_empty() {
                self.chains.remove(&hash);
            }
        }

        Some((hash, slot))
    }

    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    pub fn clear(&mut self) {
        self.chains.clear();
        self.reverse.clear();
    }
}

cfg_if! {
    if #[cfg(debug_assertions)] {
        fn report_collision<C: Debug>(component: &C, hash: HierarchyHash, slot: u16) {
            log::info!(
                "{:?} had a conflicting hash {:?} and has been added at index {}.",
                component, hash, slot
            );
        }
    } else {
        fn report_collision<C: Debug>(_: &C, _: HierarchyHash, _: u16) {}
    }
}
