use std::collections::HashMap;

use log::{debug, info, warn};

use crate::{
    entity::entity_id::EntityId,
    messages::{OwnershipRequest, OwnershipTransfer},
    ownership::error::OwnershipError,
    types::{HostType, PeerId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ownership {
    Unowned,
    OwnedByLocal,
    OwnedByRemote(PeerId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnershipAction {
    /// The local peer already owns the entity
    AlreadyOwner,
    /// Send this to the server and wait for its broadcast
    Requested(OwnershipRequest),
    /// Decided on the spot (server host); broadcast it to every client
    Granted(OwnershipTransfer),
}

/// An applied change of owner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OwnershipChange {
    pub entity: EntityId,
    pub previous: Option<PeerId>,
    pub owner: Option<PeerId>,
    pub epoch: u32,
}

#[derive(Default)]
struct OwnershipRecord {
    owner: Option<PeerId>,
    epoch: u32,
    locked: bool,
}

/// Decides and tracks which peer simulates each entity.
///
/// Only the server bumps epochs. Every peer (the server included) applies a
/// transfer only when its epoch is newer than the one it holds, so transfers
/// arriving out of order settle on the newest decision.
pub struct OwnershipArbiter {
    host_type: HostType,
    local_peer: PeerId,
    records: HashMap<EntityId, OwnershipRecord>,
}

impl OwnershipArbiter {
    pub fn new(host_type: HostType, local_peer: PeerId) -> Self {
        Self {
            host_type,
            local_peer,
            records: HashMap::new(),
        }
    }

    pub fn local_peer(&self) -> PeerId {
        self.local_peer
    }

    /// Starts tracking an entity as unowned. Returns false if it is already
    /// tracked.
    pub fn try_register(&mut self, entity: EntityId) -> bool {
        if self.records.contains_key(&entity) {
            return false;
        }
        self.records.insert(entity, OwnershipRecord::default());
        true
    }

    pub fn forget(&mut self, entity: &EntityId) {
        self.records.remove(entity);
    }

    pub fn owner(&self, entity: &EntityId) -> Option<PeerId> {
        self.records.get(entity)?.owner
    }

    pub fn epoch(&self, entity: &EntityId) -> u32 {
        self.records
            .get(entity)
            .map(|record| record.epoch)
            .unwrap_or_default()
    }

    pub fn ownership(&self, entity: &EntityId) -> Ownership {
        match self.owner(entity) {
            None => Ownership::Unowned,
            Some(peer) if peer == self.local_peer => Ownership::OwnedByLocal,
            Some(peer) => Ownership::OwnedByRemote(peer),
        }
    }

    /// Whether this peer's simulation of the entity is the truth. Unowned
    /// entities are simulated by the server.
    pub fn is_authoritative(&self, entity: &EntityId) -> bool {
        match self.ownership(entity) {
            Ownership::OwnedByLocal => true,
            Ownership::Unowned => self.host_type.is_server(),
            Ownership::OwnedByRemote(_) => false,
        }
    }

    pub fn set_owner_locked(&mut self, entity: EntityId, locked: bool) {
        self.records.entry(entity).or_default().locked = locked;
    }

    pub fn is_owner_locked(&self, entity: &EntityId) -> bool {
        self.records
            .get(entity)
            .is_some_and(|record| record.locked)
    }

    /// Ask to become the owner of an entity
    ///
    /// On the server the transfer is decided and applied immediately.
    pub fn request_ownership(
        &mut self,
        entity: EntityId,
        has_server: bool,
    ) -> Result<OwnershipAction, OwnershipError> {
        if !has_server {
            return Err(OwnershipError::NoServer);
        }
        if self.owner(&entity) == Some(self.local_peer) {
            return Ok(OwnershipAction::AlreadyOwner);
        }

        if self.host_type.is_server() {
            let transfer = self.decide_transfer(entity, Some(self.local_peer))?;
            return Ok(OwnershipAction::Granted(transfer));
        }

        Ok(OwnershipAction::Requested(OwnershipRequest {
            entity,
            requester: self.local_peer,
        }))
    }

    /// Hands the entity to `new_owner` under the next epoch and applies it
    /// locally. The returned transfer must be broadcast to every client.
    pub fn decide_transfer(
        &mut self,
        entity: EntityId,
        new_owner: Option<PeerId>,
    ) -> Result<OwnershipTransfer, OwnershipError> {
        if !self.host_type.is_server() {
            return Err(OwnershipError::NotServer);
        }
        if self.is_owner_locked(&entity) {
            return Err(OwnershipError::OwnerLocked(entity));
        }
        self.transfer(entity, new_owner)
    }

    /// Gives up ownership of an entity, leaving it to the server's simulation
    pub fn release(&mut self, entity: EntityId) -> Result<OwnershipTransfer, OwnershipError> {
        self.decide_transfer(entity, None)
    }

    /// Applies a transfer broadcast by the server. Returns `None` when the
    /// transfer is not newer than what is already held.
    pub fn receive_broadcast(&mut self, transfer: &OwnershipTransfer) -> Option<OwnershipChange> {
        let record = self.records.entry(transfer.entity).or_default();

        if transfer.epoch <= record.epoch {
            debug!(
                "Dropping stale transfer of {:?} (epoch {} <= {})",
                transfer.entity, transfer.epoch, record.epoch
            );
            return None;
        }

        let previous = record.owner;
        record.owner = transfer.owner;
        record.epoch = transfer.epoch;

        Some(OwnershipChange {
            entity: transfer.entity,
            previous,
            owner: transfer.owner,
            epoch: transfer.epoch,
        })
    }

    /// Moves every entity owned by a departed peer back to the server. Lock
    /// state is ignored. Clients get nothing back.
    pub fn on_peer_disconnected(&mut self, peer: PeerId) -> Vec<OwnershipTransfer> {
        if !self.host_type.is_server() {
            return Vec::new();
        }

        let mut orphaned: Vec<EntityId> = self
            .records
            .iter()
            .filter(|(_, record)| record.owner == Some(peer))
            .map(|(entity, _)| *entity)
            .collect();
        orphaned.sort();

        let mut output = Vec::new();
        for entity in orphaned {
            match self.transfer(entity, Some(self.local_peer)) {
                Ok(transfer) => output.push(transfer),
                Err(error) => warn!("Could not reclaim {:?}: {}", entity, error),
            }
        }
        if !output.is_empty() {
            info!("Reclaimed {} entities from {:?}", output.len(), peer);
        }
        output
    }

    fn transfer(
        &mut self,
        entity: EntityId,
        new_owner: Option<PeerId>,
    ) -> Result<OwnershipTransfer, OwnershipError> {
        let epoch = self
            .epoch(&entity)
            .checked_add(1)
            .ok_or(OwnershipError::EpochExhausted(entity))?;

        let transfer = OwnershipTransfer {
            entity,
            owner: new_owner,
            epoch,
        };
        self.receive_broadcast(&transfer);
        Ok(transfer)
    }
}
