use std::sync::Arc;

use log::{debug, info, warn};
use tandem_serde::WriterPool;

use crate::{
    config::SyncConfig,
    deferred_queue::DeferredQueue,
    entity::{
        entity_id::EntityId, entity_manager::EntityManager, error::EntityError,
        grip_extender::GripExtender,
    },
    events::{
        DispatchOutcome, EntityEventDispatcher, GripEventHandler, GripEventSender, GripHand,
        GripState, HandInput, Handedness, PatchFlag, ZoneEncounterHandler,
    },
    hierarchy::{
        hierarchy_hasher::{HierarchyHash, HierarchyHasher},
        scene_graph::SceneGraph,
    },
    messages::{
        EntityTarget, GripEvent, GripEventType, OwnershipRequest, OwnershipTransfer, PoseUpdate,
        PropCreation, WireMessage, ZoneEncounterEvent, ZoneEncounterEventType,
    },
    motion::{MotionReconciler, PhysicsHost},
    ownership::{
        error::OwnershipError,
        ownership_arbiter::{OwnershipAction, OwnershipArbiter},
    },
    registry::{
        component_hash_table::ComponentHashTable,
        extender_registry::{ExtenderContext, ExtenderRegistry},
    },
    session::SessionError,
    transport::{Target, Transport},
    types::{HostType, ObjectHandle, PeerId},
};

/// What a physics contact with a body led to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImpactOutcome {
    /// The body is neither an entity nor a registered scene body
    Untracked,
    OwnerLocked,
    Held,
    AlreadyOwner,
    OwnershipRequested,
    OwnershipGranted,
    /// The body will be turned into an entity after a few frames
    CreationScheduled,
    CreationPending,
}

/// One peer's view of the synchronized world.
///
/// Owns every subsystem and moves data between them: incoming bytes go
/// through `handle_incoming` on the variable-rate update, remote bodies are
/// driven by `fixed_update` on the physics step.
pub struct SyncSession {
    config: SyncConfig,
    host_type: HostType,
    local_peer: PeerId,
    writers: WriterPool,
    extenders: Arc<ExtenderRegistry>,
    entities: EntityManager,
    static_grips: ComponentHashTable<ObjectHandle>,
    bodies: ComponentHashTable<ObjectHandle>,
    arbiter: OwnershipArbiter,
    reconciler: MotionReconciler,
    dispatcher: EntityEventDispatcher,
    grip_sender: GripEventSender,
    pending_props: DeferredQueue<ObjectHandle>,
    patches: PatchFlag,
}

impl SyncSession {
    pub fn server(config: SyncConfig, extenders: Arc<ExtenderRegistry>) -> Self {
        Self::new(config, HostType::Server, PeerId::SERVER, extenders)
    }

    pub fn client(config: SyncConfig, local_peer: PeerId, extenders: Arc<ExtenderRegistry>) -> Self {
        Self::new(config, HostType::Client, local_peer, extenders)
    }

    /// Builds a session on top of the process-wide extender registry
    pub fn from_installed(
        config: SyncConfig,
        host_type: HostType,
        local_peer: PeerId,
    ) -> Result<Self, SessionError> {
        let extenders = ExtenderRegistry::installed()?;
        let local_peer = match host_type {
            HostType::Server => PeerId::SERVER,
            HostType::Client => local_peer,
        };
        Ok(Self::new(config, host_type, local_peer, extenders))
    }

    fn new(
        config: SyncConfig,
        host_type: HostType,
        local_peer: PeerId,
        extenders: Arc<ExtenderRegistry>,
    ) -> Self {
        let patches = PatchFlag::new();
        Self {
            writers: WriterPool::new(config.writer_pool_size, config.writer_capacity),
            reconciler: MotionReconciler::new(&config.motion, config.bounds.clone()),
            arbiter: OwnershipArbiter::new(host_type, local_peer),
            dispatcher: EntityEventDispatcher::new(host_type, patches.clone()),
            grip_sender: GripEventSender::new(patches.clone()),
            entities: EntityManager::new(),
            static_grips: ComponentHashTable::new(),
            bodies: ComponentHashTable::new(),
            pending_props: DeferredQueue::new(),
            extenders,
            patches,
            host_type,
            local_peer,
            config,
        }
    }

    // Accessors

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    pub fn local_peer(&self) -> PeerId {
        self.local_peer
    }

    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    pub fn arbiter(&self) -> &OwnershipArbiter {
        &self.arbiter
    }

    pub fn reconciler(&self) -> &MotionReconciler {
        &self.reconciler
    }

    pub fn static_grips(&self) -> &ComponentHashTable<ObjectHandle> {
        &self.static_grips
    }

    pub fn bodies(&self) -> &ComponentHashTable<ObjectHandle> {
        &self.bodies
    }

    pub fn patches(&self) -> &PatchFlag {
        &self.patches
    }

    pub fn pending_creations(&self) -> usize {
        self.pending_props.len()
    }

    // Scene registration

    /// Indexes a level-authored grip so remote grip events can find it
    pub fn register_static_grip(
        &mut self,
        scene: &dyn SceneGraph,
        grip: ObjectHandle,
    ) -> Result<(HierarchyHash, u16), SessionError> {
        let hash = HierarchyHasher::hash(scene, grip).ok_or(SessionError::NotInScene(grip))?;
        let slot = self.static_grips.try_register(hash, grip)?;
        Ok((hash, slot))
    }

    pub fn unregister_static_grip(&mut self, grip: &ObjectHandle) -> bool {
        self.static_grips.remove(grip).is_some()
    }

    /// Indexes a scene-baked body that may later become an entity
    pub fn register_body(
        &mut self,
        scene: &dyn SceneGraph,
        body: ObjectHandle,
    ) -> Result<(HierarchyHash, u16), SessionError> {
        let hash = HierarchyHasher::hash(scene, body).ok_or(SessionError::NotInScene(body))?;
        let slot = self.bodies.try_register(hash, body)?;
        Ok((hash, slot))
    }

    pub fn unregister_body(&mut self, body: &ObjectHandle) -> bool {
        self.pending_props.cancel(body);
        self.bodies.remove(body).is_some()
    }

    pub fn set_owner_locked(&mut self, entity: EntityId, locked: bool) {
        self.arbiter.set_owner_locked(entity, locked);
    }

    // Entities

    /// Turns a scene body into an entity owned by the server and announces it
    pub fn spawn_entity(
        &mut self,
        transport: &mut dyn Transport,
        scene: &dyn SceneGraph,
        root: ObjectHandle,
    ) -> Result<EntityId, SessionError> {
        if !self.host_type.is_server() {
            return Err(SessionError::NotServer);
        }

        let (hash, slot) = match self.bodies.reverse_lookup(&root) {
            Some(key) => key,
            None => self.register_body(scene, root)?,
        };

        self.create_prop(transport, scene, root, hash, slot, self.local_peer)
    }

    pub fn despawn(&mut self, entity: &EntityId) -> bool {
        let Some(despawned) = self.entities.despawn(entity) else {
            return false;
        };
        self.arbiter.forget(entity);
        self.reconciler.remove(entity);
        self.pending_props.cancel(&despawned.root());
        true
    }

    // Ownership

    pub fn request_ownership(
        &mut self,
        transport: &mut dyn Transport,
        entity: EntityId,
    ) -> Result<OwnershipAction, SessionError> {
        if !self.entities.contains(&entity) {
            return Err(EntityError::NotFound(entity).into());
        }

        let action = self.arbiter.request_ownership(entity, transport.has_server())?;
        match &action {
            OwnershipAction::AlreadyOwner => {}
            OwnershipAction::Requested(request) => {
                self.send(
                    transport,
                    Target::Server,
                    &WireMessage::OwnershipRequest(request.clone()),
                );
            }
            OwnershipAction::Granted(transfer) => {
                self.reconciler.reset(&entity);
                self.send(
                    transport,
                    Target::Broadcast,
                    &WireMessage::OwnershipTransfer(transfer.clone()),
                );
            }
        }
        Ok(action)
    }

    /// Physics contact with a body: take over existing entities, or queue a
    /// creation for scene bodies that are not networked yet.
    pub fn on_body_hit(
        &mut self,
        transport: &mut dyn Transport,
        body: ObjectHandle,
    ) -> Result<ImpactOutcome, SessionError> {
        if let Some(entity_id) = self.entities.entity_for_root(&body) {
            if self.arbiter.is_owner_locked(&entity_id) {
                return Ok(ImpactOutcome::OwnerLocked);
            }

            let held = self
                .entities
                .get(&entity_id)
                .and_then(|entity| entity.get_extender::<GripExtender>())
                .is_some_and(GripExtender::check_held);
            if held {
                return Ok(ImpactOutcome::Held);
            }

            return Ok(match self.request_ownership(transport, entity_id)? {
                OwnershipAction::AlreadyOwner => ImpactOutcome::AlreadyOwner,
                OwnershipAction::Requested(_) => ImpactOutcome::OwnershipRequested,
                OwnershipAction::Granted(_) => ImpactOutcome::OwnershipGranted,
            });
        }

        if !self.bodies.contains(&body) {
            return Ok(ImpactOutcome::Untracked);
        }

        if self
            .pending_props
            .schedule(body, self.config.spawn_delay_frames)
        {
            Ok(ImpactOutcome::CreationScheduled)
        } else {
            Ok(ImpactOutcome::CreationPending)
        }
    }

    pub fn on_peer_disconnected(&mut self, transport: &mut dyn Transport, peer: PeerId) {
        for transfer in self.arbiter.on_peer_disconnected(peer) {
            self.reconciler.reset(&transfer.entity);
            self.send(
                transport,
                Target::BroadcastExcept(peer),
                &WireMessage::OwnershipTransfer(transfer),
            );
        }
    }

    // Update loops

    /// Variable-rate step: fires deferred prop creations. Returns how many
    /// creations were sent or performed.
    pub fn update(&mut self, transport: &mut dyn Transport, scene: &dyn SceneGraph) -> usize {
        let mut created = 0;
        for body in self.pending_props.tick() {
            if self.entities.entity_for_root(&body).is_some() {
                continue;
            }
            let Some((hash, slot)) = self.bodies.reverse_lookup(&body) else {
                continue;
            };

            if self.host_type.is_server() {
                match self.create_prop(transport, scene, body, hash, slot, self.local_peer) {
                    Ok(_) => created += 1,
                    Err(error) => warn!("Failed to create prop for {:?}: {}", body, error),
                }
            } else if transport.has_server() {
                let request = PropCreation {
                    entity: None,
                    hash,
                    slot,
                    owner: self.local_peer,
                };
                self.send(transport, Target::Server, &WireMessage::PropCreation(request));
                created += 1;
            } else {
                debug!("Dropping prop creation for {:?}, no server", body);
            }
        }
        created
    }

    /// Physics step: drives every remotely owned body toward its target.
    pub fn fixed_update(&mut self, host: &mut dyn PhysicsHost) -> usize {
        self.reconciler
            .fixed_update(host, &self.arbiter, &self.entities)
    }

    // Outgoing

    /// Reports the state of one authoritative entity. Returns false if this
    /// peer is not authoritative or the body is gone.
    pub fn send_pose(
        &mut self,
        transport: &mut dyn Transport,
        host: &dyn PhysicsHost,
        entity: EntityId,
        teleport: bool,
    ) -> bool {
        if !self.arbiter.is_authoritative(&entity) {
            return false;
        }
        let Some(root) = self.entities.get(&entity).map(|entity| entity.root()) else {
            return false;
        };
        let Some(state) = host.body_state(root) else {
            return false;
        };

        let update = PoseUpdate {
            entity,
            position: state.position,
            rotation: state.rotation,
            velocity: state.velocity,
            angular_velocity: state.angular_velocity,
            teleport,
        };
        let target = self.upstream();
        self.send(transport, target, &WireMessage::PoseUpdate(update));
        true
    }

    /// Reports every entity this peer is authoritative for
    pub fn broadcast_poses(&mut self, transport: &mut dyn Transport, host: &dyn PhysicsHost) -> usize {
        let mut ids: Vec<EntityId> = self.entities.ids().collect();
        ids.sort();

        let mut sent = 0;
        for entity in ids {
            if self.send_pose(transport, host, entity, false) {
                sent += 1;
            }
        }
        sent
    }

    /// Sends a grip event for a local grip
    pub fn send_grip_event(
        &mut self,
        transport: &mut dyn Transport,
        grip: ObjectHandle,
        event_type: GripEventType,
    ) -> Result<(), SessionError> {
        if !transport.has_server() {
            return Err(OwnershipError::NoServer.into());
        }
        let (target, grip_index) = self.grip_target(grip)?;

        let event = GripEvent {
            player: self.local_peer,
            target,
            grip_index,
            event_type,
        };
        let destination = self.upstream();
        self.send(transport, destination, &WireMessage::GripEvent(event));
        Ok(())
    }

    /// Local hand grabbed a grip. Returns whether an event was sent.
    pub fn on_grip_attached(
        &mut self,
        transport: &mut dyn Transport,
        grip: ObjectHandle,
        state: &GripState,
        hand: &GripHand,
    ) -> Result<bool, SessionError> {
        self.set_grip_held(grip, true);

        match self
            .grip_sender
            .on_attached(transport.has_server(), state, hand)
        {
            Some(event_type) => self.send_grip_event(transport, grip, event_type).map(|_| true),
            None => Ok(false),
        }
    }

    /// Local hand let go of a grip. Returns whether an event was sent.
    pub fn on_grip_detached(
        &mut self,
        transport: &mut dyn Transport,
        grip: ObjectHandle,
        state: &GripState,
        hand: &GripHand,
    ) -> Result<bool, SessionError> {
        let still_held = match hand.handedness {
            Handedness::Left => state.right_attached,
            Handedness::Right => state.left_attached,
        };
        self.set_grip_held(grip, still_held);

        match self
            .grip_sender
            .on_detached(transport.has_server(), state, hand)
        {
            Some(event_type) => self.send_grip_event(transport, grip, event_type).map(|_| true),
            None => Ok(false),
        }
    }

    /// A hand is holding a grip this frame. Returns how many events were sent.
    pub fn on_grip_attached_update(
        &mut self,
        transport: &mut dyn Transport,
        grip: ObjectHandle,
        hand: &GripHand,
        input: &HandInput,
    ) -> Result<usize, SessionError> {
        let events = self
            .grip_sender
            .on_attached_update(transport.has_server(), hand, input);
        for event_type in &events {
            self.send_grip_event(transport, grip, *event_type)?;
        }
        Ok(events.len())
    }

    /// Announces a zone encounter change. Returns false while a remote event
    /// is being applied.
    pub fn send_zone_event(
        &mut self,
        transport: &mut dyn Transport,
        scene: &dyn SceneGraph,
        zone: ObjectHandle,
        event_type: ZoneEncounterEventType,
    ) -> Result<bool, SessionError> {
        if self.patches.is_set() {
            return Ok(false);
        }
        if !transport.has_server() {
            return Err(OwnershipError::NoServer.into());
        }
        let full_path =
            HierarchyHasher::full_path(scene, zone).ok_or(SessionError::NotInScene(zone))?;

        let message = WireMessage::ZoneEncounterEvent(ZoneEncounterEvent {
            event_type,
            full_path,
        });
        message.validate()?;

        let destination = self.upstream();
        self.send(transport, destination, &message);
        Ok(true)
    }

    // Incoming

    /// Decodes and applies one message received from `from`.
    ///
    /// Malformed messages are logged and dropped; the session stays usable.
    pub fn handle_incoming<H: GripEventHandler + ZoneEncounterHandler>(
        &mut self,
        transport: &mut dyn Transport,
        scene: &dyn SceneGraph,
        handler: &mut H,
        from: PeerId,
        bytes: &[u8],
    ) -> Result<(), SessionError> {
        let message = match WireMessage::read(bytes) {
            Ok(message) => message,
            Err(error) => {
                warn!("Dropping message from {:?}: {}", from, error);
                return Err(error.into());
            }
        };

        match message {
            WireMessage::OwnershipRequest(request) => {
                self.on_ownership_request(transport, from, request)
            }
            WireMessage::OwnershipTransfer(transfer) => self.on_ownership_transfer(from, transfer),
            WireMessage::PoseUpdate(update) => self.on_pose_update(transport, from, update),
            WireMessage::GripEvent(event) => {
                if self.host_type.is_server() {
                    self.send(
                        transport,
                        Target::BroadcastExcept(from),
                        &WireMessage::GripEvent(event.clone()),
                    );
                }
                let outcome = self.dispatcher.dispatch_grip(
                    &event,
                    &mut self.entities,
                    &self.static_grips,
                    handler,
                );
                log_outcome("grip event", &outcome);
            }
            WireMessage::ZoneEncounterEvent(event) => {
                if self.host_type.is_server() {
                    self.send(
                        transport,
                        Target::BroadcastExcept(from),
                        &WireMessage::ZoneEncounterEvent(event.clone()),
                    );
                }
                let outcome = self.dispatcher.dispatch_zone(&event, scene, handler);
                log_outcome("zone encounter", &outcome);
            }
            WireMessage::PropCreation(creation) => {
                self.on_prop_creation(transport, scene, from, creation)?
            }
        }
        Ok(())
    }

    fn on_ownership_request(
        &mut self,
        transport: &mut dyn Transport,
        from: PeerId,
        request: OwnershipRequest,
    ) {
        if !self.host_type.is_server() {
            warn!("Client received an ownership request from {:?}", from);
            return;
        }
        if request.requester != from {
            warn!(
                "{:?} asked for ownership on behalf of {:?}",
                from, request.requester
            );
            return;
        }
        if !self.entities.contains(&request.entity) {
            debug!("Ownership request for unknown {:?}", request.entity);
            return;
        }

        match self.arbiter.decide_transfer(request.entity, Some(from)) {
            Ok(transfer) => {
                self.reconciler.reset(&transfer.entity);
                self.send(
                    transport,
                    Target::Broadcast,
                    &WireMessage::OwnershipTransfer(transfer),
                );
            }
            Err(error) => debug!("Refused ownership of {:?}: {}", request.entity, error),
        }
    }

    fn on_ownership_transfer(&mut self, from: PeerId, transfer: OwnershipTransfer) {
        if self.host_type.is_server() || !from.is_server() {
            warn!("Ignoring ownership transfer from {:?}", from);
            return;
        }
        if let Some(change) = self.arbiter.receive_broadcast(&transfer) {
            debug!(
                "{:?} now owned by {:?} (epoch {})",
                change.entity, change.owner, change.epoch
            );
            self.reconciler.reset(&change.entity);
        }
    }

    fn on_pose_update(&mut self, transport: &mut dyn Transport, from: PeerId, update: PoseUpdate) {
        if self.host_type.is_server() {
            if self.arbiter.owner(&update.entity) != Some(from) {
                debug!("Pose for {:?} from non-owner {:?}", update.entity, from);
                return;
            }
            self.send(
                transport,
                Target::BroadcastExcept(from),
                &WireMessage::PoseUpdate(update.clone()),
            );
        } else if !from.is_server() {
            return;
        }

        if self.arbiter.is_authoritative(&update.entity) {
            return;
        }
        if !self.entities.contains(&update.entity) {
            return;
        }
        self.reconciler.set_target(&update);
    }

    fn on_prop_creation(
        &mut self,
        transport: &mut dyn Transport,
        scene: &dyn SceneGraph,
        from: PeerId,
        creation: PropCreation,
    ) -> Result<(), SessionError> {
        let Some(body) = self.bodies.lookup(&creation.hash, creation.slot) else {
            debug!(
                "Prop creation for unknown body {:?}/{}",
                creation.hash, creation.slot
            );
            return Ok(());
        };

        match (self.host_type, creation.entity) {
            (HostType::Server, None) => {
                if self.entities.entity_for_root(&body).is_some() {
                    debug!("{:?} is already networked", body);
                    return Ok(());
                }
                self.create_prop(transport, scene, body, creation.hash, creation.slot, from)?;
            }
            (HostType::Client, Some(entity)) => {
                if !from.is_server() {
                    warn!("Ignoring prop creation from {:?}", from);
                    return Ok(());
                }
                self.entities.spawn_with_id(entity, body)?;
                self.attach_extenders(scene, entity, body);
                self.pending_props.cancel(&body);
                info!("Spawned {:?} for {:?}", entity, body);
            }
            (host_type, entity) => {
                warn!(
                    "Unexpected prop creation {:?} on {:?} from {:?}",
                    entity, host_type, from
                );
            }
        }
        Ok(())
    }

    // Internals

    fn create_prop(
        &mut self,
        transport: &mut dyn Transport,
        scene: &dyn SceneGraph,
        body: ObjectHandle,
        hash: HierarchyHash,
        slot: u16,
        owner: PeerId,
    ) -> Result<EntityId, SessionError> {
        let entity = self.entities.spawn(body)?;
        self.attach_extenders(scene, entity, body);
        self.pending_props.cancel(&body);
        info!("Spawned {:?} for {:?}, owned by {:?}", entity, body, owner);

        let creation = PropCreation {
            entity: Some(entity),
            hash,
            slot,
            owner,
        };
        self.send(transport, Target::Broadcast, &WireMessage::PropCreation(creation));

        let transfer = self.arbiter.decide_transfer(entity, Some(owner))?;
        self.send(
            transport,
            Target::Broadcast,
            &WireMessage::OwnershipTransfer(transfer),
        );
        Ok(entity)
    }

    fn attach_extenders(&mut self, scene: &dyn SceneGraph, entity: EntityId, root: ObjectHandle) {
        let parents = [root];
        let extenders = self.extenders.instantiate_all(&ExtenderContext {
            entity,
            parents: &parents,
            scene,
        });
        if let Some(network_entity) = self.entities.get_mut(&entity) {
            network_entity.attach_extenders(extenders);
        }
        self.arbiter.try_register(entity);
    }

    fn grip_target(&self, grip: ObjectHandle) -> Result<(EntityTarget, u8), SessionError> {
        for entity in self.entities.iter() {
            if let Some(index) = entity
                .get_extender::<GripExtender>()
                .and_then(|extender| extender.index_of(grip))
            {
                return Ok((EntityTarget::Networked(entity.id()), index));
            }
        }

        match self.static_grips.reverse_lookup(&grip) {
            Some((hash, slot)) => Ok((EntityTarget::Static { hash, slot }, 0)),
            None => Err(SessionError::UnknownGrip(grip)),
        }
    }

    fn set_grip_held(&mut self, grip: ObjectHandle, held: bool) {
        let Ok((EntityTarget::Networked(entity), index)) = self.grip_target(grip) else {
            return;
        };
        if let Some(extender) = self
            .entities
            .get_mut(&entity)
            .and_then(|entity| entity.get_extender_mut::<GripExtender>())
        {
            extender.set_held(index, held);
        }
    }

    // Where locally originated messages go first
    fn upstream(&self) -> Target {
        match self.host_type {
            HostType::Server => Target::Broadcast,
            HostType::Client => Target::Server,
        }
    }

    fn send(&mut self, transport: &mut dyn Transport, target: Target, message: &WireMessage) {
        let mut writer = self.writers.acquire();
        message.write(&mut *writer);
        transport.send(target, message.channel(), writer.flush());
    }
}

fn log_outcome(context: &str, outcome: &DispatchOutcome) {
    match outcome {
        DispatchOutcome::Applied | DispatchOutcome::NoOp | DispatchOutcome::Ignored => {}
        DispatchOutcome::Unresolved => debug!("Unresolved {}", context),
        DispatchOutcome::Failed(error) => warn!("{} failed: {}", context, error),
    }
}
