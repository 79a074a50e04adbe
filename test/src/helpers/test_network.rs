use std::sync::Arc;

use glam::Vec3;
use log::debug;
use tandem_shared::{
    Channel, DefaultExtendersPlugin, EntityId, ExtenderRegistry, ImpactOutcome, ObjectHandle,
    OwnershipAction, PeerId, SessionError, SyncConfig, SyncSession, Target,
};

use crate::{build_level, Level, LocalTransport, RecordingHandler, TestPhysics, TestScene};

const FIXED_DT: f32 = 0.02;
const MAX_ROUNDS: usize = 16;

pub fn default_extenders() -> Arc<ExtenderRegistry> {
    Arc::new(
        ExtenderRegistry::builder()
            .add_plugin(DefaultExtendersPlugin)
            .lock(),
    )
}

/// One peer with its own scene copy, physics and event sink
pub struct TestPeer {
    pub session: SyncSession,
    pub transport: LocalTransport,
    pub scene: TestScene,
    pub level: Level,
    pub physics: TestPhysics,
    pub events: RecordingHandler,
    pub errors: Vec<SessionError>,
}

impl TestPeer {
    pub fn server(extenders: Arc<ExtenderRegistry>) -> Self {
        let session = SyncSession::server(SyncConfig::default(), extenders);
        Self::load(session, LocalTransport::server(), 1_000)
    }

    pub fn client(peer: PeerId, extenders: Arc<ExtenderRegistry>) -> Self {
        let session = SyncSession::client(SyncConfig::default(), peer, extenders);
        let first_handle = 1_000 * (u64::from(peer.0) + 1) + 17;
        Self::load(session, LocalTransport::client(), first_handle)
    }

    fn load(mut session: SyncSession, transport: LocalTransport, first_handle: u64) -> Self {
        let mut scene = TestScene::new(first_handle);
        let level = build_level(&mut scene);

        let mut physics = TestPhysics::new(FIXED_DT);
        for (index, body) in level.bodies().into_iter().enumerate() {
            session
                .register_body(&scene, body)
                .expect("level bodies register once");
            physics.add_body(body, Vec3::new(index as f32 * 2.0, 0.0, 0.0));
        }
        session
            .register_static_grip(&scene, level.door_knob)
            .expect("door knob registers once");

        Self {
            session,
            transport,
            scene,
            level,
            physics,
            events: RecordingHandler::default(),
            errors: Vec::new(),
        }
    }

    pub fn peer(&self) -> PeerId {
        self.session.local_peer()
    }

    pub fn receive(&mut self, from: PeerId, bytes: &[u8]) {
        if let Err(error) = self.session.handle_incoming(
            &mut self.transport,
            &self.scene,
            &mut self.events,
            from,
            bytes,
        ) {
            self.errors.push(error);
        }
    }

    pub fn hit(&mut self, body: ObjectHandle) -> Result<ImpactOutcome, SessionError> {
        self.session.on_body_hit(&mut self.transport, body)
    }

    pub fn spawn(&mut self, body: ObjectHandle) -> Result<EntityId, SessionError> {
        self.session
            .spawn_entity(&mut self.transport, &self.scene, body)
    }

    pub fn request_ownership(&mut self, entity: EntityId) -> Result<OwnershipAction, SessionError> {
        self.session.request_ownership(&mut self.transport, entity)
    }

    pub fn update(&mut self) -> usize {
        self.session.update(&mut self.transport, &self.scene)
    }

    /// Runs the reconciler and then the physics step
    pub fn fixed_update(&mut self) -> usize {
        let driven = self.session.fixed_update(&mut self.physics);
        self.physics.step();
        driven
    }

    pub fn broadcast_poses(&mut self) -> usize {
        self.session
            .broadcast_poses(&mut self.transport, &self.physics)
    }

    pub fn entity_for(&self, body: ObjectHandle) -> Option<EntityId> {
        self.session.entities().entity_for_root(&body)
    }
}

enum Hop {
    ToServer(PeerId),
    ToClient(usize),
}

/// A server and its clients joined by in-memory queues
pub struct TestNetwork {
    pub server: TestPeer,
    pub clients: Vec<TestPeer>,
    pub drop_unreliable: bool,
}

impl TestNetwork {
    /// Clients get peer ids 1..=count
    pub fn new(client_count: u8) -> Self {
        let extenders = default_extenders();
        Self {
            server: TestPeer::server(extenders.clone()),
            clients: (1..=client_count)
                .map(|id| TestPeer::client(PeerId(id), extenders.clone()))
                .collect(),
            drop_unreliable: false,
        }
    }

    pub fn client(&mut self, peer: PeerId) -> &mut TestPeer {
        self.clients
            .iter_mut()
            .find(|client| client.peer() == peer)
            .expect("no client with that id")
    }

    pub fn disconnect(&mut self, peer: PeerId) {
        self.client(peer).transport.set_connected(false);
        self.server
            .session
            .on_peer_disconnected(&mut self.server.transport, peer);
    }

    /// Routes queued messages until every outbox is empty. Returns the
    /// number of deliveries.
    pub fn exchange(&mut self) -> usize {
        let mut delivered = 0;

        for _ in 0..MAX_ROUNDS {
            let mut round: Vec<(Hop, Vec<u8>)> = Vec::new();

            for client in self.clients.iter_mut() {
                let from = client.peer();
                for outgoing in client.transport.take_outbox() {
                    if self.drop_unreliable && outgoing.channel == Channel::Unreliable {
                        continue;
                    }
                    if outgoing.target == Target::Server {
                        round.push((Hop::ToServer(from), outgoing.bytes));
                    }
                }
            }

            for outgoing in self.server.transport.take_outbox() {
                if self.drop_unreliable && outgoing.channel == Channel::Unreliable {
                    continue;
                }
                for (index, client) in self.clients.iter().enumerate() {
                    let peer = client.peer();
                    let wanted = match outgoing.target {
                        Target::Broadcast => true,
                        Target::BroadcastExcept(except) => peer != except,
                        Target::Peer(target) => peer == target,
                        Target::Server => false,
                    };
                    if wanted {
                        round.push((Hop::ToClient(index), outgoing.bytes.clone()));
                    }
                }
            }

            if round.is_empty() {
                break;
            }

            for (hop, bytes) in round {
                match hop {
                    Hop::ToServer(from) => self.server.receive(from, &bytes),
                    Hop::ToClient(index) => {
                        let client = &mut self.clients[index];
                        if !client.transport.has_connection() {
                            debug!("Dropping message for disconnected {:?}", client.peer());
                            continue;
                        }
                        client.receive(PeerId::SERVER, &bytes);
                    }
                }
                delivered += 1;
            }
        }

        delivered
    }

    /// Runs `update` on every peer and exchanges the results, `frames` times
    pub fn update_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.server.update();
            for client in self.clients.iter_mut() {
                client.update();
            }
            self.exchange();
        }
    }

    /// Every peer publishes its poses, then every peer steps physics once
    pub fn physics_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.server.broadcast_poses();
            for client in self.clients.iter_mut() {
                client.broadcast_poses();
            }
            self.exchange();

            self.server.fixed_update();
            for client in self.clients.iter_mut() {
                client.fixed_update();
            }
        }
    }
}
