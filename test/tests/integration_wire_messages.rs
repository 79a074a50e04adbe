use glam::{Quat, Vec3};
use tandem_serde::{BitWriter, SerdeErr};
use tandem_shared::{
    EntityId, EntityTarget, GripEvent, GripEventType, HierarchyHash, MessageError, MessageTag,
    OwnershipTransfer, PeerId, PoseUpdate, PropCreation, SessionError, WireMessage,
    ZoneEncounterEvent, ZoneEncounterEventType,
};
use tandem_test::TestNetwork;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn encode(message: &WireMessage) -> Vec<u8> {
    let mut writer = BitWriter::new();
    message.write(&mut writer);
    writer.to_bytes()
}

fn round_trip(message: WireMessage) {
    let bytes = encode(&message);
    assert_eq!(bytes[0], message.tag().to_byte());
    assert_eq!(WireMessage::read(&bytes), Ok(message));
}

#[test]
fn boundary_values_survive_the_wire() {
    round_trip(WireMessage::ZoneEncounterEvent(ZoneEncounterEvent {
        event_type: ZoneEncounterEventType::Unknown,
        full_path: String::new(),
    }));
    round_trip(WireMessage::GripEvent(GripEvent {
        player: PeerId(u8::MAX),
        target: EntityTarget::Static {
            hash: HierarchyHash::new(u32::MAX),
            slot: u16::MAX,
        },
        grip_index: u8::MAX,
        event_type: GripEventType::Unknown,
    }));
    round_trip(WireMessage::OwnershipTransfer(OwnershipTransfer {
        entity: EntityId::new(u16::MAX),
        owner: None,
        epoch: u32::MAX,
    }));
    round_trip(WireMessage::PropCreation(PropCreation {
        entity: None,
        hash: HierarchyHash::new(0),
        slot: 0,
        owner: PeerId::SERVER,
    }));
    round_trip(WireMessage::PoseUpdate(PoseUpdate {
        entity: EntityId::new(0),
        position: Vec3::new(-0.0, f32::MAX, f32::MIN_POSITIVE),
        rotation: Quat::from_xyzw(0.0, 0.0, 0.0, -1.0),
        velocity: Vec3::ZERO,
        angular_velocity: Vec3::NEG_ONE,
        teleport: false,
    }));
}

#[test]
fn zone_paths_keep_non_ascii_names() {
    round_trip(WireMessage::ZoneEncounterEvent(ZoneEncounterEvent {
        event_type: ZoneEncounterEventType::CompleteEncounter,
        full_path: "Niveau/Arène/Gegner ☠".to_string(),
    }));
}

#[test]
fn unknown_tag_is_reported() {
    assert_eq!(
        WireMessage::read(&[0]),
        Err(MessageError::UnknownTag(0))
    );
    assert_eq!(
        WireMessage::read(&[200, 1, 2, 3]),
        Err(MessageError::UnknownTag(200))
    );
}

#[test]
fn out_of_range_enum_is_reported() {
    let mut bytes = encode(&WireMessage::ZoneEncounterEvent(ZoneEncounterEvent {
        event_type: ZoneEncounterEventType::StartEncounter,
        full_path: String::new(),
    }));
    bytes[1] = 9;

    assert_eq!(
        WireMessage::read(&bytes),
        Err(MessageError::Payload {
            tag: MessageTag::ZoneEncounterEvent,
            source: SerdeErr::UnknownVariant {
                type_name: "ZoneEncounterEventType",
                value: 9,
            },
        })
    );
}

#[test]
fn malformed_message_is_reported_and_session_keeps_working() {
    init_logger();
    let mut network = TestNetwork::new(2);
    let gun = network.server.level.gun;
    let entity = network.server.spawn(gun).expect("server spawns the gun");
    network.exchange();

    let client = network.client(PeerId(1));
    client.receive(PeerId::SERVER, &[]);
    client.receive(PeerId::SERVER, &[MessageTag::OwnershipTransfer.to_byte()]);
    assert!(matches!(
        client.errors.as_slice(),
        [
            SessionError::Message(MessageError::Empty),
            SessionError::Message(MessageError::Payload {
                tag: MessageTag::OwnershipTransfer,
                ..
            }),
        ]
    ));

    network
        .client(PeerId(1))
        .request_ownership(entity)
        .expect("request");
    network.exchange();

    assert_eq!(
        network.client(PeerId(1)).session.arbiter().owner(&entity),
        Some(PeerId(1))
    );
}

#[test]
fn poses_travel_unreliably_and_everything_else_reliably() {
    init_logger();
    let mut network = TestNetwork::new(1);
    let gun = network.server.level.gun;
    network.server.spawn(gun).expect("server spawns the gun");

    let outbox = network.server.transport.take_outbox();
    assert_eq!(outbox.len(), 2);
    assert!(outbox
        .iter()
        .all(|outgoing| outgoing.channel == tandem_shared::Channel::Reliable));

    network.server.broadcast_poses();
    let outbox = network.server.transport.take_outbox();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].channel, tandem_shared::Channel::Unreliable);
}
