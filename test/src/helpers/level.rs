use tandem_shared::{ObjectHandle, GRIP_COMPONENT};

use crate::TestScene;

/// Handles of the objects in the shared test level, as seen by one peer
#[derive(Clone, Copy, Debug)]
pub struct Level {
    pub world: ObjectHandle,
    pub first_crate: ObjectHandle,
    pub second_crate: ObjectHandle,
    pub gun: ObjectHandle,
    pub gun_handle: ObjectHandle,
    pub gun_pump: ObjectHandle,
    pub door_knob: ObjectHandle,
    pub arena: ObjectHandle,
}

impl Level {
    pub fn bodies(&self) -> [ObjectHandle; 3] {
        [self.first_crate, self.gun, self.second_crate]
    }
}

/// Loads the level every peer shares. Both crates have the same name and
/// only differ by sibling index.
pub fn build_level(scene: &mut TestScene) -> Level {
    let world = scene.add(None, "World");
    let props = scene.add(Some(world), "Props");

    let first_crate = scene.add(Some(props), "Crate");
    let gun = scene.add(Some(props), "Gun");
    let gun_handle = scene.add(Some(gun), "Handle");
    let barrel = scene.add(Some(gun), "Barrel");
    let gun_pump = scene.add(Some(barrel), "Pump");
    let second_crate = scene.add(Some(props), "Crate");

    let door = scene.add(Some(world), "Door");
    let door_knob = scene.add(Some(door), "Knob");
    let arena = scene.add(Some(world), "Arena");

    scene.add_component(gun_handle, GRIP_COMPONENT);
    scene.add_component(gun_pump, GRIP_COMPONENT);
    scene.add_component(door_knob, GRIP_COMPONENT);

    Level {
        world,
        first_crate,
        second_crate,
        gun,
        gun_handle,
        gun_pump,
        door_knob,
        arena,
    }
}
