use glam::{Quat, Vec3};

use crate::types::ObjectHandle;

/// Snapshot of a rigid body read at the start of a fixed step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
}

/// The host engine's physics simulation
pub trait PhysicsHost {
    fn fixed_delta_time(&self) -> f32;
    fn body_state(&self, body: ObjectHandle) -> Option<BodyState>;
    /// Mass-independent (acceleration) force
    fn apply_force(&mut self, body: ObjectHandle, force: Vec3);
    fn apply_torque(&mut self, body: ObjectHandle, torque: Vec3);
}
