use std::collections::HashMap;

use glam::{Quat, Vec3};
use log::debug;

use crate::{
    entity::{entity_id::EntityId, entity_manager::EntityManager},
    messages::PoseUpdate,
    motion::{
        FrameGains, MotionBounds, MotionConfig, PdController, PdGains, PhysicsHost, WorldBounds,
    },
    ownership::ownership_arbiter::OwnershipArbiter,
};

/// Most recent state reported by an entity's owner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseTarget {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl From<&PoseUpdate> for PoseTarget {
    fn from(update: &PoseUpdate) -> Self {
        Self {
            position: update.position,
            rotation: update.rotation,
            velocity: update.velocity,
            angular_velocity: update.angular_velocity,
        }
    }
}

#[derive(Default)]
struct DrivenBody {
    controller: PdController,
    target: Option<PoseTarget>,
}

/// Turns remote pose reports into forces on the local copies of entities
/// this peer does not own.
pub struct MotionReconciler {
    gains: PdGains,
    frame: FrameGains,
    bounds: Box<dyn MotionBounds>,
    bodies: HashMap<EntityId, DrivenBody>,
}

impl MotionReconciler {
    pub fn new(config: &MotionConfig, bounds: WorldBounds) -> Self {
        Self::with_bounds(config, Box::new(bounds))
    }

    pub fn with_bounds(config: &MotionConfig, bounds: Box<dyn MotionBounds>) -> Self {
        let gains = PdGains::new(config);
        let frame = FrameGains::new(&gains);
        Self {
            gains,
            frame,
            bounds,
            bodies: HashMap::new(),
        }
    }

    pub fn frame_gains(&self) -> &FrameGains {
        &self.frame
    }

    pub fn set_target(&mut self, update: &PoseUpdate) {
        let body = self.bodies.entry(update.entity).or_default();
        if update.teleport {
            body.controller.reset();
        }
        body.target = Some(PoseTarget::from(update));
    }

    pub fn target(&self, entity: &EntityId) -> Option<PoseTarget> {
        self.bodies.get(entity)?.target
    }

    pub fn controller(&self, entity: &EntityId) -> Option<&PdController> {
        self.bodies.get(entity).map(|body| &body.controller)
    }

    /// Forgets derivatives and the pending target, e.g. after an owner change
    pub fn reset(&mut self, entity: &EntityId) {
        if let Some(body) = self.bodies.get_mut(entity) {
            body.controller.reset();
            body.target = None;
        }
    }

    pub fn remove(&mut self, entity: &EntityId) {
        self.bodies.remove(entity);
    }

    /// Pushes every remotely owned body with a target toward it. Returns the
    /// number of bodies driven this step.
    pub fn fixed_update(
        &mut self,
        host: &mut dyn PhysicsHost,
        arbiter: &OwnershipArbiter,
        entities: &EntityManager,
    ) -> usize {
        self.frame.update(&self.gains, host.fixed_delta_time());

        let mut driven = 0;
        for (entity_id, body) in self.bodies.iter_mut() {
            if arbiter.is_authoritative(entity_id) {
                continue;
            }
            let Some(target) = body.target else {
                continue;
            };
            let Some(entity) = entities.get(entity_id) else {
                continue;
            };
            let Some(state) = host.body_state(entity.root()) else {
                debug!("No body for {:?}, skipping", entity_id);
                continue;
            };

            let force = body.controller.force(
                &self.frame,
                self.bounds.as_ref(),
                state.position,
                state.velocity,
                target.position,
                target.velocity,
            );
            let torque = body.controller.torque(
                &self.frame,
                self.bounds.as_ref(),
                state.rotation,
                state.angular_velocity,
                target.rotation,
                target.angular_velocity,
            );

            host.apply_force(entity.root(), force);
            host.apply_torque(entity.root(), torque);
            driven += 1;
        }
        driven
    }
}
