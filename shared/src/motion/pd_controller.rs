use glam::{Quat, Vec3};

use crate::motion::{MotionBounds, MotionConfig};

/// Proportional and derivative gains of one axis (linear or angular)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisGains {
    pub kp: f32,
    pub kd: f32,
}

impl AxisGains {
    pub fn new(frequency: f32, damping: f32) -> Self {
        Self {
            kp: (6.0 * frequency) * (6.0 * frequency) * 0.25,
            kd: 4.5 * frequency * damping,
        }
    }

    /// Stable gains for a step of `dt` seconds
    pub fn for_step(&self, dt: f32) -> StepGains {
        let g = 1.0 / (1.0 + self.kd * dt + self.kp * dt * dt);
        StepGains {
            ksg: self.kp * g,
            kdg: (self.kd + self.kp * dt) * g,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepGains {
    pub ksg: f32,
    pub kdg: f32,
}

/// Gains derived once from a `MotionConfig`
#[derive(Clone, Debug, PartialEq)]
pub struct PdGains {
    pub position: AxisGains,
    pub rotation: AxisGains,
    pub max_force: f32,
    pub max_torque: f32,
}

impl PdGains {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            position: AxisGains::new(config.position_frequency, config.position_damping),
            rotation: AxisGains::new(config.rotation_frequency, config.rotation_damping),
            max_force: config.max_force,
            max_torque: config.max_torque,
        }
    }
}

/// Per-step gains shared by every controller, refreshed when the fixed step
/// length changes.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameGains {
    dt: Option<f32>,
    pub position: StepGains,
    pub rotation: StepGains,
    pub max_force: f32,
    pub max_torque: f32,
}

impl FrameGains {
    pub fn new(gains: &PdGains) -> Self {
        Self {
            dt: None,
            position: StepGains::default(),
            rotation: StepGains::default(),
            max_force: gains.max_force,
            max_torque: gains.max_torque,
        }
    }

    pub fn dt(&self) -> Option<f32> {
        self.dt
    }

    /// Returns true if the gains were recomputed
    pub fn update(&mut self, gains: &PdGains, dt: f32) -> bool {
        if let Some(last) = self.dt {
            if approximately(last, dt) {
                return false;
            }
        }

        self.dt = Some(dt);
        self.position = gains.position.for_step(dt);
        self.rotation = gains.rotation.for_step(dt);
        true
    }
}

fn approximately(a: f32, b: f32) -> bool {
    (a - b).abs() < f32::max(1e-6 * a.abs().max(b.abs()), f32::EPSILON * 8.0)
}

/// Drives one body toward the targets reported by its owner.
///
/// Each step pulls toward the target received on the previous step and feeds
/// the change in target velocity forward as acceleration.
#[derive(Clone, Debug)]
pub struct PdController {
    valid_position: bool,
    valid_rotation: bool,
    last_position: Vec3,
    last_velocity: Vec3,
    last_rotation: Quat,
    last_angular_velocity: Vec3,
    saved_force: Vec3,
    saved_torque: Vec3,
}

impl Default for PdController {
    fn default() -> Self {
        Self {
            valid_position: false,
            valid_rotation: false,
            last_position: Vec3::ZERO,
            last_velocity: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_angular_velocity: Vec3::ZERO,
            saved_force: Vec3::ZERO,
            saved_torque: Vec3::ZERO,
        }
    }
}

impl PdController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valid_position(&self) -> bool {
        self.valid_position
    }

    pub fn valid_rotation(&self) -> bool {
        self.valid_rotation
    }

    pub fn saved_force(&self) -> Vec3 {
        self.saved_force
    }

    pub fn saved_torque(&self) -> Vec3 {
        self.saved_torque
    }

    pub fn reset_position(&mut self) {
        self.valid_position = false;
        self.saved_force = Vec3::ZERO;
    }

    pub fn reset_rotation(&mut self) {
        self.valid_rotation = false;
        self.saved_torque = Vec3::ZERO;
    }

    pub fn reset(&mut self) {
        self.reset_position();
        self.reset_rotation();
    }

    pub fn force(
        &mut self,
        gains: &FrameGains,
        bounds: &dyn MotionBounds,
        position: Vec3,
        velocity: Vec3,
        target_position: Vec3,
        target_velocity: Vec3,
    ) -> Vec3 {
        let Some(dt) = gains.dt().filter(|dt| *dt > 0.0) else {
            return Vec3::ZERO;
        };
        if !bounds.is_in_bounds(target_position) {
            return Vec3::ZERO;
        }

        let limited_velocity = bounds.limit_velocity(target_velocity);

        if !self.valid_position {
            self.last_position = target_position;
            self.last_velocity = limited_velocity;
            self.valid_position = true;
        }

        let mut force = (self.last_position - position) * gains.position.ksg
            + (self.last_velocity - velocity) * gains.position.kdg;

        // acceleration
        force += (limited_velocity - self.last_velocity) / dt;

        self.last_velocity = limited_velocity;
        self.last_position = target_position;

        self.saved_force = force.clamp_length_max(gains.max_force);
        self.saved_force
    }

    pub fn torque(
        &mut self,
        gains: &FrameGains,
        bounds: &dyn MotionBounds,
        rotation: Quat,
        angular_velocity: Vec3,
        target_rotation: Quat,
        target_angular_velocity: Vec3,
    ) -> Vec3 {
        let Some(dt) = gains.dt().filter(|dt| *dt > 0.0) else {
            return Vec3::ZERO;
        };
        if !target_rotation.is_finite() {
            return Vec3::ZERO;
        }

        let target_angular_velocity = bounds.limit_angular_velocity(target_angular_velocity);

        if !self.valid_rotation {
            self.last_rotation = target_rotation;
            self.last_angular_velocity = target_angular_velocity;
            self.valid_rotation = true;
        }

        let mut error = self.last_rotation * rotation.inverse();
        // shortest arc
        if error.w < 0.0 {
            error = -error;
        }
        let (axis, angle) = error.to_axis_angle();
        let axis = axis.normalize_or_zero();

        let mut torque = axis * angle * gains.rotation.ksg
            + (self.last_angular_velocity - angular_velocity) * gains.rotation.kdg;

        // acceleration
        torque += (target_angular_velocity - self.last_angular_velocity) / dt;

        self.last_angular_velocity = target_angular_velocity;
        self.last_rotation = target_rotation;

        self.saved_torque = torque.clamp_length_max(gains.max_torque);
        self.saved_torque
    }
}
