use glam::Vec3;

/// Sanity limits applied to remote motion targets
pub trait MotionBounds {
    fn is_in_bounds(&self, position: Vec3) -> bool;
    fn limit_velocity(&self, velocity: Vec3) -> Vec3;
    fn limit_angular_velocity(&self, angular_velocity: Vec3) -> Vec3;
}

/// Axis-aligned world box plus linear and angular speed caps
#[derive(Clone, Debug, PartialEq)]
pub struct WorldBounds {
    pub min: Vec3,
    pub max: Vec3,
    pub max_speed: f32,
    /// Radians per second
    pub max_angular_speed: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min: Vec3::splat(-10_000.0),
            max: Vec3::splat(10_000.0),
            max_speed: 100.0,
            max_angular_speed: 50.0,
        }
    }
}

impl MotionBounds for WorldBounds {
    fn is_in_bounds(&self, position: Vec3) -> bool {
        position.is_finite() && position.cmpge(self.min).all() && position.cmple(self.max).all()
    }

    fn limit_velocity(&self, velocity: Vec3) -> Vec3 {
        if !velocity.is_finite() {
            return Vec3::ZERO;
        }
        velocity.clamp_length_max(self.max_speed)
    }

    fn limit_angular_velocity(&self, angular_velocity: Vec3) -> Vec3 {
        if !angular_velocity.is_finite() {
            return Vec3::ZERO;
        }
        angular_velocity.clamp_length_max(self.max_angular_speed)
    }
}
