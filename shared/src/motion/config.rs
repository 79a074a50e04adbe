use std::default::Default;

/// Tuning shared by every synced body's controller
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    /// Output force is clamped to this magnitude
    pub max_force: f32,
    /// Output torque is clamped to this magnitude
    pub max_torque: f32,
    pub position_frequency: f32,
    pub position_damping: f32,
    pub rotation_frequency: f32,
    pub rotation_damping: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_force: 5000.0,
            max_torque: 1000.0,
            position_frequency: 10.0,
            position_damping: 3.0,
            rotation_frequency: 100.0,
            rotation_damping: 10.0,
        }
    }
}
