use std::default::Default;

use crate::{
    motion::{MotionConfig, WorldBounds},
    types::FrameCount,
};

/// Contains Config properties used by a `SyncSession`
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Tuning of the position/rotation controllers
    pub motion: MotionConfig,
    /// Region in which remote targets are accepted, and the speed cap
    /// applied to target velocities
    pub bounds: WorldBounds,
    /// Update frames to wait after an impact before a body without an
    /// entity is declared worth spawning
    pub spawn_delay_frames: FrameCount,
    /// Number of idle writers kept for outgoing messages
    pub writer_pool_size: usize,
    /// Initial byte capacity of a pooled writer
    pub writer_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            bounds: WorldBounds::default(),
            spawn_delay_frames: 4,
            writer_pool_size: 8,
            writer_capacity: 256,
        }
    }
}
