mod bounds;
mod config;
mod motion_reconciler;
mod pd_controller;
mod physics_host;

pub use bounds::{MotionBounds, WorldBounds};
pub use config::MotionConfig;
pub use motion_reconciler::{MotionReconciler, PoseTarget};
pub use pd_controller::{AxisGains, FrameGains, PdController, PdGains, StepGains};
pub use physics_host::{BodyState, PhysicsHost};
