pub mod helpers;
pub mod local_transport;
pub mod test_scene;

pub use helpers::*;
pub use local_transport::{LocalTransport, Outgoing};
pub use test_physics::TestPhysics;
pub use test_scene::TestScene;
