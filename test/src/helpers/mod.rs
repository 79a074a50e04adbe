pub mod assertions;
pub mod level;
pub mod test_network;

pub use level::{build_level, Level};
pub use recording_handler::RecordingHandler;
pub use test_network::{default_extenders, TestNetwork, TestPeer};
