pub mod entity_id;
pub mod entity_manager;
pub mod error;
pub mod grip_extender;
pub mod network_entity;
