mod error;
mod grip_event;
mod message_tag;
mod ownership;
mod pose_update;
mod prop_creation;
mod wire_message;
mod zone_encounter;

pub use error::MessageError;
pub use grip_event::{EntityTarget, GripEvent, GripEventType};
pub use message_tag::MessageTag;
pub use ownership::{OwnershipRequest, OwnershipTransfer};
pub use pose_update::PoseUpdate;
pub use prop_creation::PropCreation;
pub use wire_message::WireMessage;
pub use zone_encounter::{ZoneEncounterEvent, ZoneEncounterEventType};
