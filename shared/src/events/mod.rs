mod dispatcher;
mod error;
mod grip_sender;
mod handler;
mod patch_flag;

pub use dispatcher::{DispatchOutcome, EntityEventDispatcher};
pub use error::DispatchError;
pub use grip_sender::{GripEventSender, GripHand, GripState, Handedness, HandInput};
pub use handler::{GripEventHandler, ZoneEncounterHandler};
pub use patch_flag::{PatchFlag, PatchGuard};
