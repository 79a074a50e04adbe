use crate::{
    events::DispatchError,
    messages::{GripEventType, ZoneEncounterEventType},
    types::{ObjectHandle, PeerId},
};

/// Applies remote grip events to the local copy of a grip
pub trait GripEventHandler {
    fn on_grip_event(
        &mut self,
        grip: ObjectHandle,
        player: PeerId,
        event_type: GripEventType,
    ) -> Result<(), DispatchError>;
}

/// Applies remote zone encounter changes
pub trait ZoneEncounterHandler {
    fn on_zone_encounter(
        &mut self,
        zone: ObjectHandle,
        event_type: ZoneEncounterEventType,
    ) -> Result<(), DispatchError>;
}
