use crate::{events::PatchFlag, messages::GripEventType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// The hand that triggered a grip callback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GripHand {
    pub handedness: Handedness,
    /// Belongs to the local player rather than a remote player's rig
    pub is_local: bool,
}

/// Hands on the grip as seen before the callback runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GripState {
    pub left_attached: bool,
    pub right_attached: bool,
    pub do_not_retrigger_on_multi_grip: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandInput {
    pub trigger_down: bool,
    pub menu_tap: bool,
}

/// Decides which local grip callbacks become network events. Nothing is sent
/// without a server, for remote hands, or while a remote event is being
/// applied.
pub struct GripEventSender {
    patches: PatchFlag,
}

impl GripEventSender {
    pub fn new(patches: PatchFlag) -> Self {
        Self { patches }
    }

    fn can_send(&self, has_server: bool, hand: &GripHand) -> bool {
        has_server && hand.is_local && !self.patches.is_set()
    }

    pub fn on_attached(&self, has_server: bool, state: &GripState, hand: &GripHand) -> Option<GripEventType> {
        if !self.can_send(has_server, hand) {
            return None;
        }
        if state.do_not_retrigger_on_multi_grip && (state.left_attached || state.right_attached) {
            return None;
        }
        Some(GripEventType::Attach)
    }

    /// With retriggering disabled a release is swallowed only when the left
    /// hand lets go while the right hand still holds on. The left hand's own
    /// state is never consulted.
    pub fn on_detached(&self, has_server: bool, state: &GripState, hand: &GripHand) -> Option<GripEventType> {
        if !self.can_send(has_server, hand) {
            return None;
        }
        if state.do_not_retrigger_on_multi_grip
            && hand.handedness == Handedness::Left
            && state.right_attached
        {
            return None;
        }
        Some(GripEventType::Detach)
    }

    pub fn on_attached_update(&self, has_server: bool, hand: &GripHand, input: &HandInput) -> Vec<GripEventType> {
        let mut output = Vec::new();
        if !self.can_send(has_server, hand) {
            return output;
        }
        if input.trigger_down {
            output.push(GripEventType::TriggerDown);
        }
        if input.menu_tap {
            output.push(GripEventType::MenuTap);
        }
        output
    }
}
