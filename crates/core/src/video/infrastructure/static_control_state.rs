use crate::filtering::domain::control_snapshot::ControlSnapshot;
use crate::video::domain::control_state::ControlState;

/// Controls fixed for the whole run.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticControlState(pub ControlSnapshot);

impl ControlState for StaticControlState {
    fn get(&mut self) -> ControlSnapshot {
        self.0
    }
}
