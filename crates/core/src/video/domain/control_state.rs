use crate::filtering::domain::control_snapshot::ControlSnapshot;

/// Operator control surface, sampled once per frame.
pub trait ControlState: Send {
    fn get(&mut self) -> ControlSnapshot;
}
