use crate::shared::frame::Frame;

use super::control_snapshot::ControlSnapshot;
use super::filter_error::FilterError;

/// Domain interface for turning one input frame into one output frame.
///
/// The output must have the input's dimensions. Implementations may keep
/// state between frames (random generators, detector handles), hence
/// `&mut self`.
pub trait FrameFilter: Send {
    fn apply(&mut self, frame: &Frame, controls: &ControlSnapshot) -> Result<Frame, FilterError>;
}
