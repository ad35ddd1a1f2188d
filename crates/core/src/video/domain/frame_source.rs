use crate::shared::frame::Frame;

/// Result of polling a frame source once.
#[derive(Debug)]
pub enum FramePoll {
    Ready(Frame),
    /// No frame yet; poll again right away.
    NotReady,
    /// The source is exhausted and will not produce more frames.
    Ended,
}

/// Supplies captured frames to the frame loop.
///
/// Polling never blocks waiting for the device; a source that has nothing
/// yet answers [`FramePoll::NotReady`].
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> FramePoll;

    /// Whether a delivered frame carries no pixels (e.g. a camera that is
    /// still negotiating its resolution).
    fn is_empty(&self, frame: &Frame) -> bool {
        frame.is_empty()
    }
}
