use crate::video::domain::frame_source::{FramePoll, FrameSource};

/// Source standing in for a capture device that could not be opened: it
/// never delivers a frame.
#[derive(Debug, Default)]
pub struct StalledSource;

impl FrameSource for StalledSource {
    fn next_frame(&mut self) -> FramePoll {
        FramePoll::NotReady
    }
}
