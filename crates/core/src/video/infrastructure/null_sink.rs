use crate::shared::frame::Frame;
use crate::video::domain::display_sink::DisplaySink;

/// Sink that drops frames, counting them.
#[derive(Debug, Default)]
pub struct NullSink {
    presented: usize,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl DisplaySink for NullSink {
    fn present(&mut self, frame: &Frame) {
        self.presented += 1;
        log::trace!("Dropped frame {}", frame.index());
    }
}
