use crate::shared::frame::Frame;

/// Shows processed frames. Presenting must not fail the loop; adapters log
/// their own I/O problems.
pub trait DisplaySink: Send {
    fn present(&mut self, frame: &Frame);
}
