use thiserror::Error;

/// Why a filter could not produce its output for one frame.
///
/// Never fatal: the frame loop substitutes a copy of the input.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("face detection failed: {0}")]
    Detection(String),
    #[error("filter output is {got_width}x{got_height}, expected {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        got_width: u32,
        got_height: u32,
    },
    #[error("filter panicked: {0}")]
    Panicked(String),
}

impl FilterError {
    pub fn detection(err: impl std::fmt::Display) -> Self {
        FilterError::Detection(err.to_string())
    }
}
