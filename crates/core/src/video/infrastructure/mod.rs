pub mod image_file_sink;
pub mod image_sequence_source;
pub mod json_control_state;
pub mod null_sink;
pub mod stalled_source;
pub mod static_control_state;
