/// Target cadence of the frame loop.
pub const DEFAULT_FPS: u32 = 15;

/// Default file names looked up in the model store.
pub const DESCRIPTOR_FILE_NAME: &str = "face_detector.json";
pub const WEIGHTS_FILE_NAME: &str = "face_detector.onnx";

/// Directory name used under the platform cache/config directories.
pub const APP_DIR_NAME: &str = "fxcam";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Baseline-left anchor of the on-screen filter label.
pub const LABEL_ORIGIN: (i32, i32) = (10, 30);
