pub mod blob;
pub mod fs_model_store;
pub mod http_model_store;
pub mod model_descriptor;
pub mod model_loader;
pub mod onnx_ssd_network;
pub mod ssd_face_detector;
