pub mod cartoon;
pub mod color;
pub mod colormap;
pub mod face_blur;
pub mod filter_engine;
mod gaussian;
pub mod grayscale;
mod neighborhood;
pub mod noise;
pub mod posterize;
