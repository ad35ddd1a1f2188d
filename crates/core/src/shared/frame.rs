use image::{ImageBuffer, RgbaImage};

/// Number of interleaved channels in every frame (RGBA).
pub const CHANNELS: usize = 4;

/// A single video frame: contiguous RGBA bytes in row-major order.
///
/// Frames are owned by one loop iteration at a time; filters read the
/// input by reference and hand back a freshly allocated output.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 4"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// Opaque black frame.
    pub fn blank(width: u32, height: u32, index: usize) -> Self {
        let mut data = vec![0u8; (width as usize) * (height as usize) * CHANNELS];
        for px in data.chunks_exact_mut(CHANNELS) {
            px[3] = 255;
        }
        Self::new(data, width, height, index)
    }

    /// Frame filled with a single RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4], index: usize) -> Self {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * CHANNELS)
            .collect();
        Self::new(data, width, height, index)
    }

    pub fn from_rgba_image(image: RgbaImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// True when the frame covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn same_size(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y as usize) * (self.width as usize) + x as usize) * CHANNELS;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        px
    }

    /// Hands the pixel buffer to `image` for drawing primitives.
    pub fn into_rgba_image(self) -> RgbaImage {
        // Length is checked on construction.
        ImageBuffer::from_raw(self.width, self.height, self.data)
            .unwrap_or_else(|| RgbaImage::new(0, 0))
    }
}
