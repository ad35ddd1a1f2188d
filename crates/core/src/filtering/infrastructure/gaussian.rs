/// ROI rectangle within a frame, used to pass region coordinates without many arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoiRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl RoiRect {
    /// Copy the ROI out of interleaved frame data into `roi`.
    pub fn extract(&self, data: &[u8], frame_width: usize, channels: usize, roi: &mut Vec<u8>) {
        let row_len = self.w * channels;
        roi.clear();
        roi.reserve(row_len * self.h);
        for row in 0..self.h {
            let start = ((self.y + row) * frame_width + self.x) * channels;
            roi.extend_from_slice(&data[start..start + row_len]);
        }
    }

    /// Grow by `margin` pixels on every side, clipped to the frame.
    pub fn expanded(&self, margin: usize, frame_width: usize, frame_height: usize) -> RoiRect {
        let x = self.x.saturating_sub(margin);
        let y = self.y.saturating_sub(margin);
        let right = (self.x + self.w + margin).min(frame_width);
        let bottom = (self.y + self.h + margin).min(frame_height);
        RoiRect {
            x,
            y,
            w: right.saturating_sub(x),
            h: bottom.saturating_sub(y),
        }
    }

    /// Write the part of `window_data` covered by this ROI back into the
    /// frame. `window_data` holds the pixels of `window`, which must contain
    /// this ROI.
    pub fn write_back_from(
        &self,
        window: &RoiRect,
        window_data: &[u8],
        data: &mut [u8],
        frame_width: usize,
        channels: usize,
    ) {
        debug_assert!(self.x >= window.x && self.y >= window.y);
        let row_len = self.w * channels;
        let dx = self.x - window.x;
        let dy = self.y - window.y;
        for row in 0..self.h {
            let src = ((dy + row) * window.w + dx) * channels;
            let dst = ((self.y + row) * frame_width + self.x) * channels;
            data[dst..dst + row_len].copy_from_slice(&window_data[src..src + row_len]);
        }
    }
}

/// Fixed binomial kernels for apertures up to 7 when sigma is not given.
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
    ],
];

/// Sigma derived from the aperture when the caller does not specify one.
pub fn auto_sigma(kernel_size: usize) -> f64 {
    0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Precompute a normalized 1D Gaussian kernel.
///
/// `kernel_size` must be odd and >= 1. A missing or non-positive sigma is
/// derived from the size; sizes up to 7 then use the fixed binomial taps.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: Option<f64>) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    let sigma = match sigma {
        Some(s) if s > 0.0 => s,
        _ if kernel_size <= 7 => return SMALL_KERNELS[kernel_size / 2].to_vec(),
        _ => auto_sigma(kernel_size),
    };
    let half = (kernel_size / 2) as f64;
    let mut kernel_f64: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel_f64.iter().sum();
    for v in &mut kernel_f64 {
        *v /= sum;
    }
    kernel_f64.iter().map(|&v| v as f32).collect()
}

/// Mirror an out-of-range index back into `0..len` without repeating the
/// edge sample (`gfedcb|abcdefgh|gfedcba`).
fn reflect_101(mut i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    loop {
        if i < 0 {
            i = -i;
        } else if i > last {
            i = 2 * last - i;
        } else {
            return i as usize;
        }
    }
}

/// Source index for every tap position of a padded axis.
fn tap_indices(len: usize, half: usize) -> Vec<usize> {
    (0..len + 2 * half)
        .map(|p| reflect_101(p as isize - half as isize, len))
        .collect()
}

/// Apply a separable Gaussian blur in place, reusing `temp` for the
/// horizontal pass. Borders are reflected (reflect-101).
pub fn separable_gaussian_blur(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
) {
    let kernel_size = kernel.len();
    if kernel_size <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = kernel_size / 2;
    let xs = tap_indices(width, half);
    let ys = tap_indices(height, half);

    temp.clear();
    temp.resize(width * height * channels, 0.0);

    // Horizontal pass: data → temp
    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    sum += data[(row + xs[x + k]) * channels + c] as f32 * w;
                }
                temp[(row + x) * channels + c] = sum;
            }
        }
    }

    // Vertical pass: temp → data
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    sum += temp[(ys[y + k] * width + x) * channels + c] * w;
                }
                data[(y * width + x) * channels + c] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
