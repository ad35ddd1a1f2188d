use thiserror::Error;

use crate::shared::region::Region;

/// Values per SSD output record: `[batch, class, confidence, x1, y1, x2, y2]`.
pub const RECORD_LEN: usize = 7;

/// One candidate face with its box in normalized `[0, 1]` coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub confidence: f32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("detection output has {0} values, not a whole number of 7-value records")]
pub struct MalformedDetections(pub usize);

impl Detection {
    /// Splits a flat SSD output tensor into detections, preserving order.
    pub fn parse_records(raw: &[f32]) -> Result<Vec<Detection>, MalformedDetections> {
        if raw.len() % RECORD_LEN != 0 {
            return Err(MalformedDetections(raw.len()));
        }
        Ok(raw
            .chunks_exact(RECORD_LEN)
            .map(|r| Detection {
                confidence: r[2],
                x1: r[3],
                y1: r[4],
                x2: r[5],
                y2: r[6],
            })
            .collect())
    }

    /// Pixel box on a `frame_width × frame_height` frame, clamped to it.
    ///
    /// Width and height scale independently, since the network input is
    /// square while frames usually are not. Coordinates truncate toward zero.
    pub fn to_region(&self, frame_width: u32, frame_height: u32) -> Option<Region> {
        let fw = frame_width as f32;
        let fh = frame_height as f32;
        let x1 = self.x1 * fw;
        let y1 = self.y1 * fh;
        let x2 = self.x2 * fw;
        let y2 = self.y2 * fh;
        Region::new(x1 as i32, y1 as i32, (x2 - x1) as i32, (y2 - y1) as i32)
            .clamp_to(frame_width, frame_height)
    }
}
