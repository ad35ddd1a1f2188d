//! Square-neighbourhood operations on single-channel planes. Borders
//! replicate the edge sample.

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Median of each `aperture × aperture` neighbourhood.
pub fn median_blur(plane: &[u8], width: usize, height: usize, aperture: usize) -> Vec<u8> {
    debug_assert!(aperture % 2 == 1);
    let half = (aperture / 2) as isize;
    let mut out = vec![0u8; plane.len()];
    let mut window = Vec::with_capacity(aperture * aperture);

    for y in 0..height {
        for x in 0..width {
            window.clear();
            for dy in -half..=half {
                let sy = clamp_index(y as isize + dy, height);
                for dx in -half..=half {
                    let sx = clamp_index(x as isize + dx, width);
                    window.push(plane[sy * width + sx]);
                }
            }
            let mid = window.len() / 2;
            let (_, median, _) = window.select_nth_unstable(mid);
            out[y * width + x] = *median;
        }
    }
    out
}

/// Mean of each `block × block` neighbourhood, rounded to the nearest byte.
pub fn box_mean(plane: &[u8], width: usize, height: usize, block: usize) -> Vec<u8> {
    debug_assert!(block % 2 == 1);
    let half = (block / 2) as isize;
    let area = (block * block) as f64;

    // Horizontal window sums, then vertical sums of those.
    let mut row_sums = vec![0u32; plane.len()];
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0u32;
            for dx in -half..=half {
                sum += plane[y * width + clamp_index(x as isize + dx, width)] as u32;
            }
            row_sums[y * width + x] = sum;
        }
    }

    let mut out = vec![0u8; plane.len()];
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0u32;
            for dy in -half..=half {
                sum += row_sums[clamp_index(y as isize + dy, height) * width + x];
            }
            out[y * width + x] = (sum as f64 / area).round().min(255.0) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_removes_isolated_spike() {
        let mut plane = vec![10u8; 9 * 9];
        plane[4 * 9 + 4] = 250;
        let out = median_blur(&plane, 9, 9, 7);
        assert!(out.iter().all(|&v| v == 10));
    }

    #[test]
    fn test_median_preserves_step_edge() {
        // Left half 20, right half 200
        let width = 12;
        let plane: Vec<u8> = (0..width * 6)
            .map(|i| if i % width < 6 { 20 } else { 200 })
            .collect();
        let out = median_blur(&plane, width, 6, 7);
        assert_eq!(out, plane);
    }

    #[test]
    fn test_median_on_single_pixel() {
        assert_eq!(median_blur(&[42], 1, 1, 7), vec![42]);
    }

    #[test]
    fn test_box_mean_uniform() {
        let plane = vec![77u8; 5 * 4];
        assert!(box_mean(&plane, 5, 4, 9).iter().all(|&v| v == 77));
    }

    #[test]
    fn test_box_mean_with_replicated_border() {
        // 1x3 row [0, 90, 180], block 3: row sums use replicated edges,
        // vertical sums triple them.
        let out = box_mean(&[0, 90, 180], 3, 1, 3);
        // x=0: (0+0+90)*3/9 = 30, x=1: 270*3/9 = 90, x=2: (90+180+180)*3/9 = 150
        assert_eq!(out, vec![30, 90, 150]);
    }

    #[test]
    fn test_box_mean_rounds_to_nearest() {
        // Row sums 0, 1, 2; tripled and divided by 9: 0, 0.33, 0.67.
        let out = box_mean(&[0, 0, 1], 3, 1, 3);
        assert_eq!(out, vec![0, 0, 1]);
    }
}
