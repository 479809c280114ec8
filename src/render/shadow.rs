// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Soft drop shadows.

use tiny_skia::Pixmap;

/// Separable gaussian blur of a premultiplied pixmap, in place. Samples
/// past the edge are treated as transparent so shadows fade out at borders.
pub fn gaussian_blur(pixmap: &mut Pixmap, radius: u32) {
    if radius == 0 {
        return;
    }
    let kernel = kernel(radius);
    let (width, height) = (pixmap.width() as usize, pixmap.height() as usize);

    let src = pixmap.data().to_vec();
    let mut tmp = vec![0u8; src.len()];
    blur_pass(&src, &mut tmp, width, height, &kernel, true);
    blur_pass(&tmp, pixmap.data_mut(), width, height, &kernel, false);
}

/// Normalized weights with sigma = radius / 2.
fn kernel(radius: u32) -> Vec<f32> {
    let sigma = radius as f32 / 2.0;
    let r = radius as i32;
    let mut weights: Vec<f32> = (-r..=r)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

fn blur_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, kernel: &[f32], horizontal: bool) {
    let radius = (kernel.len() / 2) as isize;
    let (w, h) = (width as isize, height as isize);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let offset = k as isize - radius;
                let (sx, sy) = if horizontal { (x + offset, y) } else { (x, y + offset) };
                if sx < 0 || sy < 0 || sx >= w || sy >= h {
                    continue;
                }
                let idx = (sy * w + sx) as usize * 4;
                for c in 0..4 {
                    acc[c] += weight * src[idx + c] as f32;
                }
            }
            let out = (y * w + x) as usize * 4;
            for c in 0..4 {
                dst[out + c] = acc[c].round().clamp(0.0, 255.0) as u8;
            }
            // Rounding must not leave a color channel above alpha.
            let alpha = dst[out + 3];
            for c in 0..3 {
                dst[out + c] = dst[out + c].min(alpha);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        let k = kernel(4);
        assert_eq!(k.len(), 9);
        assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert!((k[0] - k[8]).abs() < 1e-7);
        assert!(k[4] > k[3]);
    }

    #[test]
    fn test_zero_radius_is_noop() {
        let mut pixmap = Pixmap::new(3, 3).unwrap();
        pixmap.fill(Color::BLACK);
        let before = pixmap.data().to_vec();
        gaussian_blur(&mut pixmap, 0);
        assert_eq!(pixmap.data(), before.as_slice());
    }

    #[test]
    fn test_single_pixel_spreads() {
        let mut pixmap = Pixmap::new(9, 9).unwrap();
        pixmap.data_mut()[(4 * 9 + 4) * 4 + 3] = 255;

        gaussian_blur(&mut pixmap, 2);

        let alpha = |x: u32, y: u32| pixmap.pixel(x, y).unwrap().alpha();
        assert!(alpha(4, 4) < 255);
        assert!(alpha(5, 4) > 0);
        assert!(alpha(4, 6) > 0);
        assert_eq!(alpha(0, 0), 0);
        assert!(alpha(4, 4) >= alpha(5, 5));
    }
}
