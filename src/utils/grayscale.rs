//! RGBA to luminance conversion for the symbol locator
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8

use rayon::prelude::*;

const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Rows at or above this pixel count are converted in parallel
const PARALLEL_MIN_PIXELS: usize = 640 * 480;

#[inline]
fn luma(px: &[u8]) -> u8 {
    let y = (COEF_R * px[0] as u32 + COEF_G * px[1] as u32 + COEF_B * px[2] as u32) >> 8;
    y.min(255) as u8
}

/// Convert RGBA to grayscale (alpha ignored)
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    if width * height >= PARALLEL_MIN_PIXELS {
        return rgba_to_grayscale_parallel(rgba, width, height);
    }
    rgba.chunks_exact(4)
        .take(width * height)
        .map(luma)
        .collect()
}

/// Convert RGBA to grayscale, one rayon task per row
pub fn rgba_to_grayscale_parallel(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let src = &rgba[y * width * 4..(y + 1) * width * 4];
        for (dst, px) in row.iter_mut().zip(src.chunks_exact(4)) {
            *dst = luma(px);
        }
    });

    gray
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_and_white() {
        let rgba = [0, 0, 0, 255, 255, 255, 255, 255];
        let gray = rgba_to_grayscale(&rgba, 2, 1);
        assert_eq!(gray[0], 0);
        assert!(gray[1] >= 253);
    }

    #[test]
    fn test_alpha_ignored() {
        let a = rgba_to_grayscale(&[10, 200, 30, 0], 1, 1);
        let b = rgba_to_grayscale(&[10, 200, 30, 255], 1, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let width = 37;
        let height = 11;
        let rgba: Vec<u8> = (0..width * height * 4).map(|i| (i * 7 % 256) as u8).collect();
        let seq: Vec<u8> = rgba.chunks_exact(4).map(luma).collect();
        assert_eq!(rgba_to_grayscale_parallel(&rgba, width, height), seq);
    }
}
