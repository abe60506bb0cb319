//! Helpers shared by the CLI, tests and benches: image loading, outline
//! drawing and synthetic symbol rendering.

/// Synthetic symbols with known format information
pub mod synthetic;

use crate::config;
use crate::error::{InspectError, Result};
use crate::models::{CornerSet, Point};
use image::GenericImageView;
use std::fs;
use std::path::{Path, PathBuf};

/// Load an image as RGBA bytes along with its dimensions.
///
/// Images larger than `QR_MAX_DIM` on their longest side are downscaled.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize)> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| InspectError::ImageIo {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = match config::max_dim() {
        Some(max_dim) if img.width().max(img.height()) > max_dim => {
            let (w, h) = img.dimensions();
            log::debug!("downscaling {} from {w}x{h} to fit {max_dim}", path.display());
            img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
                .to_rgba8()
        }
        _ => img.to_rgba8(),
    };
    let (width, height) = rgba.dimensions();
    Ok((rgba.into_raw(), width as usize, height as usize))
}

/// Write RGBA bytes to an image file; format follows the extension
pub fn save_rgba<P: AsRef<Path>>(path: P, rgba: &[u8], width: usize, height: usize) -> Result<()> {
    let path = path.as_ref();
    image::save_buffer(
        path,
        rgba,
        width as u32,
        height as u32,
        image::ColorType::Rgba8,
    )
    .map_err(|source| InspectError::ImageIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Image files directly inside `dir`, sorted by name
pub fn list_images<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut images: Vec<PathBuf> = match fs::read_dir(dir.as_ref()) {
        Ok(entries) => entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_image_path(path))
            .collect(),
        Err(err) => {
            log::warn!("cannot read {}: {err}", dir.as_ref().display());
            Vec::new()
        }
    };
    images.sort();
    images
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp"))
}

/// Draw the closed outline TL-TR-BR-BL-TL into an RGBA buffer
pub fn draw_outline(
    rgba: &mut [u8],
    width: usize,
    height: usize,
    corners: &CornerSet,
    color: [u8; 4],
    thickness: usize,
) {
    let pts = corners.as_array();
    for i in 0..4 {
        draw_line(rgba, width, height, pts[i], pts[(i + 1) % 4], color, thickness);
    }
}

fn draw_line(
    rgba: &mut [u8],
    width: usize,
    height: usize,
    from: Point,
    to: Point,
    color: [u8; 4],
    thickness: usize,
) {
    let steps = from.distance(&to).ceil().max(1.0) as usize;
    let half = (thickness / 2) as i64;
    for s in 0..=steps {
        let t = s as f32 / steps as f32;
        let cx = (from.x + (to.x - from.x) * t).round() as i64;
        let cy = (from.y + (to.y - from.y) * t).round() as i64;
        for dy in -half..=half {
            for dx in -half..=half {
                let (x, y) = (cx + dx, cy + dy);
                if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                    continue;
                }
                let offset = (y as usize * width + x as usize) * 4;
                rgba[offset..offset + 4].copy_from_slice(&color);
            }
        }
    }
}
