//! PNG rendering of a trained lattice.
//!
//! Each cell becomes a `scale x scale` block. Image rows follow `x` and image
//! columns follow `y`, so the picture matches the weights read as a
//! `width x height` table.

use crate::error::{Result, SomError};
use crate::som::{find_bmu, GridCoord, Lattice};
use image::{ImageBuffer, Rgb};
use log::info;
use std::collections::HashSet;
use std::path::Path;

/// Rendering options.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pixels per cell along each axis.
    pub scale: u32,
    /// Outline the BMU of every sample passed to [`save_lattice_png`].
    pub show_bmu: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 16,
            show_bmu: false,
        }
    }
}

/// Maps a component to a byte, clamping to `[0, 1]` first.
#[inline]
fn to_channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pixel length of `cells` cells at `scale` pixels each.
fn scaled_side(cells: usize, scale: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(scale))
        .ok_or_else(|| {
            SomError::Render(format!(
                "image side of {} cells at scale {} does not fit in u32",
                cells, scale
            ))
        })
}

/// Renders the lattice. Cells listed in `marked` get a white outline.
///
/// Supports 3-dimensional prototypes (RGB) and 1-dimensional ones (gray).
pub fn lattice_to_image(
    lattice: &Lattice,
    options: &RenderOptions,
    marked: &[GridCoord],
) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>> {
    let (width, height, input_dim) = lattice.shape();
    if input_dim != 1 && input_dim != 3 {
        return Err(SomError::Render(format!(
            "can only render 1- or 3-dimensional prototypes, got {}",
            input_dim
        )));
    }
    if options.scale == 0 {
        return Err(SomError::Render("scale must be positive".to_string()));
    }

    let scale = options.scale;
    let img_width = scaled_side(height, scale)?;
    let img_height = scaled_side(width, scale)?;
    let marked: HashSet<GridCoord> = marked.iter().copied().collect();

    let img = ImageBuffer::from_fn(img_width, img_height, |col, row| {
        let x = (row / scale) as usize;
        let y = (col / scale) as usize;

        let on_border = row % scale == 0
            || col % scale == 0
            || row % scale == scale - 1
            || col % scale == scale - 1;
        if on_border && marked.contains(&GridCoord::new(x, y)) {
            return Rgb([255u8, 255u8, 255u8]);
        }

        let offset = lattice.cell_index(x, y) * input_dim;
        let p = &lattice.weights()[offset..offset + input_dim];
        if input_dim == 3 {
            Rgb([to_channel(p[0]), to_channel(p[1]), to_channel(p[2])])
        } else {
            let g = to_channel(p[0]);
            Rgb([g, g, g])
        }
    });

    Ok(img)
}

/// Writes the lattice as a PNG, creating parent directories as needed.
///
/// When `options.show_bmu` is set, the BMU of every sample is outlined.
pub fn save_lattice_png<V: AsRef<[f64]>>(
    lattice: &Lattice,
    path: &Path,
    options: &RenderOptions,
    samples: Option<&[V]>,
) -> Result<()> {
    let mut marked = Vec::new();
    if options.show_bmu {
        if let Some(samples) = samples {
            for sample in samples {
                marked.push(find_bmu(lattice, sample.as_ref())?);
            }
        }
    }

    let img = lattice_to_image(lattice, options, &marked)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    img.save(path)?;

    info!("Saved lattice image to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_lattice() -> Lattice {
        // 2x3 lattice; cell (1, 2) is pure red, everything else black.
        let mut weights = vec![0.0; 2 * 3 * 3];
        weights[5 * 3] = 1.0;
        Lattice::from_weights(2, 3, 3, weights, 0.1, None).unwrap()
    }

    #[test]
    fn test_image_dimensions_and_orientation() {
        let options = RenderOptions {
            scale: 4,
            show_bmu: false,
        };
        let img = lattice_to_image(&rgb_lattice(), &options, &[]).unwrap();

        // Columns follow height, rows follow width.
        assert_eq!(img.width(), 12);
        assert_eq!(img.height(), 8);
        assert_eq!(img.get_pixel(2 * 4 + 1, 4 + 1), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_marked_cell_outline() {
        let options = RenderOptions {
            scale: 4,
            show_bmu: true,
        };
        let img = lattice_to_image(&rgb_lattice(), &options, &[GridCoord::new(0, 0)]).unwrap();
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_values_are_clamped() {
        assert_eq!(to_channel(-0.5), 0);
        assert_eq!(to_channel(1.7), 255);
        assert_eq!(to_channel(0.5), 128);
    }

    #[test]
    fn test_unsupported_dimension() {
        let lattice = Lattice::from_weights(2, 2, 2, vec![0.0; 8], 0.1, None).unwrap();
        assert!(matches!(
            lattice_to_image(&lattice, &RenderOptions::default(), &[]),
            Err(SomError::Render(_))
        ));
    }

    #[test]
    fn test_oversized_image_is_rejected() {
        let options = RenderOptions {
            scale: u32::MAX,
            show_bmu: false,
        };
        assert!(matches!(
            lattice_to_image(&rgb_lattice(), &options, &[]),
            Err(SomError::Render(_))
        ));

        assert!(scaled_side(3, 4).is_ok());
        assert!(scaled_side(3, u32::MAX).is_err());
        assert_eq!(scaled_side(1, u32::MAX).unwrap(), u32::MAX);
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lattice.png");
        let samples = vec![vec![1.0, 0.0, 0.0]];
        let options = RenderOptions {
            scale: 2,
            show_bmu: true,
        };

        save_lattice_png(&rgb_lattice(), &path, &options, Some(samples.as_slice())).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!(loaded.width(), 6);
        assert_eq!(loaded.height(), 4);
    }
}
