//! PNG decode into a grid and gradient encode back out.

use std::path::Path;

use image::RgbImage;

use smolder_core::{Cell, Grid};

use crate::error::RasterError;
use crate::gradient::gradient;

/// Build a grid from an RGB image, one cell per pixel.
///
/// Channel mapping: `heat` is the red channel, `temperature` the green
/// channel (conventionally a constant ambient level in prepared inputs),
/// and `conduction` the blue channel divided by 256, normalizing it into
/// `[0, 1)` so even a fully saturated pixel never reaches a conduction of
/// one.
pub fn grid_from_image(img: &RgbImage) -> Option<Grid> {
    let (width, height) = img.dimensions();
    let cells: Vec<Cell> = img
        .pixels()
        .map(|p| Cell::new(f32::from(p[0]), f32::from(p[1]), f32::from(p[2]) / 256.0))
        .collect();
    Grid::from_cells(width as usize, height as usize, cells).ok()
}

/// Render a grid's temperatures as an RGB image.
///
/// Each temperature is normalized against the grid's min/max range and
/// mapped through [`gradient`]. A uniform grid (min == max) renders as the
/// cold end of the ramp rather than dividing by zero.
pub fn image_from_grid(grid: &Grid) -> RgbImage {
    let (t_min, t_max) = grid.temperature_range();
    let span = t_max - t_min;

    RgbImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        let temp = grid.cell(y as usize, x as usize).temperature;
        let t = if span > 0.0 { (temp - t_min) / span } else { 0.0 };
        image::Rgb(gradient(t))
    })
}

/// Read a raster image and decode it into a grid.
///
/// Any format the `image` crate recognizes is accepted; the pixels are
/// converted to RGB8 before the channel mapping, mirroring what the
/// simplified libpng read path does for the reference inputs.
///
/// # Errors
///
/// [`RasterError::Open`] if the file cannot be read or parsed, or
/// [`RasterError::EmptyImage`] for a zero-pixel image.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<Grid, RasterError> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|source| RasterError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    grid_from_image(&img).ok_or_else(|| RasterError::EmptyImage {
        path: path.to_path_buf(),
    })
}

/// Render a grid's temperatures and write them as a PNG (or whatever
/// format the output extension names).
///
/// # Errors
///
/// [`RasterError::Save`] if encoding or writing fails. The grid itself is
/// untouched either way.
pub fn encode<P: AsRef<Path>>(path: P, grid: &Grid) -> Result<(), RasterError> {
    let path = path.as_ref();
    image_from_grid(grid)
        .save(path)
        .map_err(|source| RasterError::Save {
            path: path.to_path_buf(),
            source,
        })
}
