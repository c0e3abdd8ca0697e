//! Raster I/O for Smolder grids.
//!
//! The boundary between the solver and the outside world: [`decode`] turns
//! a raster image into a populated [`Grid`](smolder_core::Grid) (one cell
//! per pixel, heat from the red channel, temperature from the green,
//! conduction from the blue scaled into `[0, 1)`), and [`encode`] maps the
//! final temperatures through a color gradient and writes them back out.
//! Both are stateless transforms; all coordination lives in
//! `smolder-engine`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod codec;
mod error;
mod gradient;

pub use codec::{decode, encode, grid_from_image, image_from_grid};
pub use error::RasterError;
pub use gradient::gradient;
