//! Rasterization and pixel output.
//!
//! - [`rasterize`] turns one triangle into a bit-packed [`RasterBuffer`]
//! - [`draw_occupancy`] decodes a buffer into any [`PixelSink`]
//! - [`draw_mesh`] / [`draw_mesh_with`] cull a mesh and paint it back to front

mod framebuffer;
mod image_sink;
mod raster;
mod sink;

pub use framebuffer::FrameBuffer;
pub use image_sink::{argb_to_rgba, ImageSink};
pub use raster::{rasterize, RasterBuffer, MAX_BOX_SIZE};
pub use sink::{draw_mesh, draw_mesh_with, draw_occupancy, PixelSink};
