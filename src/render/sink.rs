//! Decoding occupancy masks into a drawing surface.
//!
//! The surface is anything implementing [`PixelSink`]; the core only ever
//! writes pixels, it never reads them back.

use super::raster::{rasterize, RasterBuffer};
use crate::mesh::Mesh;
use crate::triangle::Triangle;

/// A bounded 2D surface that accepts pixel writes.
pub trait PixelSink {
    type Color: Copy;

    /// Write one pixel. Out-of-bounds coordinates are the sink's concern.
    fn set_pixel(&mut self, x: i32, y: i32, color: Self::Color);

    /// Fill the whole surface.
    fn clear(&mut self, color: Self::Color);
}

/// Paints every occupied pixel of `raster` with `color`.
///
/// Walks the bounding box in raster order (x outer, y inner) with a bit
/// cursor starting at the MSB of byte 0.
pub fn draw_occupancy<S: PixelSink>(raster: &RasterBuffer, sink: &mut S, color: S::Color) {
    let bound = raster.bound();
    let bytes = raster.bytes();

    let mut index = 0;
    let mut bit: u32 = 7;

    for (x, y) in bound.pixels().take(raster.box_size()) {
        if bytes[index] & (1 << bit) != 0 {
            sink.set_pixel(x, y, color);
        }

        if bit == 0 {
            bit = 7;
            index += 1;
        } else {
            bit -= 1;
        }
    }
}

/// Painter's algorithm over the culled mesh in a single color.
pub fn draw_mesh<S: PixelSink>(mesh: &mut Mesh, sink: &mut S, color: S::Color) {
    draw_mesh_with(mesh, sink, |_| color);
}

/// Painter's algorithm over the culled mesh, coloring each visible triangle
/// with `shade`.
///
/// Visible triangles are rasterized nearest first, then drawn furthest
/// first so nearer ones overwrite farther ones.
pub fn draw_mesh_with<S, F>(mesh: &mut Mesh, sink: &mut S, mut shade: F)
where
    S: PixelSink,
    F: FnMut(&Triangle) -> S::Color,
{
    let rasters: Vec<(Triangle, RasterBuffer)> = mesh
        .cull_triangles()
        .into_iter()
        .map(|triangle| {
            let raster = rasterize(&triangle);
            (triangle, raster)
        })
        .collect();

    log::trace!("drawing {} triangles back to front", rasters.len());

    for (triangle, raster) in rasters.iter().rev() {
        draw_occupancy(raster, sink, shade(triangle));
    }
}
