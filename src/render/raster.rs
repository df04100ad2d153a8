//! Bit-packed triangle occupancy over a bounding box.
//!
//! # Layout
//!
//! Pixels are visited column-major: x in the outer loop, y in the inner loop,
//! both half-open over the triangle's [`Rect`]. Pixel `k` in that order is bit
//! `7 - k % 8` of byte `k / 8`, so the first pixel of every byte lands in the
//! most significant bit.
//!
//! ```text
//!  x=0       x=1       ...
//!  y0 y1 y2  y0 y1 y2
//! [b7 b6 b5  b4 b3 b2  b1 b0] [b7 ...
//! ```
//!
//! A trailing partial byte is shifted up to the same alignment, leaving its
//! unused low bits zero. Decoding must walk pixels in the same order or the
//! image comes back transposed.

use crate::triangle::{Rect, Triangle};

/// Largest bounding box, in pixels, that [`rasterize`] will scan (8 MiB of
/// mask). Bigger boxes come from vertices projected next to the camera
/// plane and produce an empty buffer.
pub const MAX_BOX_SIZE: usize = 1 << 26;

/// Occupancy mask of one triangle over its bounding box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    bytes: Vec<u8>,
    box_size: usize,
    bound: Rect,
}

impl RasterBuffer {
    /// Packed bits, MSB first.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes holding the mask, `ceil(box_size / 8)`.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Number of meaningful bits: the pixels in the bounding box, or 0 when
    /// the box was too large to scan.
    pub fn box_size(&self) -> usize {
        self.box_size
    }

    pub fn bound(&self) -> Rect {
        self.bound
    }

    /// Whether pixel `k` (in traversal order) is inside the triangle.
    pub fn is_set(&self, k: usize) -> bool {
        k < self.box_size && self.bytes[k / 8] & (0x80 >> (k % 8)) != 0
    }

    /// Number of occupied pixels.
    pub fn filled_count(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Occupied pixel coordinates in traversal order.
    pub fn iter_filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.bound
            .pixels()
            .take(self.box_size)
            .enumerate()
            .filter(move |&(k, _)| self.is_set(k))
            .map(|(_, pixel)| pixel)
    }
}

/// Evaluates [`Triangle::contains_point`] for every pixel of the triangle's
/// bounding box and packs the results.
///
/// A box with zero width or height yields an empty buffer, and so does one
/// larger than [`MAX_BOX_SIZE`]; its `bound` is kept but `box_size` is 0.
pub fn rasterize(triangle: &Triangle) -> RasterBuffer {
    let bound = triangle.bounding_rect();
    let area = bound.area();
    if area > MAX_BOX_SIZE {
        log::warn!(
            "skipping {}x{} bounding box, larger than {MAX_BOX_SIZE} pixels",
            bound.width(),
            bound.height()
        );
        return RasterBuffer {
            bytes: Vec::new(),
            box_size: 0,
            bound,
        };
    }

    let box_size = area;
    let mut bytes = vec![0u8; box_size.div_ceil(8)];

    let mut index = 0;
    let mut bit = 0;

    for (x, y) in bound.pixels() {
        let mut byte = bytes[index] << 1;
        if triangle.contains_point(x as f32, y as f32) {
            byte |= 1;
        }
        bytes[index] = byte;

        bit += 1;
        if bit == 8 {
            bit = 0;
            index += 1;
        }
    }

    // MSB-align the trailing partial byte.
    if bit != 0 {
        bytes[index] <<= 8 - bit;
    }

    RasterBuffer {
        bytes,
        box_size,
        bound,
    }
}
