//! Owned ARGB8888 color buffer.
//!
//! The buffer the demo window presents each frame. Pixel writes are
//! bounds-checked and silently dropped when off-screen, so projected
//! geometry can extend past the edges.

use super::sink::PixelSink;

pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, background: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![background; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32, background: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![background; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.color_buffer[i])
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Native-endian bytes of the color buffer, for streaming textures.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and u8 has alignment 1; the slice covers
        // exactly the initialised buffer.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }
}

impl PixelSink for FrameBuffer {
    type Color = u32;

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.color_buffer[i] = color;
        }
    }

    fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }
}
