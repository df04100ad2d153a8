//! Bit-packed triangle rasterization with depth-ordered occlusion culling.
//!
//! Triangles live in a [`Mesh`]. [`Mesh::cull_triangles`] drops every
//! triangle whose three vertices all lie inside a nearer one (see
//! [`Triangle::covers`]). [`rasterize`] turns the survivors into bit-packed
//! occupancy masks over their bounding boxes, which a [`PixelSink`] paints
//! back to front.
//!
//! # Quick Start
//!
//! ```ignore
//! use trimask::prelude::*;
//!
//! let mut mesh = Mesh::cube();
//! mesh.rotate("xy", &[30.0, 45.0]);
//! mesh.translate(Vec4::direction(0.0, 0.0, -5.0));
//!
//! let projection = Projection::default();
//! let mut screen: Mesh = mesh
//!     .triangles()
//!     .iter()
//!     .map(|t| projection.project_triangle(t, 320, 240))
//!     .collect();
//!
//! let mut frame = FrameBuffer::new(320, 240, colors::BACKGROUND);
//! draw_mesh(&mut screen, &mut frame, colors::FILL);
//! ```

pub mod colors;
pub mod config;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod triangle;
#[cfg(feature = "window")]
pub mod window;

pub use config::{ConfigError, RenderConfig};
pub use math::mat4::Mat4;
pub use math::vec4::Vec4;
pub use math::{Axis, MathError};
pub use mesh::{LoadError, Mesh};
pub use projection::Projection;
pub use render::{
    draw_mesh, draw_mesh_with, draw_occupancy, rasterize, FrameBuffer, ImageSink, PixelSink,
    RasterBuffer,
};
pub use triangle::{point_in_triangle, Rect, Triangle};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use trimask::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colors;
    pub use crate::config::RenderConfig;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec4::Vec4;
    pub use crate::math::Axis;

    // Geometry
    pub use crate::mesh::Mesh;
    pub use crate::projection::Projection;
    pub use crate::triangle::{Rect, Triangle};

    // Rendering
    pub use crate::render::{
        draw_mesh, draw_mesh_with, rasterize, FrameBuffer, ImageSink, PixelSink, RasterBuffer,
    };

    // Window
    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::math::vec4::Vec4;
    pub use crate::mesh::Mesh;
    pub use crate::render::{draw_mesh, rasterize, FrameBuffer, RasterBuffer};
    pub use crate::triangle::Triangle;
}
