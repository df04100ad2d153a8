//! Perspective projection parameters.
//!
//! The [`Projection`] struct holds near/far planes and the field of view and
//! maps view-space triangles onto screen pixels. There is no clipping: points
//! behind the camera project to nonsense and are the caller's problem.

use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;
use crate::triangle::Triangle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Field of view in degrees.
    fov_degrees: f32,
    /// Near clipping plane distance.
    near: f32,
    /// Far clipping plane distance.
    far: f32,
}

impl Projection {
    /// # Arguments
    /// * `near` - Near plane distance
    /// * `far` - Far plane distance, must differ from `near`
    /// * `fov_degrees` - Field of view in degrees
    pub fn new(near: f32, far: f32, fov_degrees: f32) -> Self {
        Self {
            fov_degrees,
            near,
            far,
        }
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::projection(self.near, self.far, self.fov_degrees)
    }

    /// Projects a view-space point (camera looking down -z) to screen space.
    ///
    /// The projection matrix is laid out for row vectors, so the point is
    /// multiplied against its transpose. After the divide by w, x/y are
    /// mapped to pixels (y down, scaled by `height` on both axes to keep the
    /// aspect) and z carries w, the distance in front of the camera, so
    /// smaller depth means nearer.
    pub fn project_point(&self, point: Vec4, width: u32, height: u32) -> Vec4 {
        let clip = self.matrix().transpose().multiply_vec(point);
        let (x, y) = if clip.w != 0.0 {
            (clip.x / clip.w, clip.y / clip.w)
        } else {
            (clip.x, clip.y)
        };

        let half_w = width as f32 * 0.5;
        let half_h = height as f32 * 0.5;
        Vec4::new(half_w + x * half_h, half_h - y * half_h, clip.w, 1.0)
    }

    /// Projects all three points, see [`Projection::project_point`].
    pub fn project_triangle(&self, triangle: &Triangle, width: u32, height: u32) -> Triangle {
        let [a, b, c] = triangle
            .vertices()
            .map(|p| self.project_point(p, width, height));
        Triangle::new(a, b, c)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(0.1, 100.0, 90.0)
    }
}
