//! Triangles of homogeneous points and their screen-space bounding boxes.

use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;

/// Axis-aligned pixel rectangle `[x0, y0, x1, y1)`.
///
/// `x0`/`y0` are the truncated minimum corner, `x1`/`y1` the rounded
/// (half-up) maximum corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    /// Builds the pixel rectangle covering `x..x + width`, `y..y + height`.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x0: x.trunc() as i32,
            y0: y.trunc() as i32,
            x1: round_half_up(x + width) as i32,
            y1: round_half_up(y + height) as i32,
        }
    }

    /// Number of pixel columns. Zero when truncation and rounding cross over
    /// (sub-pixel boxes left of the origin).
    ///
    /// The span of two `i32` corners always fits a `u32`, so boxes wider
    /// than `i32::MAX` are measured exactly.
    pub fn width(&self) -> u32 {
        span(self.x0, self.x1)
    }

    pub fn height(&self) -> u32 {
        span(self.y0, self.y1)
    }

    /// Pixel count, equal to `pixels().count()`. Saturates at `usize::MAX`.
    pub fn area(&self) -> usize {
        (self.width() as usize).saturating_mul(self.height() as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Inclusive containment test on both corners.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Pixel coordinates in raster traversal order: x outer, y inner.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> {
        let (y0, y1) = (self.y0, self.y1);
        (self.x0..self.x1).flat_map(move |x| (y0..y1).map(move |y| (x, y)))
    }
}

#[inline]
fn span(start: i32, end: i32) -> u32 {
    if end > start {
        end.abs_diff(start)
    } else {
        0
    }
}

/// `Math.round` semantics: halves go towards positive infinity.
#[inline]
fn round_half_up(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// A triangle owning three homogeneous points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vec4,
    pub b: Vec4,
    pub c: Vec4,
}

impl Triangle {
    pub fn new(a: Vec4, b: Vec4, c: Vec4) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [Vec4; 3] {
        [self.a, self.b, self.c]
    }

    /// Smallest pixel rectangle around the x/y footprint.
    pub fn bounding_rect(&self) -> Rect {
        let min_x = self.a.x.min(self.b.x).min(self.c.x);
        let min_y = self.a.y.min(self.b.y).min(self.c.y);
        let max_x = self.a.x.max(self.b.x).max(self.c.x);
        let max_y = self.a.y.max(self.b.y).max(self.c.y);

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Adds `delta` to every point.
    pub fn translate(&mut self, delta: Vec4) {
        self.a += delta;
        self.b += delta;
        self.c += delta;
    }

    /// Rotates about each axis in `axes` by the matching angle (degrees).
    ///
    /// The per-axis matrices are folded front to back with [`Mat4::compose`]
    /// and the single result is applied to every point. If `axes` and
    /// `angles` differ in length the triangle is left untouched. Characters
    /// other than `x`, `y`, `z` contribute a zero matrix.
    pub fn rotate(&mut self, axes: &str, angles: &[f32]) {
        let axis_count = axes.chars().count();
        if axis_count != angles.len() {
            log::warn!(
                "rotation ignored: {axis_count} axes but {} angles",
                angles.len()
            );
            return;
        }

        let combined = axes
            .chars()
            .zip(angles)
            .map(|(axis, &angle)| Mat4::rotation_for(axis, angle))
            .reduce(|acc, next| acc.compose(&next));

        if let Some(matrix) = combined {
            self.transform(&matrix);
        }
    }

    /// Applies `matrix` to every point.
    pub fn transform(&mut self, matrix: &Mat4) {
        self.a = matrix.multiply_vec(self.a);
        self.b = matrix.multiply_vec(self.b);
        self.c = matrix.multiply_vec(self.c);
    }

    /// Centroid depth: mean z of the three points.
    pub fn depth(&self) -> f32 {
        (self.a.z + self.b.z + self.c.z) / 3.0
    }

    /// Even-odd point-in-triangle test on the x/y footprint.
    ///
    /// Edges are visited as (a, c), (b, a), (c, b). An edge counts as crossed
    /// when it straddles the horizontal line through `y` and the crossing lies
    /// strictly right of `x`. The straddle test fails for horizontal edges, so
    /// the interpolation never divides by zero.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let points = self.vertices();
        let mut inside = false;
        let mut j = points.len() - 1;

        for i in 0..points.len() {
            let (pi, pj) = (points[i], points[j]);
            if (pi.y > y) != (pj.y > y) && x < pi.x + (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y)
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// True when every vertex of `other` passes [`Triangle::contains_point`].
    ///
    /// Coarse and depth-unaware: partial overlaps never count, and neither do
    /// triangles that are mostly hidden without any vertex inside `self`.
    /// Under the even-odd rule the top-most vertex of a triangle is never
    /// inside itself, so coincident triangles do not cover each other.
    pub fn covers(&self, other: &Triangle) -> bool {
        other
            .vertices()
            .iter()
            .all(|p| self.contains_point(p.x, p.y))
    }
}

/// Free-function form of [`Triangle::contains_point`].
pub fn point_in_triangle(x: f32, y: f32, triangle: &Triangle) -> bool {
    triangle.contains_point(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Triangle {
        Triangle::new(
            Vec4::point(a.0, a.1, 0.0),
            Vec4::point(b.0, b.1, 0.0),
            Vec4::point(c.0, c.1, 0.0),
        )
    }

    fn right_triangle() -> Triangle {
        tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0))
    }

    #[test]
    fn right_triangle_membership() {
        let t = right_triangle();
        assert!(t.contains_point(1.0, 1.0));
        assert!(!t.contains_point(3.0, 3.0));
        // Left and bottom edges are inside, the hypotenuse and the far corners are not.
        assert!(t.contains_point(0.0, 0.0));
        assert!(t.contains_point(0.0, 3.0));
        assert!(!t.contains_point(4.0, 0.0));
        assert!(!t.contains_point(0.0, 4.0));
        assert!(!t.contains_point(2.0, 2.0));
    }

    #[test]
    fn horizontal_edge_at_query_height_is_not_crossed() {
        let t = tri((0.0, 2.0), (6.0, 2.0), (3.0, 5.0));
        assert!(!t.contains_point(-1.0, 2.0));
        assert!(t.contains_point(3.0, 2.0));
        assert!(!t.contains_point(7.0, 2.0));
    }

    #[test]
    fn degenerate_triangle_contains_nothing() {
        let t = tri((0.0, 1.0), (5.0, 1.0), (9.0, 1.0));
        for x in -1..10 {
            for y in 0..3 {
                assert!(!t.contains_point(x as f32, y as f32));
            }
        }
    }

    #[test]
    fn membership_is_invariant_under_cyclic_relabeling() {
        let shapes = [
            right_triangle(),
            tri((1.5, 0.2), (9.7, 3.3), (4.1, 8.8)),
            tri((8.0, 1.0), (0.5, 6.5), (7.25, 9.0)),
        ];
        for t in shapes {
            let rotated_once = Triangle::new(t.b, t.c, t.a);
            let rotated_twice = Triangle::new(t.c, t.a, t.b);
            for x in -1..11 {
                for y in -1..11 {
                    let (x, y) = (x as f32, y as f32);
                    let expected = t.contains_point(x, y);
                    assert_eq!(rotated_once.contains_point(x, y), expected);
                    assert_eq!(rotated_twice.contains_point(x, y), expected);
                }
            }
        }
    }

    #[test]
    fn bounding_rect_truncates_and_rounds() {
        let t = tri((1.7, 2.2), (5.6, 2.9), (3.0, 7.4));
        assert_eq!(
            t.bounding_rect(),
            Rect {
                x0: 1,
                y0: 2,
                x1: 6,
                y1: 7
            }
        );
    }

    #[test]
    fn bounding_rect_contains_vertices() {
        let shapes = [
            right_triangle(),
            tri((1.5, 0.2), (9.7, 3.3), (4.1, 8.8)),
            tri((8.0, 1.0), (0.5, 6.5), (7.25, 9.5)),
        ];
        for t in shapes {
            let rect = t.bounding_rect();
            for v in t.vertices() {
                assert!(rect.contains(v.x.trunc() as i32, v.y.trunc() as i32));
                assert!(rect.contains(round_half_up(v.x) as i32, round_half_up(v.y) as i32));
            }
        }
    }

    #[test]
    fn inverted_sub_pixel_box_is_empty() {
        let t = tri((-0.7, 1.0), (-0.6, 2.0), (-0.65, 3.0));
        let rect = t.bounding_rect();
        assert_eq!(rect.width(), 0);
        assert!(rect.is_empty());
        assert_eq!(rect.pixels().count(), 0);
    }

    #[test]
    fn spans_wider_than_i32_are_measured_exactly() {
        let wide = tri((-2e9, 0.0), (2e9, 0.0), (0.0, 1.0));
        let rect = wide.bounding_rect();
        assert_eq!(rect.width(), 4_000_000_000);
        assert_eq!(rect.height(), 1);
        assert!(!rect.is_empty());

        // Corners beyond i32 saturate on conversion.
        let huge = tri((-3e9, -3e9), (3e9, -3e9), (0.0, 3e9)).bounding_rect();
        assert_eq!((huge.x0, huge.x1), (i32::MIN, i32::MAX));
        assert_eq!(huge.width(), u32::MAX);
    }

    #[test]
    fn rect_pixels_are_column_major() {
        let rect = Rect {
            x0: 0,
            y0: 0,
            x1: 2,
            y1: 3,
        };
        let pixels: Vec<_> = rect.pixels().collect();
        assert_eq!(pixels, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn covers_enclosed_triangle() {
        let big = tri((0.0, 0.0), (10.0, 0.0), (0.0, 10.0));
        let small = tri((1.0, 1.0), (2.0, 1.0), (1.0, 2.0));
        assert!(big.covers(&small));
        assert!(!small.covers(&big));
    }

    #[test]
    fn partial_overlap_does_not_cover() {
        let big = tri((0.0, 0.0), (10.0, 0.0), (0.0, 10.0));
        let straddling = tri((1.0, 1.0), (2.0, 1.0), (12.0, 12.0));
        assert!(!big.covers(&straddling));
    }

    #[test]
    fn coincident_triangle_does_not_cover_itself() {
        let t = right_triangle();
        assert!(!t.covers(&t));
    }

    #[test]
    fn translate_moves_every_point() {
        let mut t = right_triangle();
        t.translate(Vec4::direction(2.0, -1.0, 3.0));
        assert_eq!(t.a, Vec4::point(2.0, -1.0, 3.0));
        assert_eq!(t.b, Vec4::point(6.0, -1.0, 3.0));
        assert_eq!(t.c, Vec4::point(2.0, 3.0, 3.0));
    }

    #[test]
    fn depth_is_mean_z() {
        let t = Triangle::new(
            Vec4::point(0.0, 0.0, 1.0),
            Vec4::point(0.0, 0.0, 2.0),
            Vec4::point(0.0, 0.0, 6.0),
        );
        assert_relative_eq!(t.depth(), 3.0);
    }

    #[test]
    fn rotate_single_axis() {
        let mut t = right_triangle();
        t.rotate("z", &[90.0]);
        assert_relative_eq!(t.b, Vec4::point(0.0, 4.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(t.c, Vec4::point(-4.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn rotate_composes_with_transposed_right_operand() {
        let mut composed = right_triangle();
        composed.rotate("xy", &[30.0, 45.0]);

        let matrix = Mat4::rotation_for('x', 30.0) * Mat4::rotation_for('y', 45.0).transpose();
        let mut expected = right_triangle();
        expected.transform(&matrix);

        assert_relative_eq!(composed.b, expected.b, epsilon = 1e-5);
        assert_relative_eq!(composed.c, expected.c, epsilon = 1e-5);
    }

    #[test]
    fn rotate_three_axes_folds_front_to_back() {
        let mut composed = right_triangle();
        composed.rotate("zxz", &[10.0, 20.0, 30.0]);

        let matrix = Mat4::rotation_for('z', 10.0)
            .compose(&Mat4::rotation_for('x', 20.0))
            .compose(&Mat4::rotation_for('z', 30.0));
        let mut expected = right_triangle();
        expected.transform(&matrix);

        assert_relative_eq!(composed.b, expected.b, epsilon = 1e-5);
    }

    #[test]
    fn rotate_with_mismatched_lengths_is_a_no_op() {
        let mut t = right_triangle();
        t.rotate("xy", &[90.0]);
        assert_eq!(t, right_triangle());
        t.rotate("", &[]);
        assert_eq!(t, right_triangle());
    }

    #[test]
    fn rotate_with_unknown_axis_collapses_points() {
        let mut t = right_triangle();
        t.rotate("q", &[90.0]);
        assert_eq!(t.b, Vec4::ZERO);
    }
}
