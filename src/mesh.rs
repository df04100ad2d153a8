//! Triangle containers, depth ordering and coarse occlusion culling.

use std::io::BufRead;
use std::path::Path;

use crate::math::vec4::Vec4;
use crate::triangle::Triangle;

/// Errors raised while building a mesh from OBJ data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read OBJ data: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("model {model:?} references vertex {index} but has {count} vertices")]
    IndexOutOfRange {
        model: String,
        index: u32,
        count: usize,
    },
}

const CUBE_VERTICES: [Vec4; 8] = [
    Vec4::point(-1.0, -1.0, -1.0),
    Vec4::point(-1.0, 1.0, -1.0),
    Vec4::point(1.0, 1.0, -1.0),
    Vec4::point(1.0, -1.0, -1.0),
    Vec4::point(1.0, 1.0, 1.0),
    Vec4::point(1.0, -1.0, 1.0),
    Vec4::point(-1.0, 1.0, 1.0),
    Vec4::point(-1.0, -1.0, 1.0),
];

// Zero-based indices into CUBE_VERTICES, two triangles per side.
const CUBE_FACES: [[usize; 3]; 12] = [
    // Front
    [0, 1, 2],
    [0, 2, 3],
    // Right
    [3, 2, 4],
    [3, 4, 5],
    // Back
    [5, 4, 6],
    [5, 6, 7],
    // Left
    [7, 6, 1],
    [7, 1, 0],
    // Top
    [1, 6, 4],
    [1, 4, 2],
    // Bottom
    [5, 7, 0],
    [5, 0, 3],
];

/// An ordered collection of triangles. Duplicates are allowed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// A 2x2x2 cube centred on the origin.
    pub fn cube() -> Self {
        Self::new(
            CUBE_FACES
                .iter()
                .map(|&[a, b, c]| {
                    Triangle::new(CUBE_VERTICES[a], CUBE_VERTICES[b], CUBE_VERTICES[c])
                })
                .collect(),
        )
    }

    /// Load every model in an OBJ file, triangulated, into one mesh.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj(path.as_ref(), &tobj::GPU_LOAD_OPTIONS)?;
        Self::from_models(&models)
    }

    /// Same as [`Mesh::from_obj`] but reads from an in-memory source.
    /// Material libraries are not resolved.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, LoadError> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &tobj::GPU_LOAD_OPTIONS, |_| {
                Err(tobj::LoadError::OpenFileFailed)
            })?;
        Self::from_models(&models)
    }

    fn from_models(models: &[tobj::Model]) -> Result<Self, LoadError> {
        let mut triangles = Vec::new();

        for model in models {
            let positions: Vec<Vec4> = model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec4::point(p[0], p[1], p[2]))
                .collect();

            let vertex = |index: u32| -> Result<Vec4, LoadError> {
                positions
                    .get(index as usize)
                    .copied()
                    .ok_or_else(|| LoadError::IndexOutOfRange {
                        model: model.name.clone(),
                        index,
                        count: positions.len(),
                    })
            };

            for face in model.mesh.indices.chunks_exact(3) {
                triangles.push(Triangle::new(
                    vertex(face[0])?,
                    vertex(face[1])?,
                    vertex(face[2])?,
                ));
            }
        }

        log::debug!(
            "loaded {} triangles from {} OBJ models",
            triangles.len(),
            models.len()
        );
        Ok(Self::new(triangles))
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangles_mut(&mut self) -> &mut [Triangle] {
        &mut self.triangles
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Translate every triangle by `delta`.
    pub fn translate(&mut self, delta: Vec4) {
        for triangle in &mut self.triangles {
            triangle.translate(delta);
        }
    }

    /// Rotate every triangle, see [`Triangle::rotate`].
    pub fn rotate(&mut self, axes: &str, angles: &[f32]) {
        for triangle in &mut self.triangles {
            triangle.rotate(axes, angles);
        }
    }

    /// Stable ascending sort by centroid depth.
    pub fn sort_by_depth(&mut self) {
        self.triangles
            .sort_by(|a, b| a.depth().total_cmp(&b.depth()));
    }

    /// Sorts by depth, then drops every triangle covered by a nearer one.
    ///
    /// Survivors are returned nearest first. A culled triangle is never used
    /// to cull others. O(n²) point-in-triangle tests.
    pub fn cull_triangles(&mut self) -> Vec<Triangle> {
        self.sort_by_depth();

        let mut culled = vec![false; self.triangles.len()];
        let mut visible = Vec::with_capacity(self.triangles.len());

        for (i, front) in self.triangles.iter().enumerate() {
            if culled[i] {
                continue;
            }
            for (j, behind) in self.triangles.iter().enumerate().skip(i + 1) {
                if !culled[j] && front.covers(behind) {
                    log::trace!("triangle {j} hidden behind triangle {i}");
                    culled[j] = true;
                }
            }
            visible.push(*front);
        }

        log::debug!(
            "culling kept {} of {} triangles",
            visible.len(),
            self.triangles.len()
        );
        visible
    }
}

impl From<Vec<Triangle>> for Mesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self::new(triangles)
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat(points: [(f32, f32); 3], z: f32) -> Triangle {
        let [a, b, c] = points.map(|(x, y)| Vec4::point(x, y, z));
        Triangle::new(a, b, c)
    }

    const BIG: [(f32, f32); 3] = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
    const SMALL: [(f32, f32); 3] = [(1.0, 1.0), (2.0, 1.0), (1.0, 2.0)];
    const ELSEWHERE: [(f32, f32); 3] = [(20.0, 20.0), (30.0, 20.0), (20.0, 30.0)];

    #[test]
    fn sort_by_depth_is_ascending_and_stable() {
        let first_tie = flat(BIG, 2.0);
        let second_tie = flat(ELSEWHERE, 2.0);
        let mut mesh = Mesh::new(vec![flat(SMALL, 5.0), first_tie, flat(BIG, -1.0), second_tie]);
        mesh.sort_by_depth();

        let depths: Vec<f32> = mesh.triangles().iter().map(Triangle::depth).collect();
        assert_eq!(depths, vec![-1.0, 2.0, 2.0, 5.0]);
        assert_eq!(mesh.triangles()[1], first_tie);
        assert_eq!(mesh.triangles()[2], second_tie);
    }

    #[test]
    fn single_triangle_survives_unchanged() {
        let t = flat(BIG, 3.0);
        let mut mesh = Mesh::new(vec![t]);
        assert_eq!(mesh.cull_triangles(), vec![t]);
    }

    #[test]
    fn empty_mesh_culls_to_nothing() {
        assert!(Mesh::default().cull_triangles().is_empty());
    }

    #[test]
    fn nearer_enclosing_triangle_culls_farther_one() {
        let near = flat(BIG, 1.0);
        let far = flat(SMALL, 4.0);
        let mut mesh = Mesh::new(vec![far, near]);
        assert_eq!(mesh.cull_triangles(), vec![near]);
    }

    #[test]
    fn farther_enclosing_triangle_does_not_cull_nearer_one() {
        let near = flat(SMALL, 1.0);
        let far = flat(BIG, 4.0);
        let mut mesh = Mesh::new(vec![far, near]);
        assert_eq!(mesh.cull_triangles(), vec![near, far]);
    }

    #[test]
    fn nested_chain_leaves_only_the_front() {
        let near = flat([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], 1.0);
        let mid = flat([(1.0, 1.0), (6.0, 1.0), (1.0, 6.0)], 2.0);
        let far = flat([(2.0, 2.0), (3.0, 2.0), (2.0, 3.0)], 3.0);
        assert!(near.covers(&mid));
        assert!(mid.covers(&far));

        let mut mesh = Mesh::new(vec![far, mid, near]);
        assert_eq!(mesh.cull_triangles(), vec![near]);
    }

    #[test]
    fn surviving_triangle_culls_farther_ones() {
        let near_small = flat([(1.5, 1.5), (2.0, 1.5), (1.5, 2.0)], 1.0);
        let mid_wide = flat([(1.0, 1.0), (40.0, 1.0), (1.0, 40.0)], 2.0);
        let offset = flat([(12.0, 12.0), (13.0, 12.0), (12.0, 13.0)], 3.0);
        assert!(!near_small.covers(&offset));

        let mut mesh = Mesh::new(vec![offset, mid_wide, near_small]);
        assert_eq!(mesh.cull_triangles(), vec![near_small, mid_wide]);
    }

    #[test]
    fn coincident_triangles_both_survive_in_stable_order() {
        let first = flat(BIG, 2.0);
        let second = flat(BIG, 2.0);
        let mut mesh = Mesh::new(vec![first, second]);
        let visible = mesh.cull_triangles();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible, vec![first, second]);
    }

    #[test]
    fn cube_has_twelve_triangles_around_origin() {
        let cube = Mesh::cube();
        assert_eq!(cube.len(), 12);
        let mean: f32 = cube.triangles().iter().map(Triangle::depth).sum::<f32>() / 12.0;
        assert_relative_eq!(mean, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn translate_moves_all_triangles() {
        let mut mesh = Mesh::new(vec![flat(BIG, 0.0), flat(SMALL, 1.0)]);
        mesh.translate(Vec4::direction(0.0, 0.0, 5.0));
        assert_relative_eq!(mesh.triangles()[0].depth(), 5.0);
        assert_relative_eq!(mesh.triangles()[1].depth(), 6.0);
    }

    #[test]
    fn loads_triangulated_obj() {
        let obj = "\
o pyramid
v 0 0 0
v 4 0 0
v 4 4 0
v 0 4 0
v 2 2 3
f 1 2 3 4
f 1 2 5
";
        let mesh = Mesh::from_obj_reader(&mut obj.as_bytes()).expect("valid OBJ");
        assert_eq!(mesh.len(), 3);
        assert_eq!(mesh.triangles()[2].c, Vec4::point(2.0, 2.0, 3.0));
    }

    #[test]
    fn obj_with_bad_index_is_rejected() {
        let obj = "\
v 0 0 0
v 1 0 0
f 1 2 9
";
        assert!(Mesh::from_obj_reader(&mut obj.as_bytes()).is_err());
    }

    #[test]
    fn missing_obj_file_is_an_error() {
        let err = Mesh::from_obj("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, LoadError::Obj(_)));
    }
}
