use crate::layout::Vertex;

use super::RenderSize;

/// Number of vertices in a quad made of two triangles.
pub const QUAD_VERTEX_COUNT: u32 = 6;

// (position == texture coordinate) corners of the unit square, in triangle-list
// order. Both triangles wind counter-clockwise in a +Y-up space.
const UNIT_CORNERS: [[f32; 2]; 6] = [
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 0.0],
];

/// Unit square `[0, 1]²` as a triangle list with matching texture coordinates.
pub fn unit_quad() -> [Vertex; 6] {
    UNIT_CORNERS.map(|c| Vertex::new(c, c))
}

/// Quad covering `[0, w] × [0, h]` pixels, texture coordinates in `[0, 1]`.
///
/// Paired with [`RenderParameters::orthographic`](crate::layout::RenderParameters::orthographic)
/// this fills the whole drawable.
pub fn pixel_quad(size: RenderSize) -> [Vertex; 6] {
    let [w, h] = size.to_f32();
    UNIT_CORNERS.map(|c| Vertex::new([c[0] * w, c[1] * h], c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RenderParameters;

    fn signed_area(a: [f32; 2], b: [f32; 2], c: [f32; 2]) -> f32 {
        (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
    }

    #[test]
    fn unit_quad_texture_matches_position() {
        for v in unit_quad() {
            assert_eq!(v.position, v.texture_coordinate);
        }
    }

    #[test]
    fn unit_quad_triangles_are_ccw() {
        let q = unit_quad();
        for tri in q.chunks_exact(3) {
            let area = signed_area(tri[0].position, tri[1].position, tri[2].position);
            assert!(area > 0.0);
        }
    }

    #[test]
    fn pixel_quad_spans_drawable() {
        let q = pixel_quad(RenderSize::new(320, 200));
        let xs: Vec<f32> = q.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = q.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 320.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 0.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 200.0);
        assert_eq!(q[0].texture_coordinate, [1.0, 1.0]);
    }

    #[test]
    fn pixel_quad_projects_to_full_clip_square() {
        let size = RenderSize::new(1024, 768);
        let params = RenderParameters::orthographic(size);
        for v in pixel_quad(size) {
            let [x, y, _, w] = params.project(v.position);
            assert!((x.abs() - 1.0).abs() < 1e-5);
            assert!((y.abs() - 1.0).abs() < 1e-5);
            assert_eq!(w, 1.0);
        }
    }
}
