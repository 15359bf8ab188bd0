//! Producer/consumer agreement on the shared layout, checked on raw bytes.

use metaballs_engine::coords::{pixel_quad, RenderSize};
use metaballs_engine::layout::{
    as_bytes, read_balls, read_slice, read_value, wgsl, Ball, FieldParameters, RenderParameters,
    Vertex,
};
use proptest::prelude::*;

fn f32_bits() -> impl Strategy<Value = f32> {
    any::<u32>().prop_map(f32::from_bits)
}

fn same_bits(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

// ── size / offsets ────────────────────────────────────────────────────────

#[test]
fn slots_are_consecutive_floats() {
    assert_eq!(std::mem::size_of::<Ball>(), 12);
    assert_eq!(std::mem::size_of::<Vertex>(), 16);
    assert_eq!(std::mem::size_of::<RenderParameters>(), 64);

    // Ball (x, y, r) lands in three adjacent slots.
    let b = Ball::new(1.0, 2.0, 3.0);
    let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&b));
    assert_eq!(floats, &[1.0, 2.0, 3.0]);

    // Vertex is position then texture coordinate.
    let v = Vertex::new([4.0, 5.0], [0.5, 0.25]);
    let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
    assert_eq!(floats, &[4.0, 5.0, 0.5, 0.25]);
}

#[test]
fn generated_wgsl_agrees_with_rust() {
    wgsl::verify().unwrap();
}

// ── array transfer ────────────────────────────────────────────────────────

#[test]
fn three_balls_read_back_in_order() {
    let produced = [
        Ball::new(0.0, 0.0, 1.0),
        Ball::new(2.0, 0.0, 0.5),
        Ball::new(-1.0, 1.0, 0.25),
    ];
    let bytes = as_bytes(&produced).to_vec();
    assert_eq!(bytes.len(), 36);

    let consumed = read_balls(&bytes).unwrap();
    assert_eq!(consumed, produced);
}

#[test]
fn zero_balls_is_a_valid_frame() {
    let produced: [Ball; 0] = [];
    let bytes = as_bytes(&produced);
    assert!(bytes.is_empty());
    assert!(read_balls(bytes).unwrap().is_empty());

    let fp = FieldParameters::new(RenderSize::new(800, 600), produced.len() as u32);
    let fp_back: FieldParameters = read_value(bytemuck::bytes_of(&fp)).unwrap();
    assert_eq!(fp_back.ball_count, 0);
}

#[test]
fn quad_vertices_survive_upload() {
    let quad = pixel_quad(RenderSize::new(640, 480));
    let back: Vec<Vertex> = read_slice(as_bytes(&quad)).unwrap();
    assert_eq!(back, quad);
}

// ── projection convention ─────────────────────────────────────────────────

#[test]
fn identity_projection_read_back_keeps_position() {
    let bytes = bytemuck::bytes_of(&RenderParameters::identity()).to_vec();
    let params: RenderParameters = read_value(&bytes).unwrap();
    assert_eq!(params.project([12.0, -7.5]), [12.0, -7.5, 0.0, 1.0]);
}

// ── bit-exact round trips ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn ball_bits_survive(x in f32_bits(), y in f32_bits(), r in f32_bits()) {
        let b = Ball::new(x, y, r);
        let back = read_balls(as_bytes(&[b])).unwrap();
        prop_assert!(same_bits(&<[f32; 3]>::from(back[0]), &[x, y, r]));
    }

    #[test]
    fn vertex_bits_survive(p in prop::array::uniform2(f32_bits()), t in prop::array::uniform2(f32_bits())) {
        let v = Vertex::new(p, t);
        let back: Vertex = read_value(bytemuck::bytes_of(&v)).unwrap();
        prop_assert!(same_bits(&back.position, &p));
        prop_assert!(same_bits(&back.texture_coordinate, &t));
    }

    #[test]
    fn projection_bits_survive(m in prop::array::uniform16(f32_bits())) {
        let params = RenderParameters { projection: bytemuck::cast(m) };
        let back: RenderParameters = read_value(bytemuck::bytes_of(&params)).unwrap();
        let back_flat: [f32; 16] = bytemuck::cast(back.projection);
        prop_assert!(same_bits(&back_flat, &m));
    }

    #[test]
    fn ball_arrays_keep_length_and_order(raw in prop::collection::vec((-1e6f32..1e6, -1e6f32..1e6, 0f32..1e3), 0..64)) {
        let balls: Vec<Ball> = raw.iter().map(|&(x, y, r)| Ball::new(x, y, r)).collect();
        let back = read_balls(as_bytes(&balls)).unwrap();
        prop_assert_eq!(back, balls);
    }
}
