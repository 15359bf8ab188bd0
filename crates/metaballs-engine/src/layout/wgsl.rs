//! WGSL declarations generated from the Rust layout.
//!
//! Shader modules never declare `Ball`, `Vertex`, `RenderParameters` or
//! `FieldParameters` by hand. They are prefixed with [`declarations`], which is
//! produced from the field tables below. [`verify`] recomputes every offset
//! under WGSL's layout rules and compares it with the Rust offset, so a field
//! added on one side only fails loudly instead of shifting data silently.

use std::fmt::Write as _;
use std::mem::{align_of, offset_of, size_of};

use super::{Ball, FieldParameters, RenderParameters, Vertex};

/// WGSL types used by the layout, with their host-shareable size/alignment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WgslType {
    F32,
    U32,
    Vec2F32,
    Vec2U32,
    Mat4x4F32,
}

impl WgslType {
    pub const fn name(self) -> &'static str {
        match self {
            WgslType::F32 => "f32",
            WgslType::U32 => "u32",
            WgslType::Vec2F32 => "vec2<f32>",
            WgslType::Vec2U32 => "vec2<u32>",
            WgslType::Mat4x4F32 => "mat4x4<f32>",
        }
    }

    pub const fn size(self) -> usize {
        match self {
            WgslType::F32 | WgslType::U32 => 4,
            WgslType::Vec2F32 | WgslType::Vec2U32 => 8,
            WgslType::Mat4x4F32 => 64,
        }
    }

    pub const fn align(self) -> usize {
        match self {
            WgslType::F32 | WgslType::U32 => 4,
            WgslType::Vec2F32 | WgslType::Vec2U32 => 8,
            WgslType::Mat4x4F32 => 16,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct WgslField {
    pub name: &'static str,
    pub ty: WgslType,
    /// Byte offset of the field in the Rust struct.
    pub offset: usize,
    /// Vertex input location, for structs consumed as vertex attributes.
    pub location: Option<u32>,
}

#[derive(Debug, Copy, Clone)]
pub struct WgslStruct {
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
    pub fields: &'static [WgslField],
}

/// A layout type with a generated WGSL counterpart.
pub trait ShaderType: bytemuck::Pod {
    const WGSL: WgslStruct;
}

const fn field(name: &'static str, ty: WgslType, offset: usize) -> WgslField {
    WgslField { name, ty, offset, location: None }
}

const fn attribute(name: &'static str, ty: WgslType, offset: usize, location: u32) -> WgslField {
    WgslField { name, ty, offset, location: Some(location) }
}

impl ShaderType for Ball {
    const WGSL: WgslStruct = WgslStruct {
        name: "Ball",
        size: size_of::<Ball>(),
        align: align_of::<Ball>(),
        fields: &[
            field("x", WgslType::F32, offset_of!(Ball, x)),
            field("y", WgslType::F32, offset_of!(Ball, y)),
            field("r", WgslType::F32, offset_of!(Ball, r)),
        ],
    };
}

impl ShaderType for Vertex {
    const WGSL: WgslStruct = WgslStruct {
        name: "Vertex",
        size: size_of::<Vertex>(),
        align: align_of::<Vertex>(),
        fields: &[
            attribute("position", WgslType::Vec2F32, offset_of!(Vertex, position), 0),
            attribute(
                "texture_coordinate",
                WgslType::Vec2F32,
                offset_of!(Vertex, texture_coordinate),
                1,
            ),
        ],
    };
}

impl ShaderType for RenderParameters {
    const WGSL: WgslStruct = WgslStruct {
        name: "RenderParameters",
        size: size_of::<RenderParameters>(),
        align: align_of::<RenderParameters>(),
        fields: &[field(
            "projection",
            WgslType::Mat4x4F32,
            offset_of!(RenderParameters, projection),
        )],
    };
}

impl ShaderType for FieldParameters {
    const WGSL: WgslStruct = WgslStruct {
        name: "FieldParameters",
        size: size_of::<FieldParameters>(),
        align: align_of::<FieldParameters>(),
        fields: &[
            field("size", WgslType::Vec2U32, offset_of!(FieldParameters, size)),
            field("ball_count", WgslType::U32, offset_of!(FieldParameters, ball_count)),
            field("_pad", WgslType::U32, offset_of!(FieldParameters, _pad)),
        ],
    };
}

/// Every struct shared with shaders, in declaration order.
pub const SHARED_STRUCTS: [WgslStruct; 4] = [
    Ball::WGSL,
    Vertex::WGSL,
    RenderParameters::WGSL,
    FieldParameters::WGSL,
];

/// Mismatch between a Rust struct and the layout WGSL would give it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WgslLayoutError {
    #[error("{ty}.{field}: Rust offset {rust}, WGSL offset {wgsl}")]
    Offset { ty: &'static str, field: &'static str, rust: usize, wgsl: usize },

    #[error("{ty}: Rust size {rust}, WGSL size {wgsl}")]
    Size { ty: &'static str, rust: usize, wgsl: usize },
}

fn round_up(align: usize, n: usize) -> usize {
    n.div_ceil(align) * align
}

/// Offsets and total size WGSL assigns to `s`.
pub fn wgsl_layout(s: &WgslStruct) -> (Vec<usize>, usize) {
    let mut offsets = Vec::with_capacity(s.fields.len());
    let mut cursor = 0;
    let mut align = 1;
    for f in s.fields {
        cursor = round_up(f.ty.align(), cursor);
        offsets.push(cursor);
        cursor += f.ty.size();
        align = align.max(f.ty.align());
    }
    (offsets, round_up(align, cursor))
}

/// Checks one struct against WGSL's layout rules.
pub fn verify_struct(s: &WgslStruct) -> Result<(), WgslLayoutError> {
    let (offsets, size) = wgsl_layout(s);
    for (f, wgsl) in s.fields.iter().zip(offsets) {
        if f.offset != wgsl {
            return Err(WgslLayoutError::Offset { ty: s.name, field: f.name, rust: f.offset, wgsl });
        }
    }
    if s.size != size {
        return Err(WgslLayoutError::Size { ty: s.name, rust: s.size, wgsl: size });
    }
    Ok(())
}

/// Checks every shared struct.
pub fn verify() -> Result<(), WgslLayoutError> {
    SHARED_STRUCTS.iter().try_for_each(verify_struct)
}

fn write_struct(out: &mut String, s: &WgslStruct) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "struct {} {{", s.name);
    for f in s.fields {
        match f.location {
            Some(loc) => {
                let _ = writeln!(out, "    @location({loc}) {}: {},", f.name, f.ty.name());
            }
            None => {
                let _ = writeln!(out, "    {}: {},", f.name, f.ty.name());
            }
        }
    }
    out.push_str("}\n\n");
}

/// WGSL source declaring all shared structs.
pub fn declarations() -> String {
    let mut out = String::from("// Generated from the Rust layout. Do not edit.\n\n");
    for s in &SHARED_STRUCTS {
        write_struct(&mut out, s);
    }
    out
}

/// `source` with the shared declarations prepended.
pub fn with_declarations(source: &str) -> String {
    let mut out = declarations();
    out.push_str(source);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_layout_matches_wgsl_rules() {
        assert_eq!(verify(), Ok(()));
    }

    #[test]
    fn ball_is_declared_with_scalar_fields() {
        let src = declarations();
        assert!(src.contains("struct Ball {\n    x: f32,\n    y: f32,\n    r: f32,\n}"));
    }

    #[test]
    fn vertex_fields_carry_locations() {
        let src = declarations();
        assert!(src.contains("@location(0) position: vec2<f32>,"));
        assert!(src.contains("@location(1) texture_coordinate: vec2<f32>,"));
    }

    #[test]
    fn projection_is_a_mat4() {
        assert!(declarations().contains("projection: mat4x4<f32>,"));
    }

    #[test]
    fn misaligned_vector_is_caught() {
        // vec2 after a lone f32 is pushed to offset 8 by WGSL.
        const SKEWED: WgslStruct = WgslStruct {
            name: "Skewed",
            size: 12,
            align: 4,
            fields: &[
                WgslField { name: "r", ty: WgslType::F32, offset: 0, location: None },
                WgslField { name: "center", ty: WgslType::Vec2F32, offset: 4, location: None },
            ],
        };
        assert_eq!(
            verify_struct(&SKEWED),
            Err(WgslLayoutError::Offset { ty: "Skewed", field: "center", rust: 4, wgsl: 8 })
        );
    }

    #[test]
    fn trailing_padding_is_reported() {
        const SHORT: WgslStruct = WgslStruct {
            name: "Short",
            size: 12,
            align: 8,
            fields: &[
                WgslField { name: "a", ty: WgslType::Vec2F32, offset: 0, location: None },
                WgslField { name: "b", ty: WgslType::F32, offset: 8, location: None },
            ],
        };
        assert_eq!(
            verify_struct(&SHORT),
            Err(WgslLayoutError::Size { ty: "Short", rust: 12, wgsl: 16 })
        );
    }

    #[test]
    fn user_source_follows_declarations() {
        let src = with_declarations("fn f() {}");
        assert!(src.starts_with("// Generated"));
        assert!(src.ends_with("fn f() {}"));
    }
}
