//! Parses and validates the assembled WGSL modules with naga and compares
//! the layouts naga computes against the Rust field tables.

use metaballs_engine::layout::wgsl::{ShaderType, WgslStruct, SHARED_STRUCTS};
use metaballs_engine::layout::Ball;
use metaballs_engine::render::FieldShader;

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{AddressSpace, ArraySize, Binding, Module, ShaderStage, StorageAccess, TypeInner};

const READ_ALL_BALLS: &str = r#"
@fragment
fn fs_main(v: VertexOut) -> @location(0) vec4<f32> {
    var sum = 0.0;
    for (var i = 0u; i < ball_count(); i++) {
        let b = ball_at(i);
        sum += b.r / max(distance(v.pixel, vec2<f32>(b.x, b.y)), 1.0);
    }
    return vec4<f32>(sum, v.texture_coordinate, 1.0);
}
"#;

fn compile(source: &str) -> Module {
    let module = match naga::front::wgsl::parse_str(source) {
        Ok(m) => m,
        Err(e) => panic!("WGSL parse failed:\n{}", e.emit_to_string(source)),
    };
    if let Err(e) = Validator::new(ValidationFlags::all(), Capabilities::all()).validate(&module) {
        panic!("WGSL validation failed: {e:?}");
    }
    module
}

fn struct_type<'m>(module: &'m Module, name: &str) -> &'m TypeInner {
    module
        .types
        .iter()
        .find(|(_, ty)| ty.name.as_deref() == Some(name))
        .map(|(_, ty)| &ty.inner)
        .unwrap_or_else(|| panic!("struct {name} not declared"))
}

fn assert_matches_rust(module: &Module, s: &WgslStruct) {
    let TypeInner::Struct { members, span } = struct_type(module, s.name) else {
        panic!("{} is not a struct", s.name);
    };
    assert_eq!(*span as usize, s.size, "{} span", s.name);
    assert_eq!(members.len(), s.fields.len(), "{} member count", s.name);
    for (member, field) in members.iter().zip(s.fields) {
        assert_eq!(member.name.as_deref(), Some(field.name));
        assert_eq!(member.offset as usize, field.offset, "{}.{}", s.name, field.name);
        match field.location {
            Some(loc) => assert!(
                matches!(member.binding, Some(Binding::Location { location, .. }) if location == loc),
                "{}.{} should be @location({loc})",
                s.name,
                field.name
            ),
            None => assert!(member.binding.is_none()),
        }
    }
}

#[test]
fn module_without_fragment_stage_validates() {
    let module = compile(&FieldShader::new("empty", "").module_source());
    assert!(module
        .entry_points
        .iter()
        .any(|ep| ep.name == "vs_main" && ep.stage == ShaderStage::Vertex));
}

#[test]
fn module_with_fragment_stage_validates() {
    let module = compile(&FieldShader::new("sum", READ_ALL_BALLS).module_source());
    assert!(module
        .entry_points
        .iter()
        .any(|ep| ep.name == "fs_main" && ep.stage == ShaderStage::Fragment));
}

#[test]
fn parsed_structs_match_rust_layout() {
    let module = compile(&FieldShader::new("sum", READ_ALL_BALLS).module_source());
    for s in &SHARED_STRUCTS {
        assert_matches_rust(&module, s);
    }
}

#[test]
fn ball_is_twelve_bytes_on_the_shader_side() {
    let module = compile(&FieldShader::new("empty", "").module_source());
    let TypeInner::Struct { members, span } = struct_type(&module, "Ball") else {
        panic!("Ball is not a struct");
    };
    assert_eq!(*span, 12);
    let offsets: Vec<_> = members.iter().map(|m| m.offset as usize).collect();
    let rust: Vec<_> = Ball::WGSL.fields.iter().map(|f| f.offset).collect();
    assert_eq!(offsets, rust);
}

#[test]
fn globals_follow_binding_contract() {
    let module = compile(&FieldShader::new("sum", READ_ALL_BALLS).module_source());
    let global = |binding: u32| {
        module
            .global_variables
            .iter()
            .map(|(_, g)| g)
            .find(|g| g.binding.as_ref().is_some_and(|b| b.group == 0 && b.binding == binding))
            .unwrap_or_else(|| panic!("nothing bound at @binding({binding})"))
    };

    let render = global(0);
    assert_eq!(render.space, AddressSpace::Uniform);
    assert_eq!(module.types[render.ty].name.as_deref(), Some("RenderParameters"));

    let field = global(1);
    assert_eq!(field.space, AddressSpace::Uniform);
    assert_eq!(module.types[field.ty].name.as_deref(), Some("FieldParameters"));

    let balls = global(2);
    assert_eq!(balls.space, AddressSpace::Storage { access: StorageAccess::LOAD });
    let TypeInner::Array { base, size, stride } = module.types[balls.ty].inner else {
        panic!("binding 2 is not an array");
    };
    assert_eq!(module.types[base].name.as_deref(), Some("Ball"));
    assert_eq!(size, ArraySize::Dynamic);
    assert_eq!(stride as usize, std::mem::size_of::<Ball>());
}
