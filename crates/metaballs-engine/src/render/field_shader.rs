use crate::layout::wgsl;

const PASSTHROUGH: &str = include_str!("shaders/passthrough.wgsl");

/// Fragment stage supplied by the host application.
///
/// The source is appended to the generated struct declarations and the shared
/// vertex stage, so it can use:
/// - `VertexOut` as the fragment input (`texture_coordinate`, `pixel`)
/// - `field_parameters`, `ball_count()` and `ball_at(i)`
///
/// It must loop over `ball_count()` rather than `arrayLength(&balls)`: the
/// storage buffer is padded and a zero count is valid.
#[derive(Debug, Clone)]
pub struct FieldShader {
    label: String,
    source: String,
    entry_point: String,
}

impl FieldShader {
    pub fn new(label: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source: source.into(),
            entry_point: "fs_main".to_string(),
        }
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Complete WGSL module: declarations, shared vertex stage, fragment stage.
    pub fn module_source(&self) -> String {
        let mut src = wgsl::with_declarations(PASSTHROUGH);
        src.push('\n');
        src.push_str(&self.source);
        src
    }
}
