use std::path::Path;

use anyhow::{Context, Result};
use metaballs_engine::layout::Ball;
use metaballs_engine::window::RuntimeConfig;
use serde::{Deserialize, Serialize};
use winit::dpi::LogicalSize;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl WindowConfig {
    fn has_valid_size(&self) -> bool {
        [self.width, self.height].iter().all(|v| v.is_finite() && *v > 0.0)
    }

    /// Configured size, or the default size when either side is unusable.
    pub fn initial_size(&self) -> LogicalSize<f64> {
        if self.has_valid_size() {
            LogicalSize::new(self.width, self.height)
        } else {
            let fallback = Self::default();
            LogicalSize::new(fallback.width, fallback.height)
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Metaballs".into(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// How ball interiors are colored, in texture space.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorStyle {
    /// `colors[0]` everywhere.
    #[default]
    Solid,
    /// `colors[0]` (left) to `colors[1]` (right).
    Horizontal,
    /// `colors[0]` (top) to `colors[1]` (bottom).
    Vertical,
    /// Bilinear blend of the four corner colors (TL, TR, BL, BR).
    Corners,
}

impl ColorStyle {
    pub fn shader_id(self) -> u32 {
        match self {
            ColorStyle::Solid => 0,
            ColorStyle::Horizontal => 1,
            ColorStyle::Vertical => 2,
            ColorStyle::Corners => 3,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Straight-alpha RGBA clear color.
    pub background: [f32; 4],
    pub style: ColorStyle,
    /// Straight-alpha RGBA colors used by `style`.
    pub colors: [[f32; 4]; 4],
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            background: [0.05, 0.05, 0.08, 1.0],
            style: ColorStyle::Corners,
            colors: [
                [0.98, 0.36, 0.35, 1.0],
                [0.99, 0.76, 0.24, 1.0],
                [0.29, 0.56, 0.89, 1.0],
                [0.45, 0.85, 0.55, 1.0],
            ],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct LogConfig {
    /// `env_logger` filter; the `--log` flag and `RUST_LOG` take precedence.
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub appearance: AppearanceConfig,
    /// `[x, y, r]` in physical pixels, top-left origin.
    pub balls: Vec<[f32; 3]>,
    pub log: LogConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            appearance: AppearanceConfig::default(),
            balls: vec![
                [420.0, 300.0, 120.0],
                [640.0, 360.0, 90.0],
                [860.0, 420.0, 140.0],
            ],
            log: LogConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn balls(&self) -> Vec<Ball> {
        self.balls.iter().copied().map(Ball::from).collect()
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.window.title.clone(),
            initial_size: self.window.initial_size(),
        }
    }

    /// Non-fatal problems worth reporting before startup.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.window.has_valid_size() {
            let size = self.window.initial_size();
            warnings.push(format!(
                "window size {}x{} is not usable; falling back to {}x{}",
                self.window.width, self.window.height, size.width, size.height
            ));
        }

        for (i, b) in self.balls().into_iter().enumerate() {
            if !b.is_finite() {
                warnings.push(format!("ball {i} has non-finite values {:?}", <[f32; 3]>::from(b)));
            } else if b.r < 0.0 {
                warnings.push(format!(
                    "ball {i} has negative radius {}; it only shows if the field evaluator treats it as repulsion",
                    b.r
                ));
            }
        }

        let colors = std::iter::once(&self.appearance.background).chain(&self.appearance.colors);
        if colors.flatten().any(|c| !(0.0..=1.0).contains(c)) {
            warnings.push("color channels outside [0, 1] are clamped".to_string());
        }

        warnings
    }
}
