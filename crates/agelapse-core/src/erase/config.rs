use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BORDER_STRIP_WIDTH, DEFAULT_KEY_TOLERANCE, DEFAULT_MIN_COMPONENT_AREA,
};

/// Which background eraser to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EraserKind {
    /// Key out the colour estimated from the image border.
    #[default]
    BorderKey,
    /// Delegate to an external program such as `rembg`.
    Command,
}

impl std::fmt::Display for EraserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BorderKey => write!(f, "border-key"),
            Self::Command => write!(f, "command"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EraserConfig {
    #[serde(default)]
    pub kind: EraserKind,
    /// RGB distance to the border colour still treated as background.
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    /// Border strip width (pixels) sampled for the background colour.
    #[serde(default = "default_border_strip")]
    pub border_strip: usize,
    /// Foreground components below this area (pixels) are erased.
    #[serde(default = "default_min_component_area")]
    pub min_component_area: usize,
    /// Radius of the square opening kernel; 0 disables the opening.
    #[serde(default = "default_opening_radius")]
    pub opening_radius: usize,
    /// Program and arguments for `EraserKind::Command`. `{input}` and
    /// `{output}` are replaced by PNG paths.
    #[serde(default = "default_command")]
    pub command: Vec<String>,
}

fn default_tolerance() -> f32 {
    DEFAULT_KEY_TOLERANCE
}
fn default_border_strip() -> usize {
    DEFAULT_BORDER_STRIP_WIDTH
}
fn default_min_component_area() -> usize {
    DEFAULT_MIN_COMPONENT_AREA
}
fn default_opening_radius() -> usize {
    1
}
fn default_command() -> Vec<String> {
    ["rembg", "i", "{input}", "{output}"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            kind: EraserKind::default(),
            tolerance: DEFAULT_KEY_TOLERANCE,
            border_strip: DEFAULT_BORDER_STRIP_WIDTH,
            min_component_area: DEFAULT_MIN_COMPONENT_AREA,
            opening_radius: default_opening_radius(),
            command: default_command(),
        }
    }
}
