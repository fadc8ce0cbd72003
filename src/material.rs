//! Mappings between NIF texture settings and the material settings of the scene, used when
//! textures are read back from a file.

use crate::{
    blocks::{ApplyMode, TexClampMode},
    error::{Diagnostics, Warning},
};
use std::fmt::{self, Display, Formatter};

/// How a texture slot of a scene material is blended over the layers below it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlendType {
    Mix,
    Color,
    Overlay,
    Lighten,
    Multiply,
    Add,
    Darken,
    /// A blend type the exporter has no apply mode for.
    Other(String),
}

impl Display for BlendType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BlendType::Mix => write!(f, "MIX"),
            BlendType::Color => write!(f, "COLOR"),
            BlendType::Overlay => write!(f, "OVERLAY"),
            BlendType::Lighten => write!(f, "LIGHTEN"),
            BlendType::Multiply => write!(f, "MULTIPLY"),
            BlendType::Add => write!(f, "ADD"),
            BlendType::Darken => write!(f, "DARK"),
            BlendType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Blend type for a raw apply mode read from a texturing property. Unknown modes fall back to
/// `Mix`.
pub fn blend_type_from_apply_mode(raw: u32, diagnostics: &mut Diagnostics) -> BlendType {
    match ApplyMode::from_raw(raw) {
        Some(ApplyMode::Modulate) => BlendType::Mix,
        Some(ApplyMode::Replace) => BlendType::Color,
        Some(ApplyMode::Decal) => BlendType::Overlay,
        Some(ApplyMode::Hilight) => BlendType::Lighten,
        Some(ApplyMode::Hilight2) => BlendType::Multiply,
        None => {
            diagnostics.warn(Warning::UnknownApplyMode(raw));
            BlendType::Mix
        }
    }
}

/// Apply mode to export for a material blend type. Anything without a counterpart is exported
/// as `Modulate`.
pub fn apply_mode_from_blend_type(blend: &BlendType, diagnostics: &mut Diagnostics) -> ApplyMode {
    match blend {
        BlendType::Lighten => ApplyMode::Hilight,
        BlendType::Multiply => ApplyMode::Hilight2,
        BlendType::Mix => ApplyMode::Modulate,
        other => {
            diagnostics.warn(Warning::UnsupportedBlendType(other.to_string()));
            ApplyMode::Modulate
        }
    }
}

/// Whether an image is clamped along x and y.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageClamp {
    pub clamp_x: bool,
    pub clamp_y: bool,
}

impl From<TexClampMode> for ImageClamp {
    fn from(mode: TexClampMode) -> Self {
        let (clamp_x, clamp_y) = match mode {
            TexClampMode::ClampSClampT => (true, true),
            TexClampMode::ClampSWrapT => (true, false),
            TexClampMode::WrapSClampT => (false, true),
            TexClampMode::WrapSWrapT => (false, false),
        };
        ImageClamp { clamp_x, clamp_y }
    }
}

/// Image clamping for a raw shader clamp mode. Unknown modes wrap in both directions.
pub fn image_clamp_from_raw(raw: u32, diagnostics: &mut Diagnostics) -> ImageClamp {
    match TexClampMode::from_raw(raw) {
        Some(mode) => mode.into(),
        None => {
            diagnostics.warn(Warning::UnknownClampMode(raw));
            TexClampMode::WrapSWrapT.into()
        }
    }
}

/// A texture read from a file. Texturing property slots carry a UV set next to the source,
/// other blocks reference the source texture directly.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource<T> {
    Structured { source: T, uv_set: u32 },
    Bare(T),
}

impl<T> TextureSource<T> {
    pub fn source(&self) -> &T {
        match self {
            TextureSource::Structured { source, .. } | TextureSource::Bare(source) => source,
        }
    }

    /// Bare sources map through the first UV set.
    pub fn uv_set(&self) -> u32 {
        match self {
            TextureSource::Structured { uv_set, .. } => *uv_set,
            TextureSource::Bare(_) => 0,
        }
    }

    /// Name of the UV layer this texture maps through.
    pub fn uv_layer_name(&self) -> String {
        uv_layer_name(self.uv_set())
    }
}

/// UV layer names as the scene creates them: `UVMap`, `UVMap.001`, `UVMap.002`, ...
pub fn uv_layer_name(uv_set: u32) -> String {
    match uv_set {
        0 => "UVMap".to_owned(),
        n => format!("UVMap.{:03}", n),
    }
}
