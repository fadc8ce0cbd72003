use crate::game::Game;

/// Errors that abort the texturing property or texture effect being exported. The registry is
/// rolled back to where it was before that export started.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Cannot export environment maps for game '{0}'")]
    EnvironmentMapUnsupported(Game),
    #[error("Image type texture has no file loaded ('{0}')")]
    NoImageLoaded(/*texture_name*/ String),
    #[error("Texture '{0}' must be of type IMAGE or ENVMAP")]
    UnsupportedTextureKind(/*texture_name*/ String),
}

/// Anomalies that don't stop an export. Each one is logged when it happens and kept in the
/// session's `Diagnostics` together with the fallback that was used.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("Exporting source texture without texture or filename (bug?).")]
    MissingTextureSource,
    #[error("Image in texture '{0}' has an empty file path, exporting an empty file name.")]
    EmptyImagePath(/*texture_name*/ String),
    #[error("Packed image in texture '{0}' ignored, exporting as '{1}' instead.")]
    PackedImageIgnored(/*texture_name*/ String, /*file_name*/ String),
    #[error("Bad uv layer name '{0}' in texture '{1}'. Using first uv layer")]
    BadUvLayer(/*uv_layer*/ String, /*texture_name*/ String),
    #[error("{0} does not reside in a 'Textures' folder; texture path will be stripped and textures may not display in-game")]
    NotInTexturesFolder(/*file_name*/ String),
    #[error("Cannot export reflection texture for game '{0}'.")]
    ReflectionUnsupported(Game),
    #[error("Unknown apply mode ({0}) in material, using blend type 'MIX'")]
    UnknownApplyMode(u32),
    #[error("Unsupported blend type ({0}) in material, using apply mode APPLY_MODULATE")]
    UnsupportedBlendType(String),
    #[error("Unknown texture clamp mode ({0}), wrapping in both directions")]
    UnknownClampMode(u32),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Unknown game identifier \"{0}\".")]
pub struct UnknownGame(pub String);

/// Collects the warnings of an export session in the order they were emitted.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        log::warn!(target: "nif_export", "{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Forgets every warning after the first `len`. They stay in the log.
    pub fn truncate(&mut self, len: usize) {
        self.warnings.truncate(len);
    }
}
