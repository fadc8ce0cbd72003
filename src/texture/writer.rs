use crate::{
    blocks::{SourceTexture, TexDesc},
    error::{FormatError, Warning},
    registry::BlockId,
    scene::{Texture, TextureKind, TextureSlot},
    session::ExportSession,
};
use std::path::Path;

/// The only environment map Morrowind can reference.
pub const MORROWIND_ENVIRONMENT_MAP: &str = "enviro 01.TGA";

/// The file name part of `path`, whichever separator it was written with.
pub fn base_name(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}

/// Replaces or appends the extension of the file name only, so dots in folder names survive
/// whichever separator the path uses.
fn with_dds_extension(path: &str) -> String {
    let name = base_name(path);
    let folder = &path[..path.len() - name.len()];
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    format!("{}{}.dds", folder, stem)
}

impl ExportSession {
    /// Exports a `NiSourceTexture` for `texture`, or for `filename` if one is given (default
    /// engine textures have no counterpart in the scene). A source texture identical to one
    /// already exported is reused.
    pub fn build_source_texture(
        &mut self,
        texture: Option<&Texture>,
        filename: Option<&str>,
    ) -> Result<BlockId, FormatError> {
        let file_name = match (filename, texture) {
            (Some(""), Some(texture)) => {
                self.warn(Warning::EmptyImagePath(texture.name.clone()));
                String::new()
            }
            (Some(""), None) | (None, None) => {
                self.warn(Warning::MissingTextureSource);
                String::new()
            }
            (Some(filename), _) => filename.to_owned(),
            (None, Some(texture)) => self.export_texture_filename(texture)?,
        };

        let source = SourceTexture::external(file_name, self.options().nif_version);
        let origin = texture.map(|texture| texture.name.as_str());
        Ok(self.store.find_or_register(source, origin))
    }

    /// The file name a NIF should reference for `texture`.
    pub fn export_texture_filename(&mut self, texture: &Texture) -> Result<String, FormatError> {
        let game = self.options().game;

        let image = match &texture.kind {
            TextureKind::EnvironmentMap if game.supports_environment_maps() => {
                return Ok(MORROWIND_ENVIRONMENT_MAP.to_owned())
            }
            TextureKind::EnvironmentMap => {
                return Err(FormatError::EnvironmentMapUnsupported(game))
            }
            TextureKind::Image(Some(image)) => image,
            TextureKind::Image(None) => {
                return Err(FormatError::NoImageLoaded(texture.name.clone()))
            }
            TextureKind::Other(_) => {
                return Err(FormatError::UnsupportedTextureKind(texture.name.clone()))
            }
        };

        // images generated in the scene and never saved have no path
        if image.filepath.is_empty() {
            self.warn(Warning::EmptyImagePath(texture.name.clone()));
            return Ok(String::new());
        }

        let mut filename = image.filepath.clone();

        if image.packed {
            self.warn(Warning::PackedImageIgnored(
                texture.name.clone(),
                filename.clone(),
            ));
        }

        let dds = with_dds_extension(&filename);
        if self.options().force_dds || Path::new(&dds).exists() {
            filename = dds;
        }

        let filename = if game.keeps_texture_folder() {
            // strip the data files prefix
            let lowered = filename.to_lowercase();
            match lowered.find("textures") {
                Some(idx) => lowered[idx..].to_owned(),
                None => {
                    let stripped = base_name(&lowered).to_owned();
                    self.warn(Warning::NotInTexturesFolder(lowered));
                    stripped
                }
            }
        } else {
            base_name(&filename).to_owned()
        };

        Ok(filename.replace('/', "\\"))
    }

    /// Fills a texture descriptor for `slot`: the UV set it maps through and its source texture.
    pub fn resolve_tex_desc<S: AsRef<str>>(
        &mut self,
        slot: &TextureSlot,
        uv_layers: &[S],
    ) -> Result<TexDesc, FormatError> {
        let uv_set = match slot.uv_layer.as_deref() {
            None | Some("") => 0,
            Some(layer) => match uv_layers.iter().position(|l| l.as_ref() == layer) {
                Some(idx) => idx as u32,
                None => {
                    self.warn(Warning::BadUvLayer(
                        layer.to_owned(),
                        slot.texture.name.clone(),
                    ));
                    0
                }
            },
        };

        let source = self.build_source_texture(Some(&slot.texture), None)?;

        Ok(TexDesc { source, uv_set })
    }
}
