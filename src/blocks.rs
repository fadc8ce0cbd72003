//! Plain records for the NIF blocks this crate fills in. Field names follow the NIF block layout;
//! references to other blocks are `BlockId`s handed out by the `BlockStore`.

use crate::{parsers::version::NifVersion, registry::BlockId, scene::TextureRole};
use std::hash::{Hash, Hasher};

/// How the pixels of a source texture are laid out in memory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    Palettized = 5,
    Compressed = 6,
}

impl PixelLayout {
    /// Newer files (10.0.1.0 and up) use the DXT compressed layout.
    pub fn for_version(version: NifVersion) -> Self {
        if version.uses_dxt_pixel_layout() {
            PixelLayout::Compressed
        } else {
            PixelLayout::Palettized
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AlphaFormat {
    None = 0,
    Binary = 1,
    Smooth = 2,
    Default = 3,
}

impl AlphaFormat {
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// `NiSourceTexture`: an image file referenced by one or more texture descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceTexture {
    pub file_name: String,
    pub use_external: bool,
    pub pixel_layout: PixelLayout,
    pub use_mipmaps: bool,
    pub alpha_format: AlphaFormat,
}

impl SourceTexture {
    /// An external texture with the default settings used for every exported source texture.
    pub fn external<S: Into<String>>(file_name: S, version: NifVersion) -> Self {
        SourceTexture {
            file_name: file_name.into(),
            use_external: true,
            pixel_layout: PixelLayout::for_version(version),
            use_mipmaps: true,
            alpha_format: AlphaFormat::Default,
        }
    }
}

/// `TexDesc`: one occupied texture slot of a texturing property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TexDesc {
    pub source: BlockId,
    pub uv_set: u32,
}

/// `ShaderTexDesc`: an entry of the extra shader texture list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShaderTexDesc {
    pub is_used: bool,
    pub map_index: u32,
    pub source: Option<BlockId>,
}

impl ShaderTexDesc {
    pub fn unused(map_index: u32) -> Self {
        ShaderTexDesc {
            is_used: false,
            map_index,
            source: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Hash for Vector3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_floats(&[self.x, self.y, self.z], state);
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix22 {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
}

impl Matrix22 {
    pub fn identity() -> Self {
        Matrix22 {
            m11: 1.0,
            m12: 0.0,
            m21: 0.0,
            m22: 1.0,
        }
    }
}

impl Hash for Matrix22 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_floats(&[self.m11, self.m12, self.m21, self.m22], state);
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix33(pub [[f32; 3]; 3]);

impl Matrix33 {
    pub fn identity() -> Self {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Matrix33(m)
    }
}

impl Hash for Matrix33 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for row in self.0.iter() {
            hash_floats(row, state);
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix44(pub [[f32; 4]; 4]);

impl Matrix44 {
    pub fn identity() -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Matrix44(m)
    }
}

impl Hash for Matrix44 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for row in self.0.iter() {
            hash_floats(row, state);
        }
    }
}

/// Floats are hashed by their bit pattern, so `0.0` and `-0.0` hash differently even though they
/// compare equal. Blocks that only differ like that are stored twice, never merged wrongly.
fn hash_floats<H: Hasher>(values: &[f32], state: &mut H) {
    for v in values {
        v.to_bits().hash(state);
    }
}

/// How a texturing property combines its textures with the vertex colors and lighting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ApplyMode {
    Replace = 0,
    Decal = 1,
    Modulate = 2,
    Hilight = 3,
    /// Used by Oblivion for parallax.
    Hilight2 = 4,
}

impl ApplyMode {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(ApplyMode::Replace),
            1 => Some(ApplyMode::Decal),
            2 => Some(ApplyMode::Modulate),
            3 => Some(ApplyMode::Hilight),
            4 => Some(ApplyMode::Hilight2),
            _ => None,
        }
    }
}

impl Default for ApplyMode {
    fn default() -> Self {
        ApplyMode::Modulate
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TexFilterMode {
    Nearest = 0,
    Bilerp = 1,
    Trilerp = 2,
    NearestMipNearest = 3,
    NearestMipLerp = 4,
    BilerpMipNearest = 5,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TexClampMode {
    ClampSClampT = 0,
    ClampSWrapT = 1,
    WrapSClampT = 2,
    WrapSWrapT = 3,
}

impl TexClampMode {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(TexClampMode::ClampSClampT),
            1 => Some(TexClampMode::ClampSWrapT),
            2 => Some(TexClampMode::WrapSClampT),
            3 => Some(TexClampMode::WrapSWrapT),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EffectType {
    ProjectedLight = 0,
    ProjectedShadow = 1,
    EnvironmentMap = 2,
    FogMap = 3,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CoordGenType {
    WorldParallel = 0,
    WorldPerspective = 1,
    SphereMap = 2,
    SpecularCubeMap = 3,
    DiffuseCubeMap = 4,
}

/// The bump map slot carries its own luma and transform settings.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BumpMap {
    pub texture: TexDesc,
    pub luma_scale: f32,
    pub luma_offset: f32,
    pub matrix: Matrix22,
}

impl BumpMap {
    pub fn new(texture: TexDesc) -> Self {
        BumpMap {
            texture,
            luma_scale: 1.0,
            luma_offset: 0.0,
            matrix: Matrix22::identity(),
        }
    }
}

impl Hash for BumpMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.texture.hash(state);
        hash_floats(&[self.luma_scale, self.luma_offset], state);
        self.matrix.hash(state);
    }
}

/// `NiTexturingProperty`.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct TexturingProperty {
    pub flags: u16,
    pub apply_mode: ApplyMode,
    pub texture_count: u32,
    pub base_texture: Option<TexDesc>,
    pub dark_texture: Option<TexDesc>,
    pub detail_texture: Option<TexDesc>,
    pub gloss_texture: Option<TexDesc>,
    pub glow_texture: Option<TexDesc>,
    pub bump_map: Option<BumpMap>,
    pub shader_textures: Vec<ShaderTexDesc>,
}

impl TexturingProperty {
    pub const TEXTURE_COUNT: u32 = 7;

    pub fn new(flags: u16, apply_mode: ApplyMode) -> Self {
        TexturingProperty {
            flags,
            apply_mode,
            texture_count: Self::TEXTURE_COUNT,
            base_texture: None,
            dark_texture: None,
            detail_texture: None,
            gloss_texture: None,
            glow_texture: None,
            bump_map: None,
            shader_textures: Vec::new(),
        }
    }

    pub fn has_base_texture(&self) -> bool {
        self.base_texture.is_some()
    }

    pub fn has_bump_map_texture(&self) -> bool {
        self.bump_map.is_some()
    }

    pub fn has_gloss_texture(&self) -> bool {
        self.gloss_texture.is_some()
    }

    /// The regular slot a role is stored in. Bump maps live in `bump_map`, and normal and
    /// reflection textures only ever go to the shader texture list, so those return `None`.
    pub fn slot_mut(&mut self, role: TextureRole) -> Option<&mut Option<TexDesc>> {
        match role {
            TextureRole::Base => Some(&mut self.base_texture),
            TextureRole::Dark => Some(&mut self.dark_texture),
            TextureRole::Detail => Some(&mut self.detail_texture),
            TextureRole::Gloss => Some(&mut self.gloss_texture),
            TextureRole::Glow => Some(&mut self.glow_texture),
            TextureRole::Bump | TextureRole::Normal | TextureRole::Reflection => None,
        }
    }

    /// Descriptor stored for `role` in the regular slots, bump map included.
    pub fn texture(&self, role: TextureRole) -> Option<&TexDesc> {
        match role {
            TextureRole::Base => self.base_texture.as_ref(),
            TextureRole::Dark => self.dark_texture.as_ref(),
            TextureRole::Detail => self.detail_texture.as_ref(),
            TextureRole::Gloss => self.gloss_texture.as_ref(),
            TextureRole::Glow => self.glow_texture.as_ref(),
            TextureRole::Bump => self.bump_map.as_ref().map(|bump| &bump.texture),
            TextureRole::Normal | TextureRole::Reflection => None,
        }
    }

    /// Returns the shader texture at `index`, growing the list with unused entries if the game's
    /// layout didn't allocate that many.
    pub fn shader_texture_mut(&mut self, index: usize) -> &mut ShaderTexDesc {
        while self.shader_textures.len() <= index {
            let map_index = self.shader_textures.len() as u32;
            self.shader_textures.push(ShaderTexDesc::unused(map_index));
        }
        &mut self.shader_textures[index]
    }
}

/// `NiTextureEffect`. Only environment map effects are exported.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureEffect {
    pub flags: u16,
    pub rotation: Matrix33,
    pub translation: Vector3,
    pub scale: f32,
    pub model_projection_matrix: Matrix44,
    pub texture_filtering: TexFilterMode,
    pub texture_clamping: TexClampMode,
    pub texture_type: EffectType,
    pub coordinate_generation_type: CoordGenType,
    pub source_texture: Option<BlockId>,
    pub num_affected_node_list_pointers: u32,
    pub unknown_vector: Vector3,
}

impl TextureEffect {
    pub fn environment_map() -> Self {
        TextureEffect {
            flags: 4,
            rotation: Matrix33::identity(),
            translation: Vector3 {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            scale: 1.0,
            model_projection_matrix: Matrix44::identity(),
            texture_filtering: TexFilterMode::Trilerp,
            texture_clamping: TexClampMode::WrapSWrapT,
            texture_type: EffectType::EnvironmentMap,
            coordinate_generation_type: CoordGenType::SphereMap,
            source_texture: None,
            num_affected_node_list_pointers: 0,
            unknown_vector: Vector3 {
                x: 1.0,
                y: 0.0,
                z: 0.0,
            },
        }
    }
}

impl Hash for TextureEffect {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.flags.hash(state);
        self.rotation.hash(state);
        self.translation.hash(state);
        hash_floats(&[self.scale], state);
        self.model_projection_matrix.hash(state);
        self.texture_filtering.hash(state);
        self.texture_clamping.hash(state);
        self.texture_type.hash(state);
        self.coordinate_generation_type.hash(state);
        self.source_texture.hash(state);
        self.num_affected_node_list_pointers.hash(state);
        self.unknown_vector.hash(state);
    }
}

/// Every block kind the registry can hold.
#[derive(Debug, Clone, PartialEq, Hash)]
pub enum Block {
    SourceTexture(SourceTexture),
    TexturingProperty(TexturingProperty),
    TextureEffect(TextureEffect),
}

impl Block {
    /// The NIF type name of the block.
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::SourceTexture(_) => "NiSourceTexture",
            Block::TexturingProperty(_) => "NiTexturingProperty",
            Block::TextureEffect(_) => "NiTextureEffect",
        }
    }

    pub fn is_same_kind(&self, other: &Block) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<SourceTexture> for Block {
    fn from(block: SourceTexture) -> Self {
        Block::SourceTexture(block)
    }
}

impl From<TexturingProperty> for Block {
    fn from(block: TexturingProperty) -> Self {
        Block::TexturingProperty(block)
    }
}

impl From<TextureEffect> for Block {
    fn from(block: TextureEffect) -> Self {
        Block::TextureEffect(block)
    }
}
