//! What the exporter needs to know about the scene: which textures a material binds to which
//! role, and which UV layers the mesh has.

use linked_hash_map::LinkedHashMap;

/// The material texture roles a texturing property knows about.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureRole {
    Base,
    Glow,
    Bump,
    Normal,
    Gloss,
    Dark,
    Detail,
    Reflection,
}

impl TextureRole {
    /// The order texture slots are exported in.
    pub const ALL: [TextureRole; 8] = [
        TextureRole::Base,
        TextureRole::Glow,
        TextureRole::Bump,
        TextureRole::Normal,
        TextureRole::Gloss,
        TextureRole::Dark,
        TextureRole::Detail,
        TextureRole::Reflection,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Path of the image file, as stored by the scene.
    pub filepath: String,
    /// Whether the pixels are also packed into the scene file.
    pub packed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextureKind {
    /// An image texture. `None` if no file is loaded.
    Image(Option<Image>),
    EnvironmentMap,
    /// Any other texture type (procedural, video, ...), named by the scene.
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub name: String,
    pub kind: TextureKind,
}

impl Texture {
    pub fn image<N: Into<String>, P: Into<String>>(name: N, filepath: P) -> Self {
        Texture {
            name: name.into(),
            kind: TextureKind::Image(Some(Image {
                filepath: filepath.into(),
                packed: false,
            })),
        }
    }

    pub fn environment_map<N: Into<String>>(name: N) -> Self {
        Texture {
            name: name.into(),
            kind: TextureKind::EnvironmentMap,
        }
    }
}

/// A texture bound to a material, with the UV layer it is mapped through.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureSlot {
    pub texture: Texture,
    /// `None` maps through the first UV layer.
    pub uv_layer: Option<String>,
}

impl TextureSlot {
    pub fn new(texture: Texture) -> Self {
        TextureSlot {
            texture,
            uv_layer: None,
        }
    }

    pub fn with_uv_layer<S: Into<String>>(mut self, uv_layer: S) -> Self {
        self.uv_layer = Some(uv_layer.into());
        self
    }
}

/// The texture slots of one material, keyed by role.
#[derive(Debug, Clone, Default)]
pub struct MaterialTextures {
    slots: LinkedHashMap<TextureRole, TextureSlot>,
}

impl MaterialTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: TextureRole, slot: TextureSlot) -> Self {
        self.insert(role, slot);
        self
    }

    /// Binds `slot` to `role`, returning the slot it replaced. A rebound role moves to the end.
    pub fn insert(&mut self, role: TextureRole, slot: TextureSlot) -> Option<TextureSlot> {
        self.slots.insert(role, slot)
    }

    pub fn get(&self, role: TextureRole) -> Option<&TextureSlot> {
        self.slots.get(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bound roles, least recently bound first.
    pub fn roles(&self) -> impl Iterator<Item = TextureRole> + '_ {
        self.slots.keys().copied()
    }
}
