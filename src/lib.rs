//! # nif_export - Texture and property blocks for NIF files
//!
//! ## Example
//!
//! ```
//! use nif_export::{
//!     ApplyMode, ExportOptions, ExportSession, Game, MaterialTextures, Texture, TextureRole,
//!     TextureSlot,
//! };
//!
//! let mut session = ExportSession::new(ExportOptions::new(Game::Oblivion));
//!
//! let material = MaterialTextures::new()
//!     .with(
//!         TextureRole::Base,
//!         TextureSlot::new(Texture::image("Wood", "C:/Data/Textures/Wood/plank.tga")),
//!     )
//!     .with(
//!         TextureRole::Bump,
//!         TextureSlot::new(Texture::image("Bumps", "C:/Data/Textures/Wood/plank_b.tga")),
//!     );
//!
//! let id = session
//!     .compose_texturing_property(1, ApplyMode::Modulate, &material, &["UVMap"], Some("Crate"))
//!     .unwrap();
//!
//! let property = session.store().texturing_property(id).unwrap();
//! assert!(property.has_base_texture());
//! assert!(property.has_bump_map_texture());
//! ```
//!
//! ## The NIF file
//!
//! A NIF file is a flat list of typed blocks that reference each other by index. A mesh that is
//! drawn with a texture points at a `NiTexturingProperty`, which describes which textures fill
//! which material role (base, dark, detail, gloss, glow, bump map, ...), and each of those slots
//! points at a `NiSourceTexture` naming the image file. Some games also read an extra list of
//! "shader textures" from the texturing property, with a layout that changes from game to game.
//!
//! Because blocks are referenced by index, the same source texture or texturing property can be
//! used by any number of meshes. Writing each one only once keeps files small, and some engines
//! rely on it.
//!
//! ## This crate
//!
//! This crate turns the texture setup of a scene material into those blocks. It does not read or
//! write the binary file: blocks are plain Rust records (see `blocks`) collected in a `BlockStore`
//! in the order they should be written, ready for whatever NIF writer is used.
//!
//! Everything happens through an `ExportSession`, created once per export with the
//! `ExportOptions` for the target game:
//!
//! * `ExportSession::build_source_texture` resolves the file name a game expects for an image and
//!   exports a `NiSourceTexture`.
//! * `ExportSession::compose_texturing_property` exports the `NiTexturingProperty` of a material,
//!   routing each texture role to the slot the game reads it from.
//! * `ExportSession::compose_texture_effect` exports a `NiTextureEffect` for an environment map.
//!
//! Source textures and texturing properties are shared: asking for a block identical to one that
//! was already exported returns the existing `BlockId`. Texture effects are never shared.
//!
//! ### Errors and warnings
//!
//! Textures that can't be exported at all (no image loaded, unsupported texture types,
//! environment maps for games that can't use them) return a `FormatError`, and the composition
//! that ran into them leaves no blocks behind. Problems the exporter can work around, like an
//! unknown UV layer or a texture outside a `Textures` folder, are logged through the `log` crate
//! and collected as `Warning`s in the session.
//!
//! ### Supported games
//!
//! Texture paths are kept relative to the data folder for Morrowind, Oblivion, Fallout 3 and
//! Skyrim, and reduced to the bare file name for every other game. Sid Meier's Railroads and
//! Civilization IV use the extra shader texture list; which games route bump, gloss and
//! reflection textures there can be changed through `ExportOptions::with_extra_shader_games`.

pub mod blocks;
pub mod error;
pub mod game;
pub mod material;
pub mod options;
pub mod parsers;
pub mod registry;
pub mod scene;
pub mod session;
pub mod texture;

pub use blocks::{ApplyMode, Block, SourceTexture, TexDesc, TextureEffect, TexturingProperty};
pub use error::{Diagnostics, FormatError, Warning};
pub use game::Game;
pub use options::ExportOptions;
pub use parsers::version::NifVersion;
pub use registry::{BlockId, BlockStore};
pub use scene::{MaterialTextures, Texture, TextureRole, TextureSlot};
pub use session::ExportSession;
