//! Texture export: source textures and texture descriptors (`writer`), texturing properties
//! and texture effects (`property`). Both extend `ExportSession`.

pub mod property;
pub mod writer;

pub use writer::{base_name, MORROWIND_ENVIRONMENT_MAP};
