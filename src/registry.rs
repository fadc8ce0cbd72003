use crate::blocks::{Block, SourceTexture, TextureEffect, TexturingProperty};
use linked_hash_map::LinkedHashMap;
use std::{
    collections::hash_map::DefaultHasher,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};

/// Handle to a block in a `BlockStore`. Ids are handed out in registration order, which is the
/// order the blocks are written to the file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub usize);

impl Display for BlockId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Block kinds that are shared between every user with identical content. Texture effects are
/// deliberately not `Shareable`: each call site gets its own.
pub trait Shareable: Into<Block> {}

impl Shareable for SourceTexture {}
impl Shareable for TexturingProperty {}

#[derive(Debug)]
struct Entry {
    hash: u64,
    block: Block,
    /// Name of the scene object the block was exported from, if any.
    origin: Option<String>,
}

/// Marks a point in the registration history that the store can be rolled back to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    len: usize,
    next_id: usize,
}

/// The blocks exported so far in one export run.
#[derive(Debug, Default)]
pub struct BlockStore {
    // registration order is the order blocks are written in
    blocks: LinkedHashMap<BlockId, Entry>,
    next_id: usize,
}

fn structural_hash(block: &Block) -> u64 {
    let mut hasher = DefaultHasher::new();
    block.hash(&mut hasher);
    hasher.finish()
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first registered block of the same kind with identical content, or registers
    /// `block` if there is none. Hashes only narrow the search, the blocks are compared field by
    /// field before being merged.
    pub fn find_or_register<B: Shareable>(&mut self, block: B, origin: Option<&str>) -> BlockId {
        let block = block.into();
        let hash = structural_hash(&block);

        let existing = self
            .blocks
            .iter()
            .find(|(_, entry)| {
                entry.hash == hash && entry.block.is_same_kind(&block) && entry.block == block
            })
            .map(|(id, _)| *id);

        match existing {
            Some(id) => {
                log::trace!(target: "nif_export", "reusing {} {}", block.type_name(), id);
                id
            }
            None => self.insert(block, hash, origin),
        }
    }

    /// Registers `block` without looking for duplicates.
    pub fn register_always<B: Into<Block>>(&mut self, block: B, origin: Option<&str>) -> BlockId {
        let block = block.into();
        let hash = structural_hash(&block);
        self.insert(block, hash, origin)
    }

    fn insert(&mut self, block: Block, hash: u64, origin: Option<&str>) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;

        log::debug!(target: "nif_export", "registering {} {}", block.type_name(), id);

        self.blocks.insert(
            id,
            Entry {
                hash,
                block,
                origin: origin.map(str::to_owned),
            },
        );
        id
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id).map(|entry| &entry.block)
    }

    pub fn source_texture(&self, id: BlockId) -> Option<&SourceTexture> {
        match self.get(id) {
            Some(Block::SourceTexture(block)) => Some(block),
            _ => None,
        }
    }

    pub fn texturing_property(&self, id: BlockId) -> Option<&TexturingProperty> {
        match self.get(id) {
            Some(Block::TexturingProperty(block)) => Some(block),
            _ => None,
        }
    }

    pub fn texture_effect(&self, id: BlockId) -> Option<&TextureEffect> {
        match self.get(id) {
            Some(Block::TextureEffect(block)) => Some(block),
            _ => None,
        }
    }

    /// Name of the scene object `id` was exported from.
    pub fn origin(&self, id: BlockId) -> Option<&str> {
        self.blocks.get(&id).and_then(|entry| entry.origin.as_deref())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks.iter().map(|(id, entry)| (*id, &entry.block))
    }

    /// Forgets every block. Ids start from zero again.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.next_id = 0;
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            len: self.blocks.len(),
            next_id: self.next_id,
        }
    }

    /// Drops every block registered after `checkpoint` was taken.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        while self.blocks.len() > checkpoint.len {
            if let Some((id, entry)) = self.blocks.pop_back() {
                log::debug!(target: "nif_export", "dropping {} {}", entry.block.type_name(), id);
            }
        }
        self.next_id = checkpoint.next_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        blocks::{ApplyMode, TextureEffect},
        parsers::version::NifVersion,
    };

    fn source(name: &str) -> SourceTexture {
        SourceTexture::external(name, NifVersion(0x1400_0005))
    }

    #[test]
    fn identical_blocks_are_shared() {
        let mut store = BlockStore::new();
        let a = store.find_or_register(source("stone.dds"), None);
        let b = store.find_or_register(source("stone.dds"), Some("Cube"));

        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
        assert_eq!(store.origin(a), None);
    }

    #[test]
    fn distinct_blocks_are_kept_apart() {
        let mut store = BlockStore::new();
        let a = store.find_or_register(source("stone.dds"), None);
        let b = store.find_or_register(source("wood.dds"), None);
        let c = store.find_or_register(TexturingProperty::new(1, ApplyMode::Modulate), None);
        let d = store.find_or_register(TexturingProperty::new(1, ApplyMode::Replace), None);

        assert_eq!(store.len(), 4);
        assert_eq!(
            store.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            vec![a, b, c, d]
        );
    }

    #[test]
    fn hash_collisions_are_not_merged() {
        let mut store = BlockStore::new();
        let wood = source("wood.dds");
        let stone = source("stone.dds");

        // Pretend stone hashes like wood.
        let forged = store.insert(stone.into(), structural_hash(&wood.clone().into()), None);
        let registered = store.find_or_register(wood, None);

        assert_ne!(forged, registered);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn effects_are_always_registered() {
        let mut store = BlockStore::new();
        let a = store.register_always(TextureEffect::environment_map(), None);
        let b = store.register_always(TextureEffect::environment_map(), None);

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert!(store.texture_effect(a).is_some());
        assert!(store.source_texture(a).is_none());
    }

    #[test]
    fn rollback_drops_later_blocks() {
        let mut store = BlockStore::new();
        let kept = store.find_or_register(source("stone.dds"), Some("Rock"));
        let checkpoint = store.checkpoint();
        store.find_or_register(source("wood.dds"), None);
        store.register_always(TextureEffect::environment_map(), None);

        store.rollback(checkpoint);

        assert_eq!(store.len(), 1);
        assert_eq!(store.origin(kept), Some("Rock"));
        assert_eq!(store.find_or_register(source("wood.dds"), None), BlockId(1));
    }

    #[test]
    fn clear_starts_a_new_run() {
        let mut store = BlockStore::new();
        store.find_or_register(source("stone.dds"), None);
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.find_or_register(source("stone.dds"), None), BlockId(0));
    }
}
