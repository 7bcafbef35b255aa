use crate::blockchain::core::block::Block;
use crate::clock::{Clock, SystemClock};
use crate::error::ChainError;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub struct Blockchain {
    blocks: Vec<Block>,
    clock: Arc<dyn Clock>,
}

impl Clone for Blockchain {
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks.clone(),
            // Clones keep appending on the same time source.
            clock: Arc::clone(&self.clock),
        }
    }
}

impl fmt::Debug for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Blockchain").field("blocks", &self.blocks).finish_non_exhaustive()
    }
}

/// Two chains are equal when they hold the same blocks; the clock is ignored.
impl PartialEq for Blockchain {
    fn eq(&self, other: &Self) -> bool {
        self.blocks == other.blocks
    }
}

impl Eq for Blockchain {}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Payload of the block seeded at index 0.
    pub const GENESIS_DATA: &'static str = "Genesis Block";
    /// Reserved `previous_hash` of the genesis block. Never a real digest.
    pub const GENESIS_PREVIOUS_HASH: &'static str = "0";

    /// Create a new `Blockchain` stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a new `Blockchain` whose blocks are stamped by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let genesis = Self::create_genesis_block(clock.as_ref());
        debug!(hash = genesis.hash(), "created genesis block");
        Blockchain {
            blocks: vec![genesis],
            clock,
        }
    }

    /// Rebuild a chain from existing blocks, e.g. an imported export.
    ///
    /// The blocks are taken as-is; run [`Blockchain::validate`] before
    /// trusting them. Further appends use the system clock.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, ChainError> {
        if blocks.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        Ok(Blockchain {
            blocks,
            clock: Arc::new(SystemClock),
        })
    }

    fn create_genesis_block(clock: &dyn Clock) -> Block {
        Block::sealed(
            0,
            Self::GENESIS_PREVIOUS_HASH.to_string(),
            clock.now(),
            Self::GENESIS_DATA.to_string(),
        )
    }

    /// Seal `data` into a new block linked to the current tip and append it.
    ///
    /// The new index is the block's position, which is `latest().index() + 1`
    /// on any valid chain and never overflows on an imported one.
    pub fn append(&mut self, data: impl Into<String>) -> &Block {
        let index = self.blocks.len() as u64;
        let latest = self.latest();
        let block = Block::sealed(
            index,
            latest.hash().to_string(),
            self.clock.now(),
            data.into(),
        );
        debug!(index = block.index(), hash = block.hash(), "appended block");

        self.blocks.push(block);
        self.latest()
    }

    pub fn latest(&self) -> &Block {
        // `blocks` is seeded with the genesis block and never shrinks.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Number of blocks, genesis included. Always at least 1.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always `false`; present for parity with `len`.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }
}

impl<'a> IntoIterator for &'a Blockchain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
