//! Thread-safe handle around a [`Blockchain`]
//!
//! Appending reads the tip, derives the next block and pushes it. Two
//! appenders that both read the same tip would fork the chain, so
//! [`SharedBlockchain::append`] holds the write lock for the whole sequence.

use crate::blockchain::{Block, Blockchain, IntegrityViolation};
use crate::clock::Clock;
use crate::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct SharedBlockchain {
    inner: Arc<RwLock<Blockchain>>,
}

impl SharedBlockchain {
    pub fn new() -> Self {
        Self::from_chain(Blockchain::new())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::from_chain(Blockchain::with_clock(clock))
    }

    pub fn from_chain(chain: Blockchain) -> Self {
        Self {
            inner: Arc::new(RwLock::new(chain)),
        }
    }

    /// Append `data` and return a copy of the new block.
    pub fn append(&self, data: impl Into<String>) -> Block {
        let mut chain = self.inner.write();
        chain.append(data).clone()
    }

    pub fn latest(&self) -> Block {
        self.inner.read().latest().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Block> {
        self.inner.read().get(index).cloned()
    }

    pub fn validate(&self) -> std::result::Result<(), IntegrityViolation> {
        self.inner.read().validate()
    }

    pub fn to_json(&self) -> Result<String> {
        self.inner.read().to_json()
    }

    /// Point-in-time copy of the whole chain.
    pub fn snapshot(&self) -> Blockchain {
        self.inner.read().clone()
    }
}
