use crate::crypto::sha256_hex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash of a block's identifying fields: SHA-256 over the decimal index
/// followed by `previous_hash`, `timestamp` and `data`, with no separators,
/// rendered as lowercase hex.
///
/// The exact byte layout is part of a block's identity. Changing how any
/// field is rendered changes the hash of every block.
pub fn derive_hash(index: u64, previous_hash: &str, timestamp: &str, data: &str) -> String {
    let index = index.to_string();
    sha256_hex(&[
        index.as_bytes(),
        previous_hash.as_bytes(),
        timestamp.as_bytes(),
        data.as_bytes(),
    ])
}

/// A single immutable record of the chain.
///
/// Fields serialize in declaration order, which is also the export key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    previous_hash: String,
    timestamp: String,
    data: String,
    hash: String,
}

impl Block {
    /// Assembles a block from its parts. Nothing is checked here: a block
    /// built with a wrong `hash` is representable and is caught by
    /// [`Blockchain::validate`](crate::blockchain::Blockchain::validate).
    pub fn new(
        index: u64,
        previous_hash: impl Into<String>,
        timestamp: impl Into<String>,
        data: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Block {
            index,
            previous_hash: previous_hash.into(),
            timestamp: timestamp.into(),
            data: data.into(),
            hash: hash.into(),
        }
    }

    /// Builds a block whose `hash` is derived from the other fields.
    pub(crate) fn sealed(index: u64, previous_hash: String, timestamp: String, data: String) -> Self {
        let hash = derive_hash(index, &previous_hash, &timestamp, &data);
        Block {
            index,
            previous_hash,
            timestamp,
            data,
            hash,
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The caller-supplied payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Recomputes the hash from the stored fields.
    pub fn compute_hash(&self) -> String {
        derive_hash(self.index, &self.previous_hash, &self.timestamp, &self.data)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Block(Index: {}, Previous Hash: {}, Timestamp: {}, Data: {}, Hash: {})",
            self.index, self.previous_hash, self.timestamp, self.data, self.hash
        )
    }
}
