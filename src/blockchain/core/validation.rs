use crate::blockchain::core::block::Block;
use crate::blockchain::core::chain::Blockchain;
use tracing::warn;

/// The first broken invariant found while walking a chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityViolation {
    /// Stored hash differs from the hash recomputed over the block's fields.
    #[error("Invalid hash at block {index}: expected {expected}, found {found}")]
    HashMismatch {
        index: u64,
        expected: String,
        found: String,
    },
    /// `previous_hash` does not point at the preceding block (or, for the
    /// genesis block, is not the reserved sentinel).
    #[error("Invalid previous hash at block {index}: expected {expected}, found {found}")]
    LinkMismatch {
        index: u64,
        expected: String,
        found: String,
    },
    /// The block at `position` claims a different index.
    #[error("Invalid index at position {position}: found {found}")]
    IndexMismatch { position: usize, found: u64 },
}

impl IntegrityViolation {
    /// Position in the chain of the offending block.
    pub fn position(&self) -> usize {
        match self {
            IntegrityViolation::HashMismatch { index, .. }
            | IntegrityViolation::LinkMismatch { index, .. } => *index as usize,
            IntegrityViolation::IndexMismatch { position, .. } => *position,
        }
    }
}

/// Check a single block against its expected position and predecessor hash.
///
/// Order of checks: hash, link, index. Only the first failure is reported.
fn check_block(position: usize, block: &Block, expected_previous: &str) -> Result<(), IntegrityViolation> {
    let expected = block.compute_hash();
    if expected != block.hash() {
        return Err(IntegrityViolation::HashMismatch {
            index: position as u64,
            expected,
            found: block.hash().to_string(),
        });
    }

    if block.previous_hash() != expected_previous {
        return Err(IntegrityViolation::LinkMismatch {
            index: position as u64,
            expected: expected_previous.to_string(),
            found: block.previous_hash().to_string(),
        });
    }

    if block.index() != position as u64 {
        return Err(IntegrityViolation::IndexMismatch {
            position,
            found: block.index(),
        });
    }

    Ok(())
}

/// Walk `blocks` from the genesis block up, stopping at the first violation.
pub fn validate_blocks(blocks: &[Block]) -> Result<(), IntegrityViolation> {
    let mut expected_previous = Blockchain::GENESIS_PREVIOUS_HASH;
    for (position, block) in blocks.iter().enumerate() {
        check_block(position, block, expected_previous)?;
        expected_previous = block.hash();
    }
    Ok(())
}

impl Blockchain {
    /// Verify every block's hash, link and index, the genesis block included.
    ///
    /// The genesis block must hash correctly, carry the `"0"` sentinel as its
    /// previous hash and sit at index 0, so an edited genesis payload is
    /// reported at position 0 rather than accepted.
    pub fn validate(&self) -> Result<(), IntegrityViolation> {
        validate_blocks(self.blocks()).inspect_err(|violation| {
            warn!(position = violation.position(), "{}", violation);
        })
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
