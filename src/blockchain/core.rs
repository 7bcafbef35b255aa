// core.rs splits the chain into the block value, the owning sequence and the
// integrity walk over it.
pub mod block;
pub mod chain;
pub mod validation;

pub use block::*;
pub use chain::*;
pub use validation::*;
