//! hashchain - an append-only, tamper-evident chain of SHA-256 linked blocks
//!
//! # Architecture
//!
//! The crate is organized into logical modules:
//!
//! ## Core Blockchain
//! - [`blockchain`] - Block identity, the owning chain and integrity validation
//!
//! ## Cryptography & Time
//! - [`crypto`] - SHA-256 hex digests
//! - [`clock`] - Timestamp sources for new blocks
//!
//! ## Integration
//! - [`export`] - JSON export/import of a chain
//! - [`shared`] - Thread-safe chain handle
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```
//! use hashchain::blockchain::Blockchain;
//!
//! let mut chain = Blockchain::new();
//! chain.append("Block 1 Data");
//! chain.append("Block 2 Data");
//!
//! assert_eq!(chain.len(), 3);
//! assert!(chain.validate().is_ok());
//! ```

#![forbid(unsafe_code)]

// ============================================================================
// Core Blockchain
// ============================================================================
pub mod blockchain;

// ============================================================================
// Cryptography & Time
// ============================================================================
pub mod clock;
pub mod crypto;

// ============================================================================
// Integration
// ============================================================================
pub mod export;
pub mod shared;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;
