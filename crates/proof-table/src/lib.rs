//! # Proof Table Library
//!
//! In-memory store for precomputed Merkle proofs keyed by wallet address.
//! Covers:
//! - the on-disk JSON layout (`rootHash` plus a list of wallets)
//! - loading that document from a file
//! - case-insensitive, first-match-wins address lookup

pub mod index;
pub mod loader;
pub mod types;

pub use index::ProofIndex;
pub use loader::LoadError;
pub use types::*;
