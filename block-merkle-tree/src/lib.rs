//! Binary Merkle tree over an ordered collection of data blocks.
//!
//! Every block is serialized through the [`DataBlock`] capability and hashed
//! into a leaf. Adjacent nodes are paired left-to-right and hashed as
//! `H(left || right)` until a single root remains. An odd trailing node is
//! either paired with itself (the default) or promoted unchanged to the next
//! level (`no_duplicates`).
//!
//! # Core types
//!
//! - [`MerkleTree`] — the immutable build result (root, proofs, levels).
//! - [`Proof`] — ordered sibling path from a leaf to the root.
//! - [`Config`] / [`ResolvedConfig`] — build options and their defaults.
//! - [`HashFunc`] — injectable, fallible hash function (SHA-256 default).
//!
//! # Verification
//!
//! - [`MerkleTree::verify`] — against the tree's own root and hash function.
//! - [`verify`] — against an externally supplied root and hash function.

#![warn(missing_docs)]

mod block;
mod config;
mod error;
pub(crate) mod hash;
pub(crate) mod level;
pub(crate) mod proof;
pub(crate) mod scheduler;
pub(crate) mod tree;
mod verify;

#[cfg(test)]
pub(crate) mod test_utils;

pub use block::DataBlock;
pub use config::{Config, Mode, ResolvedConfig};
pub use error::{HashError, MerkleTreeError, Result, SerializationError};
pub use hash::HashFunc;
pub use proof::{Proof, Sibling, Side};
pub use tree::MerkleTree;
pub use verify::verify;
