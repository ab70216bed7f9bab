//! Proof verification.
//!
//! Needs no tree: the block is serialized and hashed into a candidate leaf,
//! the proof is folded from leaf to root, and the result is compared with
//! the expected root. A mismatch is `Ok(false)`; only serialization and hash
//! failures are errors.

use tracing::trace;

use crate::{DataBlock, HashFunc, MerkleTree, Proof, Result, hash::hash_pair, proof::Side};

impl Proof {
    /// Fold the proof over `leaf_hash` and return the implied root.
    pub fn compute_root(&self, leaf_hash: &[u8], hash_func: &HashFunc) -> Result<Vec<u8>> {
        let mut current = leaf_hash.to_vec();
        for sibling in self.siblings() {
            current = match sibling.side {
                Side::Left => hash_pair(hash_func, &sibling.hash, &current)?,
                Side::Right => hash_pair(hash_func, &current, &sibling.hash)?,
            };
        }
        Ok(current)
    }
}

impl MerkleTree {
    /// Verify `block` against `proof` using this tree's root and hash
    /// function.
    pub fn verify<B: DataBlock + ?Sized>(&self, block: &B, proof: &Proof) -> Result<bool> {
        verify_with(block, proof, self.root(), self.hash_func())
    }
}

/// Verify `block` against an externally supplied `proof` and `root`.
///
/// `None` for `hash_func` uses the default (SHA-256).
pub fn verify<B: DataBlock + ?Sized>(
    block: &B,
    proof: &Proof,
    root: &[u8],
    hash_func: Option<&HashFunc>,
) -> Result<bool> {
    match hash_func {
        Some(hash_func) => verify_with(block, proof, root, hash_func),
        None => verify_with(block, proof, root, &HashFunc::default()),
    }
}

fn verify_with<B: DataBlock + ?Sized>(
    block: &B,
    proof: &Proof,
    root: &[u8],
    hash_func: &HashFunc,
) -> Result<bool> {
    let bytes = block.serialize()?;
    let leaf_hash = hash_func.hash(&bytes)?;
    let computed = proof.compute_root(&leaf_hash, hash_func)?;
    let matches = computed.as_slice() == root;
    if !matches {
        trace!(
            expected = %hex::encode(root),
            computed = %hex::encode(&computed),
            "root mismatch"
        );
    }
    Ok(matches)
}
