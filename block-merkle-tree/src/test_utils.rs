//! Test utilities: block fixtures and hash functions with scripted failures.

use rand::{RngCore, SeedableRng, rngs::StdRng};
use sha2::{Digest, Sha256};

use crate::{DataBlock, HashError, HashFunc, SerializationError};

/// Block fixture that either yields its bytes or fails to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TestBlock {
    Data(Vec<u8>),
    Broken,
}

impl DataBlock for TestBlock {
    fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        match self {
            TestBlock::Data(data) => Ok(data.clone()),
            TestBlock::Broken => Err(SerializationError::new("broken test block")),
        }
    }
}

/// `count` blocks of 100 random bytes, reproducible from `seed`.
pub(crate) fn random_blocks(count: usize, seed: u64) -> Vec<TestBlock> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut data = vec![0u8; 100];
            rng.fill_bytes(&mut data);
            TestBlock::Data(data)
        })
        .collect()
}

/// A hash function that always fails.
pub(crate) fn failing_hash() -> HashFunc {
    HashFunc::new(|_| Err(HashError::new("hash func error")))
}

/// SHA-256 that fails on inputs of exactly `len` bytes.
pub(crate) fn hash_failing_on_len(len: usize) -> HashFunc {
    HashFunc::new(move |data| {
        if data.len() == len {
            Err(HashError::new(format!("refusing {} byte input", len)))
        } else {
            Ok(Sha256::digest(data).to_vec())
        }
    })
}

/// Plain SHA-256 of `data`.
pub(crate) fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

/// SHA-256 of `left || right`.
pub(crate) fn sha256_pair(left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().to_vec()
}
