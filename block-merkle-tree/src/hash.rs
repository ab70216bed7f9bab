use std::{fmt, sync::Arc};

use sha2::{Digest, Sha256};

use crate::HashError;

type HashFnInner = dyn Fn(&[u8]) -> Result<Vec<u8>, HashError> + Send + Sync;

/// A fallible `bytes -> bytes` hash function, shared across workers.
///
/// Cloning is cheap; clones call the same underlying function.
#[derive(Clone)]
pub struct HashFunc {
    inner: Arc<HashFnInner>,
    name: &'static str,
}

impl HashFunc {
    /// Wrap a custom hash function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, HashError> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(f),
            name: "custom",
        }
    }

    /// SHA-256, the default hash function.
    pub fn sha256() -> Self {
        Self {
            inner: Arc::new(|data: &[u8]| Ok(Sha256::digest(data).to_vec())),
            name: "sha256",
        }
    }

    /// Blake3 with 32-byte output.
    pub fn blake3() -> Self {
        Self {
            inner: Arc::new(|data: &[u8]| Ok(blake3::hash(data).as_bytes().to_vec())),
            name: "blake3",
        }
    }

    /// Hash `data`.
    #[inline]
    pub fn hash(&self, data: &[u8]) -> Result<Vec<u8>, HashError> {
        (self.inner)(data)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for HashFunc {
    fn default() -> Self {
        Self::sha256()
    }
}

impl fmt::Debug for HashFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashFunc").field(&self.name).finish()
    }
}

/// Compute a parent hash: `H(left || right)`.
///
/// A duplicated lone node is passed as both `left` and `right`.
pub(crate) fn hash_pair(
    hash_func: &HashFunc,
    left: &[u8],
    right: &[u8],
) -> Result<Vec<u8>, HashError> {
    let mut input = Vec::with_capacity(left.len() + right.len());
    input.extend_from_slice(left);
    input.extend_from_slice(right);
    hash_func.hash(&input)
}
