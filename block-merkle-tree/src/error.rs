use thiserror::Error;

/// Alias for `core::result::Result<T, MerkleTreeError>`.
pub type Result<T> = core::result::Result<T, MerkleTreeError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from Merkle tree construction, proof generation and verification.
#[derive(Debug, Error)]
pub enum MerkleTreeError {
    /// The block set cannot form a tree (fewer than two blocks).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A block could not be turned into bytes.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    /// The configured hash function failed.
    #[error(transparent)]
    Hash(#[from] HashError),
    /// The operation is not available for how the tree was built.
    #[error("invalid usage: {0}")]
    Usage(String),
    /// The block's leaf hash does not appear in the tree's leaf level.
    #[error("data block is not a member of the tree")]
    BlockNotFound,
    /// A leaf index past the end of the leaf level.
    #[error("leaf index {index} is out of range (leaf count {leaf_count})")]
    LeafIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },
    /// The bounded worker pool could not be started.
    #[error("worker pool error: {0}")]
    WorkerPool(String),
    /// Encoded proof bytes were malformed.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}

/// Failure reported by a [`DataBlock`](crate::DataBlock) adapter.
#[derive(Debug, Error)]
#[error("serialization failed: {message}")]
pub struct SerializationError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl SerializationError {
    /// Create an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping an underlying cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported by a [`HashFunc`](crate::HashFunc).
#[derive(Debug, Error)]
#[error("hash function failed: {message}")]
pub struct HashError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl HashError {
    /// Create an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create an error wrapping an underlying cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}
