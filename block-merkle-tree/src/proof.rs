//! Inclusion proofs.
//!
//! A [`Proof`] lists, from the leaf level upward, the sibling each node was
//! hashed with on the way to the root. Levels where the node was promoted
//! unchanged contribute no entry. Eager (build time) and lazy (retained
//! levels) derivation both go through [`walk_level`], one level at a time.

use bincode::{Decode, Encode};

use crate::{
    DataBlock, MerkleTree, MerkleTreeError, Result,
    level::{Pairing, pairing},
};

/// Which side of the current node a sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// `H(sibling || current)`.
    Left,
    /// `H(current || sibling)`.
    Right,
}

/// One step of a proof: a sibling hash and its side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sibling {
    /// Hash of the sibling node.
    pub hash: Vec<u8>,
    /// Position of the sibling relative to the current node.
    pub side: Side,
}

/// An inclusion proof for a single leaf.
///
/// Two proofs are equal when they have the same length and the same sibling
/// hash and side at every position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof {
    siblings: Vec<Sibling>,
}

impl Proof {
    /// Build a proof from its siblings, leaf level first.
    pub fn new(siblings: Vec<Sibling>) -> Self {
        Self { siblings }
    }

    /// Siblings from the leaf level to the root.
    pub fn siblings(&self) -> &[Sibling] {
        &self.siblings
    }

    /// Consume the proof and return its siblings.
    pub fn into_siblings(self) -> Vec<Sibling> {
        self.siblings
    }

    /// Number of siblings.
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Whether the proof has no siblings.
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleTreeError::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode. Trailing bytes are rejected.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 16 * 1024 * 1024 }>();
        let (proof, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleTreeError::InvalidProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(MerkleTreeError::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        Ok(proof)
    }
}

/// Record the sibling of node `index` in `level` and return the index of its
/// parent in the next level.
///
/// `level` must hold at least two nodes.
pub(crate) fn walk_level(
    level: &[Vec<u8>],
    index: usize,
    no_duplicates: bool,
    proof: &mut Proof,
) -> usize {
    match pairing(index, level.len(), no_duplicates) {
        Pairing::Pair { sibling, side } => proof.siblings.push(Sibling {
            hash: level[sibling].clone(),
            side,
        }),
        // A duplicated node is its own right-hand sibling.
        Pairing::Duplicate => proof.siblings.push(Sibling {
            hash: level[index].clone(),
            side: Side::Right,
        }),
        Pairing::Promote => {}
    }
    index / 2
}

/// Walk retained `levels` (leaves first, root last) from `leaf_index`.
pub(crate) fn walk(levels: &[Vec<Vec<u8>>], leaf_index: usize, no_duplicates: bool) -> Proof {
    let mut proof = Proof::default();
    let mut index = leaf_index;
    for level in levels.iter().take_while(|level| level.len() > 1) {
        index = walk_level(level, index, no_duplicates, &mut proof);
    }
    proof
}

impl MerkleTree {
    /// Derive the proof for `block` from the retained levels.
    ///
    /// The block is located by its leaf hash; if several blocks share the
    /// same bytes, the first one wins. Fails with
    /// [`MerkleTreeError::Usage`] when the tree was built in
    /// [`Mode::ProofGenOnly`](crate::Mode::ProofGenOnly).
    pub fn generate_proof<B: DataBlock + ?Sized>(&self, block: &B) -> Result<Proof> {
        let levels = self.retained_levels()?;
        let bytes = block.serialize()?;
        let leaf = self.hash_func().hash(&bytes)?;
        let leaf_index = levels[0]
            .iter()
            .position(|candidate| *candidate == leaf)
            .ok_or(MerkleTreeError::BlockNotFound)?;
        Ok(walk(levels, leaf_index, self.no_duplicates()))
    }

    /// Derive the proof for the leaf at `leaf_index` from the retained levels.
    pub fn generate_proof_at(&self, leaf_index: usize) -> Result<Proof> {
        let levels = self.retained_levels()?;
        if leaf_index >= levels[0].len() {
            return Err(MerkleTreeError::LeafIndexOutOfRange {
                index: leaf_index,
                leaf_count: levels[0].len(),
            });
        }
        Ok(walk(levels, leaf_index, self.no_duplicates()))
    }

    fn retained_levels(&self) -> Result<&[Vec<Vec<u8>>]> {
        self.levels().ok_or_else(|| {
            MerkleTreeError::Usage(
                "proof generation needs retained levels; build with a tree-building mode"
                    .to_string(),
            )
        })
    }
}
