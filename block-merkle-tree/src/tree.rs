use tracing::{debug, trace};

use crate::{
    Config, DataBlock, HashFunc, MerkleTreeError, Mode, Proof, ResolvedConfig, Result,
    level::{level_count, parent_hash, parent_len},
    proof::walk_level,
    scheduler::Executor,
};

/// A Merkle tree built over an ordered set of data blocks.
///
/// Level 0 holds the leaf hashes in block order; the last level holds only
/// the root. Each parent is `H(left || right)`. An odd trailing node is
/// paired with itself, or promoted unchanged when the tree was built with
/// `no_duplicates`.
///
/// The tree is immutable once built. A changed block set needs a new build.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    root: Vec<u8>,
    proofs: Option<Vec<Proof>>,
    levels: Option<Vec<Vec<Vec<u8>>>>,
    leaf_count: usize,
    config: ResolvedConfig,
}

/// Tracks one leaf's position while proofs are derived during the build.
#[derive(Debug, Default)]
struct LeafCursor {
    position: usize,
    proof: Proof,
}

impl MerkleTree {
    /// Build a tree over `blocks`.
    ///
    /// `None` uses the default configuration. Fails when fewer than two
    /// blocks are given, or when any block fails to serialize or hash. A
    /// failed build yields no tree.
    pub fn new<B>(config: Option<Config>, blocks: &[B]) -> Result<Self>
    where
        B: DataBlock + Sync,
    {
        Self::with_resolved(ResolvedConfig::from(config), blocks)
    }

    /// Build a tree with an already resolved configuration.
    pub fn with_resolved<B>(config: ResolvedConfig, blocks: &[B]) -> Result<Self>
    where
        B: DataBlock + Sync,
    {
        if blocks.len() < 2 {
            return Err(MerkleTreeError::InvalidInput(format!(
                "at least 2 data blocks are required to build a tree, got {}",
                blocks.len()
            )));
        }

        let executor = Executor::new(&config, blocks.len())?;
        debug!(
            blocks = blocks.len(),
            mode = ?config.mode,
            parallel = config.run_in_parallel,
            workers = executor.workers(),
            hash = config.hash_func.name(),
            no_duplicates = config.no_duplicates,
            "building merkle tree"
        );

        let hash_func = &config.hash_func;
        let no_duplicates = config.no_duplicates;

        let mut level = executor.collect(blocks.len(), |i| {
            let bytes = blocks[i]
                .serialize()
                .inspect_err(|e| debug!(index = i, error = %e, "block serialization failed"))?;
            Ok(hash_func.hash(&bytes)?)
        })?;

        let mut cursors: Option<Vec<LeafCursor>> = config.mode.generates_proofs().then(|| {
            (0..blocks.len())
                .map(|position| LeafCursor {
                    position,
                    proof: Proof::default(),
                })
                .collect()
        });
        let mut retained: Option<Vec<Vec<Vec<u8>>>> = config
            .mode
            .builds_tree()
            .then(|| Vec::with_capacity(level_count(blocks.len())));

        let mut depth = 0usize;
        while level.len() > 1 {
            if let Some(cursors) = cursors.as_mut() {
                executor.for_each_slot(cursors.as_mut_slice(), |_, cursor| {
                    cursor.position =
                        walk_level(&level, cursor.position, no_duplicates, &mut cursor.proof);
                    Ok(())
                })?;
            }

            // Every parent depends on two nodes of `level`, so the next level
            // only starts once this one is complete.
            let next = executor.collect(parent_len(level.len()), |parent| {
                Ok(parent_hash(&level, parent, no_duplicates, hash_func)?)
            })?;
            trace!(
                depth,
                nodes = level.len(),
                parents = next.len(),
                "level complete"
            );

            if let Some(levels) = retained.as_mut() {
                levels.push(level);
            }
            level = next;
            depth += 1;
        }

        let root = level[0].clone();
        if let Some(levels) = retained.as_mut() {
            levels.push(level);
        }
        let proofs = cursors.map(|cursors| cursors.into_iter().map(|c| c.proof).collect());

        debug!(
            root = %hex::encode(&root),
            levels = depth + 1,
            "merkle tree built"
        );

        Ok(Self {
            root,
            proofs,
            levels: retained,
            leaf_count: blocks.len(),
            config,
        })
    }

    /// The root hash.
    pub fn root(&self) -> &[u8] {
        &self.root
    }

    /// One proof per block, in block order. `None` in
    /// [`Mode::TreeBuildOnly`].
    pub fn proofs(&self) -> Option<&[Proof]> {
        self.proofs.as_deref()
    }

    /// The proof computed during the build for block `index`.
    pub fn proof(&self, index: usize) -> Option<&Proof> {
        self.proofs.as_ref().and_then(|proofs| proofs.get(index))
    }

    /// Every level, leaves first and root last. `None` in
    /// [`Mode::ProofGenOnly`].
    pub fn levels(&self) -> Option<&[Vec<Vec<u8>>]> {
        self.levels.as_deref()
    }

    /// The leaf hashes, when levels were retained.
    pub fn leaves(&self) -> Option<&[Vec<u8>]> {
        self.levels
            .as_ref()
            .and_then(|levels| levels.first())
            .map(Vec::as_slice)
    }

    /// Number of blocks the tree was built from.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of levels, leaves and root included.
    pub fn depth(&self) -> usize {
        level_count(self.leaf_count)
    }

    /// The mode the tree was built with.
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// The hash function used for leaves and parents.
    pub fn hash_func(&self) -> &HashFunc {
        &self.config.hash_func
    }

    /// Whether odd trailing nodes were promoted instead of duplicated.
    pub fn no_duplicates(&self) -> bool {
        self.config.no_duplicates
    }
}
