use crate::HashFunc;

/// What a build produces besides the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Compute one proof per block; levels are discarded once consumed.
    #[default]
    ProofGenOnly,
    /// Retain every level; proofs are derived later on demand.
    TreeBuildOnly,
    /// Retain every level and compute all proofs.
    ProofGenAndTreeBuild,
}

impl Mode {
    /// Whether the level structure is retained.
    pub fn builds_tree(self) -> bool {
        matches!(self, Mode::TreeBuildOnly | Mode::ProofGenAndTreeBuild)
    }

    /// Whether proofs are computed during the build.
    pub fn generates_proofs(self) -> bool {
        matches!(self, Mode::ProofGenOnly | Mode::ProofGenAndTreeBuild)
    }
}

/// Build options. Every field is optional; see [`Config::resolve`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Hash function override. SHA-256 when unset.
    pub hash_func: Option<HashFunc>,
    /// Build mode. [`Mode::ProofGenOnly`] when unset.
    pub mode: Option<Mode>,
    /// Spread leaf hashing and level pairing across a worker pool.
    pub run_in_parallel: bool,
    /// Worker count for parallel builds. `None` or `0` means one worker per
    /// available CPU.
    pub num_workers: Option<usize>,
    /// Promote an odd trailing node instead of pairing it with itself.
    pub no_duplicates: bool,
}

impl Config {
    /// Set the hash function.
    pub fn with_hash_func(mut self, hash_func: HashFunc) -> Self {
        self.hash_func = Some(hash_func);
        self
    }

    /// Set the build mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Enable or disable parallel execution.
    pub fn with_parallel(mut self, run_in_parallel: bool) -> Self {
        self.run_in_parallel = run_in_parallel;
        self
    }

    /// Set the worker count used when running in parallel.
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = Some(num_workers);
        self
    }

    /// Select the promotion policy for odd trailing nodes.
    pub fn with_no_duplicates(mut self, no_duplicates: bool) -> Self {
        self.no_duplicates = no_duplicates;
        self
    }

    /// Fill in every default. Pure; never fails.
    pub fn resolve(self) -> ResolvedConfig {
        let num_workers = if self.run_in_parallel {
            match self.num_workers {
                Some(n) if n > 0 => n,
                _ => num_cpus::get().max(1),
            }
        } else {
            1
        };
        ResolvedConfig {
            hash_func: self.hash_func.unwrap_or_default(),
            mode: self.mode.unwrap_or_default(),
            run_in_parallel: self.run_in_parallel,
            num_workers,
            no_duplicates: self.no_duplicates,
        }
    }
}

/// A fully defaulted [`Config`], fixed for the lifetime of a tree.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Hash function used for leaves and parents.
    pub hash_func: HashFunc,
    /// Build mode.
    pub mode: Mode,
    /// Whether the worker pool is used.
    pub run_in_parallel: bool,
    /// Worker count; always 1 for sequential builds.
    pub num_workers: usize,
    /// Promotion policy for odd trailing nodes.
    pub no_duplicates: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Config::default().resolve()
    }
}

impl From<Option<Config>> for ResolvedConfig {
    fn from(config: Option<Config>) -> Self {
        config.unwrap_or_default().resolve()
    }
}
