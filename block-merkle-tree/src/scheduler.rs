//! Executes index-addressed work either on the caller's thread or across a
//! bounded worker pool.
//!
//! Output slots are allocated up front and split into one contiguous chunk
//! per worker, so no two workers ever touch the same slot. The only shared
//! state is the first-error cell and the cancellation flag.

use std::sync::{
    OnceLock,
    atomic::{AtomicBool, Ordering},
};

use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use tracing::debug;

use crate::{MerkleTreeError, ResolvedConfig, Result};

pub(crate) enum Executor {
    /// Everything runs on the caller's thread.
    Sequential,
    /// Work is partitioned across `workers` pool threads.
    Parallel { pool: ThreadPool, workers: usize },
}

impl Executor {
    /// Build an executor for `work_len` leaves.
    ///
    /// The pool never has more threads than there are leaves, the widest
    /// level of the tree.
    pub(crate) fn new(config: &ResolvedConfig, work_len: usize) -> Result<Self> {
        if !config.run_in_parallel {
            return Ok(Executor::Sequential);
        }
        let workers = config.num_workers.min(work_len).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("merkle-worker-{}", i))
            .build()
            .map_err(|e| MerkleTreeError::WorkerPool(e.to_string()))?;
        Ok(Executor::Parallel { pool, workers })
    }

    pub(crate) fn workers(&self) -> usize {
        match self {
            Executor::Sequential => 1,
            Executor::Parallel { workers, .. } => *workers,
        }
    }

    /// Run `task(i, &mut slots[i])` for every slot.
    ///
    /// Returns once every slot is done or the first failure has been
    /// observed. On failure the remaining slots are left untouched and the
    /// first captured error is returned.
    pub(crate) fn for_each_slot<T, F>(&self, slots: &mut [T], task: F) -> Result<()>
    where
        T: Send,
        F: Fn(usize, &mut T) -> Result<()> + Sync,
    {
        match self {
            Executor::Sequential => {
                for (i, slot) in slots.iter_mut().enumerate() {
                    task(i, slot)?;
                }
                Ok(())
            }
            Executor::Parallel { pool, workers } => {
                if slots.is_empty() {
                    return Ok(());
                }
                let chunk_len = slots.len().div_ceil(*workers);
                let cancelled = AtomicBool::new(false);
                let first_error: OnceLock<MerkleTreeError> = OnceLock::new();

                pool.install(|| {
                    slots
                        .par_chunks_mut(chunk_len)
                        .enumerate()
                        .for_each(|(chunk, part)| {
                            let start = chunk * chunk_len;
                            for (offset, slot) in part.iter_mut().enumerate() {
                                if cancelled.load(Ordering::Acquire) {
                                    return;
                                }
                                if let Err(err) = task(start + offset, slot) {
                                    cancelled.store(true, Ordering::Release);
                                    if first_error.set(err).is_ok() {
                                        debug!(
                                            chunk,
                                            index = start + offset,
                                            "worker failed, cancelling remaining work"
                                        );
                                    }
                                    return;
                                }
                            }
                        });
                });

                match first_error.into_inner() {
                    Some(err) => Err(err),
                    None => Ok(()),
                }
            }
        }
    }

    /// Produce `len` values, value `i` computed by `task(i)`.
    pub(crate) fn collect<V, F>(&self, len: usize, task: F) -> Result<Vec<V>>
    where
        V: Default + Send,
        F: Fn(usize) -> Result<V> + Sync,
    {
        let mut out: Vec<V> = std::iter::repeat_with(V::default).take(len).collect();
        self.for_each_slot(&mut out, |i, slot| {
            *slot = task(i)?;
            Ok(())
        })?;
        Ok(out)
    }
}
