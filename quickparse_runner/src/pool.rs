use rayon::prelude::*;

use crate::error::{Result, RunError};

/// Bounded worker pool for per-file work.
///
/// Every task returns its own result; results come back in input order and
/// are merged by the caller on a single thread, so tasks never share
/// mutable state.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("quickparse-worker-{i}"))
            .build()
            .map_err(|e| RunError::Pool(e.to_string()))?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Apply `task` to every item in parallel, preserving order.
    pub fn map<T, R, F>(&self, items: &[T], task: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        self.pool.install(|| items.par_iter().map(task).collect())
    }
}
