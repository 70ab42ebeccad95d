/// Construction-time tuning knobs. Mirrors the teacher crate's plain
/// `Config` + `Default` shape rather than a builder macro.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of shards in the concurrent accumulator used by parallel
    /// scoring. Spec fixes this at 16 for the scorer; exposed here so
    /// callers benchmarking contention can override it.
    pub shard_count: usize,
    /// Worker count for the batch executor's thread pool. Defaults to the
    /// number of logical CPUs, the same way the teacher's
    /// `ParallelIndexer::new` sizes its rayon pool.
    pub batch_workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            shard_count: 16,
            batch_workers: num_cpus::get(),
        }
    }
}
