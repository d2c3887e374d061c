//! Random source port.
//!
//! Reviewer selection draws through this trait so tests can script or seed
//! the sequence instead of relying on a process-wide generator.

/// Source of uniformly distributed indices.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..upper`. Callers guarantee `upper > 0`.
    fn next_index(&self, upper: usize) -> usize;
}
