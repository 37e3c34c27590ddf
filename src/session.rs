// src/session.rs
use std::sync::atomic::{AtomicU64, Ordering};

/// Guards against out-of-order completions when a new search is submitted
/// before the previous one resolves. Each submission takes a generation
/// number; only the latest generation's result is accepted.
#[derive(Debug, Default)]
pub struct SearchSession {
    generation: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new submission, invalidating any outstanding one.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Returns the result only when it belongs to the latest submission.
    pub fn accept<T>(&self, generation: u64, result: T) -> Option<T> {
        self.is_current(generation).then_some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_generation_wins() {
        let session = SearchSession::new();
        let first = session.begin();
        let second = session.begin();

        // The older submission resolves late and is discarded.
        assert_eq!(session.accept(first, "stale"), None);
        assert_eq!(session.accept(second, "fresh"), Some("fresh"));
    }

    #[test]
    fn test_single_submission_is_accepted() {
        let session = SearchSession::new();
        let generation = session.begin();
        assert!(session.is_current(generation));
        assert_eq!(session.accept(generation, 42), Some(42));
    }
}
