use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token for the per-frame animation loop.
///
/// Clones share one flag. Once [`AnimationLoop::cancel`] runs, every clone
/// (including one captured by an already scheduled frame callback) reports
/// the loop as stopped.
#[derive(Debug, Clone)]
pub struct AnimationLoop {
    running: Arc<AtomicBool>,
}

impl AnimationLoop {
    pub(crate) fn start() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn cancel(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Runs `frame` only if the loop has not been cancelled
    pub fn run_frame<T>(&self, frame: impl FnOnce() -> T) -> Option<T> {
        self.is_running().then(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_seen_by_clones() {
        let token = AnimationLoop::start();
        let scheduled = token.clone();
        assert_eq!(scheduled.run_frame(|| 1), Some(1));

        token.cancel();
        assert!(!scheduled.is_running());
        assert_eq!(scheduled.run_frame(|| 1), None);
    }
}
