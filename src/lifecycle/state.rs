use std::fmt;

/// Lifecycle of one visualization instance.
///
/// `Ready` is only entered from `Initializing`. `Disposed` is transient:
/// teardown passes through it on the way back to `Uninitialized`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    Disposed,
}

impl LifecycleState {
    /// True while an instance is being set up or is live
    pub fn is_active(self) -> bool {
        matches!(self, LifecycleState::Initializing | LifecycleState::Ready)
    }

    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Uninitialized, Initializing)
                | (Initializing, Ready)
                | (Initializing, Uninitialized)
                | (Ready, Disposed)
                | (Disposed, Uninitialized)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Initializing => "initializing",
            LifecycleState::Ready => "ready",
            LifecycleState::Disposed => "disposed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::LifecycleState::*;

    #[test]
    fn test_ready_only_from_initializing() {
        assert!(Initializing.can_transition_to(Ready));
        assert!(!Uninitialized.can_transition_to(Ready));
        assert!(!Disposed.can_transition_to(Ready));
        assert!(!Ready.can_transition_to(Ready));
    }

    #[test]
    fn test_active_states() {
        assert!(Initializing.is_active());
        assert!(Ready.is_active());
        assert!(!Uninitialized.is_active());
        assert!(!Disposed.is_active());
    }
}
