use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a single-instance holder. `Ready` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Uninitialized,
    Constructing,
    Ready,
}

impl Lifecycle {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    const fn as_u8(self) -> u8 {
        match self {
            Self::Uninitialized => 0,
            Self::Constructing => 1,
            Self::Ready => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Uninitialized,
            1 => Self::Constructing,
            _ => Self::Ready,
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Constructing => write!(f, "constructing"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

/// Atomic slot holding a [`Lifecycle`], usable in `static` holders.
#[derive(Debug)]
pub struct LifecycleState(AtomicU8);

impl LifecycleState {
    pub const fn new(initial: Lifecycle) -> Self {
        Self(AtomicU8::new(initial.as_u8()))
    }

    pub fn get(&self) -> Lifecycle {
        Lifecycle::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn set(&self, state: Lifecycle) {
        self.0.store(state.as_u8(), Ordering::Release);
    }
}

impl Default for LifecycleState {
    fn default() -> Self {
        Self::new(Lifecycle::Uninitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        let state = LifecycleState::default();
        assert_eq!(state.get(), Lifecycle::Uninitialized);

        state.set(Lifecycle::Constructing);
        assert_eq!(state.get(), Lifecycle::Constructing);
        assert!(!state.get().is_ready());

        state.set(Lifecycle::Ready);
        assert!(state.get().is_ready());
    }
}
