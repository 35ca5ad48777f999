//! Holders that own a single instance and decide when it is built.
//!
//! All three are `const`-constructible so they can live in `static`s.

use crate::{Lifecycle, LifecycleState};
use std::sync::{Mutex, OnceLock, PoisonError, RwLock};

/// Lazy holder with no mutual exclusion between the "is it built" check and
/// the construction.
///
/// Concurrent first callers can all pass the check, each build an instance
/// and each receive their own. The last store wins the slot; earlier
/// instances are leaked, never freed, so every returned reference stays
/// valid. Once the slot is filled, later callers never construct again.
pub struct UnguardedCell<T: 'static> {
    slot: RwLock<Option<&'static T>>,
    state: LifecycleState,
    init: fn() -> T,
}

impl<T: Sync + 'static> UnguardedCell<T> {
    pub const fn new(init: fn() -> T) -> Self {
        Self {
            slot: RwLock::new(None),
            state: LifecycleState::new(Lifecycle::Uninitialized),
            init,
        }
    }

    pub fn get(&self) -> &'static T {
        if let Some(instance) = self.peek() {
            return instance;
        }

        // Another thread may be between the check above and the store below.
        self.state.set(Lifecycle::Constructing);
        let instance: &'static T = Box::leak(Box::new((self.init)()));
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(instance);
        self.state.set(Lifecycle::Ready);

        instance
    }

    /// Returns the stored instance without constructing one.
    pub fn peek(&self) -> Option<&'static T> {
        *self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> Lifecycle {
        self.state.get()
    }
}

/// Lazy holder using double-checked locking.
///
/// The lock is only taken while the slot looks empty, and the slot is checked
/// again under the lock, so exactly one caller constructs.
pub struct DoubleCheckedCell<T> {
    slot: OnceLock<T>,
    lock: Mutex<()>,
    state: LifecycleState,
    init: fn() -> T,
}

impl<T> DoubleCheckedCell<T> {
    pub const fn new(init: fn() -> T) -> Self {
        Self {
            slot: OnceLock::new(),
            lock: Mutex::new(()),
            state: LifecycleState::new(Lifecycle::Uninitialized),
            init,
        }
    }

    pub fn get(&self) -> &T {
        if let Some(instance) = self.slot.get() {
            return instance;
        }

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(instance) = self.slot.get() {
            return instance;
        }

        self.state.set(Lifecycle::Constructing);
        self.slot.get_or_init(|| {
            let value = (self.init)();
            self.state.set(Lifecycle::Ready);
            value
        })
    }

    pub fn peek(&self) -> Option<&T> {
        self.slot.get()
    }

    pub fn state(&self) -> Lifecycle {
        self.state.get()
    }
}

/// Eager holder. The value is produced by a `const` expression, so it is part
/// of the binary image and ready before any code runs.
pub struct EagerCell<T> {
    value: T,
}

impl<T> EagerCell<T> {
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn state(&self) -> Lifecycle {
        Lifecycle::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    const THREADS: usize = 64;

    #[derive(Debug)]
    struct Marker {
        serial: usize,
    }

    fn race<T: Sync + 'static>(get: fn() -> &'static T) -> Vec<&'static T> {
        let barrier = Barrier::new(THREADS);
        thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        get()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        })
    }

    #[test]
    fn test_double_checked_single_construction_under_contention() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        fn build() -> Marker {
            thread::sleep(Duration::from_millis(5));
            Marker {
                serial: BUILT.fetch_add(1, Ordering::SeqCst) + 1,
            }
        }
        static CELL: DoubleCheckedCell<Marker> = DoubleCheckedCell::new(build);

        assert_eq!(CELL.state(), Lifecycle::Uninitialized);
        assert!(CELL.peek().is_none());

        let seen = race(|| CELL.get());

        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
        assert!(seen.iter().all(|p| std::ptr::eq(*p, seen[0])));
        assert_eq!(seen[0].serial, 1);
        assert_eq!(CELL.state(), Lifecycle::Ready);
    }

    #[test]
    fn test_double_checked_ready_before_value_is_published() {
        fn build() -> Marker {
            Marker { serial: 1 }
        }
        static CELL: DoubleCheckedCell<Marker> = DoubleCheckedCell::new(build);

        // Callers that see the value on the fast path must also see `Ready`.
        let states: Vec<(bool, Lifecycle)> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        let published = CELL.peek().is_some();
                        (published, CELL.state())
                    })
                })
                .collect();
            CELL.get();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (published, state) in states {
            if published {
                assert_eq!(state, Lifecycle::Ready);
            }
        }
        assert_eq!(CELL.state(), Lifecycle::Ready);
    }

    #[test]
    fn test_double_checked_never_rebuilds_once_ready() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        fn build() -> Marker {
            Marker {
                serial: BUILT.fetch_add(1, Ordering::SeqCst) + 1,
            }
        }
        static CELL: DoubleCheckedCell<Marker> = DoubleCheckedCell::new(build);

        let first = CELL.get();
        for _ in 0..1_000 {
            assert!(std::ptr::eq(first, CELL.get()));
        }
        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unguarded_returns_an_instance_to_every_caller() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        fn build() -> Marker {
            thread::sleep(Duration::from_millis(5));
            Marker {
                serial: BUILT.fetch_add(1, Ordering::SeqCst) + 1,
            }
        }
        static CELL: UnguardedCell<Marker> = UnguardedCell::new(build);

        let seen = race(|| CELL.get());

        // No single-identity assertion: concurrent first callers may each build.
        assert_eq!(seen.len(), THREADS);
        assert!(seen.iter().all(|p| p.serial >= 1));
        assert!(BUILT.load(Ordering::SeqCst) >= 1);
        assert_eq!(CELL.state(), Lifecycle::Ready);
    }

    #[test]
    fn test_unguarded_sequential_access_builds_once() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        fn build() -> Marker {
            Marker {
                serial: BUILT.fetch_add(1, Ordering::SeqCst) + 1,
            }
        }
        static CELL: UnguardedCell<Marker> = UnguardedCell::new(build);

        assert!(CELL.peek().is_none());
        let first = CELL.get();
        let second = CELL.get();

        assert!(std::ptr::eq(first, second));
        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_eager_is_ready_before_access() {
        static CELL: EagerCell<Marker> = EagerCell::new(Marker { serial: 7 });

        assert_eq!(CELL.state(), Lifecycle::Ready);
        let seen = race(|| CELL.get());
        assert!(seen.iter().all(|p| std::ptr::eq(*p, &CELL.value)));
        assert_eq!(seen[0].serial, 7);
    }
}
