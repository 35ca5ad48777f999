use super::cells::{DoubleCheckedCell, EagerCell, UnguardedCell};
use crate::{Lifecycle, Singleton};
use std::sync::atomic::{AtomicUsize, Ordering};

static LAZY_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);
static LAZY_SYNC_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

static LAZY: UnguardedCell<LazySingleton> = UnguardedCell::new(LazySingleton::new);
static LAZY_SYNC: DoubleCheckedCell<LazySyncSingleton> =
    DoubleCheckedCell::new(LazySyncSingleton::new);
static EAGER: EagerCell<EagerSingleton> = EagerCell::new(EagerSingleton::new());

/// Lazily built on first access without any guard. Not safe under concurrent
/// first access: several instances may be built and handed out.
#[derive(Debug)]
pub struct LazySingleton {
    serial: usize,
}

impl LazySingleton {
    fn new() -> Self {
        let serial = LAZY_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(serial, "constructed unguarded lazy singleton");
        Self { serial }
    }

    /// Position of this instance in construction order, starting at 1.
    pub fn serial(&self) -> usize {
        self.serial
    }

    /// Number of instances built so far in this process.
    pub fn constructions() -> usize {
        LAZY_CONSTRUCTIONS.load(Ordering::SeqCst)
    }
}

impl Singleton for LazySingleton {
    fn instance() -> &'static Self {
        LAZY.get()
    }

    fn lifecycle() -> Lifecycle {
        LAZY.state()
    }
}

/// Lazily built on first access behind double-checked locking.
#[derive(Debug)]
pub struct LazySyncSingleton {
    serial: usize,
}

impl LazySyncSingleton {
    fn new() -> Self {
        let serial = LAZY_SYNC_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(serial, "constructed double-checked lazy singleton");
        Self { serial }
    }

    pub fn serial(&self) -> usize {
        self.serial
    }

    pub fn constructions() -> usize {
        LAZY_SYNC_CONSTRUCTIONS.load(Ordering::SeqCst)
    }
}

impl Singleton for LazySyncSingleton {
    fn instance() -> &'static Self {
        LAZY_SYNC.get()
    }

    fn lifecycle() -> Lifecycle {
        LAZY_SYNC.state()
    }
}

/// Built at compile time; never constructed at runtime.
#[derive(Debug)]
pub struct EagerSingleton {
    serial: usize,
}

impl EagerSingleton {
    const fn new() -> Self {
        Self { serial: 1 }
    }

    pub fn serial(&self) -> usize {
        self.serial
    }
}

impl Singleton for EagerSingleton {
    fn instance() -> &'static Self {
        EAGER.get()
    }

    fn lifecycle() -> Lifecycle {
        EAGER.state()
    }
}
