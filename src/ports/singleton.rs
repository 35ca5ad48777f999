use crate::Lifecycle;

/// A type with exactly one process-wide instance (or, for the unguarded
/// strategy, at least one).
pub trait Singleton: Sized + Send + Sync + 'static {
    fn instance() -> &'static Self;

    fn lifecycle() -> Lifecycle;
}
