use crate::ProductType;
use std::fmt;

/// Behavioral contract shared by every product variant.
///
/// Callers only ever receive `Box<dyn Product>`; the concrete variants are
/// private to the crate.
pub trait Product: fmt::Debug + Send + Sync {
    fn behavior(&self);

    /// Variant this product was built as.
    fn product_type(&self) -> ProductType;
}
