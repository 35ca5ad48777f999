use crate::{Product, ProductType};

// Variants stay crate-private so callers can only hold `dyn Product`.

#[derive(Debug, Clone, Default)]
pub(crate) struct DefaultProduct;

impl Product for DefaultProduct {
    fn behavior(&self) {
        tracing::trace!("default product behavior");
    }

    fn product_type(&self) -> ProductType {
        ProductType::DefaultProduct
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SpecialProduct;

impl Product for SpecialProduct {
    fn behavior(&self) {
        tracing::trace!("special product behavior");
    }

    fn product_type(&self) -> ProductType {
        ProductType::SpecialProduct
    }
}
