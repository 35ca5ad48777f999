// src/factories/factory_method.rs

use crate::entities::products::{DefaultProduct, SpecialProduct};
use crate::{Product, ProductCreator};

/// Creator that always builds the default product variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProductFactory;

impl ProductCreator for DefaultProductFactory {
    fn create_product(&self) -> Box<dyn Product> {
        tracing::debug!("default product factory creating product");
        Box::new(DefaultProduct)
    }
}

/// Creator that always builds the special product variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialProductFactory;

impl ProductCreator for SpecialProductFactory {
    fn create_product(&self) -> Box<dyn Product> {
        tracing::debug!("special product factory creating product");
        Box::new(SpecialProduct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProductType;

    fn assert_stable(creator: &dyn ProductCreator, expected: ProductType) {
        for _ in 0..16 {
            let product = creator.create_product();
            product.behavior();
            assert_eq!(product.product_type(), expected);
        }
    }

    #[test]
    fn test_creators_never_alternate() {
        assert_stable(&DefaultProductFactory, ProductType::DefaultProduct);
        assert_stable(&SpecialProductFactory, ProductType::SpecialProduct);
    }

    #[test]
    fn test_run_reports_variant() {
        assert_eq!(DefaultProductFactory.run(), ProductType::DefaultProduct);
        assert_eq!(SpecialProductFactory.run(), ProductType::SpecialProduct);
    }
}
