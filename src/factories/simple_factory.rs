// src/factories/simple_factory.rs

use crate::entities::products::{DefaultProduct, SpecialProduct};
use crate::{Product, ProductType};

/// Single creation entry point that picks a product variant from a discriminator.
///
/// The factory is stateless: every call builds an independent product and
/// construction cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleFactory;

impl SimpleFactory {
    /// Creates the product matching `product_type`.
    ///
    /// # Arguments
    /// * `product_type` - A [`ProductType`] or any raw value convertible into one.
    ///   Unmapped raw values resolve to the default variant.
    ///
    /// # Examples
    /// ```
    /// use creational_core::{ProductType, factories::SimpleFactory};
    ///
    /// let product = SimpleFactory.create_product(ProductType::SpecialProduct);
    /// product.behavior();
    /// assert_eq!(product.product_type(), ProductType::SpecialProduct);
    ///
    /// let fallback = SimpleFactory.create_product(99u8);
    /// assert_eq!(fallback.product_type(), ProductType::DefaultProduct);
    /// ```
    pub fn create_product<T: Into<ProductType>>(&self, product_type: T) -> Box<dyn Product> {
        let product_type = product_type.into();
        tracing::debug!(%product_type, "simple factory creating product");

        match product_type {
            ProductType::SpecialProduct => Box::new(SpecialProduct),
            ProductType::DefaultProduct => Box::new(DefaultProduct),
        }
    }
}
