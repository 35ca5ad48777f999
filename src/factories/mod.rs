// src/factories/mod.rs

mod factory_method;
mod simple_factory;

pub use factory_method::{DefaultProductFactory, SpecialProductFactory};
pub use simple_factory::SimpleFactory;

use crate::{ProductCreator, ProductType};

/// Collection of the product factories.
///
/// Hands out the simple factory and the creator bound to each variant.
pub struct Factories {
    simple: SimpleFactory,
    default_creator: DefaultProductFactory,
    special_creator: SpecialProductFactory,
}

impl Factories {
    /// Creates a new collection of factories.
    pub fn new() -> Self {
        Self {
            simple: SimpleFactory,
            default_creator: DefaultProductFactory,
            special_creator: SpecialProductFactory,
        }
    }

    /// Returns the simple factory.
    pub fn simple(&self) -> &SimpleFactory {
        &self.simple
    }

    /// Returns the creator bound to `product_type`.
    pub fn creator(&self, product_type: ProductType) -> &dyn ProductCreator {
        match product_type {
            ProductType::DefaultProduct => &self.default_creator,
            ProductType::SpecialProduct => &self.special_creator,
        }
    }
}

impl Default for Factories {
    fn default() -> Self {
        Self::new()
    }
}
