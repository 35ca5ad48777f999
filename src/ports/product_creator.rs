use crate::{Product, ProductType};

/// Creator bound at type-selection time to exactly one product variant.
pub trait ProductCreator: Send + Sync {
    fn create_product(&self) -> Box<dyn Product>;

    /// Creates a product, exercises it and reports which variant was built.
    fn run(&self) -> ProductType {
        let product = self.create_product();
        product.behavior();
        product.product_type()
    }
}
