use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator used by the simple factory to pick a product variant.
///
/// Raw values that do not map to a variant resolve to
/// [`ProductType::DefaultProduct`] instead of failing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    #[serde(rename = "default_product")]
    DefaultProduct,
    #[serde(rename = "special_product")]
    SpecialProduct,
}

impl ProductType {
    pub fn is_special(&self) -> bool {
        matches!(self, Self::SpecialProduct)
    }
}

impl Default for ProductType {
    fn default() -> Self {
        Self::DefaultProduct
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultProduct => write!(f, "default_product"),
            Self::SpecialProduct => write!(f, "special_product"),
        }
    }
}

impl From<u8> for ProductType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::SpecialProduct,
            _ => Self::DefaultProduct,
        }
    }
}

impl From<&str> for ProductType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "special" | "special_product" | "specialproduct" => Self::SpecialProduct,
            _ => Self::DefaultProduct,
        }
    }
}
