pub mod config;
pub mod family;
pub mod lifecycle;
pub mod product_type;

pub use config::*;
pub use family::*;
pub use lifecycle::*;
pub use product_type::*;
