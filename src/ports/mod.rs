// src/ports/mod.rs

pub use product::Product;
pub use product_creator::ProductCreator;
pub use singleton::Singleton;
pub use user_manager::{Department, User, UserManager};

pub mod product;
pub mod product_creator;
pub mod singleton;
pub mod user_manager;
