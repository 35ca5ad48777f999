pub mod catalogue;

pub use catalogue::{Catalogue, user_manager_for};
