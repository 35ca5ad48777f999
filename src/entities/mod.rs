pub mod entity_id;
pub(crate) mod products;

pub use entity_id::EntityId;
