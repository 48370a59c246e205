//! Общие типы для всех агрегатов

pub mod entity_id;
pub mod party_ref;

// Re-exports
pub use entity_id::EntityId;
pub use party_ref::{PartyRef, StoreRef};
