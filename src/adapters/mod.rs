// Adapters layer: concrete implementations of the domain ports.

pub mod manager_store;
pub mod storage;
