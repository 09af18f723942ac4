//! OnlineRegistry implementations.

pub mod inmemory;

pub use inmemory::InMemoryOnlineRegistry;
