//! Storage implementations for the relational store

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod seed;

pub use in_memory::InMemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
