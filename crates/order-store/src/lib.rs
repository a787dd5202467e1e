//! Persistence gateway for the restaurant orders service.
//!
//! Defines the storage records for menu items and orders, the
//! [`MenuCatalog`] and [`OrderStore`] traits the domain layer talks to,
//! and two implementations: an in-memory store for tests and local runs,
//! and a PostgreSQL store backed by sqlx.

pub mod entities;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use entities::{
    MenuItem, NewMenuItem, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus,
};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use store::{MenuCatalog, OrderStore};
