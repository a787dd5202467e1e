//! Domain layer for the restaurant orders service.
//!
//! This crate provides the business operations on top of the persistence
//! gateway:
//! - `OrderService` with the order creation operation (validation, price
//!   snapshotting, total computation, atomic persistence)
//! - pass-through read operations for the menu and order history
//! - the idempotent menu seeding procedure

pub mod error;
pub mod request;
pub mod seed;
pub mod service;

pub use error::DomainError;
pub use request::{CreateOrderRequest, OrderItemRequest};
pub use seed::seed_menu;
pub use service::OrderService;
