use common::MenuItemId;
use thiserror::Error;

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An order item referenced a menu item the store does not hold.
    ///
    /// Surfaced by the foreign key on `order_items.menu_item_id`; the
    /// in-memory store simulates the same constraint.
    #[error("Unknown menu item referenced by order item: {0}")]
    UnknownMenuItem(MenuItemId),

    /// A row held a status string no known status maps to.
    #[error("Invalid order status in storage: {0:?}")]
    InvalidStatus(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
