//! Domain error types.

use common::MenuItemId;
use order_store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// One or more requested menu items do not exist in the catalog.
    #[error("One or more menu items not found: {}", format_ids(.missing))]
    MenuItemsNotFound { missing: Vec<MenuItemId> },

    /// The order request contained no items.
    #[error("Order has no items")]
    NoItems,

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be at least 1)")]
    InvalidQuantity { quantity: u32 },

    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Returns true for errors caused by the request rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::MenuItemsNotFound { .. }
                | DomainError::NoItems
                | DomainError::InvalidQuantity { .. }
        )
    }
}

fn format_ids(ids: &[MenuItemId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
