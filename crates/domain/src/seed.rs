//! Initial menu data loading.
//!
//! Invoked once during startup, outside the request path, so a fresh
//! database is never empty. Safe to call again; it only writes when the
//! catalog has no rows.

use order_store::{MenuCatalog, NewMenuItem};

use crate::error::DomainError;

fn initial_menu() -> Vec<NewMenuItem> {
    vec![
        NewMenuItem::new(
            "Margherita Pizza",
            "Classic pizza with tomato sauce and mozzarella",
            common::Money::from_cents(15000),
        ),
        NewMenuItem::new(
            "Caesar Salad",
            "Salad with chicken, croutons and caesar dressing",
            common::Money::from_cents(12050),
        ),
        NewMenuItem::new(
            "Ribeye Steak",
            "Juicy medium-rare beef steak",
            common::Money::from_cents(35075),
        ),
    ]
}

/// Seeds the menu catalog if it is empty.
///
/// Returns the number of items inserted (0 when the catalog already has
/// data).
#[tracing::instrument(skip(store))]
pub async fn seed_menu<S: MenuCatalog>(store: &S) -> Result<usize, DomainError> {
    if store.menu_item_count().await? > 0 {
        tracing::info!("menu catalog already contains data, skipping seed");
        return Ok(0);
    }

    tracing::info!("menu catalog is empty, loading initial data");
    let inserted = store.insert_menu_items(initial_menu()).await?;
    metrics::counter!("menu_items_seeded_total").increment(inserted.len() as u64);
    tracing::info!(count = inserted.len(), "initial menu data loaded");
    Ok(inserted.len())
}
