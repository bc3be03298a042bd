//! Comparison list commands.

use sadok_core::ProductId;
use sadok_storefront::stores::CompareStore;

use super::Context;

fn store(ctx: &Context) -> CompareStore<sadok_core::JsonFileStore> {
    CompareStore::new(ctx.storage.clone(), ctx.notifier.clone())
}

/// Add a product snapshot to the comparison.
pub async fn add(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = ctx.backend.get_product(&ProductId::new(id)).await?;
    store(ctx).add_to_compare(&product);
    Ok(())
}

/// Print the compared products side by side.
#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context) {
    let compare = store(ctx);
    let items = compare.items();

    if items.is_empty() {
        println!("Список порівняння порожній");
        return;
    }

    for product in items {
        println!(
            "{}  {:>8} ₴  {}  ({})",
            product.id, product.price, product.name, product.category
        );
    }
}

/// Remove a product from the comparison.
pub fn remove(ctx: &Context, id: &str) {
    store(ctx).remove_from_compare(&ProductId::new(id));
}

/// Empty the comparison.
pub fn clear(ctx: &Context) {
    store(ctx).clear_compare();
}
