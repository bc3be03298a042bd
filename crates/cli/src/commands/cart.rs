//! Guest cart commands.

use sadok_core::{CartItemId, Price, ProductId};
use sadok_storefront::stores::CartStore;

use super::Context;

fn store(ctx: &Context) -> CartStore<sadok_storefront::backend::BackendClient> {
    CartStore::new(ctx.backend.clone(), ctx.notifier.clone())
}

/// Add a product to the cart.
pub async fn add(ctx: &Context, id: &str, quantity: u32) -> Result<(), Box<dyn std::error::Error>> {
    let product = ctx.backend.get_product(&ProductId::new(id)).await?;
    let cart = store(ctx);
    cart.fetch_cart().await;
    cart.add_to_cart(&product, quantity).await;
    Ok(())
}

/// Print the cart with its derived totals.
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &Context) {
    let cart = store(ctx);
    cart.fetch_cart().await;

    let items = cart.items();
    if items.is_empty() {
        println!("Кошик порожній");
        return;
    }

    for item in &items {
        println!(
            "{}  {} × {} ₴  {}",
            item.id, item.quantity, item.price, item.product_name
        );
    }
    println!();
    println!("Товарів: {}", cart.cart_count());
    println!("Разом:   {}", Price::uah(cart.cart_total()).display());
}

/// Change an item's quantity.
pub async fn update(ctx: &Context, id: &str, quantity: u32) {
    let cart = store(ctx);
    cart.fetch_cart().await;
    cart.update_quantity(&CartItemId::new(id), quantity).await;
}

/// Remove an item.
pub async fn remove(ctx: &Context, id: &str) {
    let cart = store(ctx);
    cart.fetch_cart().await;

    let item_id = CartItemId::new(id);
    let name = cart
        .items()
        .iter()
        .find(|item| item.id == item_id)
        .map_or_else(|| id.to_owned(), |item| item.product_name.clone());

    cart.remove_from_cart(&item_id, &name).await;
}

/// Empty the cart.
#[allow(clippy::print_stdout)]
pub async fn clear(ctx: &Context) {
    let cart = store(ctx);
    cart.fetch_cart().await;
    cart.clear_cart().await;
    println!("Кошик очищено");
}
