//! Guest wishlist commands.

use sadok_core::ProductId;
use sadok_storefront::stores::WishlistStore;

use super::Context;

/// Toggle a product in the wishlist.
pub async fn toggle(ctx: &Context, id: &str) {
    let wishlist = WishlistStore::new(ctx.backend.clone(), ctx.notifier.clone());
    wishlist.fetch_wishlist().await;
    wishlist.toggle_wishlist(&ProductId::new(id)).await;
}

/// Print the wishlist.
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &Context) {
    let wishlist = WishlistStore::new(ctx.backend.clone(), ctx.notifier.clone());
    wishlist.fetch_wishlist().await;

    let items = wishlist.items();
    if items.is_empty() {
        println!("Список бажань порожній");
        return;
    }

    for item in items {
        match ctx.backend.get_product(&item.product_id).await {
            Ok(product) => println!("{}  {}  {} ₴", item.product_id, product.name, product.price),
            Err(_) => println!("{}  (товар недоступний)", item.product_id),
        }
    }
}
