//! Catalog browsing commands.

use sadok_core::{Price, ProductId};
use sadok_storefront::backend::ProductQuery;
use sadok_storefront::stores::{RecentlyViewedStore, SettingsStore};

use super::Context;

/// List products, optionally searched or filtered by category.
#[allow(clippy::print_stdout)]
pub async fn list(
    ctx: &Context,
    search: Option<String>,
    category: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = ProductQuery {
        search,
        category,
        ..ProductQuery::default()
    };

    let products = ctx.backend.get_products(&query).await?;

    if products.is_empty() {
        println!("Нічого не знайдено");
        return Ok(());
    }

    for product in products {
        let badges = if product.badges.is_empty() {
            String::new()
        } else {
            format!(" [{}]", product.badges.join(", "))
        };
        println!(
            "{}  {:>8} ₴  {}{}",
            product.id, product.price, product.name, badges
        );
    }

    Ok(())
}

/// Show one product in full and record the view in the history.
#[allow(clippy::print_stdout)]
pub async fn show(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = ctx.backend.get_product(&ProductId::new(id)).await?;

    let history = RecentlyViewedStore::new(ctx.storage.clone());
    history.record_view(&product);

    println!("{}", product.name);
    println!("Артикул:   {}", product.article);
    println!("Категорія: {}", product.category);
    let price = Price::uah(product.price);
    match product.old_price {
        Some(old_price) => println!(
            "Ціна:      {} (було {})",
            price.display(),
            Price::uah(old_price).display()
        ),
        None => println!("Ціна:      {}", price.display()),
    }
    println!("На складі: {}", product.stock);
    println!();
    println!("{}", product.description);

    let viewed = history.recent(Some(&product.id));
    if !viewed.is_empty() {
        println!();
        println!("Ви переглядали:");
        for item in viewed {
            println!("  {}  {}", item.id, item.name);
        }
    }

    Ok(())
}

/// Show the public site settings (falls back to defaults when the backend
/// is unreachable).
#[allow(clippy::print_stdout)]
pub async fn settings(ctx: &Context) {
    let store = SettingsStore::new(ctx.backend.clone());
    store.load_settings().await;
    let settings = store.settings();

    println!("{}", settings.site_name);
    println!("{}", settings.site_description);
    println!("Телефон: {} / {}", settings.phone1, settings.phone2);
    println!("Адреса:  {}", settings.address);
    println!("Графік:  {} ({})", settings.working_hours, settings.weekend);
    println!(
        "Безкоштовна доставка від {} {}",
        settings.free_delivery_from, settings.currency
    );
}
