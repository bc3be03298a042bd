//! Checkout-related commands: address lookup and order tracking.

use std::time::Instant;

use sadok_core::OrderId;
use sadok_storefront::checkout::{AddressResolver, SEARCH_DEBOUNCE};

use super::Context;

/// Search delivery cities through the debounced resolver; optionally list
/// the warehouses of the first match.
#[allow(clippy::print_stdout)]
pub async fn cities(
    ctx: &Context,
    query: &str,
    with_warehouses: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = AddressResolver::new(ctx.nova_poshta.clone());

    resolver.input(query, Instant::now());

    let snapshot = resolver.snapshot();
    if snapshot.show_popular {
        println!("Запит закороткий. Популярні міста:");
        for city in sadok_storefront::nova_poshta::POPULAR_CITIES {
            println!("  {city}");
        }
        return Ok(());
    }

    // Let the debounce window elapse, then fire the lookup.
    tokio::time::sleep(SEARCH_DEBOUNCE).await;
    resolver.poll_search(Instant::now()).await?;

    let snapshot = resolver.snapshot();
    if snapshot.cities.is_empty() {
        println!("Міст не знайдено");
        return Ok(());
    }

    for city in &snapshot.cities {
        println!("{}  {} ({})", city.ref_id, city.name, city.area);
    }

    if with_warehouses && let Some(first) = snapshot.cities.first() {
        resolver.select_city(first.clone());
        resolver.load_warehouses().await?;

        println!();
        println!("Відділення у місті {}:", first.name);
        for warehouse in resolver.snapshot().warehouses {
            println!("  {}", warehouse.description);
        }
    }

    Ok(())
}

/// Show an order and its payment status.
#[allow(clippy::print_stdout)]
pub async fn order(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order_id = OrderId::new(id);
    let order = ctx.backend.get_order(&order_id).await?;

    println!("Замовлення {}", order.id);
    println!("Статус:   {}", order.status);
    println!("Клієнт:   {} ({})", order.customer_name, order.customer_phone);
    println!("Доставка: {}", order.delivery_address);
    println!();
    for item in &order.items {
        println!(
            "  {} × {} ₴  {}",
            item.quantity, item.price, item.product_name
        );
    }
    println!();
    println!("Разом: {} ₴", order.total_amount);

    if let Ok(payment) = ctx.backend.get_payment_status(&order_id).await {
        println!("Оплата: {:?}", payment.payment_status);
    }

    Ok(())
}
