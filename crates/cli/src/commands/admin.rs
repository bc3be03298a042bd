//! Back-office commands.

use sadok_admin::OrderFilter;
use sadok_core::OrderStatus;

use super::Context;

/// Log in and persist the session token.
#[allow(clippy::print_stdout)]
pub async fn login(
    ctx: &Context,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = ctx.admin()?;
    let username = client.login(username, password).await?;
    println!("Вхід виконано: {username}");
    Ok(())
}

/// Show the dashboard statistics.
#[allow(clippy::print_stdout)]
pub async fn stats(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let client = ctx.admin()?;
    let stats = client.get_dashboard_stats().await?;

    println!("Товарів:       {}", stats.total_products);
    println!("Категорій:     {}", stats.total_categories);
    println!("Замовлень:     {}", stats.total_orders);
    println!("  в очікуванні: {}", stats.pending_orders);
    println!("Виручка:       {} ₴", stats.total_revenue);

    let top = client.get_top_products(5).await?;
    if !top.is_empty() {
        println!();
        println!("Топ товарів:");
        for product in top {
            println!(
                "  {}: {} прод., {} ₴",
                product.name, product.sales, product.revenue
            );
        }
    }

    Ok(())
}

/// List orders, optionally filtered by status.
#[allow(clippy::print_stdout)]
pub async fn orders(ctx: &Context, status: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let status = status.map(str::parse::<OrderStatus>).transpose()?;

    let client = ctx.admin()?;
    let orders = client
        .get_all_orders(&OrderFilter {
            status,
            ..OrderFilter::default()
        })
        .await?;

    if orders.is_empty() {
        println!("Замовлень немає");
        return Ok(());
    }

    for order in orders {
        println!(
            "{}  {:<10}  {:>10} ₴  {}",
            order.id, order.status, order.total_amount, order.customer_name
        );
    }

    Ok(())
}

/// Forget the persisted session.
#[allow(clippy::print_stdout)]
pub fn logout(ctx: &Context) {
    if let Ok(client) = ctx.admin() {
        client.logout();
        println!("Сеанс завершено");
    }
}
