//! Wire types for the admin API.
//!
//! Dashboard payloads use camelCase (they come from the same handlers the
//! browser admin panel consumed); the media and CMS routers speak
//! snake_case. Each struct matches its endpoint bit-exactly.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sadok_core::{CategoryId, OrderStatus, ProductId};

// =============================================================================
// Auth
// =============================================================================

/// Token issued by `POST /api/admin/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminToken {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Response of `GET /api/admin/verify`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminVerify {
    pub username: String,
}

// =============================================================================
// Dashboard analytics
// =============================================================================

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_orders: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub pending_orders: i64,
    #[serde(default)]
    pub low_stock_products: i64,
    #[serde(default)]
    pub total_categories: i64,
    /// Most recent orders, left loose: the dashboard renders them verbatim.
    #[serde(default)]
    pub recent_orders: Vec<serde_json::Value>,
}

/// One day on the revenue chart.
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueData {
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// A best-selling product.
#[derive(Debug, Clone, Deserialize)]
pub struct TopProduct {
    pub id: ProductId,
    pub name: String,
    pub sales: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Order counts per status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderStats {
    #[serde(default)]
    pub pending: i64,
    #[serde(default)]
    pub processing: i64,
    #[serde(default)]
    pub shipped: i64,
    #[serde(default)]
    pub delivered: i64,
    #[serde(default)]
    pub cancelled: i64,
}

/// One day on the orders chart.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersChartData {
    pub date: String,
    pub orders: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Share of orders in one status.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersByStatus {
    pub status: OrderStatus,
    pub count: i64,
    pub percentage: f64,
}

/// A repeat customer, aggregated by phone.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    pub name: String,
    pub phone: String,
    pub total_orders: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
}

// =============================================================================
// Catalog management
// =============================================================================

/// A product as the admin API returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProduct {
    pub id: ProductId,
    pub name: String,
    pub article: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub old_price: Option<Decimal>,
    #[serde(default)]
    pub discount: i32,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub badges: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub stock: i64,
    pub created_at: NaiveDateTime,
}

/// A category as the admin API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCategory {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub count: i64,
}

/// An order line as the admin API returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

/// An order as the admin API returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    pub id: sadok_core::OrderId,
    pub items: Vec<AdminOrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    pub delivery_address: String,
    pub delivery_method: sadok_core::DeliveryMethod,
    pub payment_method: sadok_core::PaymentMethod,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub article: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub old_price: Option<Decimal>,
    pub discount: i32,
    pub image: String,
    pub category: String,
    pub badges: Vec<String>,
    pub description: String,
    pub stock: i64,
}

/// Partial update of a product; only set fields change.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option",
        default
    )]
    pub price: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option",
        default
    )]
    pub old_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCreate {
    pub name: String,
    pub icon: String,
    pub count: i64,
}

/// Partial update of a category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

/// Filters for the admin order listing.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Restrict to one status.
    pub status: Option<OrderStatus>,
    /// Page size.
    pub limit: Option<u32>,
    /// Pagination offset.
    pub skip: Option<u32>,
}

// =============================================================================
// Media library
// =============================================================================

/// A file in the media library.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaFile {
    pub id: String,
    pub filename: String,
    pub original_name: String,
    pub url: String,
    pub file_type: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Metadata update for a media file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaFileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

/// Result of uploading a file.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUpload {
    pub url: String,
    pub filename: String,
}

/// Media library statistics.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaStats {
    pub total_files: i64,
    pub total_size: i64,
    pub total_size_formatted: String,
    pub by_type: MediaTypeCounts,
}

/// Per-type file counts within [`MediaStats`].
#[derive(Debug, Clone, Deserialize)]
pub struct MediaTypeCounts {
    pub images: i64,
    pub videos: i64,
    pub documents: i64,
}

// =============================================================================
// CMS
// =============================================================================

/// A CMS page, addressed by its stable `page_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsPage {
    pub page_key: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,
}

/// Partial update of a CMS page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CmsPageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,
}

/// The storefront hero section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

/// A link in the storefront footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterLink {
    #[serde(default)]
    pub id: Option<String>,
    pub section: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Partial update of a footer link.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FooterLinkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

const fn default_true() -> bool {
    true
}

// =============================================================================
// Site settings
// =============================================================================

/// Envelope for reading and writing the site settings blob. The admin panel
/// edits arbitrary keys, so the payload stays a loose JSON object here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettingsEnvelope {
    pub settings_data: serde_json::Value,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_stats_wire_format() {
        let json = r#"{
            "totalProducts": 120,
            "totalOrders": 34,
            "totalRevenue": 15600.5,
            "pendingOrders": 4,
            "lowStockProducts": 2,
            "totalCategories": 8,
            "recentOrders": []
        }"#;

        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_products, 120);
        assert_eq!(stats.total_revenue, Decimal::new(156005, 1));
    }

    #[test]
    fn test_product_update_skips_unset_fields() {
        let update = ProductUpdate {
            price: Some(Decimal::from(500)),
            ..ProductUpdate::default()
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["price"], 500.0);
        assert!(json.get("name").is_none());
        assert!(json.get("stock").is_none());
    }

    #[test]
    fn test_orders_by_status_parses_status_enum() {
        let json = r#"{"status": "shipped", "count": 7, "percentage": 20.5}"#;
        let row: OrdersByStatus = serde_json::from_str(json).unwrap();
        assert_eq!(row.status, OrderStatus::Shipped);
    }

    #[test]
    fn test_footer_link_defaults_active() {
        let json = r#"{"section": "info", "title": "Доставка", "url": "/delivery"}"#;
        let link: FooterLink = serde_json::from_str(json).unwrap();
        assert!(link.is_active);
        assert_eq!(link.order, 0);
    }
}
