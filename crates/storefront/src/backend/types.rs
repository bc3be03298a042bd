//! Wire types for the backend REST API.
//!
//! Field names serialize in camelCase to match the backend bit-exactly.
//! Timestamps arrive as naive ISO 8601 strings (the backend stores UTC
//! without an offset), so they map to `NaiveDateTime`.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sadok_core::{
    CartItemId, CategoryId, DeliveryMethod, OrderId, OrderStatus, PaymentMethod, PaymentStatus,
    ProductId, UserId, WishlistItemId,
};

// =============================================================================
// Catalog
// =============================================================================

/// A product in the nursery catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Vendor article / SKU.
    pub article: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Pre-discount price, when the product is on sale.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub old_price: Option<Decimal>,
    /// Discount percentage (0 when not discounted).
    #[serde(default)]
    pub discount: i32,
    pub image: String,
    pub category: String,
    /// Marketing badges ("hit", "sale", "new").
    #[serde(default)]
    pub badges: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub stock: i64,
    pub created_at: NaiveDateTime,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub count: i64,
}

// =============================================================================
// Cart & Wishlist
// =============================================================================

/// A line in the guest cart, as stored by the backend.
///
/// Product name, image, and price are frozen at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub user_id: UserId,
}

/// A wishlist membership record: its existence means "this product is
/// wishlisted by this user".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: WishlistItemId,
    pub product_id: ProductId,
    #[serde(default)]
    pub user_id: UserId,
    pub created_at: NaiveDateTime,
}

// =============================================================================
// Orders
// =============================================================================

/// An order line item (frozen product snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    pub delivery_address: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    /// Set once the payment gateway confirms payment.
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

/// Payload for placing an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    pub delivery_address: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub user_id: UserId,
}

/// A one-click order placed straight from a product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickOrder {
    pub id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_image: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Payload for placing a one-click order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickOrderCreate {
    pub product_id: ProductId,
    pub quantity: u32,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// Site Settings
// =============================================================================

/// Envelope the backend wraps the settings object in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsEnvelope {
    pub settings_data: SiteSettings,
}

/// A slide on the storefront hero carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub id: i64,
    pub image: String,
    pub title: String,
    pub subtitle: String,
    pub active: bool,
}

/// The dismissible banner above the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopBanner {
    pub text: String,
    pub active: bool,
    pub color: String,
}

/// The publicly-readable site configuration object.
///
/// Fetched once per session and replaced wholesale on refresh; consumers can
/// rely on every field being populated because the store substitutes
/// [`SiteSettings::default`] when the fetch or parse fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub phone1: String,
    pub phone2: String,
    pub email: String,
    pub viber: String,
    pub address: String,
    pub working_hours: String,
    pub weekend: String,
    pub instagram: String,
    pub tiktok: String,
    pub facebook: String,
    pub youtube: String,
    pub site_name: String,
    pub site_description: String,
    pub site_keywords: String,
    pub hero_slides: Vec<HeroSlide>,
    pub top_banner: TopBanner,
    pub delivery_text: String,
    pub payment_text: String,
    pub return_policy: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub free_delivery_from: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub first_order_discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub bulk_order_discount: Decimal,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub order_notification_email: String,
    pub support_email: String,
    pub currency: String,
    pub language: String,
    pub timezone: String,
    pub show_stock: bool,
    pub show_reviews: bool,
}

impl Default for SiteSettings {
    /// The complete fallback configuration used when the settings fetch
    /// fails, so downstream consumers never handle partial objects.
    fn default() -> Self {
        Self {
            phone1: "+380 (63) 650-74-49".to_owned(),
            phone2: "+380 (95) 251-03-47".to_owned(),
            email: "info@sadok.ua".to_owned(),
            viber: "+380636507449".to_owned(),
            address: "смт. Смига, вул. Садова, 15".to_owned(),
            working_hours: "Пн-Сб: 9:00-18:00".to_owned(),
            weekend: "Нд: вихідний".to_owned(),
            instagram: "https://www.instagram.com/sadok.ua".to_owned(),
            tiktok: "https://www.tiktok.com/@sadok.ua".to_owned(),
            facebook: String::new(),
            youtube: String::new(),
            site_name: "Sadok".to_owned(),
            site_description: "Професійний розсадник рослин в Україні".to_owned(),
            site_keywords: "розсадник, рослини, туя, бонсай, хвойні".to_owned(),
            hero_slides: vec![
                HeroSlide {
                    id: 1,
                    image: "https://images.unsplash.com/photo-1494825514961-674db1ac2700".to_owned(),
                    title: "Sadok".to_owned(),
                    subtitle: "Професійний розсадник рослин".to_owned(),
                    active: true,
                },
                HeroSlide {
                    id: 2,
                    image: "/media/hero/bonsai-nivaki.jpg".to_owned(),
                    title: "Бонсай Нівакі".to_owned(),
                    subtitle: "Японський стиль для вашого саду".to_owned(),
                    active: true,
                },
                HeroSlide {
                    id: 3,
                    image: "/media/hero/thuja-smaragd.jpg".to_owned(),
                    title: "Туя Смарагд".to_owned(),
                    subtitle: "Ідеальний живопліт".to_owned(),
                    active: true,
                },
                HeroSlide {
                    id: 4,
                    image: "/media/hero/conifers.jpg".to_owned(),
                    title: "Хвойні рослини".to_owned(),
                    subtitle: "Вічнозелена краса".to_owned(),
                    active: true,
                },
            ],
            top_banner: TopBanner {
                text: "🎉 Знижка 20% на всі туї до кінця місяця!".to_owned(),
                active: false,
                color: "#10b981".to_owned(),
            },
            delivery_text:
                "Ми працюємо з Новою Поштою. Безкоштовна доставка при замовленні від 1000₴."
                    .to_owned(),
            payment_text: "Приймаємо оплату: накладений платіж, LiqPay (Visa/Mastercard)."
                .to_owned(),
            return_policy: "Повернення та обмін товару протягом 14 днів.".to_owned(),
            free_delivery_from: Decimal::from(1000),
            first_order_discount: Decimal::ZERO,
            bulk_order_discount: Decimal::ZERO,
            primary_color: "#10b981".to_owned(),
            secondary_color: "#059669".to_owned(),
            accent_color: "#f59e0b".to_owned(),
            order_notification_email: "orders@sadok.ua".to_owned(),
            support_email: "support@sadok.ua".to_owned(),
            currency: "₴".to_owned(),
            language: "uk".to_owned(),
            timezone: "Europe/Kiev".to_owned(),
            show_stock: true,
            show_reviews: true,
        }
    }
}

// =============================================================================
// Payment (LiqPay)
// =============================================================================

/// A LiqPay checkout session created by the backend.
///
/// `data` is the base64-encoded payment payload; the browser posts it with
/// `signature` to `checkout_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiqpayCheckout {
    pub data: String,
    pub signature: String,
    pub checkout_url: String,
}

/// Payment status for an order, polled after redirect back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub order_id: OrderId,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub liqpay_status: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let json = r#"{
            "id": "p-1",
            "name": "Туя Смарагд",
            "article": "TU-001",
            "price": 450.0,
            "oldPrice": 500.0,
            "discount": 10,
            "image": "/media/thuja.jpg",
            "category": "Хвойні",
            "badges": ["sale"],
            "description": "Вічнозелена туя",
            "stock": 25,
            "createdAt": "2025-06-01T10:30:00.123456"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p-1");
        assert_eq!(product.price, Decimal::new(4500, 1));
        assert_eq!(product.old_price, Some(Decimal::from(500)));
        assert_eq!(product.badges, vec!["sale"]);
    }

    #[test]
    fn test_cart_item_defaults_to_guest() {
        let json = r#"{
            "id": "c-1",
            "productId": "p-1",
            "productName": "Туя",
            "productImage": "/media/thuja.jpg",
            "price": 450.0,
            "quantity": 2
        }"#;

        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.user_id.as_str(), "guest");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_order_create_serializes_camel_case() {
        let order = OrderCreate {
            items: vec![],
            total_amount: Decimal::from(900),
            customer_name: "Іван Іваненко".to_owned(),
            customer_phone: "+380636507449".to_owned(),
            customer_email: String::new(),
            delivery_address: "Київ, Відділення №1".to_owned(),
            delivery_method: DeliveryMethod::NovaPoshta,
            payment_method: PaymentMethod::CashOnDelivery,
            notes: None,
            user_id: UserId::guest(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["totalAmount"], 900.0);
        assert_eq!(json["deliveryMethod"], "nova_poshta");
        assert_eq!(json["paymentMethod"], "cash_on_delivery");
        assert_eq!(json["userId"], "guest");
    }

    #[test]
    fn test_default_settings_fully_populated() {
        let settings = SiteSettings::default();
        assert!(!settings.phone1.is_empty());
        assert_eq!(settings.hero_slides.len(), 4);
        assert_eq!(settings.free_delivery_from, Decimal::from(1000));
        assert_eq!(settings.currency, "₴");
        assert!(!settings.top_banner.active);
    }

    #[test]
    fn test_settings_envelope_roundtrip() {
        let envelope = SettingsEnvelope {
            settings_data: SiteSettings::default(),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        let parsed: SettingsEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.settings_data, envelope.settings_data);
    }
}
