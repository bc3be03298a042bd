//! Checkout form and its validation gate.

use rust_decimal::Decimal;
use thiserror::Error;

use sadok_core::{DeliveryMethod, PaymentMethod, Phone, PhoneError, UserId};

use crate::backend::types::{CartItem, OrderCreate, OrderItem};
use crate::nova_poshta::{City, Warehouse};

use super::resolver::AddressSelection;

/// Fixed delivery-address string used for self-pickup orders.
pub const SELF_PICKUP_ADDRESS: &str = "Самовивіз: смт. Смига, Рівненська обл.";

/// A field-level validation failure, surfaced inline next to the offending
/// field. Raised before any network call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Customer name is empty.
    #[error("Введіть ім'я")]
    EmptyName,

    /// Customer phone is missing or malformed.
    #[error("Невірний формат телефону: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// Nova Poshta delivery requires a selected city.
    #[error("Оберіть місто доставки")]
    MissingCity,

    /// Nova Poshta delivery requires a selected warehouse.
    #[error("Оберіть відділення Нової Пошти")]
    MissingWarehouse,
}

impl ValidationError {
    /// The form field this failure belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "customer_name",
            Self::InvalidPhone(_) => "customer_phone",
            Self::MissingCity => "city",
            Self::MissingWarehouse => "warehouse",
        }
    }
}

/// The checkout form state.
///
/// Invariants:
/// - with `DeliveryMethod::NovaPoshta`, both `city` and `warehouse` must be
///   set before [`validate`](Self::validate) passes;
/// - with `DeliveryMethod::SelfPickup`, `city` and `warehouse` are forced to
///   `None` and the delivery address is the fixed pickup-location string.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_phone: String,
    /// Optional contact email, passed through to the order unvalidated.
    pub customer_email: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    pub city: Option<City>,
    pub warehouse: Option<Warehouse>,
    pub delivery_address: String,
    pub notes: String,
}

impl CheckoutForm {
    /// An empty form with the default delivery and payment methods
    /// (Nova Poshta, cash on delivery).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the delivery method.
    ///
    /// Switching to self-pickup short-circuits the address cascade: city and
    /// warehouse are cleared and the fixed pickup address is set. Switching
    /// back to Nova Poshta clears the address so it must be composed through
    /// the resolver again.
    pub fn set_delivery_method(&mut self, method: DeliveryMethod) {
        self.delivery_method = method;
        match method {
            DeliveryMethod::SelfPickup => {
                self.city = None;
                self.warehouse = None;
                self.delivery_address = SELF_PICKUP_ADDRESS.to_owned();
            }
            DeliveryMethod::NovaPoshta => {
                self.delivery_address.clear();
            }
        }
    }

    /// Copy the resolver's selection into the form.
    ///
    /// Only meaningful for Nova Poshta delivery; self-pickup keeps its fixed
    /// address.
    pub fn apply_address(&mut self, selection: &AddressSelection) {
        if self.delivery_method != DeliveryMethod::NovaPoshta {
            return;
        }
        self.city = selection.city.clone();
        self.warehouse = selection.warehouse.clone();
        self.delivery_address = selection.delivery_address.clone();
    }

    /// The validation gate run before submission.
    ///
    /// Blocks unless the name is non-empty and the phone normalizes to a
    /// valid number; with Nova Poshta delivery, additionally requires a
    /// selected city and warehouse. Self-pickup short-circuits the address
    /// requirements.
    ///
    /// # Errors
    ///
    /// Returns every failed field at once so a UI can mark them all.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.customer_name.trim().is_empty() {
            errors.push(ValidationError::EmptyName);
        }

        if let Err(e) = Phone::parse(&self.customer_phone) {
            errors.push(ValidationError::InvalidPhone(e));
        }

        if self.delivery_method == DeliveryMethod::NovaPoshta {
            if self.city.is_none() {
                errors.push(ValidationError::MissingCity);
            }
            if self.warehouse.is_none() {
                errors.push(ValidationError::MissingWarehouse);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate and build the order payload from the current cart contents.
    ///
    /// # Errors
    ///
    /// Returns the validation failures when the gate blocks.
    pub fn to_order(
        &self,
        items: &[CartItem],
        total_amount: Decimal,
        user: &UserId,
    ) -> Result<OrderCreate, Vec<ValidationError>> {
        self.validate()?;

        Ok(OrderCreate {
            items: items
                .iter()
                .map(|item| OrderItem {
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    product_image: item.product_image.clone(),
                    price: item.price,
                    quantity: item.quantity,
                })
                .collect(),
            total_amount,
            customer_name: self.customer_name.trim().to_owned(),
            customer_phone: self.customer_phone.clone(),
            customer_email: self.customer_email.clone(),
            delivery_address: self.delivery_address.clone(),
            delivery_method: self.delivery_method,
            payment_method: self.payment_method,
            notes: if self.notes.trim().is_empty() {
                None
            } else {
                Some(self.notes.clone())
            },
            user_id: user.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn city() -> City {
        City {
            ref_id: "kyiv-ref".to_owned(),
            name: "Київ".to_owned(),
            area: "Київська".to_owned(),
            region: None,
        }
    }

    fn warehouse() -> Warehouse {
        Warehouse {
            ref_id: "w-1".to_owned(),
            description: "Відділення №1".to_owned(),
            short_address: None,
            number: "1".to_owned(),
            city_ref: "kyiv-ref".to_owned(),
        }
    }

    fn valid_nova_poshta_form() -> CheckoutForm {
        let mut form = CheckoutForm::new();
        form.customer_name = "Іван Іваненко".to_owned();
        form.customer_phone = "+380 (63) 650-74-49".to_owned();
        form.city = Some(city());
        form.warehouse = Some(warehouse());
        form.delivery_address = "Київ, Відділення №1".to_owned();
        form
    }

    #[test]
    fn test_valid_nova_poshta_form_passes() {
        assert!(valid_nova_poshta_form().validate().is_ok());
    }

    #[test]
    fn test_nova_poshta_requires_city_and_warehouse() {
        let mut form = valid_nova_poshta_form();
        form.city = None;
        let errors = form.validate().unwrap_err();
        assert!(errors.contains(&ValidationError::MissingCity));

        let mut form = valid_nova_poshta_form();
        form.warehouse = None;
        let errors = form.validate().unwrap_err();
        assert!(errors.contains(&ValidationError::MissingWarehouse));
    }

    #[test]
    fn test_self_pickup_short_circuits_address_requirements() {
        let mut form = CheckoutForm::new();
        form.customer_name = "Іван Іваненко".to_owned();
        form.customer_phone = "0636507449".to_owned();
        form.set_delivery_method(DeliveryMethod::SelfPickup);

        assert!(form.city.is_none());
        assert!(form.warehouse.is_none());
        assert_eq!(form.delivery_address, SELF_PICKUP_ADDRESS);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_switching_to_pickup_drops_selection() {
        let mut form = valid_nova_poshta_form();
        form.set_delivery_method(DeliveryMethod::SelfPickup);

        assert!(form.city.is_none());
        assert!(form.warehouse.is_none());
        assert_eq!(form.delivery_address, SELF_PICKUP_ADDRESS);

        form.set_delivery_method(DeliveryMethod::NovaPoshta);
        assert_eq!(form.delivery_address, "");
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_empty_name_and_bad_phone_reported_together() {
        let mut form = CheckoutForm::new();
        form.customer_phone = "123".to_owned();
        form.set_delivery_method(DeliveryMethod::SelfPickup);

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field(), "customer_name");
        assert_eq!(errors[1].field(), "customer_phone");
    }

    #[test]
    fn test_to_order_builds_items_from_cart() {
        use sadok_core::{CartItemId, ProductId};

        let form = valid_nova_poshta_form();
        let items = vec![CartItem {
            id: CartItemId::new("c-1"),
            product_id: ProductId::new("p-1"),
            product_name: "Туя Смарагд".to_owned(),
            product_image: "/media/thuja.jpg".to_owned(),
            price: Decimal::from(450),
            quantity: 2,
            user_id: UserId::guest(),
        }];

        let order = form
            .to_order(&items, Decimal::from(900), &UserId::guest())
            .unwrap();

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.total_amount, Decimal::from(900));
        assert_eq!(order.delivery_address, "Київ, Відділення №1");
        assert_eq!(order.notes, None);
    }

    #[test]
    fn test_to_order_blocks_on_validation() {
        let mut form = valid_nova_poshta_form();
        form.customer_name.clear();

        let result = form.to_order(&[], Decimal::ZERO, &UserId::guest());
        assert!(result.is_err());
    }
}
