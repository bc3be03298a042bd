//! Store contracts against the shared in-memory backend.

use rust_decimal::Decimal;

use sadok_core::{CartItemId, ProductId};
use sadok_integration_tests::{FakeShop, NoticeLevel, RecordingNotifier, test_product};
use sadok_storefront::stores::{CartStore, WishlistStore};

#[tokio::test]
async fn cart_totals_follow_the_item_list() {
    let shop = FakeShop::new();
    shop.seed_product(test_product("p1", "Туя Смарагд", 450));
    shop.seed_product(test_product("p2", "Ялівець", 280));

    let cart = CartStore::new(shop.clone(), RecordingNotifier::new());

    cart.add_to_cart_silent(&test_product("p1", "Туя Смарагд", 450), 2)
        .await;
    cart.add_to_cart_silent(&test_product("p2", "Ялівець", 280), 3)
        .await;

    assert_eq!(cart.cart_count(), 5);
    assert_eq!(cart.cart_total(), Decimal::from(1740));

    // Adding the same product again merges quantities on the backend and
    // the re-fetch reflects it.
    cart.add_to_cart_silent(&test_product("p1", "Туя Смарагд", 450), 1)
        .await;
    assert_eq!(cart.cart_count(), 6);
    assert_eq!(cart.cart_total(), Decimal::from(2190));
}

#[tokio::test]
async fn zero_quantity_update_sends_nothing() {
    let shop = FakeShop::new();
    shop.seed_product(test_product("p1", "Туя Смарагд", 450));

    let cart = CartStore::new(shop.clone(), RecordingNotifier::new());
    cart.add_to_cart_silent(&test_product("p1", "Туя Смарагд", 450), 2)
        .await;

    let requests_before = shop.request_count();
    cart.update_quantity(&CartItemId::new("cart-1"), 0).await;

    assert_eq!(shop.request_count(), requests_before);
    assert_eq!(cart.cart_count(), 2);
}

#[tokio::test]
async fn wishlist_toggle_is_an_involution() {
    let shop = FakeShop::new();
    shop.seed_product(test_product("p1", "Туя Смарагд", 450));

    let notifier = RecordingNotifier::new();
    let wishlist = WishlistStore::new(shop.clone(), notifier.clone());
    let product_id = ProductId::new("p1");

    wishlist.fetch_wishlist().await;
    let baseline = wishlist.items();

    wishlist.toggle_wishlist(&product_id).await;
    assert!(wishlist.is_in_wishlist(&product_id));

    wishlist.toggle_wishlist(&product_id).await;
    assert!(!wishlist.is_in_wishlist(&product_id));
    assert_eq!(wishlist.items(), baseline);

    // One add + one remove confirmation.
    let successes = notifier
        .notices()
        .iter()
        .filter(|(level, _)| *level == NoticeLevel::Success)
        .count();
    assert_eq!(successes, 2);
}

#[tokio::test]
async fn failed_mutation_notifies_and_preserves_state() {
    use std::sync::atomic::Ordering;

    let shop = FakeShop::new();
    shop.seed_product(test_product("p1", "Туя Смарагд", 450));

    let notifier = RecordingNotifier::new();
    let cart = CartStore::new(shop.clone(), notifier.clone());
    cart.add_to_cart_silent(&test_product("p1", "Туя Смарагд", 450), 2)
        .await;

    shop.fail_mutations.store(true, Ordering::SeqCst);
    cart.add_to_cart(&test_product("p1", "Туя Смарагд", 450), 1)
        .await;

    assert_eq!(cart.cart_count(), 2);
    assert!(notifier
        .notices()
        .iter()
        .any(|(level, message)| *level == NoticeLevel::Error
            && message == "Помилка додавання до кошика"));
}
