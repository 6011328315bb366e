use rust_decimal::Decimal;

use storefront::checkout::CheckoutError;
use storefront::clients::actor_client::ActorClient;
use storefront::model::{
    AddressCreate, OrderPaymentStatus, OrderStatus, PaymentMethod, ProductCreate, ProductUpdate,
};
use storefront::runtime::StoreSystem;

fn product(name: &str, sku: &str, price: Decimal, stock: u32) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        sku: sku.to_string(),
        description: String::new(),
        price,
        stock,
    }
}

fn address_for(user_id: &str) -> AddressCreate {
    AddressCreate {
        user_id: user_id.to_string(),
        full_name: "Alice Doe".to_string(),
        phone: "5550001111".to_string(),
        address_line1: "1 Main St".to_string(),
        address_line2: String::new(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postal_code: "62701".to_string(),
        country: "US".to_string(),
        is_default: true,
    }
}

/// Happy path: two cart lines, fixed prices, full pricing breakdown,
/// stock reserved, cart emptied, order born pending with one history entry.
#[tokio::test]
async fn test_checkout_places_order_and_reserves_stock() {
    let system = StoreSystem::new();
    let user = "user_1";

    // $25.00 x 2 + $10.00 x 1 = $60.00 subtotal, under free shipping
    let widget = system
        .product_client
        .create_product(product("Widget", "WID-001", Decimal::new(2500, 2), 5))
        .await
        .expect("Failed to create product");
    let gadget = system
        .product_client
        .create_product(product("Gadget", "GAD-001", Decimal::new(1000, 2), 3))
        .await
        .expect("Failed to create product");
    let address_id = system
        .address_client
        .create_address(address_for(user))
        .await
        .expect("Failed to create address");

    system.cart_client.add_item(user, &widget, 2).await.unwrap();
    system.cart_client.add_item(user, &gadget, 1).await.unwrap();

    let order = system
        .checkout
        .checkout(user, &address_id, PaymentMethod::Stripe, None)
        .await
        .expect("Checkout failed");

    // Pricing: 60.00 + 6.00 tax + 10.00 flat shipping
    assert_eq!(order.subtotal, Decimal::new(6000, 2));
    assert_eq!(order.tax, Decimal::new(600, 2));
    assert_eq!(order.shipping_cost, Decimal::new(1000, 2));
    assert_eq!(order.discount, Decimal::ZERO);
    assert_eq!(order.total, Decimal::new(7600, 2));
    assert_eq!(order.derived_total(), order.total);

    // Fresh order state
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, OrderPaymentStatus::Pending);
    assert_eq!(order.payment.amount, order.total);
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.total_items(), 3);
    assert_eq!(order.history.len(), 1);
    assert_eq!(order.history[0].status, OrderStatus::Pending);
    assert_eq!(order.history[0].note, "Order created");

    // Order number shape: ORD-YYYYMMDD-XXXXXX
    let parts: Vec<&str> = order.order_number.split('-').collect();
    assert_eq!(parts[0], "ORD");
    assert_eq!(parts[1].len(), 8);
    assert_eq!(parts[2].len(), 6);

    // Stock was decremented and the cart emptied
    assert_eq!(
        system.product_client.check_stock(widget.clone()).await.unwrap(),
        3
    );
    assert_eq!(
        system.product_client.check_stock(gadget.clone()).await.unwrap(),
        2
    );
    let cart = system
        .cart_client
        .get(user.to_string())
        .await
        .unwrap()
        .expect("Cart should persist after checkout");
    assert!(cart.is_empty());

    system.shutdown().await.expect("Failed to shutdown system");
}

/// Orders over $100 ship free.
#[tokio::test]
async fn test_checkout_free_shipping_at_threshold() {
    let system = StoreSystem::new();
    let user = "user_1";

    let id = system
        .product_client
        .create_product(product("Bulk Widget", "BLK-001", Decimal::new(5000, 2), 10))
        .await
        .unwrap();
    let address_id = system
        .address_client
        .create_address(address_for(user))
        .await
        .unwrap();
    system.cart_client.add_item(user, &id, 2).await.unwrap();

    let order = system
        .checkout
        .checkout(user, &address_id, PaymentMethod::Paypal, None)
        .await
        .unwrap();

    assert_eq!(order.subtotal, Decimal::new(10000, 2));
    assert_eq!(order.shipping_cost, Decimal::ZERO);
    assert_eq!(order.total, Decimal::new(11000, 2));

    system.shutdown().await.unwrap();
}

/// Every failing line is reported at once, and nothing is mutated:
/// no order, no stock movement, cart intact.
#[tokio::test]
async fn test_checkout_reports_every_shortage() {
    let system = StoreSystem::new();
    let user = "user_1";

    let a = system
        .product_client
        .create_product(product("Widget", "WID-001", Decimal::new(2500, 2), 5))
        .await
        .unwrap();
    let b = system
        .product_client
        .create_product(product("Gadget", "GAD-001", Decimal::new(1000, 2), 5))
        .await
        .unwrap();
    let address_id = system
        .address_client
        .create_address(address_for(user))
        .await
        .unwrap();

    system.cart_client.add_item(user, &a, 3).await.unwrap();
    system.cart_client.add_item(user, &b, 4).await.unwrap();

    // Stock drops after the lines were added
    let downsize = |stock| ProductUpdate {
        name: None,
        description: None,
        price: None,
        stock: Some(stock),
        is_active: None,
    };
    system
        .product_client
        .update_product(a.clone(), downsize(1))
        .await
        .unwrap();
    system
        .product_client
        .update_product(b.clone(), downsize(2))
        .await
        .unwrap();

    let err = system
        .checkout
        .checkout(user, &address_id, PaymentMethod::Stripe, None)
        .await
        .unwrap_err();

    match err {
        CheckoutError::InsufficientStock(shortages) => {
            assert_eq!(shortages.len(), 2, "both failing lines must be reported");
            let for_a = shortages.iter().find(|s| s.product_id == a).unwrap();
            assert_eq!(for_a.requested, 3);
            assert_eq!(for_a.available, 1);
            let for_b = shortages.iter().find(|s| s.product_id == b).unwrap();
            assert_eq!(for_b.requested, 4);
            assert_eq!(for_b.available, 2);
        }
        other => panic!("Expected InsufficientStock, got {other:?}"),
    }

    // Nothing happened
    assert_eq!(system.product_client.check_stock(a).await.unwrap(), 1);
    assert_eq!(system.product_client.check_stock(b).await.unwrap(), 2);
    assert!(system
        .order_client
        .list_for(user, false)
        .await
        .unwrap()
        .is_empty());
    let cart = system
        .cart_client
        .get(user.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cart.lines.len(), 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart() {
    let system = StoreSystem::new();
    let address_id = system
        .address_client
        .create_address(address_for("user_1"))
        .await
        .unwrap();

    // No cart at all
    let err = system
        .checkout
        .checkout("user_1", &address_id, PaymentMethod::Cash, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));

    // A cart that exists but was emptied
    let id = system
        .product_client
        .create_product(product("Widget", "WID-001", Decimal::new(2500, 2), 5))
        .await
        .unwrap();
    system.cart_client.add_item("user_1", &id, 1).await.unwrap();
    system.cart_client.clear("user_1").await.unwrap();
    let err = system
        .checkout
        .checkout("user_1", &address_id, PaymentMethod::Cash, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));

    system.shutdown().await.unwrap();
}

/// The shipping address must exist, be active, and belong to the buyer.
#[tokio::test]
async fn test_checkout_requires_valid_address() {
    let system = StoreSystem::new();

    let id = system
        .product_client
        .create_product(product("Widget", "WID-001", Decimal::new(2500, 2), 5))
        .await
        .unwrap();
    system.cart_client.add_item("user_1", &id, 1).await.unwrap();

    // Someone else's address
    let foreign = system
        .address_client
        .create_address(address_for("user_2"))
        .await
        .unwrap();
    let err = system
        .checkout
        .checkout("user_1", &foreign, PaymentMethod::Stripe, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::InvalidAddress(_)));

    // Nonexistent address
    let err = system
        .checkout
        .checkout("user_1", "address_999", PaymentMethod::Stripe, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::InvalidAddress(_)));

    system.shutdown().await.unwrap();
}

/// Two buyers race for the last unit: the product actor serializes the
/// reservations, so exactly one checkout wins and stock never goes negative.
#[tokio::test]
async fn test_concurrent_checkout_of_last_unit() {
    let system = StoreSystem::new();

    let id = system
        .product_client
        .create_product(product("Last Widget", "LST-001", Decimal::new(2500, 2), 1))
        .await
        .unwrap();
    let addr_a = system
        .address_client
        .create_address(address_for("user_a"))
        .await
        .unwrap();
    let addr_b = system
        .address_client
        .create_address(address_for("user_b"))
        .await
        .unwrap();
    system.cart_client.add_item("user_a", &id, 1).await.unwrap();
    system.cart_client.add_item("user_b", &id, 1).await.unwrap();

    let mut handles = vec![];
    for (user, addr) in [("user_a", addr_a), ("user_b", addr_b)] {
        let checkout = system.checkout.clone();
        let user = user.to_string();
        handles.push(tokio::spawn(async move {
            checkout
                .checkout(&user, &addr, PaymentMethod::Stripe, None)
                .await
        }));
    }

    let mut successes = 0;
    let mut shortages = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(CheckoutError::InsufficientStock(s)) => {
                assert_eq!(s[0].available, 0);
                shortages += 1;
            }
            Err(other) => panic!("Unexpected error: {other:?}"),
        }
    }
    assert_eq!(successes, 1, "exactly one buyer gets the last unit");
    assert_eq!(shortages, 1);
    assert_eq!(system.product_client.check_stock(id).await.unwrap(), 0);

    // Only the winner has an order
    let all = system.order_client.list_for("admin", true).await.unwrap();
    assert_eq!(all.len(), 1);

    system.shutdown().await.unwrap();
}
