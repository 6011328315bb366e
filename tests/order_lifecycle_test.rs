use rust_decimal::Decimal;

use storefront::model::{
    AddressCreate, Order, OrderPaymentStatus, OrderStatus, PaymentMethod, PaymentStatus,
    ProductCreate,
};
use storefront::order_actor::OrderError;
use storefront::runtime::StoreSystem;

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

/// Seeds a product with `stock` units, puts `quantity` of it in the user's
/// cart, and checks out. Returns the placed order and the product id.
async fn place_order(
    system: &StoreSystem,
    user: &str,
    stock: u32,
    quantity: u32,
) -> (Order, String) {
    let product_id = system
        .product_client
        .create_product(ProductCreate {
            name: "Widget".to_string(),
            sku: "WID-001".to_string(),
            description: String::new(),
            price: Decimal::new(2500, 2),
            stock,
        })
        .await
        .expect("Failed to create product");
    let address_id = system
        .address_client
        .create_address(address_for(user))
        .await
        .expect("Failed to create address");
    system
        .cart_client
        .add_item(user, &product_id, quantity)
        .await
        .expect("Failed to add item");
    let order = system
        .checkout
        .checkout(user, &address_id, PaymentMethod::Stripe, None)
        .await
        .expect("Checkout failed");
    (order, product_id)
}

/// Cancellation before shipping restores stock and appends exactly one
/// history entry; cancelling again is rejected without touching stock.
#[tokio::test]
async fn test_cancel_restores_stock_exactly_once() {
    let system = StoreSystem::new();
    let (order, product_id) = place_order(&system, "user_1", 5, 2).await;
    assert_eq!(
        system
            .product_client
            .check_stock(product_id.clone())
            .await
            .unwrap(),
        3
    );

    let cancelled = system
        .order_client
        .cancel(&order.order_number, "user_1", false, None)
        .await
        .expect("Cancel failed");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.history.len(), 2);
    assert_eq!(cancelled.history[1].status, OrderStatus::Cancelled);
    assert_eq!(cancelled.history[1].note, "Order cancelled by customer");
    assert_eq!(
        system
            .product_client
            .check_stock(product_id.clone())
            .await
            .unwrap(),
        5
    );

    // Second cancel is an illegal transition and must not restore again
    let err = system
        .order_client
        .cancel(&order.order_number, "user_1", false, None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::IllegalTransition {
            current: OrderStatus::Cancelled,
            requested: OrderStatus::Cancelled,
        }
    );
    assert_eq!(
        system.product_client.check_stock(product_id).await.unwrap(),
        5
    );

    system.shutdown().await.unwrap();
}

/// The admin drives pending → processing → shipped → delivered. Lifecycle
/// timestamps are stamped on first arrival and delivered is terminal.
#[tokio::test]
async fn test_advance_through_fulfillment() {
    let system = StoreSystem::new();
    let (order, _) = place_order(&system, "user_1", 5, 1).await;
    let n = &order.order_number;

    let processing = system
        .order_client
        .update_status(n, OrderStatus::Processing, None, "admin")
        .await
        .unwrap();
    assert_eq!(processing.status, OrderStatus::Processing);
    assert_eq!(
        processing.history.last().unwrap().note,
        "Status changed from pending to processing"
    );

    let shipped = system
        .order_client
        .update_status(n, OrderStatus::Shipped, Some("Handed to carrier".into()), "admin")
        .await
        .unwrap();
    assert!(shipped.shipped_at.is_some());
    assert_eq!(shipped.history.last().unwrap().note, "Handed to carrier");

    let delivered = system
        .order_client
        .update_status(n, OrderStatus::Delivered, None, "admin")
        .await
        .unwrap();
    assert!(delivered.delivered_at.is_some());
    assert_eq!(delivered.history.len(), 4);

    // Terminal: nothing more is accepted, history stays put
    let err = system
        .order_client
        .update_status(n, OrderStatus::Processing, None, "admin")
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::IllegalTransition { .. }));
    let after = system.order_client.get_for(n, "user_1", false).await.unwrap();
    assert_eq!(after.history.len(), 4);

    system.shutdown().await.unwrap();
}

/// Cancellation is its own operation; the admin transition endpoint can
/// never produce a cancelled order.
#[tokio::test]
async fn test_advance_cannot_cancel() {
    let system = StoreSystem::new();
    let (order, _) = place_order(&system, "user_1", 5, 1).await;

    let err = system
        .order_client
        .update_status(&order.order_number, OrderStatus::Cancelled, None, "admin")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::IllegalTransition {
            current: OrderStatus::Pending,
            requested: OrderStatus::Cancelled,
        }
    );

    system.shutdown().await.unwrap();
}

/// Refunds require a captured payment, flip both payment statuses, and
/// deliberately do NOT restore stock.
#[tokio::test]
async fn test_refund_requires_payment_and_keeps_stock() {
    let system = StoreSystem::new();
    let (order, product_id) = place_order(&system, "user_1", 5, 2).await;
    let n = &order.order_number;

    // Unpaid orders cannot be refunded
    let err = system.order_client.refund(n, "admin").await.unwrap_err();
    assert_eq!(
        err,
        OrderError::NotRefundable {
            payment_status: OrderPaymentStatus::Pending,
            status: OrderStatus::Pending,
        }
    );

    let paid = system
        .order_client
        .mark_paid(n, "txn_12345".to_string())
        .await
        .unwrap();
    assert_eq!(paid.payment_status, OrderPaymentStatus::Paid);
    assert_eq!(paid.payment.status, PaymentStatus::Completed);
    assert_eq!(paid.payment.transaction_id, "txn_12345");
    assert!(paid.paid_at.is_some());

    // Capturing twice is rejected
    let err = system
        .order_client
        .mark_paid(n, "txn_67890".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::AlreadyPaid(_)));

    let refunded = system.order_client.refund(n, "admin").await.unwrap();
    assert_eq!(refunded.payment_status, OrderPaymentStatus::Refunded);
    assert_eq!(refunded.payment.status, PaymentStatus::Refunded);
    assert_eq!(refunded.history.last().unwrap().note, "Payment refunded");

    // Refunded units stay sold; returns are a separate concern
    assert_eq!(
        system.product_client.check_stock(product_id).await.unwrap(),
        3
    );

    // A second refund is rejected
    let err = system.order_client.refund(n, "admin").await.unwrap_err();
    assert!(matches!(err, OrderError::NotRefundable { .. }));

    system.shutdown().await.unwrap();
}

/// Customers only ever see their own orders; a foreign order number reads
/// as missing, not forbidden. Admins see everything.
#[tokio::test]
async fn test_order_access_scoping() {
    let system = StoreSystem::new();
    let (order, _) = place_order(&system, "user_1", 5, 1).await;
    let n = &order.order_number;

    let err = system
        .order_client
        .get_for(n, "user_2", false)
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::NotFound(n.clone()));
    let err = system
        .order_client
        .cancel(n, "user_2", false, None)
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::NotFound(n.clone()));

    assert!(system.order_client.get_for(n, "admin", true).await.is_ok());
    assert_eq!(
        system.order_client.list_for("user_1", false).await.unwrap().len(),
        1
    );
    assert!(system
        .order_client
        .list_for("user_2", false)
        .await
        .unwrap()
        .is_empty());

    system.shutdown().await.unwrap();
}

/// Dashboard aggregates: revenue counts paid orders only.
#[tokio::test]
async fn test_order_stats() {
    let system = StoreSystem::new();
    let (paid_order, _) = place_order(&system, "user_1", 10, 2).await;
    let (_unpaid_order, _) = place_order(&system, "user_2", 10, 1).await;

    system
        .order_client
        .mark_paid(&paid_order.order_number, "txn_1".to_string())
        .await
        .unwrap();

    let stats = system.order_client.stats().await.unwrap();
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_revenue, paid_order.total);
    assert_eq!(stats.average_order_value, paid_order.total);
    let pending = stats
        .orders_by_status
        .iter()
        .find(|c| c.status == OrderStatus::Pending)
        .unwrap();
    assert_eq!(pending.count, 2);
    assert_eq!(stats.recent_orders.len(), 2);

    system.shutdown().await.unwrap();
}

/// The admin note is the one field orders accept after creation.
#[tokio::test]
async fn test_admin_note_update() {
    let system = StoreSystem::new();
    let (order, _) = place_order(&system, "user_1", 5, 1).await;

    let updated = system
        .order_client
        .set_admin_note(&order.order_number, "Fragile, double-box".to_string())
        .await
        .unwrap();
    assert_eq!(updated.admin_note, "Fragile, double-box");
    assert_eq!(updated.status, OrderStatus::Pending);
    assert_eq!(updated.history.len(), 1);

    system.shutdown().await.unwrap();
}
