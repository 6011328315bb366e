use rust_decimal::Decimal;

use storefront::cart_actor::{CartError, CartLineInput, CartRejection};
use storefront::clients::actor_client::ActorClient;
use storefront::model::{ProductCreate, ProductUpdate};
use storefront::runtime::StoreSystem;

async fn seed_product(system: &StoreSystem, name: &str, price: Decimal, stock: u32) -> String {
    system
        .product_client
        .create_product(ProductCreate {
            name: name.to_string(),
            sku: format!("{}-001", name.to_uppercase()),
            description: String::new(),
            price,
            stock,
        })
        .await
        .expect("Failed to create product")
}

#[tokio::test]
async fn test_add_item_merges_lines() {
    let system = StoreSystem::new();
    let widget = seed_product(&system, "Widget", Decimal::new(2500, 2), 10).await;
    let gadget = seed_product(&system, "Gadget", Decimal::new(1000, 2), 10).await;

    system.cart_client.add_item("user_1", &widget, 2).await.unwrap();
    let cart = system.cart_client.add_item("user_1", &widget, 3).await.unwrap();
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.line(&widget).unwrap().quantity, 5);

    let cart = system.cart_client.add_item("user_1", &gadget, 1).await.unwrap();
    assert_eq!(cart.lines.len(), 2);
    assert_eq!(cart.total_items(), 6);

    system.shutdown().await.unwrap();
}

/// The advisory stock check applies to the merged quantity, not just the
/// increment.
#[tokio::test]
async fn test_add_item_rejects_beyond_stock() {
    let system = StoreSystem::new();
    let widget = seed_product(&system, "Widget", Decimal::new(2500, 2), 2).await;

    let err = system
        .cart_client
        .add_item("user_1", &widget, 3)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CartError::InsufficientStock {
            product_id: widget.clone(),
            available: 2,
        }
    );

    // 2 in cart, adding 1 more would exceed the 2 in stock
    system.cart_client.add_item("user_1", &widget, 2).await.unwrap();
    let err = system
        .cart_client
        .add_item("user_1", &widget, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::InsufficientStock { .. }));
    let cart = system.cart_client.add_item("user_1", &widget, 0).await;
    assert_eq!(cart.unwrap_err(), CartError::InvalidQuantity(0));

    system.shutdown().await.unwrap();
}

/// Merging into an existing line must not overflow the quantity counter;
/// the increment is rejected and the line keeps its previous quantity.
#[tokio::test]
async fn test_add_item_merge_overflow_rejected() {
    let system = StoreSystem::new();
    let widget = seed_product(&system, "Widget", Decimal::new(2500, 2), u32::MAX).await;

    system
        .cart_client
        .add_item("user_1", &widget, u32::MAX)
        .await
        .unwrap();
    let err = system
        .cart_client
        .add_item("user_1", &widget, 1)
        .await
        .unwrap_err();
    assert_eq!(err, CartError::InvalidQuantity(1));

    let cart = system
        .cart_client
        .get("user_1".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cart.line(&widget).unwrap().quantity, u32::MAX);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_set_quantity_and_remove() {
    let system = StoreSystem::new();
    let widget = seed_product(&system, "Widget", Decimal::new(2500, 2), 10).await;
    system.cart_client.add_item("user_1", &widget, 5).await.unwrap();

    let cart = system
        .cart_client
        .set_quantity("user_1", &widget, 1)
        .await
        .unwrap();
    assert_eq!(cart.line(&widget).unwrap().quantity, 1);

    // Absent lines cannot be set or removed
    let err = system
        .cart_client
        .set_quantity("user_1", "product_999", 1)
        .await
        .unwrap_err();
    assert_eq!(err, CartError::LineNotFound("product_999".to_string()));

    let cart = system.cart_client.remove_item("user_1", &widget).await.unwrap();
    assert!(cart.is_empty());
    let err = system
        .cart_client
        .remove_item("user_1", &widget)
        .await
        .unwrap_err();
    assert_eq!(err, CartError::LineNotFound(widget.clone()));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_and_inactive_products_rejected() {
    let system = StoreSystem::new();

    let err = system
        .cart_client
        .add_item("user_1", "product_999", 1)
        .await
        .unwrap_err();
    assert_eq!(err, CartError::ProductNotFound("product_999".to_string()));

    let widget = seed_product(&system, "Widget", Decimal::new(2500, 2), 10).await;
    system
        .product_client
        .update_product(
            widget.clone(),
            ProductUpdate {
                name: None,
                description: None,
                price: None,
                stock: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();
    let err = system
        .cart_client
        .add_item("user_1", &widget, 1)
        .await
        .unwrap_err();
    assert_eq!(err, CartError::InactiveProduct(widget));

    system.shutdown().await.unwrap();
}

/// Bulk upsert applies valid entries and reports the rest, one error each.
#[tokio::test]
async fn test_set_items_is_partial() {
    let system = StoreSystem::new();
    let widget = seed_product(&system, "Widget", Decimal::new(2500, 2), 10).await;
    let gadget = seed_product(&system, "Gadget", Decimal::new(1000, 2), 2).await;

    let (cart, errors) = system
        .cart_client
        .set_items(
            "user_1",
            vec![
                CartLineInput {
                    product_id: widget.clone(),
                    quantity: 4,
                },
                CartLineInput {
                    product_id: gadget.clone(),
                    quantity: 5, // only 2 in stock
                },
                CartLineInput {
                    product_id: "product_999".to_string(),
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.line(&widget).unwrap().quantity, 4);
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors[0].rejection,
        CartRejection::InsufficientStock {
            product_id: gadget,
            available: 2,
        }
    );
    assert_eq!(
        errors[1].rejection,
        CartRejection::ProductNotFound("product_999".to_string())
    );

    system.shutdown().await.unwrap();
}

/// A bulk upsert where every entry is rejected changes nothing, including
/// the cart's modification timestamp.
#[tokio::test]
async fn test_set_items_all_rejected_leaves_cart_untouched() {
    let system = StoreSystem::new();
    let widget = seed_product(&system, "Widget", Decimal::new(2500, 2), 10).await;
    system.cart_client.add_item("user_1", &widget, 2).await.unwrap();
    let before = system
        .cart_client
        .get("user_1".to_string())
        .await
        .unwrap()
        .unwrap();

    let (cart, errors) = system
        .cart_client
        .set_items(
            "user_1",
            vec![
                CartLineInput {
                    product_id: "product_998".to_string(),
                    quantity: 1,
                },
                CartLineInput {
                    product_id: "product_999".to_string(),
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(errors.len(), 2);
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.line(&widget).unwrap().quantity, 2);
    assert_eq!(cart.updated_at, before.updated_at);

    system.shutdown().await.unwrap();
}

/// The view prices lines against the live catalog and derives totals.
#[tokio::test]
async fn test_cart_view_totals() {
    let system = StoreSystem::new();
    let widget = seed_product(&system, "Widget", Decimal::new(2550, 2), 10).await;
    let gadget = seed_product(&system, "Gadget", Decimal::new(999, 2), 10).await;
    system.cart_client.add_item("user_1", &widget, 2).await.unwrap();
    system.cart_client.add_item("user_1", &gadget, 3).await.unwrap();

    let view = system
        .cart_client
        .view("user_1", &system.product_client)
        .await
        .unwrap();
    assert_eq!(view.total_items, 5);
    // 2 * 25.50 + 3 * 9.99
    assert_eq!(view.subtotal, Decimal::new(8097, 2));
    let widget_line = view.lines.iter().find(|l| l.product_id == widget).unwrap();
    assert_eq!(widget_line.product_name, "Widget");
    assert_eq!(widget_line.line_total, Decimal::new(5100, 2));

    // A user with no cart sees an empty view, not an error
    let view = system
        .cart_client
        .view("user_2", &system.product_client)
        .await
        .unwrap();
    assert!(view.lines.is_empty());
    assert_eq!(view.subtotal, Decimal::ZERO);

    system.shutdown().await.unwrap();
}
