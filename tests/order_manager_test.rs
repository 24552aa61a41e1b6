use async_trait::async_trait;
use order_desk::cart_actor::{self, CartContext, CartError, CheckoutDetails};
use order_desk::clients::{ActorClient, CartClient, OrderClient};
use order_desk::model::{
    CartCreate, CartId, MenuItemId, MenuItemRef, OrderLineItem, OrderStatus, OrderType,
};
use order_desk::order_actor;
use order_desk::repository::{CartRepository, InMemoryCartRepository, RepositoryError};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory repository whose operations can be made to fail one by one.
#[derive(Default)]
struct FlakyRepository {
    inner: InMemoryCartRepository,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
    fail_clear: AtomicBool,
}

fn unavailable() -> RepositoryError {
    RepositoryError::Unavailable("disk offline".to_string())
}

#[async_trait]
impl CartRepository for FlakyRepository {
    async fn load(&self, cart: CartId) -> Result<Vec<OrderLineItem>, RepositoryError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.load(cart).await
    }

    async fn save(&self, cart: CartId, items: &[OrderLineItem]) -> Result<(), RepositoryError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.save(cart, items).await
    }

    async fn clear(&self, cart: CartId) -> Result<(), RepositoryError> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.clear(cart).await
    }
}

fn start(repository: Arc<dyn CartRepository>) -> (CartClient, OrderClient) {
    let (order_actor, order_generic) = order_actor::new(32);
    let orders = OrderClient::new(order_generic);
    tokio::spawn(order_actor.run(()));

    let (cart_actor, cart_generic) = cart_actor::new(32);
    tokio::spawn(cart_actor.run(CartContext::new(repository, orders.clone())));
    (CartClient::new(cart_generic), orders)
}

fn item(id: u32, name: &str, price: i64, quantity: u32) -> OrderLineItem {
    OrderLineItem::new(
        MenuItemRef {
            id: MenuItemId(id),
            name: name.to_string(),
            price: Decimal::from(price),
            description: String::new(),
            category: "mains".to_string(),
        },
        quantity,
    )
}

fn takeaway(customer: &str) -> CheckoutDetails {
    CheckoutDetails {
        customer: customer.to_string(),
        order_type: OrderType::Takeaway,
        table_number: None,
    }
}

#[tokio::test]
async fn repeated_add_merges_into_one_entry() {
    let (carts, _) = start(Arc::new(InMemoryCartRepository::new()));
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());

    manager.add(item(1, "A", 5, 2)).await.unwrap();
    let items = manager.add(item(1, "A", 5, 3)).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 5);
    assert_eq!(manager.calculate_total().await.unwrap(), Decimal::from(25));
}

#[tokio::test]
async fn merged_add_keeps_the_existing_entry() {
    let (carts, _) = start(Arc::new(InMemoryCartRepository::new()));
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());

    manager
        .add(item(1, "A", 5, 1).with_instructions("no onions"))
        .await
        .unwrap();
    let items = manager.add(item(1, "A", 7, 1)).await.unwrap();

    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].unit_price, Decimal::from(5));
    assert_eq!(items[0].special_instructions, "no onions");
}

#[tokio::test]
async fn quantity_below_one_removes_the_item() {
    let (carts, _) = start(Arc::new(InMemoryCartRepository::new()));
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());

    manager.add(item(2, "B", 10, 1)).await.unwrap();
    assert!(manager.update_quantity(MenuItemId(2), 0).await.unwrap().is_empty());

    manager.add(item(2, "B", 10, 1)).await.unwrap();
    assert!(manager.update_quantity(MenuItemId(2), -3).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_quantity_sets_exactly_and_changes_nothing_else() {
    let (carts, _) = start(Arc::new(InMemoryCartRepository::new()));
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());

    let before = manager
        .add(item(3, "C", 4, 2).with_instructions("extra sauce"))
        .await
        .unwrap();
    let after = manager.update_quantity(MenuItemId(3), 7).await.unwrap();

    assert_eq!(after[0].quantity, 7);
    assert_eq!(after[0].menu_item, before[0].menu_item);
    assert_eq!(after[0].unit_price, before[0].unit_price);
    assert_eq!(after[0].special_instructions, "extra sauce");

    // Unknown ids leave the list as it was.
    assert_eq!(manager.update_quantity(MenuItemId(99), 4).await.unwrap(), after);
}

#[tokio::test]
async fn instructions_remove_and_clear() {
    let (carts, _) = start(Arc::new(InMemoryCartRepository::new()));
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());

    manager.add(item(1, "A", 5, 1)).await.unwrap();
    manager.add(item(2, "B", 3, 1)).await.unwrap();

    let items = manager
        .update_instructions(MenuItemId(2), "gluten free")
        .await
        .unwrap();
    assert_eq!(items[1].special_instructions, "gluten free");

    let once = manager.remove(MenuItemId(1)).await.unwrap();
    let twice = manager.remove(MenuItemId(1)).await.unwrap();
    assert_eq!(once, twice);
    assert_eq!(once.len(), 1);

    manager.clear().await.unwrap();
    assert!(manager.load().await.unwrap().is_empty());
    assert_eq!(manager.calculate_total().await.unwrap(), Decimal::ZERO);
}

#[tokio::test]
async fn zero_quantity_add_is_rejected() {
    let (carts, _) = start(Arc::new(InMemoryCartRepository::new()));
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());

    let err = manager.add(item(1, "A", 5, 0)).await.unwrap_err();
    assert_eq!(err, CartError::InvalidQuantity(0));
    assert!(manager.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_adds_are_not_lost() {
    let (carts, _) = start(Arc::new(InMemoryCartRepository::new()));
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let manager = manager.clone();
            tokio::spawn(async move { manager.add(item(1, "A", 2, 1)).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let items = manager.load().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 50);
    assert_eq!(manager.calculate_total().await.unwrap(), Decimal::from(100));
}

#[tokio::test]
async fn storage_failures_are_tagged_by_operation() {
    let repository = Arc::new(FlakyRepository::default());
    let (carts, _) = start(repository.clone());
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());
    manager.add(item(1, "A", 5, 1)).await.unwrap();

    repository.fail_save.store(true, Ordering::SeqCst);
    assert!(matches!(manager.add(item(2, "B", 1, 1)).await, Err(CartError::AddFailed(_))));
    assert!(matches!(
        manager.update_quantity(MenuItemId(1), 3).await,
        Err(CartError::UpdateFailed(_))
    ));
    assert!(matches!(
        manager.update_instructions(MenuItemId(1), "hot").await,
        Err(CartError::UpdateFailed(_))
    ));
    assert!(matches!(manager.remove(MenuItemId(1)).await, Err(CartError::RemoveFailed(_))));
    repository.fail_save.store(false, Ordering::SeqCst);

    repository.fail_clear.store(true, Ordering::SeqCst);
    assert!(matches!(manager.clear().await, Err(CartError::ClearFailed(_))));
    repository.fail_clear.store(false, Ordering::SeqCst);

    repository.fail_load.store(true, Ordering::SeqCst);
    assert!(matches!(manager.load().await, Err(CartError::LoadFailed(_))));
    assert!(matches!(
        manager.calculate_total().await,
        Err(CartError::CalculationFailed(_))
    ));
    repository.fail_load.store(false, Ordering::SeqCst);

    // Nothing above reached storage.
    assert_eq!(manager.load().await.unwrap(), vec![item(1, "A", 5, 1)]);
}

#[tokio::test]
async fn checkout_places_the_order_and_empties_the_cart() {
    let (carts, orders) = start(Arc::new(InMemoryCartRepository::new()));
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());
    manager.add(item(1, "A", 5, 2)).await.unwrap();
    manager.add(item(2, "B", 3, 1)).await.unwrap();

    let order_id = manager.checkout(takeaway("Ada")).await.unwrap();

    let order = orders.get(order_id).await.unwrap().expect("order exists");
    assert_eq!(order.customer, "Ada");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total_amount, Decimal::from(13));
    assert!(manager.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn checkout_rejections_keep_the_cart() {
    let (carts, orders) = start(Arc::new(InMemoryCartRepository::new()));
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());

    assert_eq!(manager.checkout(takeaway("Ada")).await.unwrap_err(), CartError::EmptyCart);

    manager.add(item(1, "A", 5, 1)).await.unwrap();
    let no_table = CheckoutDetails {
        customer: "Ada".to_string(),
        order_type: OrderType::DineIn,
        table_number: None,
    };
    assert!(matches!(
        manager.checkout(no_table).await,
        Err(CartError::CheckoutFailed(_))
    ));
    assert_eq!(manager.load().await.unwrap().len(), 1);
    assert!(orders.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn checkout_survives_a_failed_clear() {
    let repository = Arc::new(FlakyRepository::default());
    let (carts, orders) = start(repository.clone());
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());
    manager.add(item(1, "A", 5, 1)).await.unwrap();

    repository.fail_clear.store(true, Ordering::SeqCst);
    let order_id = manager.checkout(takeaway("Ada")).await.unwrap();

    assert!(orders.get(order_id).await.unwrap().is_some());
    assert_eq!(manager.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn fresh_cart_drops_items_left_under_its_id() {
    let repository = Arc::new(InMemoryCartRepository::new());
    repository
        .save(CartId(1), &[item(1, "Soup", 6, 3)])
        .await
        .unwrap();
    let (carts, _) = start(repository.clone());

    let cart = carts
        .open_cart(CartCreate {
            customer: Some("Bob".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cart, CartId(1));
    assert!(carts.manager(cart).load().await.unwrap().is_empty());
    assert!(repository.load(CartId(1)).await.unwrap().is_empty());
}

#[tokio::test]
async fn restore_from_moves_items_to_the_new_cart() {
    let repository = Arc::new(InMemoryCartRepository::new());
    let (carts, _) = start(repository.clone());
    let first = carts.open_cart(CartCreate::default()).await.unwrap();
    carts.manager(first).add(item(1, "Soup", 6, 3)).await.unwrap();

    let second = carts
        .open_cart(CartCreate {
            customer: Some("Ada".to_string()),
            restore_from: Some(first),
        })
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(
        carts.manager(second).load().await.unwrap(),
        vec![item(1, "Soup", 6, 3)]
    );
    assert!(carts.manager(first).load().await.unwrap().is_empty());
    let restored = carts.get(second).await.unwrap().expect("cart exists");
    assert_eq!(restored.restored_from, Some(first));
}

#[tokio::test]
async fn restore_from_its_own_id_keeps_the_items() {
    let repository = Arc::new(InMemoryCartRepository::new());
    repository
        .save(CartId(1), &[item(2, "Pie", 4, 1)])
        .await
        .unwrap();
    let (carts, _) = start(repository);

    let cart = carts
        .open_cart(CartCreate {
            customer: None,
            restore_from: Some(CartId(1)),
        })
        .await
        .unwrap();
    assert_eq!(carts.manager(cart).load().await.unwrap(), vec![item(2, "Pie", 4, 1)]);
}

#[tokio::test]
async fn failed_restore_opens_no_cart() {
    let repository = Arc::new(FlakyRepository::default());
    let (carts, _) = start(repository.clone());

    repository.fail_load.store(true, Ordering::SeqCst);
    let err = carts
        .open_cart(CartCreate {
            customer: None,
            restore_from: Some(CartId(7)),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::LoadFailed(_)));
    assert!(carts.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_checkout_customer_falls_back_to_the_cart_customer() {
    let (carts, orders) = start(Arc::new(InMemoryCartRepository::new()));
    let cart = carts
        .open_cart(CartCreate {
            customer: Some("Ada".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let manager = carts.manager(cart);
    manager.add(item(1, "A", 5, 1)).await.unwrap();

    let order_id = manager.checkout(takeaway("  ")).await.unwrap();
    assert_eq!(orders.get(order_id).await.unwrap().unwrap().customer, "Ada");
}

#[tokio::test]
async fn checkout_customer_overrides_the_cart_customer() {
    let (carts, orders) = start(Arc::new(InMemoryCartRepository::new()));
    let cart = carts
        .open_cart(CartCreate {
            customer: Some("Ada".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let manager = carts.manager(cart);
    manager.add(item(1, "A", 5, 1)).await.unwrap();

    let order_id = manager.checkout(takeaway("Grace")).await.unwrap();
    assert_eq!(orders.get(order_id).await.unwrap().unwrap().customer, "Grace");
}

#[tokio::test]
async fn anonymous_cart_with_blank_customer_is_rejected() {
    let (carts, orders) = start(Arc::new(InMemoryCartRepository::new()));
    let manager = carts.manager(carts.open_cart(CartCreate::default()).await.unwrap());
    manager.add(item(1, "A", 5, 1)).await.unwrap();

    assert!(matches!(
        manager.checkout(takeaway("")).await,
        Err(CartError::CheckoutFailed(_))
    ));
    assert!(orders.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn closed_cart_drops_its_items() {
    let repository = Arc::new(InMemoryCartRepository::new());
    let (carts, _) = start(repository.clone());
    let cart = carts.open_cart(CartCreate::default()).await.unwrap();
    let manager = carts.manager(cart);
    manager.add(item(1, "A", 5, 2)).await.unwrap();

    carts.close_cart(cart).await.unwrap();

    assert!(repository.load(cart).await.unwrap().is_empty());
    assert_eq!(
        manager.load().await.unwrap_err(),
        CartError::NotFound("cart_1".to_string())
    );
}
