//! Integration tests for the session cart store.
//!
//! Exercises the store only through its public API: the mutation operations,
//! the aggregate reads and the change subscriptions.

use std::{cell::RefCell, rc::Rc};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use storefront::{
    cart::{Cart, CartEvent, CartStore, NewCartLine, ProductId},
    prices::Price,
};

fn line(id: &str, name: &str, minor: i64) -> NewCartLine {
    NewCartLine::new(ProductId::from(id), name, Price::from_minor(minor))
}

fn ids(store: &CartStore) -> Vec<&str> {
    store
        .lines()
        .iter()
        .map(|line| line.product_id().as_str())
        .collect()
}

/// Aggregates must always equal the sums over the current lines.
fn assert_aggregates(store: &CartStore) {
    let count: u64 = store
        .lines()
        .iter()
        .map(|line| u64::from(line.quantity()))
        .sum();

    let total: Decimal = store
        .lines()
        .iter()
        .map(|line| line.unit_price().to_decimal() * Decimal::from(line.quantity()))
        .sum();

    assert_eq!(store.total_count(), count, "count out of sync with lines");
    assert_eq!(
        store.total().to_decimal(),
        total,
        "total out of sync with lines"
    );
}

#[test]
fn storefront_session_end_to_end() {
    let mut store = CartStore::new(USD);

    store.add_item(line("p1", "Coffee beans", 999));
    store.add_item(line("p2", "Mug", 500));
    store.add_item(line("p2", "Mug", 500));

    assert_eq!(store.total_count(), 3);
    assert_eq!(store.total(), Price::from_minor(1999));
    assert_eq!(store.total_price(), Money::from_minor(1999, USD));
    assert_aggregates(&store);

    store.change_quantity(&ProductId::from("p2"), -2);

    assert_eq!(ids(&store), vec!["p1"]);
    assert_eq!(store.total_count(), 1);
    assert_eq!(store.total(), Price::from_minor(999));
    assert_aggregates(&store);
}

#[test]
fn repeated_adds_collapse_into_one_line() {
    let mut store = CartStore::new(USD);

    for _ in 0..5 {
        store.add_item(line("p1", "Coffee beans", 999));
    }

    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get(&ProductId::from("p1")).map(|line| line.quantity()),
        Some(5)
    );
    assert_aggregates(&store);
}

#[test]
fn first_snapshot_wins_on_readd() -> TestResult {
    let mut store = CartStore::new(USD);

    store.add_item(line("p1", "Coffee beans", 999).with_image("beans.jpg"));
    store.add_item(line("p1", "Coffee beans (new label)", 1299));

    let line = store
        .get(&ProductId::from("p1"))
        .ok_or("p1 should be in the cart")?;

    assert_eq!(line.name(), "Coffee beans");
    assert_eq!(line.unit_price(), Price::from_minor(999));
    assert_eq!(line.image(), Some("beans.jpg"));
    assert_eq!(line.quantity(), 2);
    assert_eq!(store.total(), Price::from_minor(1998));

    Ok(())
}

#[test]
fn insertion_order_is_preserved_and_readd_goes_last() {
    let mut store = CartStore::new(USD);

    store.add_item(line("p1", "Coffee beans", 999));
    store.add_item(line("p2", "Mug", 500));
    store.add_item(line("p3", "Filter papers", 250));
    store.add_item(line("p1", "Coffee beans", 999));

    assert_eq!(ids(&store), vec!["p1", "p2", "p3"]);

    store.remove_item(&ProductId::from("p1"));
    store.add_item(line("p1", "Coffee beans", 999));

    assert_eq!(ids(&store), vec!["p2", "p3", "p1"]);
    assert_aggregates(&store);
}

#[test]
fn decrement_at_one_removes_the_line() {
    let mut store = CartStore::new(USD);

    store.add_item(line("p1", "Coffee beans", 999));
    store.change_quantity(&ProductId::from("p1"), -1);

    assert!(store.is_empty());
    assert_eq!(store.total_count(), 0);
    assert_eq!(store.total(), Price::ZERO);
}

#[test]
fn large_decrement_removes_the_line() {
    let mut store = CartStore::new(USD);

    store.add_item(line("p1", "Coffee beans", 999));
    store.add_item(line("p2", "Mug", 500));
    store.change_quantity(&ProductId::from("p2"), -100);

    assert_eq!(ids(&store), vec!["p1"]);
    assert_aggregates(&store);
}

#[test]
fn increments_update_in_place() {
    let mut store = CartStore::new(USD);

    store.add_item(line("p1", "Coffee beans", 999));
    store.add_item(line("p2", "Mug", 500));
    store.change_quantity(&ProductId::from("p1"), 3);

    assert_eq!(ids(&store), vec!["p1", "p2"]);
    assert_eq!(
        store.get(&ProductId::from("p1")).map(|line| line.quantity()),
        Some(4)
    );
    assert_eq!(store.total(), Price::from_minor(4496));
    assert_aggregates(&store);
}

#[test]
fn unknown_product_changes_are_ignored() {
    let mut store = CartStore::new(USD);

    store.add_item(line("p1", "Coffee beans", 999));

    let before = store.cart().clone();

    store.change_quantity(&ProductId::from("missing"), 5);
    store.change_quantity(&ProductId::from("missing"), -5);
    store.remove_item(&ProductId::from("missing"));

    assert_eq!(store.cart(), &before);
}

#[test]
fn remove_is_idempotent() {
    let mut store = CartStore::new(USD);

    store.add_item(line("p1", "Coffee beans", 999));
    store.add_item(line("p2", "Mug", 500));

    store.remove_item(&ProductId::from("p1"));
    let after_first = store.cart().clone();

    store.remove_item(&ProductId::from("p1"));

    assert_eq!(store.cart(), &after_first);
    assert_eq!(ids(&store), vec!["p2"]);
    assert_aggregates(&store);
}

#[test]
fn clear_empties_the_cart() {
    let mut store = CartStore::new(USD);

    store.add_item(line("p1", "Coffee beans", 999));
    store.add_item(line("p2", "Mug", 500));

    store.clear_cart();
    store.clear_cart();

    assert!(store.is_empty());
    assert!(store.lines().is_empty());
    assert_eq!(store.total_count(), 0);
    assert_eq!(store.total(), Price::ZERO);
    assert_eq!(store.total_price(), Money::from_minor(0, USD));
}

#[test]
fn negative_and_zero_prices_are_carried_through() {
    let mut store = CartStore::new(USD);

    store.add_item(line("free", "Sample", 0));
    store.add_item(line("voucher", "Voucher", -250));
    store.add_item(line("p1", "Coffee beans", 999));

    assert_eq!(store.total_count(), 3);
    assert_eq!(store.total(), Price::from_minor(749));
    assert_aggregates(&store);
}

#[test]
fn observers_see_every_effective_change() {
    let mut store = CartStore::new(USD);
    let seen: Rc<RefCell<Vec<(CartEvent, u64)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    store.subscribe(move |event: &CartEvent, cart: &Cart| {
        sink.borrow_mut().push((event.clone(), cart.total_count()));
    });

    store.add_item(line("p1", "Coffee beans", 999));
    store.add_item(line("p1", "Coffee beans", 999));
    store.change_quantity(&ProductId::from("p1"), 0);
    store.change_quantity(&ProductId::from("missing"), 1);
    store.change_quantity(&ProductId::from("p1"), -1);
    store.remove_item(&ProductId::from("p1"));
    store.remove_item(&ProductId::from("p1"));
    store.clear_cart();

    let p1 = ProductId::from("p1");

    assert_eq!(
        *seen.borrow(),
        vec![
            (
                CartEvent::ItemAdded {
                    product_id: p1.clone(),
                    quantity: 1
                },
                1
            ),
            (
                CartEvent::ItemAdded {
                    product_id: p1.clone(),
                    quantity: 2
                },
                2
            ),
            (
                CartEvent::QuantityChanged {
                    product_id: p1.clone(),
                    quantity: 1
                },
                1
            ),
            (CartEvent::ItemRemoved { product_id: p1 }, 0),
        ]
    );
}

#[test]
fn unsubscribed_observers_are_not_called() {
    let mut store = CartStore::new(USD);
    let calls = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&calls);

    let key = store.subscribe(move |_: &CartEvent, _: &Cart| {
        *counter.borrow_mut() += 1;
    });

    store.add_item(line("p1", "Coffee beans", 999));

    assert!(store.unsubscribe(key));
    assert!(!store.unsubscribe(key));

    store.add_item(line("p2", "Mug", 500));
    store.clear_cart();

    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn sub_cent_prices_total_before_rounding() -> TestResult {
    let mut store = CartStore::new(USD);
    let unit = Price::from_major(0.125)?;

    store.add_item(NewCartLine::new(ProductId::from("p1"), "Sticker", unit));
    store.add_item(NewCartLine::new(ProductId::from("p1"), "Sticker", unit));

    assert_eq!(
        store.get(&ProductId::from("p1")).map(|line| line.unit_price()),
        Some(unit)
    );
    assert_eq!(store.total().to_decimal(), Decimal::new(25, 2));
    assert_eq!(store.total_price(), Money::from_minor(25, USD));
    assert_aggregates(&store);

    Ok(())
}
