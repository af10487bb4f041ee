//! End-to-end store flow: reservation, release, checkout, history.

use drip_commerce::prelude::*;

fn rupees(amount: i64) -> Money {
    Money::new(amount, Currency::INR)
}

fn seeded_catalog() -> SharedCatalog {
    let mut catalog = Catalog::new();
    catalog.add_product("Cap", rupees(1499), 12).unwrap();
    catalog.add_product("Hoodie", rupees(9999), 10).unwrap();
    SharedCatalog::new(catalog)
}

fn maya() -> CustomerInfo {
    CustomerInfo::new("maya01", "Maya", "Iyer")
}

fn stock_of(catalog: &SharedCatalog, title: &str) -> u32 {
    catalog.lock().find(title).unwrap().stock_quantity
}

/// Every unit is in exactly one place: unsold stock, an open cart, or a
/// committed order.
fn assert_conserved(
    catalog: &SharedCatalog,
    carts: &[&Cart],
    ledger: &MemoryLedger,
    users: &[&str],
    title: &str,
    initial: u64,
) {
    let stock = u64::from(stock_of(catalog, title));
    let reserved: u64 = carts
        .iter()
        .filter_map(|cart| cart.line(title))
        .map(|line| u64::from(line.quantity))
        .sum();
    let committed: u64 = users
        .iter()
        .flat_map(|user| ledger.history(&UserId::new(*user)).unwrap())
        .flat_map(|order| order.line_items)
        .filter(|line| line.title.eq_ignore_ascii_case(title))
        .map(|line| u64::from(line.quantity))
        .sum();
    assert_eq!(stock + reserved + committed, initial);
}

#[test]
fn cap_scenario() {
    let catalog = seeded_catalog();
    let mut cart = Cart::new();
    let mut ledger = MemoryLedger::new();
    let mut checkout = Checkout::new(&catalog, &mut ledger);

    // add(Cap, 5): stock 12 -> 7, one line (Cap, 1499, 5)
    checkout.add_to_cart(&mut cart, "Cap", 5).unwrap();
    assert_eq!(stock_of(&catalog, "Cap"), 7);
    let line = cart.line("Cap").unwrap();
    assert_eq!(line.unit_price, rupees(1499));
    assert_eq!(line.quantity, 5);

    // remove(Cap, 3): stock 7 -> 10, line quantity 2
    checkout.remove_from_cart(&mut cart, "Cap", 3).unwrap();
    assert_eq!(stock_of(&catalog, "Cap"), 10);
    assert_eq!(cart.line("Cap").unwrap().quantity, 2);

    // checkout: one order of 2998, cart empty, stock still 10
    let address = Address::parse("123 St, Landmark, City, State").unwrap();
    let order = checkout
        .place_order(&mut cart, &maya(), address, None)
        .unwrap();

    assert_eq!(order.total, rupees(2998));
    assert!(cart.is_empty());
    assert_eq!(stock_of(&catalog, "Cap"), 10);

    let history = ledger.history(&UserId::new("maya01")).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].total, rupees(2998));
}

#[test]
fn oversized_add_fails_and_changes_nothing() {
    let catalog = seeded_catalog();
    let mut ledger = MemoryLedger::new();
    let mut cart = Cart::new();
    let checkout = Checkout::new(&catalog, &mut ledger);

    let err = checkout.add_to_cart(&mut cart, "Cap", 15).unwrap_err();
    assert!(matches!(
        err,
        StoreError::InsufficientStock { available: 12, .. }
    ));
    assert_eq!(stock_of(&catalog, "Cap"), 12);
    assert!(cart.is_empty());
}

#[test]
fn add_then_remove_round_trips() {
    let catalog = seeded_catalog();
    let mut ledger = MemoryLedger::new();
    let mut cart = Cart::new();
    let checkout = Checkout::new(&catalog, &mut ledger);

    checkout.add_to_cart(&mut cart, "Hoodie", 4).unwrap();
    let freed = checkout.remove_from_cart(&mut cart, "Hoodie", 4).unwrap();

    assert_eq!(freed, 4);
    assert_eq!(stock_of(&catalog, "Hoodie"), 10);
    assert!(cart.is_empty());
}

#[test]
fn empty_cart_checkout_fails_without_ledger_write() {
    let catalog = seeded_catalog();
    let mut cart = Cart::new();
    let mut ledger = MemoryLedger::new();

    let address = Address::parse("123 St, Landmark, City, State").unwrap();
    let err = Checkout::new(&catalog, &mut ledger)
        .place_order(&mut cart, &maya(), address, None)
        .unwrap_err();

    assert!(matches!(err, StoreError::EmptyCart));
    assert!(ledger.is_empty());
}

#[test]
fn stock_is_conserved_across_sessions() {
    let catalog = seeded_catalog();
    let mut ledger = MemoryLedger::new();
    let mut maya_cart = Cart::new();
    let mut ravi_cart = Cart::new();
    let users = ["maya01", "ravi22"];

    // Two sessions contend for the same product.
    {
        let checkout = Checkout::new(&catalog, &mut ledger);
        checkout.add_to_cart(&mut maya_cart, "Cap", 5).unwrap();
        checkout.add_to_cart(&mut ravi_cart, "Cap", 4).unwrap();
    }
    assert_conserved(&catalog, &[&maya_cart, &ravi_cart], &ledger, &users, "Cap", 12);

    // A third request that exceeds what is left fails cleanly.
    {
        let checkout = Checkout::new(&catalog, &mut ledger);
        let err = checkout.add_to_cart(&mut ravi_cart, "Cap", 9).unwrap_err();
        assert!(matches!(err, StoreError::InsufficientStock { available: 3, .. }));
    }
    assert_conserved(&catalog, &[&maya_cart, &ravi_cart], &ledger, &users, "Cap", 12);

    // A partial release goes back to stock.
    {
        let checkout = Checkout::new(&catalog, &mut ledger);
        checkout.remove_from_cart(&mut maya_cart, "Cap", 2).unwrap();
    }
    assert_conserved(&catalog, &[&maya_cart, &ravi_cart], &ledger, &users, "Cap", 12);

    // One session commits; reserved units move into the ledger.
    let address = Address::parse("123 St, Landmark, City, State").unwrap();
    Checkout::new(&catalog, &mut ledger)
        .place_order(&mut maya_cart, &maya(), address, Some(PaymentMethod::CashOnDelivery))
        .unwrap();
    assert_conserved(&catalog, &[&maya_cart, &ravi_cart], &ledger, &users, "Cap", 12);

    // The other session keeps its reservation.
    assert_eq!(ravi_cart.line("Cap").unwrap().quantity, 4);
    assert_eq!(stock_of(&catalog, "Cap"), 5);
}

#[test]
fn checkout_appends_exactly_one_order() {
    let catalog = seeded_catalog();
    let mut cart = Cart::new();
    let mut ledger = MemoryLedger::new();
    let mut checkout = Checkout::new(&catalog, &mut ledger);

    checkout.add_to_cart(&mut cart, "Cap", 1).unwrap();
    checkout.add_to_cart(&mut cart, "Hoodie", 2).unwrap();

    let address = Address::parse("123 St, Landmark, City, State").unwrap();
    let order = checkout
        .place_order(&mut cart, &maya(), address, None)
        .unwrap();

    assert_eq!(order.total, rupees(1499 + 2 * 9999));
    assert_eq!(ledger.len(), 1);
    assert!(cart.is_empty());
}
