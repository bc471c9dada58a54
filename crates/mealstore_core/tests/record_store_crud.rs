use mealstore_core::db::open_db_in_memory;
use mealstore_core::{
    Customer, Meal, Order, PersistenceError, RecordStore, SqliteRecordStore, UNSAVED_ORDER_ID,
};
use rusqlite::{params, Connection};

fn pasta_order() -> Order {
    Order::new("Pasta", 12.5, "pasta.jpg", 2, 25.0)
}

#[test]
fn reads_on_empty_tables_return_empty_vecs() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    assert!(store.list_meals().unwrap().is_empty());
    assert!(store.list_orders().unwrap().is_empty());
    assert!(store.list_customers().unwrap().is_empty());
}

#[test]
fn created_meal_is_listed() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    let ramen = Meal::new("Ramen", 9.75, "images/ramen.png");
    let salad = Meal::new("Salad", 6.0, "https://cdn.example.com/salad.jpg");
    store.create_meal(&ramen).unwrap();
    store.create_meal(&salad).unwrap();

    let meals = store.list_meals().unwrap();
    assert_eq!(meals.len(), 2);
    assert!(meals.contains(&ramen));
    assert!(meals.contains(&salad));
}

#[test]
fn created_customer_is_listed() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    let customer = Customer::new("Ada", "12 Harbour Road", "Pasta", 25.0);
    store.create_customer(&customer).unwrap();

    assert_eq!(store.list_customers().unwrap(), vec![customer]);
}

#[test]
fn order_roundtrip_then_delete_by_id() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    let order = pasta_order();
    let id = store.create_order(&order).unwrap();
    assert_ne!(id, UNSAVED_ORDER_ID);

    let orders = store.list_orders().unwrap();
    assert_eq!(orders.len(), 1);
    let stored = &orders[0];
    assert_eq!(stored.id, id);
    assert!(stored.is_saved());
    assert_eq!(stored.meal, "Pasta");
    assert_eq!(stored.price, 12.5);
    assert_eq!(stored.image, "pasta.jpg");
    assert_eq!(stored.plates, 2);
    assert_eq!(stored.total_cost, 25.0);

    store.delete_order(id).unwrap();
    assert!(store.list_orders().unwrap().is_empty());
}

#[test]
fn caller_supplied_order_id_is_ignored() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    let mut order = pasta_order();
    order.id = 777;
    let first = store.create_order(&order).unwrap();
    let second = store.create_order(&order).unwrap();

    assert_ne!(first, 777);
    assert_ne!(first, second);
    let ids: Vec<_> = store.list_orders().unwrap().iter().map(|o| o.id).collect();
    assert!(!ids.contains(&777));
}

#[test]
fn delete_order_leaves_other_rows_untouched() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    let keep_a = store
        .create_order(&Order::new("Soup", 4.0, "soup.jpg", 1, 4.0))
        .unwrap();
    let remove = store.create_order(&pasta_order()).unwrap();
    let keep_b = store
        .create_order(&Order::new("Tacos", 3.5, "tacos.jpg", 4, 14.0))
        .unwrap();

    store.delete_order(remove).unwrap();

    let mut ids: Vec<_> = store.list_orders().unwrap().iter().map(|o| o.id).collect();
    ids.sort_unstable();
    let mut expected = vec![keep_a, keep_b];
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

#[test]
fn delete_missing_order_is_not_an_error() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    let id = store.create_order(&pasta_order()).unwrap();
    store.delete_order(id + 1000).unwrap();

    assert_eq!(store.list_orders().unwrap().len(), 1);
}

#[test]
fn delete_all_orders_clears_table_and_tolerates_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    store.delete_all_orders().unwrap();

    store.create_order(&pasta_order()).unwrap();
    store
        .create_order(&Order::new("Curry", 11.0, "curry.jpg", 3, 33.0))
        .unwrap();
    store.delete_all_orders().unwrap();

    assert!(store.list_orders().unwrap().is_empty());
}

#[test]
fn order_ids_are_not_reused_after_bulk_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    let first = store.create_order(&pasta_order()).unwrap();
    store.delete_all_orders().unwrap();
    let second = store.create_order(&pasta_order()).unwrap();

    assert!(second > first);
}

#[test]
fn rejected_insert_surfaces_error_and_leaves_table_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    store.create_order(&pasta_order()).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER reject_big_orders
         BEFORE INSERT ON orders
         WHEN NEW.plates > 10
         BEGIN
             SELECT RAISE(ABORT, 'too many plates');
         END;",
    )
    .unwrap();

    let err = store
        .create_order(&Order::new("Feast", 10.0, "feast.jpg", 50, 500.0))
        .unwrap_err();
    assert!(matches!(err, PersistenceError::Sqlite(_)));
    assert!(err.to_string().contains("too many plates"));

    let orders = store.list_orders().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].meal, "Pasta");
}

#[test]
fn aborted_customer_insert_is_a_statement_error() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER reject_blank_names
         BEFORE INSERT ON customers
         WHEN NEW.customer_name = ''
         BEGIN
             SELECT RAISE(ABORT, 'customer name required');
         END;",
    )
    .unwrap();

    let err = store
        .create_customer(&Customer::new("", "nowhere", "Soup", 4.0))
        .unwrap_err();
    assert!(!err.is_decode());
    assert!(store.list_customers().unwrap().is_empty());
}

#[test]
fn dropped_table_fails_reads_and_writes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    conn.execute_batch("DROP TABLE meal;").unwrap();

    assert!(matches!(
        store.list_meals(),
        Err(PersistenceError::Sqlite(_))
    ));
    assert!(matches!(
        store.create_meal(&Meal::new("Toast", 2.0, "toast.jpg")),
        Err(PersistenceError::Sqlite(_))
    ));
}

#[test]
fn rejected_deletes_surface_error_and_keep_rows() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let id = store.create_order(&pasta_order()).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER orders_locked
         BEFORE DELETE ON orders
         BEGIN
             SELECT RAISE(ABORT, 'orders are locked');
         END;",
    )
    .unwrap();

    let single = store.delete_order(id).unwrap_err();
    assert!(matches!(single, PersistenceError::Sqlite(_)));
    assert!(single.to_string().contains("orders are locked"));

    let bulk = store.delete_all_orders().unwrap_err();
    assert!(matches!(bulk, PersistenceError::Sqlite(_)));

    let orders = store.list_orders().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, id);
}

#[test]
fn dropped_orders_and_customers_tables_fail_reads() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();

    conn.execute_batch("DROP TABLE orders; DROP TABLE customers;")
        .unwrap();

    assert!(matches!(
        store.list_orders(),
        Err(PersistenceError::Sqlite(_))
    ));
    assert!(matches!(
        store.list_customers(),
        Err(PersistenceError::Sqlite(_))
    ));
}

#[test]
fn undecodable_price_aborts_whole_read() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    store
        .create_meal(&Meal::new("Ramen", 9.75, "ramen.png"))
        .unwrap();

    conn.execute(
        "INSERT INTO meal (food, price, image) VALUES (?1, ?2, ?3);",
        params!["Mystery", "market price", "mystery.png"],
    )
    .unwrap();

    let err = store.list_meals().unwrap_err();
    match err {
        PersistenceError::Decode { table, column, .. } => {
            assert_eq!(table, "meal");
            assert_eq!(column, "price");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn negative_plates_written_elsewhere_still_read() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    store.create_order(&pasta_order()).unwrap();

    conn.execute(
        "INSERT INTO orders (meal, price, image, plates, totalcost)
         VALUES ('Refund', 5.0, 'r.jpg', -1, -5.0);",
        [],
    )
    .unwrap();

    let orders = store.list_orders().unwrap();
    assert_eq!(orders.len(), 2);
    let refund = orders.iter().find(|order| order.meal == "Refund").unwrap();
    assert_eq!(refund.plates, -1);
    assert_eq!(refund.total_cost, -5.0);
}

#[test]
fn undecodable_total_cost_aborts_order_read() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    store.create_order(&pasta_order()).unwrap();

    conn.execute(
        "INSERT INTO orders (meal, price, image, plates, totalcost)
         VALUES ('Pasta', 12.5, 'pasta.jpg', 2, 'twenty-five');",
        [],
    )
    .unwrap();

    let err = store.list_orders().unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::Decode {
            table: "orders",
            column: "totalcost",
            ..
        }
    ));
}

#[test]
fn try_new_rejects_connection_without_tables() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteRecordStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(PersistenceError::MissingRequiredTable("meal"))
    ));
}

#[test]
fn try_new_rejects_table_missing_a_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE meal (food TEXT, price REAL, image TEXT);
         CREATE TABLE orders (id INTEGER PRIMARY KEY, meal TEXT, price REAL, image TEXT, plates INTEGER);",
    )
    .unwrap();

    let result = SqliteRecordStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(PersistenceError::MissingRequiredColumn {
            table: "orders",
            column: "totalcost"
        })
    ));
}

#[test]
fn store_works_against_externally_created_schema() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE meal (food TEXT, price REAL, image TEXT);
         CREATE TABLE orders (
             id INTEGER PRIMARY KEY,
             meal TEXT, price REAL, image TEXT, plates INTEGER, totalcost REAL
         );
         CREATE TABLE customers (
             customer_name TEXT, location_address TEXT, meal TEXT, totalcost REAL
         );",
    )
    .unwrap();

    let store = SqliteRecordStore::try_new(&conn).unwrap();
    let id = store.create_order(&pasta_order()).unwrap();
    assert!(id > 0);
}
