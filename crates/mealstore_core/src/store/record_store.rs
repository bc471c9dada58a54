//! Meal/order/customer persistence over SQLite.
//!
//! # Invariants
//! - Every statement binds values through positional placeholders.
//! - Order ids come from the database; the id on an inserted `Order` is ignored.
//! - Zero affected rows on delete is success.

use crate::db::schema::ensure_schema_ready;
use crate::error::{PersistenceError, StoreResult};
use crate::model::customer::Customer;
use crate::model::meal::Meal;
use crate::model::order::{Order, OrderId};
use log::{debug, error};
use rusqlite::types::FromSql;
use rusqlite::{params, Connection, Row};
use std::time::Instant;

const MEAL_SELECT_SQL: &str = "SELECT food, price, image FROM meal";
const ORDER_SELECT_SQL: &str = "SELECT id, meal, price, image, plates, totalcost FROM orders";
const CUSTOMER_SELECT_SQL: &str =
    "SELECT customer_name, location_address, meal, totalcost FROM customers";

/// Storage capability consumed by request handlers.
///
/// Implemented by `SqliteRecordStore`; tests may substitute their own.
pub trait RecordStore {
    fn create_meal(&self, meal: &Meal) -> StoreResult<()>;
    /// Inserts one order and returns the id the database assigned to it.
    fn create_order(&self, order: &Order) -> StoreResult<OrderId>;
    fn create_customer(&self, customer: &Customer) -> StoreResult<()>;
    /// Removes every order row. An empty table is not an error.
    fn delete_all_orders(&self) -> StoreResult<()>;
    /// Removes the order with `id`. A missing id is not an error.
    fn delete_order(&self, id: OrderId) -> StoreResult<()>;
    fn list_meals(&self) -> StoreResult<Vec<Meal>>;
    fn list_orders(&self) -> StoreResult<Vec<Order>>;
    fn list_customers(&self) -> StoreResult<Vec<Customer>>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn create_meal(&self, meal: &Meal) -> StoreResult<()> {
        (**self).create_meal(meal)
    }

    fn create_order(&self, order: &Order) -> StoreResult<OrderId> {
        (**self).create_order(order)
    }

    fn create_customer(&self, customer: &Customer) -> StoreResult<()> {
        (**self).create_customer(customer)
    }

    fn delete_all_orders(&self) -> StoreResult<()> {
        (**self).delete_all_orders()
    }

    fn delete_order(&self, id: OrderId) -> StoreResult<()> {
        (**self).delete_order(id)
    }

    fn list_meals(&self) -> StoreResult<Vec<Meal>> {
        (**self).list_meals()
    }

    fn list_orders(&self) -> StoreResult<Vec<Order>> {
        (**self).list_orders()
    }

    fn list_customers(&self) -> StoreResult<Vec<Customer>> {
        (**self).list_customers()
    }
}

/// SQLite-backed record store borrowing one connection.
pub struct SqliteRecordStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordStore<'conn> {
    /// Wraps `conn` after checking the tables and columns the store maps.
    ///
    /// # Errors
    /// - `MissingRequiredTable` / `MissingRequiredColumn` on an unprepared schema.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn list_rows<T>(
        &self,
        sql: &str,
        parse: fn(&Row<'_>) -> StoreResult<T>,
    ) -> StoreResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse(row)?);
        }

        Ok(records)
    }
}

impl RecordStore for SqliteRecordStore<'_> {
    fn create_meal(&self, meal: &Meal) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self
            .conn
            .execute(
                "INSERT INTO meal (food, price, image) VALUES (?1, ?2, ?3);",
                params![meal.food.as_str(), meal.price, meal.image.as_str()],
            )
            .map(|_| ())
            .map_err(PersistenceError::from);
        observe("create_meal", started_at, result, |_| String::new())
    }

    fn create_order(&self, order: &Order) -> StoreResult<OrderId> {
        let started_at = Instant::now();
        let result = self
            .conn
            .query_row(
                "INSERT INTO orders (meal, price, image, plates, totalcost)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id;",
                params![
                    order.meal.as_str(),
                    order.price,
                    order.image.as_str(),
                    order.plates,
                    order.total_cost,
                ],
                |row| row.get::<_, OrderId>(0),
            )
            .map_err(PersistenceError::from);
        observe("create_order", started_at, result, |id| {
            format!(" order_id={id}")
        })
    }

    fn create_customer(&self, customer: &Customer) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self
            .conn
            .execute(
                "INSERT INTO customers (customer_name, location_address, meal, totalcost)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    customer.name.as_str(),
                    customer.address.as_str(),
                    customer.meal.as_str(),
                    customer.total_cost,
                ],
            )
            .map(|_| ())
            .map_err(PersistenceError::from);
        observe("create_customer", started_at, result, |_| String::new())
    }

    fn delete_all_orders(&self) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self
            .conn
            .execute("DELETE FROM orders;", [])
            .map_err(PersistenceError::from);
        observe("delete_all_orders", started_at, result, |removed| {
            format!(" rows={removed}")
        })
        .map(|_| ())
    }

    fn delete_order(&self, id: OrderId) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self
            .conn
            .execute("DELETE FROM orders WHERE id = ?1;", [id])
            .map_err(PersistenceError::from);
        observe("delete_order", started_at, result, |removed| {
            format!(" order_id={id} rows={removed}")
        })
        .map(|_| ())
    }

    fn list_meals(&self) -> StoreResult<Vec<Meal>> {
        let started_at = Instant::now();
        let result = self.list_rows(MEAL_SELECT_SQL, parse_meal_row);
        observe("list_meals", started_at, result, |rows| row_count(rows))
    }

    fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let started_at = Instant::now();
        let result = self.list_rows(ORDER_SELECT_SQL, parse_order_row);
        observe("list_orders", started_at, result, |rows| row_count(rows))
    }

    fn list_customers(&self) -> StoreResult<Vec<Customer>> {
        let started_at = Instant::now();
        let result = self.list_rows(CUSTOMER_SELECT_SQL, parse_customer_row);
        observe("list_customers", started_at, result, |rows| row_count(rows))
    }
}

fn parse_meal_row(row: &Row<'_>) -> StoreResult<Meal> {
    Ok(Meal {
        food: column(row, "meal", "food")?,
        price: column(row, "meal", "price")?,
        image: column(row, "meal", "image")?,
    })
}

fn parse_order_row(row: &Row<'_>) -> StoreResult<Order> {
    Ok(Order {
        id: column(row, "orders", "id")?,
        meal: column(row, "orders", "meal")?,
        price: column(row, "orders", "price")?,
        image: column(row, "orders", "image")?,
        plates: column(row, "orders", "plates")?,
        total_cost: column(row, "orders", "totalcost")?,
    })
}

fn parse_customer_row(row: &Row<'_>) -> StoreResult<Customer> {
    Ok(Customer {
        name: column(row, "customers", "customer_name")?,
        address: column(row, "customers", "location_address")?,
        meal: column(row, "customers", "meal")?,
        total_cost: column(row, "customers", "totalcost")?,
    })
}

/// Reads one named column, reporting type mismatches as `Decode` errors.
fn column<T: FromSql>(
    row: &Row<'_>,
    table: &'static str,
    name: &'static str,
) -> StoreResult<T> {
    row.get(name).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => PersistenceError::Decode {
            table,
            column: name,
            message: err.to_string(),
        },
        other => PersistenceError::Sqlite(other),
    })
}

fn row_count<T>(records: &[T]) -> String {
    format!(" rows={}", records.len())
}

/// Emits one `store_op` event for `result` and passes it through unchanged.
fn observe<T>(
    op: &str,
    started_at: Instant,
    result: StoreResult<T>,
    detail: impl FnOnce(&T) -> String,
) -> StoreResult<T> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(value) => debug!(
            "event=store_op module=store op={op} status=ok duration_ms={duration_ms}{}",
            detail(value)
        ),
        Err(err) => {
            let error_code = if err.is_decode() {
                "row_decode_failed"
            } else {
                "statement_failed"
            };
            error!(
                "event=store_op module=store op={op} status=error duration_ms={duration_ms} error_code={error_code} error={err}"
            )
        }
    }
    result
}
