//! Catalog reads and the stock write, over an explicitly passed connection.
//!
//! Every function here runs against whatever transaction the caller has
//! open; the order engine relies on that to keep the stock read and the
//! stock write of one product inside a single atomic read-modify-write.

use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::models::ProductRow;
use crate::schema::products;

/// Plain read of a product. No side effects; two reads without an
/// intervening write return identical rows.
pub fn find_product(
    conn: &mut PgConnection,
    id: Uuid,
) -> QueryResult<Option<ProductRow>> {
    products::table
        .find(id)
        .select(ProductRow::as_select())
        .first(conn)
        .optional()
}

/// Read a product and take a row lock (`SELECT ... FOR UPDATE`) until the
/// surrounding transaction ends. Concurrent placements touching the same
/// product serialize on this lock, so combined demand can never be checked
/// against the same pre-decrement stock twice.
pub fn lock_product(
    conn: &mut PgConnection,
    id: Uuid,
) -> QueryResult<Option<ProductRow>> {
    products::table
        .find(id)
        .select(ProductRow::as_select())
        .for_update()
        .first(conn)
        .optional()
}

/// Write a product's new stock quantity. The caller computes the value from
/// the row it holds a lock on.
pub fn write_stock(conn: &mut PgConnection, id: Uuid, stock_quantity: i32) -> QueryResult<usize> {
    diesel::update(products::table.find(id))
        .set(products::stock_quantity.eq(stock_quantity))
        .execute(conn)
}
