// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Warehouse, partner and product lookups.
//!
//! These run synchronously against a borrowed connection so conversion can
//! call them from inside its own transaction.

use rusqlite::params;

use crate::models::{OperationType, Partner, Product, StoredOrder, Warehouse};

pub fn first_warehouse(conn: &rusqlite::Connection) -> rusqlite::Result<Option<Warehouse>> {
    let result = conn.query_row(
        "SELECT id, name, code FROM warehouses ORDER BY id ASC LIMIT 1",
        [],
        |row| {
            Ok(Warehouse {
                id: row.get(0)?,
                name: row.get(1)?,
                code: row.get(2)?,
            })
        },
    );
    match result {
        Ok(warehouse) => Ok(Some(warehouse)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn outgoing_operation_type(
    conn: &rusqlite::Connection,
    warehouse_id: i64,
) -> rusqlite::Result<Option<OperationType>> {
    let result = conn.query_row(
        "SELECT id, warehouse_id, kind, source_location, dest_location
         FROM operation_types WHERE warehouse_id = ?1 AND kind = 'outgoing'
         ORDER BY id ASC LIMIT 1",
        params![warehouse_id],
        |row| {
            Ok(OperationType {
                id: row.get(0)?,
                warehouse_id: row.get(1)?,
                kind: row.get(2)?,
                source_location: row.get(3)?,
                dest_location: row.get(4)?,
            })
        },
    );
    match result {
        Ok(op) => Ok(Some(op)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn first_customer(conn: &rusqlite::Connection) -> rusqlite::Result<Option<Partner>> {
    let result = conn.query_row(
        "SELECT id, name, customer_rank FROM partners
         WHERE customer_rank > 0 ORDER BY id ASC LIMIT 1",
        [],
        |row| {
            Ok(Partner {
                id: row.get(0)?,
                name: row.get(1)?,
                customer_rank: row.get(2)?,
            })
        },
    );
    match result {
        Ok(partner) => Ok(Some(partner)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn find_product(conn: &rusqlite::Connection, name: &str) -> rusqlite::Result<Option<Product>> {
    let result = conn.query_row(
        "SELECT id, name, description, default_code, sellable
         FROM products WHERE name = ?1 ORDER BY id ASC LIMIT 1",
        params![name],
        row_to_product,
    );
    match result {
        Ok(product) => Ok(Some(product)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Reuse the product matching the order's name, creating it on first sight.
pub fn ensure_product(
    conn: &rusqlite::Connection,
    order: &StoredOrder,
) -> rusqlite::Result<Product> {
    if let Some(product) = find_product(conn, &order.name)? {
        return Ok(product);
    }
    let default_code = format!("ORD-{}", order.external_id);
    conn.execute(
        "INSERT INTO products (name, description, default_code, sellable)
         VALUES (?1, ?2, ?3, 1)",
        params![order.name, order.design, default_code],
    )?;
    conn.query_row(
        "SELECT id, name, description, default_code, sellable
         FROM products WHERE id = last_insert_rowid()",
        [],
        row_to_product,
    )
}

fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        default_code: row.get(3)?,
        sellable: row.get(4)?,
    })
}
