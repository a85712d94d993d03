// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order reconciliation and lookup queries.
//!
//! The upsert here carries the sync contract: rows are keyed by
//! `external_id`, refetches may rewrite the order fields, and nothing in
//! this module ever moves `state` or `converted`.

use rusqlite::params;

use weft_core::types::WIRE_DATE_FORMAT;
use weft_core::WeftError;

use crate::database::{domain_err, map_tr_err, Database};
use crate::models::{OrderState, ShirtOrder, StoredOrder, StoreSummary, UpsertOutcome};

pub(crate) const ORDER_COLUMNS: &str =
    "id, external_id, name, date, design, fast_ship, quantity, email, state, converted, created_at, updated_at";

/// Map one `SELECT {ORDER_COLUMNS}` row.
pub(crate) fn row_to_order(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredOrder> {
    let date: Option<String> = row.get(3)?;
    let state_raw: String = row.get(8)?;
    let state = state_raw.parse::<OrderState>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(StoredOrder {
        id: row.get(0)?,
        external_id: row.get(1)?,
        name: row.get(2)?,
        date: date.and_then(|d| chrono::NaiveDate::parse_from_str(&d, WIRE_DATE_FORMAT).ok()),
        design: row.get(4)?,
        fast_ship: row.get(5)?,
        quantity: row.get(6)?,
        email: row.get(7)?,
        state,
        converted: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

/// Insert the order or update the row already carrying its external id.
///
/// Existing rows are rewritten only when a fetched field actually differs,
/// and only the fetched fields are touched. The SELECT and the write share
/// one transaction, so two sync cycles can never race a row into
/// duplication.
pub async fn upsert(db: &Database, order: &ShirtOrder) -> Result<UpsertOutcome, WeftError> {
    let order = order.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let date = order.date.map(|d| d.format(WIRE_DATE_FORMAT).to_string());

            let existing = {
                let mut stmt = tx.prepare(
                    "SELECT name, date, design, fast_ship, quantity, email
                     FROM orders WHERE external_id = ?1",
                )?;
                let result = stmt.query_row(params![order.external_id], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, bool>(3)?,
                        row.get::<_, u32>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                });
                match result {
                    Ok(row) => Some(row),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => return Err(e.into()),
                }
            };

            let outcome = match existing {
                None => {
                    tx.execute(
                        "INSERT INTO orders (external_id, name, date, design, fast_ship, quantity, email)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                        params![
                            order.external_id,
                            order.name,
                            date,
                            order.design,
                            order.fast_ship,
                            order.quantity,
                            order.email,
                        ],
                    )?;
                    UpsertOutcome::Created
                }
                Some((name, row_date, design, fast_ship, quantity, email))
                    if name == order.name
                        && row_date == date
                        && design == order.design
                        && fast_ship == order.fast_ship
                        && quantity == order.quantity
                        && email == order.email =>
                {
                    UpsertOutcome::Unchanged
                }
                Some(_) => {
                    tx.execute(
                        "UPDATE orders
                         SET name = ?1, date = ?2, design = ?3, fast_ship = ?4,
                             quantity = ?5, email = ?6,
                             updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                         WHERE external_id = ?7",
                        params![
                            order.name,
                            date,
                            order.design,
                            order.fast_ship,
                            order.quantity,
                            order.email,
                            order.external_id,
                        ],
                    )?;
                    UpsertOutcome::Updated
                }
            };

            tx.commit()?;
            Ok(outcome)
        })
        .await
        .map_err(map_tr_err)
}

/// Get an order by external id.
pub async fn get_by_external_id(
    db: &Database,
    external_id: i64,
) -> Result<Option<StoredOrder>, WeftError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders WHERE external_id = ?1"
            ))?;
            let result = stmt.query_row(params![external_id], row_to_order);
            match result {
                Ok(order) => Ok(Some(order)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// List orders in board order (unconverted first, then by name),
/// optionally filtered by state.
pub async fn list(
    db: &Database,
    state: Option<OrderState>,
) -> Result<Vec<StoredOrder>, WeftError> {
    db.connection()
        .call(move |conn| {
            let mut orders = Vec::new();
            match state {
                Some(state_filter) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {ORDER_COLUMNS} FROM orders
                         WHERE state = ?1 ORDER BY converted ASC, name ASC"
                    ))?;
                    let rows = stmt.query_map(params![state_filter.as_str()], row_to_order)?;
                    for row in rows {
                        orders.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {ORDER_COLUMNS} FROM orders ORDER BY converted ASC, name ASC"
                    ))?;
                    let rows = stmt.query_map([], row_to_order)?;
                    for row in rows {
                        orders.push(row?);
                    }
                }
            }
            Ok(orders)
        })
        .await
        .map_err(map_tr_err)
}

/// Move an order to a new workflow state.
///
/// `converted` is deliberately out of reach; only conversion flips it.
pub async fn set_state(
    db: &Database,
    external_id: i64,
    state: OrderState,
) -> Result<(), WeftError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE orders
                 SET state = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE external_id = ?2",
                params![state.as_str(), external_id],
            )?;
            if changed == 0 {
                return Err(domain_err(WeftError::OrderNotFound { external_id }));
            }
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// External ids of orders with no delivery yet, oldest row first.
pub async fn pending_conversion(db: &Database) -> Result<Vec<i64>, WeftError> {
    db.connection()
        .call(|conn| {
            let mut stmt =
                conn.prepare("SELECT external_id FROM orders WHERE converted = 0 ORDER BY id ASC")?;
            let ids = stmt
                .query_map([], |row| row.get::<_, i64>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ids)
        })
        .await
        .map_err(map_tr_err)
}

/// Aggregate counts for `weft status`.
pub async fn summary(db: &Database) -> Result<StoreSummary, WeftError> {
    db.connection()
        .call(|conn| {
            let count_state = |state: &str| -> rusqlite::Result<i64> {
                conn.query_row(
                    "SELECT COUNT(*) FROM orders WHERE state = ?1",
                    params![state],
                    |r| r.get(0),
                )
            };

            Ok(StoreSummary {
                orders: conn.query_row("SELECT COUNT(*) FROM orders", [], |r| r.get(0))?,
                to_do: count_state("to-do")?,
                in_process: count_state("in-process")?,
                done: count_state("done")?,
                delivered: count_state("delivered")?,
                converted: conn.query_row(
                    "SELECT COUNT(*) FROM orders WHERE converted = 1",
                    [],
                    |r| r.get(0),
                )?,
                deliveries: conn.query_row("SELECT COUNT(*) FROM deliveries", [], |r| r.get(0))?,
            })
        })
        .await
        .map_err(map_tr_err)
}
