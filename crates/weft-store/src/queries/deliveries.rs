// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order-to-delivery conversion.
//!
//! Conversion is one transaction: order load, catalog resolution, delivery
//! plus line insert, and the `converted` flip either all land or none do.

use chrono::Utc;
use rusqlite::params;

use weft_core::types::WIRE_DATE_FORMAT;
use weft_core::WeftError;

use crate::database::{domain_err, map_tr_err, Database};
use crate::models::{Delivery, DeliveryLine, DeliverySummary};

use super::catalog;
use super::orders::{row_to_order, ORDER_COLUMNS};

/// Derive the delivery for an order.
///
/// Fails with [`WeftError::OrderNotFound`] when no row carries the external
/// id, [`WeftError::AlreadyConverted`] when the order already produced a
/// delivery, and [`WeftError::DeliveryResolution`] when the catalog is
/// missing a warehouse, outgoing route or customer.
pub async fn convert_order(
    db: &Database,
    external_id: i64,
) -> Result<DeliverySummary, WeftError> {
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let order = {
                let mut stmt = tx.prepare(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders WHERE external_id = ?1"
                ))?;
                match stmt.query_row(params![external_id], row_to_order) {
                    Ok(order) => order,
                    Err(rusqlite::Error::QueryReturnedNoRows) => {
                        return Err(domain_err(WeftError::OrderNotFound { external_id }));
                    }
                    Err(e) => return Err(e.into()),
                }
            };
            if order.converted {
                return Err(domain_err(WeftError::AlreadyConverted { external_id }));
            }

            let warehouse = catalog::first_warehouse(&tx)?.ok_or_else(|| {
                domain_err(WeftError::DeliveryResolution(
                    "no warehouse configured".to_string(),
                ))
            })?;
            let operation = catalog::outgoing_operation_type(&tx, warehouse.id)?.ok_or_else(
                || {
                    domain_err(WeftError::DeliveryResolution(format!(
                        "no outgoing operation type for warehouse {}",
                        warehouse.code
                    )))
                },
            )?;
            let customer = catalog::first_customer(&tx)?.ok_or_else(|| {
                domain_err(WeftError::DeliveryResolution(
                    "no customer partner configured".to_string(),
                ))
            })?;
            let product = catalog::ensure_product(&tx, &order)?;

            let scheduled_date = order
                .date
                .unwrap_or_else(|| Utc::now().date_naive())
                .format(WIRE_DATE_FORMAT)
                .to_string();
            let origin = format!("Feed import - {external_id}");

            tx.execute(
                "INSERT INTO deliveries
                 (order_id, partner_id, operation_type_id, source_location,
                  dest_location, scheduled_date, origin)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    order.id,
                    customer.id,
                    operation.id,
                    operation.source_location,
                    operation.dest_location,
                    scheduled_date,
                    origin,
                ],
            )?;
            let delivery_id = tx.last_insert_rowid();

            tx.execute(
                "INSERT INTO delivery_lines (delivery_id, product_id, description, quantity)
                 VALUES (?1, ?2, ?3, ?4)",
                params![delivery_id, product.id, order.name, order.quantity],
            )?;

            tx.execute(
                "UPDATE orders
                 SET converted = 1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?1",
                params![order.id],
            )?;

            tx.commit()?;
            Ok(DeliverySummary {
                delivery_id,
                external_id,
                product: order.name,
                quantity: order.quantity,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// All deliveries, oldest first.
pub async fn list(db: &Database) -> Result<Vec<Delivery>, WeftError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, order_id, partner_id, operation_type_id, source_location,
                        dest_location, scheduled_date, origin
                 FROM deliveries ORDER BY id ASC",
            )?;
            let deliveries = stmt
                .query_map([], |row| {
                    Ok(Delivery {
                        id: row.get(0)?,
                        order_id: row.get(1)?,
                        partner_id: row.get(2)?,
                        operation_type_id: row.get(3)?,
                        source_location: row.get(4)?,
                        dest_location: row.get(5)?,
                        scheduled_date: row.get(6)?,
                        origin: row.get(7)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(deliveries)
        })
        .await
        .map_err(map_tr_err)
}

/// Lines belonging to one delivery.
pub async fn lines_for(db: &Database, delivery_id: i64) -> Result<Vec<DeliveryLine>, WeftError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, delivery_id, product_id, description, quantity
                 FROM delivery_lines WHERE delivery_id = ?1 ORDER BY id ASC",
            )?;
            let lines = stmt
                .query_map(params![delivery_id], |row| {
                    Ok(DeliveryLine {
                        id: row.get(0)?,
                        delivery_id: row.get(1)?,
                        product_id: row.get(2)?,
                        description: row.get(3)?,
                        quantity: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines)
        })
        .await
        .map_err(map_tr_err)
}
