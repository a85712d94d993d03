// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the weft workspace.
//!
//! The wire shapes here follow the upstream shirt-order feed: a status-tagged
//! envelope wrapping a list of loosely typed records. Parsing is tolerant
//! where the feed is known to be dirty (string booleans, empty designs,
//! unparseable dates) and strict where reconciliation needs a value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::WeftError;

/// Wire date format used by the feed (`2026-08-21`).
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Lifecycle state of a stored order.
///
/// Reconciliation never moves this field; only explicit local transitions do.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum OrderState {
    ToDo,
    InProcess,
    Done,
    Delivered,
}

impl OrderState {
    /// Stable string form used in the database and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "to-do",
            Self::InProcess => "in-process",
            Self::Done => "done",
            Self::Delivered => "delivered",
        }
    }
}

impl Default for OrderState {
    fn default() -> Self {
        Self::ToDo
    }
}

/// One shirt order as fetched from the feed, after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShirtOrder {
    /// Source-assigned identifier. Ids repeat across batches; the store
    /// deduplicates on this value.
    pub external_id: i64,
    /// Product label, e.g. `"Classic Tee - Navy"`. Never empty.
    pub name: String,
    /// Order date. `None` when the feed sent nothing parseable.
    pub date: Option<NaiveDate>,
    /// Print design. `None` when the feed sent an empty string.
    pub design: Option<String>,
    /// Expedited shipping flag, normalised from the feed's string booleans.
    pub fast_ship: bool,
    /// Number of shirts. Always positive.
    pub quantity: u32,
    /// Customer contact address, if present.
    pub email: Option<String>,
}

impl ShirtOrder {
    /// Parse one raw feed record.
    ///
    /// Required: integer `id`, non-empty `product` (the feed briefly shipped
    /// the same field as `name`; both spellings are accepted), and a positive
    /// `quantity` when one is present (absent means 1, numeric strings are
    /// accepted). Everything else degrades to `None` or `false` rather than
    /// rejecting the record:
    ///
    /// * `fastShip` is the feed's string boolean; only `"True"`/`"true"` and
    ///   JSON `true` count as set, so the known `"Fasle"` typo reads as
    ///   `false`.
    /// * `date` outside `%Y-%m-%d` becomes `None`.
    /// * empty `design` and `mail` become `None`.
    pub fn from_wire(value: &serde_json::Value) -> Result<Self, WeftError> {
        let obj = value
            .as_object()
            .ok_or_else(|| WeftError::invalid_record("record is not a JSON object"))?;

        let external_id = obj
            .get("id")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| WeftError::invalid_record("missing or non-integer id"))?;

        let name = obj
            .get("product")
            .or_else(|| obj.get("name"))
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                WeftError::invalid_record(format!("record {external_id}: missing product name"))
            })?
            .to_owned();

        let quantity = parse_quantity(obj.get("quantity")).map_err(|reason| {
            WeftError::invalid_record(format!("record {external_id}: {reason}"))
        })?;

        let date = obj
            .get("date")
            .and_then(serde_json::Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), WIRE_DATE_FORMAT).ok());

        let design = obj
            .get("design")
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        let email = obj
            .get("mail")
            .or_else(|| obj.get("email"))
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        let fast_ship = match obj.get("fastShip") {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        };

        Ok(Self {
            external_id,
            name,
            date,
            design,
            fast_ship,
            quantity,
            email,
        })
    }
}

fn parse_quantity(value: Option<&serde_json::Value>) -> Result<u32, String> {
    let value = match value {
        // Absent quantity means one on the wire.
        None | Some(serde_json::Value::Null) => return Ok(1),
        Some(value) => value,
    };
    let qty = match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| format!("non-integer quantity {n}"))?,
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("non-numeric quantity {s:?}"))?,
        other => return Err(format!("non-numeric quantity {other}")),
    };
    u32::try_from(qty)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| format!("non-positive quantity {qty}"))
}

/// A record the batch parser refused, with the position it held in the
/// response payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub index: usize,
    pub reason: String,
}

/// One fetched batch: the orders that parsed, and the records that did not.
///
/// A dirty record never fails the batch; it lands in `rejected` and the
/// caller decides how loudly to log it.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub orders: Vec<ShirtOrder>,
    pub rejected: Vec<RejectedRecord>,
}

impl Batch {
    /// Parse every record in a feed payload, partitioning good from bad.
    pub fn parse(records: &[serde_json::Value]) -> Self {
        let mut batch = Self::default();
        for (index, record) in records.iter().enumerate() {
            match ShirtOrder::from_wire(record) {
                Ok(order) => batch.orders.push(order),
                Err(err) => batch.rejected.push(RejectedRecord {
                    index,
                    reason: err.to_string(),
                }),
            }
        }
        batch
    }

    /// Total records the source sent, valid or not.
    pub fn fetched(&self) -> usize {
        self.orders.len() + self.rejected.len()
    }
}

/// Status-tagged response envelope used by the feed API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiEnvelope {
    Success { data: Vec<serde_json::Value> },
    Error { message: String },
}

impl ApiEnvelope {
    pub fn success(data: Vec<serde_json::Value>) -> Self {
        Self::Success { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// An order as persisted in the local store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredOrder {
    /// Local row id.
    pub id: i64,
    pub external_id: i64,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub design: Option<String>,
    pub fast_ship: bool,
    pub quantity: u32,
    pub email: Option<String>,
    /// Local lifecycle state. Untouched by reconciliation.
    pub state: OrderState,
    /// Set once a delivery has been derived from this order.
    pub converted: bool,
    /// RFC 3339, set on insert.
    pub created_at: String,
    /// RFC 3339, bumped on every reconciled change.
    pub updated_at: String,
}

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row carried this external id; one was inserted.
    Created,
    /// A row existed and at least one mutable field differed.
    Updated,
    /// A row existed and every mutable field already matched.
    Unchanged,
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// Random id tying log lines of one run together.
    pub run_id: String,
    /// Records the source sent, including rejects.
    pub fetched: usize,
    pub created: usize,
    pub updated: usize,
    /// Rows that already matched the fetched record byte for byte.
    pub unchanged: usize,
    /// Records rejected at the parse boundary.
    pub skipped: usize,
}

impl SyncReport {
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            fetched: 0,
            created: 0,
            updated: 0,
            unchanged: 0,
            skipped: 0,
        }
    }

    /// Fold one upsert outcome into the tally.
    pub fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

impl Default for SyncReport {
    fn default() -> Self {
        Self::new()
    }
}

/// One derived delivery, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliverySummary {
    /// Local delivery row id.
    pub delivery_id: i64,
    /// External id of the order it fulfils.
    pub external_id: i64,
    pub product: String,
    pub quantity: u32,
}

/// Outcome of a bulk conversion pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConvertReport {
    pub converted: usize,
    pub already_converted: usize,
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_wire_parses_a_full_record() {
        let record = json!({
            "id": 412,
            "product": "Classic Tee - Navy",
            "date": "2026-08-21",
            "design": "v-neck",
            "fastShip": "True",
            "quantity": 3,
            "mail": "user412@example.com",
        });
        let order = ShirtOrder::from_wire(&record).unwrap();
        assert_eq!(order.external_id, 412);
        assert_eq!(order.name, "Classic Tee - Navy");
        assert_eq!(order.date, NaiveDate::from_ymd_opt(2026, 8, 21));
        assert_eq!(order.design.as_deref(), Some("v-neck"));
        assert!(order.fast_ship);
        assert_eq!(order.quantity, 3);
        assert_eq!(order.email.as_deref(), Some("user412@example.com"));
    }

    #[test]
    fn from_wire_accepts_legacy_name_key() {
        let record = json!({"id": 7, "name": "Retro Tee", "quantity": 1});
        let order = ShirtOrder::from_wire(&record).unwrap();
        assert_eq!(order.name, "Retro Tee");
    }

    #[test]
    fn from_wire_rejects_missing_product() {
        let record = json!({"id": 9, "product": "   ", "quantity": 2});
        let err = ShirtOrder::from_wire(&record).unwrap_err();
        assert!(matches!(err, WeftError::InvalidRecord { .. }));
    }

    #[test]
    fn from_wire_rejects_missing_id() {
        let record = json!({"product": "Tee", "quantity": 2});
        assert!(ShirtOrder::from_wire(&record).is_err());
    }

    #[test]
    fn fast_ship_typo_reads_as_false() {
        let record = json!({"id": 1, "product": "Tee", "quantity": 1, "fastShip": "Fasle"});
        let order = ShirtOrder::from_wire(&record).unwrap();
        assert!(!order.fast_ship);
    }

    #[test]
    fn fast_ship_accepts_bool_and_string_true() {
        for fast in [json!(true), json!("True"), json!("true")] {
            let record = json!({"id": 1, "product": "Tee", "quantity": 1, "fastShip": fast});
            assert!(ShirtOrder::from_wire(&record).unwrap().fast_ship);
        }
    }

    #[test]
    fn unparseable_date_degrades_to_none() {
        let record = json!({"id": 1, "product": "Tee", "quantity": 1, "date": "21/08/2026"});
        let order = ShirtOrder::from_wire(&record).unwrap();
        assert_eq!(order.date, None);
    }

    #[test]
    fn empty_design_degrades_to_none() {
        let record = json!({"id": 1, "product": "Tee", "quantity": 1, "design": ""});
        let order = ShirtOrder::from_wire(&record).unwrap();
        assert_eq!(order.design, None);
    }

    #[test]
    fn quantity_accepts_numeric_strings() {
        let record = json!({"id": 1, "product": "Tee", "quantity": "4"});
        assert_eq!(ShirtOrder::from_wire(&record).unwrap().quantity, 4);
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let record = json!({"id": 1, "product": "Tee"});
        assert_eq!(ShirtOrder::from_wire(&record).unwrap().quantity, 1);
    }

    #[test]
    fn quantity_zero_is_rejected() {
        let record = json!({"id": 1, "product": "Tee", "quantity": 0});
        assert!(ShirtOrder::from_wire(&record).is_err());
    }

    #[test]
    fn batch_parse_partitions_bad_records() {
        let records = vec![
            json!({"id": 1, "product": "Tee", "quantity": 1}),
            json!({"id": 2, "product": "", "quantity": 1}),
            json!("not an object"),
        ];
        let batch = Batch::parse(&records);
        assert_eq!(batch.orders.len(), 1);
        assert_eq!(batch.rejected.len(), 2);
        assert_eq!(batch.rejected[0].index, 1);
        assert_eq!(batch.fetched(), 3);
    }

    #[test]
    fn envelope_round_trips_success() {
        let env = ApiEnvelope::success(vec![json!({"id": 1})]);
        let text = serde_json::to_string(&env).unwrap();
        assert!(text.contains(r#""status":"success""#));
        match serde_json::from_str::<ApiEnvelope>(&text).unwrap() {
            ApiEnvelope::Success { data } => assert_eq!(data.len(), 1),
            ApiEnvelope::Error { .. } => panic!("expected success arm"),
        }
    }

    #[test]
    fn envelope_parses_error_arm() {
        let text = r#"{"status":"error","message":"boom"}"#;
        match serde_json::from_str::<ApiEnvelope>(text).unwrap() {
            ApiEnvelope::Error { message } => assert_eq!(message, "boom"),
            ApiEnvelope::Success { .. } => panic!("expected error arm"),
        }
    }

    #[test]
    fn order_state_round_trips_kebab_case() {
        assert_eq!(OrderState::ToDo.as_str(), "to-do");
        assert_eq!(OrderState::InProcess.to_string(), "in-process");
        assert_eq!("delivered".parse::<OrderState>().unwrap(), OrderState::Delivered);
        assert_eq!(OrderState::default(), OrderState::ToDo);
    }
}
