// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the weft order pipeline.
//!
//! This crate provides the error type, the domain and wire types, and the
//! trait seams shared by the feed, the HTTP client, the store, and the
//! reconciliation engine. Every other weft crate depends on this one and
//! nothing here depends back.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::WeftError;
pub use types::{
    ApiEnvelope, Batch, ConvertReport, DeliverySummary, OrderState, RejectedRecord, ShirtOrder,
    StoredOrder, SyncReport, UpsertOutcome,
};

// Re-export the seam traits at crate root.
pub use traits::{OrderRepository, OrderSource, OrderSupply};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weft_error_has_all_variants() {
        // Verify every variant exists and can be constructed.
        let _config = WeftError::Config("test".into());
        let _storage = WeftError::Storage(Box::new(std::io::Error::other("test")));
        let _unavailable = WeftError::SourceUnavailable {
            message: "test".into(),
            source: None,
        };
        let _malformed = WeftError::MalformedResponse("test".into());
        let _invalid = WeftError::InvalidRecord {
            reason: "test".into(),
        };
        let _missing = WeftError::OrderNotFound { external_id: 1 };
        let _converted = WeftError::AlreadyConverted { external_id: 1 };
        let _resolution = WeftError::DeliveryResolution("test".into());
        let _feed = WeftError::Feed {
            message: "test".into(),
            source: None,
        };
        let _internal = WeftError::Internal("test".into());
    }

    #[test]
    fn order_state_has_four_variants() {
        use std::str::FromStr;

        let variants = [
            OrderState::ToDo,
            OrderState::InProcess,
            OrderState::Done,
            OrderState::Delivered,
        ];

        // Verify Display and FromStr round-trip for all variants.
        for variant in &variants {
            let s = variant.to_string();
            let parsed = OrderState::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
            assert_eq!(s, variant.as_str());
        }
    }

    #[test]
    fn report_tallies_upsert_outcomes() {
        let mut report = SyncReport::new();
        report.record(UpsertOutcome::Created);
        report.record(UpsertOutcome::Created);
        report.record(UpsertOutcome::Updated);
        report.record(UpsertOutcome::Unchanged);
        assert_eq!(report.created, 2);
        assert_eq!(report.updated, 1);
        assert_eq!(report.unchanged, 1);
        assert!(!report.run_id.is_empty());
    }

    #[test]
    fn all_seam_traits_are_exported() {
        // If any trait module is missing or fails to compile, this test
        // won't compile either.
        fn _assert_source<T: OrderSource>() {}
        fn _assert_repository<T: OrderRepository>() {}
        fn _assert_supply<T: OrderSupply>() {}
    }
}
