// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-corpus shirt-order supplier.
//!
//! Loads wire records from a JSON file once at startup and serves uniform
//! samples without replacement, so one response never repeats an external
//! id. The feed itself is fixed across calls.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use weft_core::{OrderSupply, WeftError};

/// Serves samples from a fixed set of wire records.
///
/// The backing file is either a bare JSON array or an object with a `data`
/// array. An empty or malformed corpus is a startup error, not something to
/// limp along with.
#[derive(Debug)]
pub struct Corpus {
    records: Vec<Value>,
    min: usize,
    max: usize,
    rng: Mutex<StdRng>,
}

impl Corpus {
    pub fn load(path: &str, min: u32, max: u32, seed: Option<u64>) -> Result<Self, WeftError> {
        let raw = std::fs::read_to_string(path).map_err(|e| WeftError::Feed {
            message: format!("failed to read corpus {path}: {e}"),
            source: Some(Box::new(e)),
        })?;
        let parsed: Value = serde_json::from_str(&raw).map_err(|e| WeftError::Feed {
            message: format!("corpus {path} is not valid JSON: {e}"),
            source: Some(Box::new(e)),
        })?;

        let records = match parsed {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(WeftError::Feed {
                        message: format!("corpus {path} has no top-level data array"),
                        source: None,
                    });
                }
            },
            _ => {
                return Err(WeftError::Feed {
                    message: format!("corpus {path} must hold an array of records"),
                    source: None,
                });
            }
        };

        if records.is_empty() {
            return Err(WeftError::Feed {
                message: format!("corpus {path} is empty"),
                source: None,
            });
        }
        if let Some(index) = records.iter().position(|r| !r.is_object()) {
            return Err(WeftError::Feed {
                message: format!("corpus {path} record {index} is not an object"),
                source: None,
            });
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            records,
            min: min as usize,
            max: max as usize,
            rng: Mutex::new(rng),
        })
    }

    fn lock_rng(&self) -> Result<std::sync::MutexGuard<'_, StdRng>, WeftError> {
        self.rng
            .lock()
            .map_err(|_| WeftError::Internal("corpus rng lock poisoned".to_string()))
    }
}

impl OrderSupply for Corpus {
    fn count(&self) -> Option<usize> {
        Some(self.records.len())
    }

    fn pick(&self) -> Result<Vec<Value>, WeftError> {
        let upper = self.max.min(self.records.len());
        let lower = self.min.min(upper);
        let mut rng = self.lock_rng()?;
        let size = rng.gen_range(lower..=upper);
        Ok(self
            .records
            .choose_multiple(&mut *rng, size)
            .cloned()
            .collect())
    }

    fn sample(&self, amount: usize) -> Result<Vec<Value>, WeftError> {
        let amount = amount.min(self.records.len());
        let mut rng = self.lock_rng()?;
        Ok(self
            .records
            .choose_multiple(&mut *rng, amount)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::io::Write;

    fn corpus_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn wire_records(count: usize) -> String {
        let records: Vec<String> = (1..=count)
            .map(|id| {
                format!(
                    r#"{{"id": {id}, "product": "Shirt", "date": "2026-08-20",
                        "design": "Modern", "fastShip": "True", "quantity": 2,
                        "mail": "user{id}@example.com"}}"#
                )
            })
            .collect();
        format!("[{}]", records.join(","))
    }

    fn load(body: &str, min: u32, max: u32, seed: u64) -> Corpus {
        let file = corpus_file(body);
        Corpus::load(file.path().to_str().unwrap(), min, max, Some(seed)).unwrap()
    }

    #[test]
    fn loads_a_bare_array() {
        let corpus = load(&wire_records(8), 1, 5, 1);
        assert_eq!(corpus.count(), Some(8));
    }

    #[test]
    fn loads_an_enveloped_data_array() {
        let body = format!(r#"{{"data": {}}}"#, wire_records(3));
        let corpus = load(&body, 1, 5, 1);
        assert_eq!(corpus.count(), Some(3));
    }

    #[test]
    fn rejects_missing_file_empty_corpus_and_non_objects() {
        let err = Corpus::load("/nonexistent/corpus.json", 1, 5, None).unwrap_err();
        assert!(matches!(err, WeftError::Feed { .. }));

        let empty = corpus_file("[]");
        let err = Corpus::load(empty.path().to_str().unwrap(), 1, 5, None).unwrap_err();
        assert!(matches!(err, WeftError::Feed { .. }));

        let scalar = corpus_file(r#"[{"id": 1, "product": "Shirt"}, 42]"#);
        let err = Corpus::load(scalar.path().to_str().unwrap(), 1, 5, None).unwrap_err();
        assert!(matches!(err, WeftError::Feed { .. }));
    }

    #[test]
    fn sample_never_repeats_an_external_id() {
        let corpus = load(&wire_records(20), 1, 5, 42);
        for _ in 0..30 {
            let batch = corpus.sample(10).unwrap();
            let ids: HashSet<i64> = batch.iter().map(|r| r["id"].as_i64().unwrap()).collect();
            assert_eq!(ids.len(), batch.len());
        }
    }

    #[test]
    fn sample_caps_at_the_corpus_size() {
        let corpus = load(&wire_records(4), 1, 5, 42);
        assert_eq!(corpus.sample(50).unwrap().len(), 4);
    }

    #[test]
    fn pick_caps_its_range_at_the_corpus_size() {
        // Three records but a 1..=5 pick range: sizes must stay within 1..=3.
        let corpus = load(&wire_records(3), 1, 5, 9);
        for _ in 0..30 {
            let len = corpus.pick().unwrap().len();
            assert!((1..=3).contains(&len));
        }
    }

    proptest! {
        #[test]
        fn sampling_is_always_duplicate_free(
            size in 1usize..40,
            amount in 0usize..60,
            seed in 0u64..500,
        ) {
            let corpus = load(&wire_records(size), 1, 5, seed);
            let batch = corpus.sample(amount).unwrap();
            prop_assert!(batch.len() <= amount);
            prop_assert!(batch.len() <= size);
            let ids: HashSet<i64> =
                batch.iter().map(|r| r["id"].as_i64().unwrap()).collect();
            prop_assert_eq!(ids.len(), batch.len());
        }
    }
}
