// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pseudorandom shirt-order supplier.
//!
//! Draws are independent, so one batch can repeat an external id. The
//! payloads are deliberately dirty (string booleans with a typo variant,
//! blank designs) and importers are expected to cope.

use std::sync::Mutex;

use chrono::{Days, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use weft_core::types::WIRE_DATE_FORMAT;
use weft_core::{OrderSupply, WeftError};

const PRODUCTS: [&str; 2] = ["Shirt", "T-Shirt"];

const DESIGN_STYLES: [&str; 31] = [
    "Modern",
    "Classic",
    "Minimal",
    "Vintage",
    "Abstract",
    "Geometric",
    "Floral",
    "Industrial",
    "Scandinavian",
    "Bohemian",
    "Rustic",
    "Contemporary",
    "Eclectic",
    "Art Deco",
    "Retro",
    "Futuristic",
    "Baroque",
    "Gothic",
    "Tropical",
    "Nautical",
    "Urban",
    "Traditional",
    "Mid-Century",
    "Pop Art",
    "Country",
    "Shabby Chic",
    "Oriental",
    "Mediterranean",
    "Victorian",
    "Zen",
    "",
];

const EMAIL_DOMAINS: [&str; 9] = [
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "example.com",
    "company.com",
    "business.org",
    "mail.net",
    "custom.io",
];

// "Fasle" ships on purpose; consumers must read anything but "True" as false.
const FAST_SHIP: [&str; 3] = ["True", "False", "Fasle"];

/// Generates random wire records on demand.
///
/// `min..=max` bounds the source-chosen batch size for [`OrderSupply::pick`].
/// Seeding the RNG makes every batch reproducible.
pub struct Generator {
    min: usize,
    max: usize,
    rng: Mutex<StdRng>,
}

impl Generator {
    /// Create a generator with the given pick-size range. `min` must not
    /// exceed `max`; config validation enforces this upstream.
    pub fn new(min: u32, max: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            min: min as usize,
            max: max as usize,
            rng: Mutex::new(rng),
        }
    }

    fn lock_rng(&self) -> Result<std::sync::MutexGuard<'_, StdRng>, WeftError> {
        self.rng
            .lock()
            .map_err(|_| WeftError::Internal("generator rng lock poisoned".to_string()))
    }

    fn generate(rng: &mut StdRng) -> Value {
        let date = Utc::now().date_naive() - Days::new(rng.gen_range(0..=2));
        let email = format!(
            "user{}@{}",
            rng.gen_range(100..=999),
            EMAIL_DOMAINS[rng.gen_range(0..EMAIL_DOMAINS.len())]
        );
        json!({
            "id": rng.gen_range(1..=1000),
            "product": PRODUCTS[rng.gen_range(0..PRODUCTS.len())],
            "date": date.format(WIRE_DATE_FORMAT).to_string(),
            "design": DESIGN_STYLES[rng.gen_range(0..DESIGN_STYLES.len())],
            "fastShip": FAST_SHIP[rng.gen_range(0..FAST_SHIP.len())],
            "quantity": rng.gen_range(1..=20),
            "mail": email,
        })
    }
}

impl OrderSupply for Generator {
    fn count(&self) -> Option<usize> {
        None
    }

    fn pick(&self) -> Result<Vec<Value>, WeftError> {
        let mut rng = self.lock_rng()?;
        let size = rng.gen_range(self.min..=self.max);
        Ok((0..size).map(|_| Self::generate(&mut rng)).collect())
    }

    fn sample(&self, amount: usize) -> Result<Vec<Value>, WeftError> {
        let mut rng = self.lock_rng()?;
        Ok((0..amount).map(|_| Self::generate(&mut rng)).collect())
    }
}
