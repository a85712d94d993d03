// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Supply trait backing the feed endpoints.

use crate::error::WeftError;

/// Where the feed gets the records it serves.
///
/// The default supply fabricates records with a seedable generator; a corpus
/// supply replays records from a file. Records leave the supply in wire form
/// (raw JSON values), dirt included, because the feed's contract is the
/// upstream one, string booleans and all.
pub trait OrderSupply: Send + Sync {
    /// How many distinct records this supply can serve, or `None` when it
    /// can fabricate indefinitely.
    fn count(&self) -> Option<usize>;

    /// A batch whose size the supply chooses.
    fn pick(&self) -> Result<Vec<serde_json::Value>, WeftError>;

    /// A batch of `amount` records. Supplies with a finite corpus may
    /// return fewer when the corpus is smaller than the request.
    fn sample(&self, amount: usize) -> Result<Vec<serde_json::Value>, WeftError>;
}
