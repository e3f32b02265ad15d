//! Receipt data model
//!
//! Wire field names (`shortDescription`, `purchaseDate`, ...) match the
//! public receipt-processing API; amounts stay as two-decimal strings until
//! the scoring engine parses them.

use serde::{Deserialize, Serialize};

/// A single purchased line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

/// A purchase receipt as submitted for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<Item>,
    pub total: String,
}

/// Output of one evaluation: the point total plus a human-readable
/// explanation of every rule that fired, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_points: u32,
    pub breakdown: Vec<String>,
}
