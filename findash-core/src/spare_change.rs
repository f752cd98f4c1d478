//! Spare-change (round-up) types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The user's configured round-up unit (e.g. round to the nearest 1000)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoundUpUnit {
    pub round_up_unit: i64,
}

/// A recorded round-up against a single transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpareChange {
    pub user_id: i64,
    pub tx_id: i64,
    pub round_up: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Round-up total over a period, from `/api/spare-change/summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpareChangeSummary {
    pub total_round_up: Decimal,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}
