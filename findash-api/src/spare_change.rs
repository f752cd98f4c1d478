//! Spare-change endpoints (`/api/spare-change`)

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;

use findash_client::Dispatcher;
use findash_core::{FindashResult, Operation, RoundUpUnit, SpareChange, SpareChangeSummary};

use crate::convert::expect_json;

/// Round-up tracking against the user's transactions
#[derive(Debug, Clone)]
pub struct SpareChangeApi {
    dispatcher: Arc<Dispatcher>,
}

impl SpareChangeApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The user's current round-up unit
    pub async fn round_up_unit(&self) -> FindashResult<RoundUpUnit> {
        expect_json(
            self.dispatcher
                .dispatch(Operation::Read, "/api/spare-change/round-up-unit", &json!({}))
                .await,
        )
    }

    /// Change the round-up unit; the server rejects values of zero or below
    pub async fn set_round_up_unit(&self, unit: i64) -> FindashResult<RoundUpUnit> {
        expect_json(
            self.dispatcher
                .dispatch(
                    Operation::Update,
                    "/api/spare-change/round-up-unit",
                    &json!({ "unit": unit }),
                )
                .await,
        )
    }

    /// Record the round-up for a transaction
    pub async fn create(&self, tx_id: &str, amount: Decimal) -> FindashResult<SpareChange> {
        let params = json!({ "tx_id": tx_id, "amount": amount });
        expect_json(
            self.dispatcher
                .dispatch(Operation::Create, "/api/spare-change", &params)
                .await,
        )
    }

    /// All recorded round-ups for the current user
    pub async fn list(&self) -> FindashResult<Vec<SpareChange>> {
        expect_json(
            self.dispatcher
                .dispatch(Operation::Read, "/api/spare-change", &json!({}))
                .await,
        )
    }

    /// Round-up total over a period. Both bounds are required; the server
    /// rejects a `period_end` at or before `period_start`.
    pub async fn summary(
        &self,
        period_start: &str,
        period_end: &str,
    ) -> FindashResult<SpareChangeSummary> {
        let params = json!({
            "period_start": period_start,
            "period_end": period_end,
        });
        expect_json(
            self.dispatcher
                .dispatch(Operation::Read, "/api/spare-change/summary", &params)
                .await,
        )
    }
}
