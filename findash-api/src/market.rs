//! Securities price endpoints and realtime feeds (`/api/fin`)

use std::sync::Arc;

use serde_json::{json, Value};

use findash_client::{Dispatcher, StreamManager};
use findash_core::{overseas_key, FindashResult, Operation, Transaction};

use crate::convert::expect_json;

/// Realtime feed paths: the REST path with `/ws` in front of the resource
pub const WS_INVESTMENTS: &str = "/api/fin/ws/investments";
pub const WS_INDEX: &str = "/api/fin/ws/index";
pub const WS_OVERSEAS: &str = "/api/fin/ws/overseas";

/// Domestic/overseas price inquiry and transaction history
#[derive(Debug, Clone)]
pub struct MarketApi {
    dispatcher: Arc<Dispatcher>,
}

impl MarketApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Current price of a domestic stock (6-digit code). The payload is the
    /// provider's raw record, passed through untyped.
    pub async fn domestic_price(&self, itm_no: &str) -> FindashResult<Value> {
        expect_json(
            self.dispatcher
                .dispatch(
                    Operation::Read,
                    "/api/fin/investments",
                    &json!({ "itm_no": itm_no }),
                )
                .await,
        )
    }

    /// Current value of a domestic index (4-digit code)
    pub async fn index_price(&self, idx_code: &str) -> FindashResult<Value> {
        expect_json(
            self.dispatcher
                .dispatch(Operation::Read, "/api/fin/index", &json!({ "idx_code": idx_code }))
                .await,
        )
    }

    /// Current price of an overseas symbol on the given exchange
    pub async fn overseas_price(&self, symbol: &str, exchange: &str) -> FindashResult<Value> {
        expect_json(
            self.dispatcher
                .dispatch(
                    Operation::Read,
                    "/api/fin/overseas",
                    &json!({ "symb": symbol, "excd": exchange }),
                )
                .await,
        )
    }

    /// Transaction history over a YYYYMMDD range (dashes tolerated)
    pub async fn transactions(&self, start: &str, end: &str) -> FindashResult<Vec<Transaction>> {
        let params = json!({
            "start": compact_date(start),
            "end": compact_date(end),
        });
        expect_json(
            self.dispatcher
                .dispatch(Operation::Read, "/api/fin/transactions", &params)
                .await,
        )
    }

    /// Start the realtime feed for a domestic stock
    pub fn connect_domestic(&self, manager: &mut StreamManager, itm_no: &str) -> FindashResult<()> {
        manager.connect(WS_INVESTMENTS, itm_no)
    }

    /// Start the realtime feed for a domestic index
    pub fn connect_index(&self, manager: &mut StreamManager, idx_code: &str) -> FindashResult<()> {
        manager.connect(WS_INDEX, idx_code)
    }

    /// Start the realtime feed for an overseas symbol (`SYM|EXC` key)
    pub fn connect_overseas(
        &self,
        manager: &mut StreamManager,
        symbol: &str,
        exchange: &str,
    ) -> FindashResult<()> {
        manager.connect(WS_OVERSEAS, &overseas_key(symbol, exchange))
    }
}

/// Normalize `YYYY-MM-DD` user input to the backend's `YYYYMMDD`
fn compact_date(date: &str) -> String {
    date.replace('-', "")
}
