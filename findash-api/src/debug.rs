//! Debug endpoints (`/api/debug`)

use std::sync::Arc;

use serde_json::{json, Value};

use findash_client::Dispatcher;
use findash_core::{FindashResult, Operation};

use crate::convert::expect_json;

/// Maintenance triggers. Only useful against a backend running with its
/// debug routes enabled.
#[derive(Debug, Clone)]
pub struct DebugApi {
    dispatcher: Arc<Dispatcher>,
}

impl DebugApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Queue an immediate transaction and round-up synchronization. The
    /// acknowledgement carries a `detail` message and the queued `task_id`.
    pub async fn sync_now(&self) -> FindashResult<Value> {
        expect_json(
            self.dispatcher
                .dispatch(Operation::Create, "/api/debug/sync-now", &json!({}))
                .await,
        )
    }
}
