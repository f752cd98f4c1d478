//! Account endpoints (`/api/account`)

use std::sync::Arc;

use serde_json::json;

use findash_client::Dispatcher;
use findash_core::{Account, AccountDetail, FindashResult, Operation};

use crate::convert::{expect_json, expect_ok};

/// Account and internet-banking registration plus inquiry
#[derive(Debug, Clone)]
pub struct AccountApi {
    dispatcher: Arc<Dispatcher>,
}

impl AccountApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Register internet-banking credentials (`POST /api/account/register/ib`)
    pub async fn register_internet_banking(
        &self,
        institution_code: &str,
        banking_id: &str,
        banking_password: &str,
    ) -> FindashResult<()> {
        let params = json!({
            "institution_code": institution_code,
            "banking_id": banking_id,
            "banking_password": banking_password,
        });
        expect_ok(
            self.dispatcher
                .dispatch(Operation::Create, "/api/account/register/ib", &params)
                .await,
        )
    }

    /// Register a bank account (`POST /api/account/register`)
    pub async fn register_account(
        &self,
        institution_code: &str,
        account_number: &str,
        account_password: &str,
    ) -> FindashResult<Account> {
        let params = json!({
            "institution_code": institution_code,
            "account_number": account_number,
            "account_password": account_password,
        });
        expect_json(
            self.dispatcher
                .dispatch(Operation::Create, "/api/account/register", &params)
                .await,
        )
    }

    /// All accounts registered for the current user
    pub async fn list_accounts(&self) -> FindashResult<Vec<Account>> {
        expect_json(
            self.dispatcher
                .dispatch(Operation::Read, "/api/account/list", &json!({}))
                .await,
        )
    }

    /// Single account plus its transactions over a YYYYMMDD date range.
    /// Omitted bounds fall back to the server default (recent 30 days).
    pub async fn account_detail(
        &self,
        account_number: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> FindashResult<AccountDetail> {
        let mut params = serde_json::Map::new();
        if let Some(start) = start {
            params.insert("start".into(), start.into());
        }
        if let Some(end) = end {
            params.insert("end".into(), end.into());
        }

        let path = format!("/api/account/detail/{}", account_number);
        expect_json(
            self.dispatcher
                .dispatch(Operation::Read, &path, &params.into())
                .await,
        )
    }
}
