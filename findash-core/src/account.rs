//! Bank account and transaction types
//!
//! Field names mirror the backend schemas; the transaction fields keep the
//! scraping provider's camelCase names (`resAccountTrDate`, ...) because the
//! backend passes them through verbatim.

use serde::{Deserialize, Serialize};

/// A registered bank account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Financial institution code (4 digits)
    pub institution_code: String,

    /// Account number (10-20 digits)
    pub account_number: String,

    /// Encrypted account password, as stored server-side
    pub account_password_enc: String,
}

/// Registered internet-banking credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternetBanking {
    pub institution_code: String,
    pub banking_id: String,
    pub banking_password_enc: String,
}

/// A single ledger entry for an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date (YYYYMMDD)
    #[serde(rename = "resAccountTrDate")]
    pub tr_date: String,

    /// Transaction time (HHMMSS)
    #[serde(rename = "resAccountTrTime")]
    pub tr_time: String,

    /// Withdrawn amount, as a formatted string
    #[serde(rename = "resAccountOut")]
    pub amount_out: String,

    /// Deposited amount, as a formatted string
    #[serde(rename = "resAccountIn")]
    pub amount_in: String,

    #[serde(rename = "resAccountDesc1", default)]
    pub desc1: Option<String>,

    #[serde(rename = "resAccountDesc2", default)]
    pub desc2: Option<String>,

    #[serde(rename = "resAccountDesc3", default)]
    pub desc3: Option<String>,

    #[serde(rename = "resAccountDesc4", default)]
    pub desc4: Option<String>,

    /// Balance after the transaction
    #[serde(rename = "resAfterTranBalance")]
    pub balance_after: String,
}

/// Single account plus its transactions, from `/api/account/detail/{number}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDetail {
    pub account: Account,
    pub transactions: Vec<Transaction>,
}
