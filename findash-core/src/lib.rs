//! Core types for the Findash banking dashboard client
//!
//! This crate defines the shared data structures used across the client,
//! including the dispatch vocabulary, session types, and the payload models
//! for every backend domain.

pub mod account;
pub mod error;
pub mod market;
pub mod outcome;
pub mod spare_change;
pub mod user;

pub use account::{Account, AccountDetail, InternetBanking, Transaction};
pub use error::{FindashError, FindashResult};
pub use market::{overseas_key, PriceTick, DEFAULT_OVERSEAS_EXCHANGE};
pub use outcome::{Operation, Outcome};
pub use spare_change::{RoundUpUnit, SpareChange, SpareChangeSummary};
pub use user::{LoginCheck, Session, Token, UserRegister};
