//! Typed endpoint wrappers for the Findash backend
//!
//! Each wrapper supplies a path and parameters to the shared
//! [`findash_client::Dispatcher`] and decodes the outcome into the payload
//! models from [`findash_core`]; no request/response semantics live here.

mod convert;

pub mod account;
pub mod debug;
pub mod market;
pub mod spare_change;
pub mod user;

pub use account::AccountApi;
pub use debug::DebugApi;
pub use market::{MarketApi, WS_INDEX, WS_INVESTMENTS, WS_OVERSEAS};
pub use spare_change::SpareChangeApi;
pub use user::UserApi;
