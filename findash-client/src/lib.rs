//! API client layer for the Findash banking dashboard
//!
//! One shared [`Dispatcher`] mediates every request/response exchange with
//! the backend; a [`StreamManager`] owns the single live price feed; the
//! [`SessionStore`] holds the bearer credential both read. The per-screen
//! code that consumes this layer only supplies a path and parameters and
//! renders the resulting [`findash_core::Outcome`].

pub mod config;
pub mod dispatcher;
pub mod notice;
pub mod session;
pub mod stream;
pub mod trace;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use dispatcher::{Dispatcher, RequestDescriptor};
pub use notice::{LogNotice, Notice};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use stream::{StreamManager, StreamReading, StreamState};
