//! Store-access client
//!
//! A thin blocking JSON-over-HTTP client for the remote application store:
//! login, catalog search, artifact delivery. All protocol knowledge lives
//! here; the rest of the crate only sees typed documents and the error
//! classification (auth expired / package not found / other failure).

pub mod client;
pub mod model;

pub use client::{DEFAULT_MARKET_URL, MarketClient};
pub use model::{Delivery, SearchEntry};
