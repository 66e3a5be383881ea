//! Expiring per-language feed store.
//!
//! One entry per supported language, each with a fixed time-to-live from
//! insertion. Expiry is lazy: there is no background sweep, an expired entry
//! simply reads as absent until the next successful fetch overwrites it.

mod lock;
mod store;

pub use store::FeedCache;
