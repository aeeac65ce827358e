//! Observability for the PhotoWalls storefront.
//!
//! - `SessionLogger` - structured logging tagged with the shopper's session
//! - `LogBuilder` - fluent construction of entries with extra fields
//! - `LogSink` - where entries go (stderr, or memory for tests and replays)

mod logging;

pub use logging::*;
