//! Currency normalization for multi-currency reporting.
//!
//! Pure conversion arithmetic over a caller-supplied rate lookup. The engine
//! never fetches rates itself: the caller passes a snapshot per call, which
//! keeps every operation deterministic and reproducible.

pub mod convert;
pub mod rates;

pub use convert::{Money, convert, round_for_display};
pub use rates::{CurrencyId, RateLookup, RateTable};
