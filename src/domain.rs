//! Domain module - market records and value rules
//!
//! Each module is its own file in the domain/ directory; public exports are
//! defined here for convenience.

pub mod change;
pub mod record;

pub use change::{ChangeDirection, signed_change};
pub use record::{CoinRecord, NOT_AVAILABLE, QuoteRecord, Record};
