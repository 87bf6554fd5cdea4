//! # Optflow Core Types
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: the immutable `TradeRecord` and the small enums that describe
//! an options trade.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate has no dependencies on any other workspace crate.
//!   Everything else depends on it.
//! - **Immutability:** A `TradeRecord` is never modified after it has been
//!   loaded; all derived views elsewhere in the system borrow it read-only.
//!
//! ## Public API
//!
//! - `TradeRecord`: one row of the input spreadsheet.
//! - `OptionType`, `TradeSide`: the call/put and buy/sell enums with their
//!   one-letter wire codes.
//! - `CoreError`: the specific error types that can be returned from this crate.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{OptionType, TradeSide};
pub use error::CoreError;
pub use structs::TradeRecord;
