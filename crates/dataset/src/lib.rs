//! # Optflow Dataset Crate
//!
//! This crate owns the system's single table of trade records. It loads the
//! input spreadsheet once and serves read-only, filtered views of it to the
//! rest of the application.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Adapter:** This crate encapsulates all file-format logic. The
//!   rest of the application only ever sees `TradeRecord`s and never touches
//!   raw rows, headers or parsing.
//! - **Load Once, Never Mutate:** The `TradeStore` is built in one pass at
//!   startup and is immutable afterwards. Every view it hands out borrows the
//!   loaded records; nothing is copied or re-read per request.
//! - **Lenient Ingest:** Rows with missing or unparseable fields are dropped
//!   and counted, mirroring how an analyst would `dropna` the sheet before
//!   working with it. The drop count is logged, never silently hidden.
//!
//! ## Public API
//!
//! - `load_trades`: reads the CSV at a path and builds a `TradeStore`.
//! - `TradeStore`: the in-memory table with its filtered views.
//! - `DatasetError`: the specific error types that can be returned from this crate.

pub mod error;
pub mod loader;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use loader::load_trades;
pub use store::TradeStore;
