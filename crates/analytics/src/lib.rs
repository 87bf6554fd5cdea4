//! # Optflow Analytics Engine
//!
//! This crate derives every displayed view of the dashboard from raw trade
//! records: daily summaries, cumulative volume, top trades, volume grouped by
//! product or expiration, and position breakdowns.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   files, HTTP or rendering. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. It takes borrowed trade records as input and produces
//!   serializable report structs as output. This makes it highly reliable and
//!   easy to test.
//! - **Exact Arithmetic:** Means, medians and percentages are computed with
//!   `Decimal` and rounded only at the edge (2dp for means, 4dp for
//!   percentages), never with floating point.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the main struct that contains the calculation logic.
//! - The report structs (`DailySummary`, `TimelinePoint`, `VolumeGuides`,
//!   `TopTrade`, `VolumeBucket`, `PositionBreakdown`, `ProductPosition`).
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{
    DailySummary, PositionBreakdown, ProductPosition, TimelinePoint, TopTrade, VolumeBucket,
    VolumeGuides,
};
