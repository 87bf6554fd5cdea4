//! # Optflow Charts
//!
//! Server-side SVG rendering for the dashboard. Every chart is a pure
//! function from analytics report structs to an SVG document string; there is
//! no canvas, no JavaScript charting library and no stateful renderer.
//!
//! ## Public API
//!
//! - `timeline_chart`: trade size over the session.
//! - `cumulative_chart`: running volume with dashed sample mean/median guides.
//! - `position_pie`: the four position buckets of one product+expiration.
//! - `position_bars`: stacked per-product position bars for one expiration.

pub mod daily;
pub mod positions;
mod primitives;

pub use daily::{cumulative_chart, timeline_chart};
pub use positions::{position_bars, position_pie};

/// Fill colors for the four position buckets, in bucket order
/// (bought calls, sold calls, bought puts, sold puts).
pub const POSITION_COLORS: [&str; 4] = ["#66c75d", "#c4f5bf", "#d16666", "#f5bfbf"];

/// Display labels for the four position buckets, matching `POSITION_COLORS`.
pub const POSITION_LABELS: [&str; 4] = ["Bought calls", "Sold calls", "Bought puts", "Sold puts"];
