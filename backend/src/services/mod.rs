//! Service layer for chart computation.
//!
//! Services sit between the HTTP handlers and the provider boundary. They own
//! the immutable chart tables and orchestrate geocoding, time normalization,
//! position lookup and aspect detection.

pub mod aspects;
pub mod chart;
pub mod positions;

pub use aspects::AspectDetector;
pub use chart::{ChartService, ChartSettings, NatalChart, NatalChartInput, TransitChart, TransitInput};
pub use positions::{PositionResolver, PositionSet};
