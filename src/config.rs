//! Application-level configuration constants.

use crate::Metric;

// Data source
pub const DATA_URL: &str = "data/fifa-world-cup.csv";

// Chart geometry (outer SVG size and margin convention)
pub const CHART_OUTER_WIDTH: f64 = 600.0;
pub const CHART_OUTER_HEIGHT: f64 = 500.0;
pub const MARGIN_TOP: f64 = 40.0;
pub const MARGIN_RIGHT: f64 = 40.0;
pub const MARGIN_BOTTOM: f64 = 60.0;
pub const MARGIN_LEFT: f64 = 60.0;
/// Below this outer width the chart stops shrinking.
pub const MIN_OUTER_WIDTH: f64 = 320.0;

// Axes
pub const Y_TICK_COUNT: usize = 10;
pub const X_TICK_EVERY_YEARS: u16 = 8;

// Marks
pub const MARKER_RADIUS: f64 = 6.0;
pub const MARKER_FILL: &str = "#5c865b";
pub const MARKER_HIGHLIGHT_FILL: &str = "black";
pub const MARKER_STROKE: &str = "black";
pub const LINE_STROKE: &str = "#86ac86";
pub const LINE_STROKE_WIDTH: f64 = 2.0;

// UI Behavior
pub const TRANSITION_MS: u32 = 600;
pub const RESIZE_DEBOUNCE_MS: u32 = 300;
pub const DEFAULT_METRIC: Metric = Metric::Goals;
