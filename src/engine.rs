//! View-update engine: turns the current selection into a `RenderPlan`.
//!
//! The plan is a pure value. Calling `recompute` twice with the same inputs
//! gives equal plans, and markers are keyed by year so the view can move
//! existing marks instead of recreating them.

use crate::config::{
    CHART_OUTER_HEIGHT, CHART_OUTER_WIDTH, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP,
    MIN_OUTER_WIDTH, X_TICK_EVERY_YEARS, Y_TICK_COUNT,
};
use crate::scale::{year_ticks, LinearScale, Tick};
use crate::{filter_range, Metric, Record, YearRange};
use log::debug;
use std::collections::HashSet;
use std::fmt::Write;

/// Inner drawing area in pixels (outer size minus margins).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            width: CHART_OUTER_WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            height: CHART_OUTER_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }
}

impl Dimensions {
    /// Fit the chart into a container `outer_width` pixels wide, keeping the
    /// default aspect ratio.
    pub fn from_outer_width(outer_width: f64) -> Self {
        let outer_width = if outer_width.is_finite() {
            outer_width.clamp(MIN_OUTER_WIDTH, CHART_OUTER_WIDTH)
        } else {
            CHART_OUTER_WIDTH
        };
        let outer_height = outer_width * CHART_OUTER_HEIGHT / CHART_OUTER_WIDTH;
        Dimensions {
            width: outer_width - MARGIN_LEFT - MARGIN_RIGHT,
            height: outer_height - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    pub fn outer_width(&self) -> f64 {
        self.width + MARGIN_LEFT + MARGIN_RIGHT
    }

    pub fn outer_height(&self) -> f64 {
        self.height + MARGIN_TOP + MARGIN_BOTTOM
    }
}

/// One point marker. `year` is the identity key.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Marker {
    pub year: u16,
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub highlighted: bool,
}

/// Everything one redraw needs: scales, ticks, line, markers, highlight.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RenderPlan {
    pub metric: Metric,
    pub range: YearRange,
    pub dimensions: Dimensions,
    /// Filtered years in ascending order.
    pub years: Vec<u16>,
    pub x_scale: Option<LinearScale>,
    pub y_scale: Option<LinearScale>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub line: Vec<(f64, f64)>,
    pub markers: Vec<Marker>,
    pub highlighted: Option<u16>,
}

impl RenderPlan {
    /// No records in range: no scales, no line, no markers, no highlight.
    pub fn empty(range: YearRange, metric: Metric, dimensions: Dimensions) -> Self {
        RenderPlan {
            metric,
            range,
            dimensions,
            years: Vec::new(),
            x_scale: None,
            y_scale: None,
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            line: Vec::new(),
            markers: Vec::new(),
            highlighted: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn marker(&self, year: u16) -> Option<&Marker> {
        self.markers.iter().find(|m| m.year == year)
    }

    /// SVG path data for the connecting line, `None` when there is nothing to
    /// draw.
    pub fn line_path(&self) -> Option<String> {
        if self.line.is_empty() {
            return None;
        }
        let mut d = String::with_capacity(self.line.len() * 16);
        for (i, (x, y)) in self.line.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            // Writing into a String cannot fail.
            let _ = write!(d, "{}{:.2},{:.2}", cmd, x, y);
        }
        Some(d)
    }

    /// Move the highlight to `year` without touching scales or positions.
    /// Returns false (and changes nothing) if `year` has no marker.
    pub fn set_highlight(&mut self, year: u16) -> bool {
        if self.marker(year).is_none() {
            return false;
        }
        for m in &mut self.markers {
            m.highlighted = m.year == year;
        }
        self.highlighted = Some(year);
        true
    }
}

/// Build the render plan for `records` (sorted ascending by year).
///
/// `preserve` is the previously highlighted year to keep if it survives the
/// filter; otherwise the latest year in range is highlighted.
pub fn recompute(
    records: &[Record],
    range: YearRange,
    metric: Metric,
    dimensions: Dimensions,
    preserve: Option<u16>,
) -> RenderPlan {
    let filtered = filter_range(records, range);

    let (first, last) = match (filtered.first(), filtered.last()) {
        (Some(f), Some(l)) => (f.year, l.year),
        _ => {
            debug!("No tournaments in {}; rendering empty chart", range);
            return RenderPlan::empty(range, metric, dimensions);
        }
    };

    let x_scale = LinearScale::new(
        (f64::from(first), f64::from(last)),
        (0.0, dimensions.width),
    );
    let max_value = filtered
        .iter()
        .map(|r| metric.value(r))
        .fold(0.0_f64, f64::max);
    let y_scale =
        LinearScale::new((0.0, max_value), (dimensions.height, 0.0)).nice(Y_TICK_COUNT);

    let highlighted = match preserve {
        Some(year) if filtered.iter().any(|r| r.year == year) => year,
        _ => last,
    };

    let markers: Vec<Marker> = filtered
        .iter()
        .map(|r| {
            let value = metric.value(r);
            Marker {
                year: r.year,
                x: x_scale.map(f64::from(r.year)),
                y: y_scale.map(value),
                value,
                highlighted: r.year == highlighted,
            }
        })
        .collect();
    let line = markers.iter().map(|m| (m.x, m.y)).collect();

    debug!(
        "Recomputed {} over {}: {} points, x {:?}, y {:?}, highlight {}",
        metric,
        range,
        markers.len(),
        x_scale.domain(),
        y_scale.domain(),
        highlighted
    );

    RenderPlan {
        metric,
        range,
        dimensions,
        years: filtered.iter().map(|r| r.year).collect(),
        x_ticks: year_ticks(&x_scale, first, last, X_TICK_EVERY_YEARS),
        y_ticks: y_scale.tick_marks(Y_TICK_COUNT),
        x_scale: Some(x_scale),
        y_scale: Some(y_scale),
        line,
        markers,
        highlighted: Some(highlighted),
    }
}

/// Keyed enter/update/exit sets between two marker lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    /// Years new in `next`.
    pub entered: Vec<u16>,
    /// Years present in both; these marks move in place.
    pub updated: Vec<u16>,
    /// Years dropped from `prev`.
    pub exited: Vec<u16>,
}

impl MarkerDiff {
    pub fn is_noop(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

pub fn diff_markers(prev: &[Marker], next: &[Marker]) -> MarkerDiff {
    let prev_keys: HashSet<u16> = prev.iter().map(|m| m.year).collect();
    let next_keys: HashSet<u16> = next.iter().map(|m| m.year).collect();

    let mut diff = MarkerDiff::default();
    for m in next {
        if prev_keys.contains(&m.year) {
            diff.updated.push(m.year);
        } else {
            diff.entered.push(m.year);
        }
    }
    diff.exited = prev
        .iter()
        .filter(|m| !next_keys.contains(&m.year))
        .map(|m| m.year)
        .collect();
    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: u16, matches: u32, attendance: u32) -> Record {
        Record {
            year,
            location: format!("Host {}", year),
            winner: "Somebody".to_string(),
            team_count: 16,
            match_count: matches,
            goal_count: matches * 3,
            average_goals: 3.0,
            average_attendance: attendance,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record(1930, 18, 32_808),
            record(1934, 17, 21_353),
            record(1938, 18, 20_872),
            record(1950, 22, 47_511),
        ]
    }

    #[test]
    fn filters_inclusively_in_order() {
        let plan = recompute(
            &sample(),
            YearRange::new(1934, 1950),
            Metric::Matches,
            Dimensions::default(),
            None,
        );
        assert_eq!(plan.years, vec![1934, 1938, 1950]);
        assert_eq!(plan.markers.len(), 3);
        assert_eq!(plan.line.len(), 3);
    }

    #[test]
    fn x_scale_spans_filtered_years() {
        let dims = Dimensions::default();
        let plan = recompute(&sample(), YearRange::new(1900, 2000), Metric::Matches, dims, None);
        assert_eq!(plan.x_scale.unwrap().domain(), (1930.0, 1950.0));
        assert_eq!(plan.markers[0].x, 0.0);
        assert_eq!(plan.markers[3].x, dims.width);
    }

    #[test]
    fn y_scale_starts_at_zero_and_is_nice() {
        let plan = recompute(
            &sample(),
            YearRange::new(1930, 1950),
            Metric::Matches,
            Dimensions::default(),
            None,
        );
        assert_eq!(plan.y_scale.unwrap().domain(), (0.0, 22.0));
        let att = recompute(
            &sample(),
            YearRange::new(1930, 1950),
            Metric::AverageAttendance,
            Dimensions::default(),
            None,
        );
        assert_eq!(att.y_scale.unwrap().domain(), (0.0, 50_000.0));
    }

    #[test]
    fn single_record_is_centered() {
        let dims = Dimensions::default();
        let plan = recompute(&sample(), YearRange::new(1938, 1938), Metric::Matches, dims, None);
        assert_eq!(plan.markers.len(), 1);
        assert_eq!(plan.markers[0].x, dims.width / 2.0);
        assert_eq!(plan.highlighted, Some(1938));
    }

    #[test]
    fn empty_range_yields_empty_plan() {
        let plan = recompute(
            &sample(),
            YearRange::new(1939, 1949),
            Metric::Matches,
            Dimensions::default(),
            Some(1938),
        );
        assert!(plan.is_empty());
        assert!(plan.line_path().is_none());
        assert!(plan.x_scale.is_none() && plan.y_scale.is_none());
        assert_eq!(plan.highlighted, None);
    }

    #[test]
    fn highlight_defaults_to_latest_or_preserves() {
        let records = sample();
        let range = YearRange::new(1930, 1950);
        let dims = Dimensions::default();

        let plan = recompute(&records, range, Metric::Matches, dims, None);
        assert_eq!(plan.highlighted, Some(1950));

        let plan = recompute(&records, range, Metric::Matches, dims, Some(1934));
        assert_eq!(plan.highlighted, Some(1934));
        assert_eq!(plan.markers.iter().filter(|m| m.highlighted).count(), 1);

        let plan = recompute(&records, YearRange::new(1938, 1950), Metric::Matches, dims, Some(1934));
        assert_eq!(plan.highlighted, Some(1950));
    }

    #[test]
    fn set_highlight_only_touches_flags() {
        let mut plan = recompute(
            &sample(),
            YearRange::new(1930, 1950),
            Metric::Matches,
            Dimensions::default(),
            None,
        );
        let before = plan.clone();
        assert!(plan.set_highlight(1934));
        assert_eq!(plan.highlighted, Some(1934));
        assert_eq!(plan.x_scale, before.x_scale);
        assert_eq!(plan.y_scale, before.y_scale);
        assert_eq!(plan.line, before.line);
        assert!(!plan.set_highlight(1942));
        assert_eq!(plan.highlighted, Some(1934));
    }

    #[test]
    fn line_path_lists_points_in_order() {
        let plan = recompute(
            &sample(),
            YearRange::new(1930, 1934),
            Metric::Matches,
            Dimensions::default(),
            None,
        );
        let d = plan.line_path().unwrap();
        assert!(d.starts_with("M0.00,"));
        assert_eq!(d.matches('L').count(), 1);
    }

    #[test]
    fn diff_is_keyed_by_year() {
        let records = sample();
        let dims = Dimensions::default();
        let wide = recompute(&records, YearRange::new(1930, 1950), Metric::Matches, dims, None);
        let narrow = recompute(&records, YearRange::new(1934, 1938), Metric::Matches, dims, None);

        let diff = diff_markers(&wide.markers, &narrow.markers);
        assert!(diff.entered.is_empty());
        assert_eq!(diff.updated, vec![1934, 1938]);
        assert_eq!(diff.exited, vec![1930, 1950]);

        let back = diff_markers(&narrow.markers, &wide.markers);
        assert_eq!(back.entered, vec![1930, 1950]);
        assert!(back.exited.is_empty());
    }

    #[test]
    fn resized_dimensions_keep_aspect() {
        let d = Dimensions::from_outer_width(480.0);
        assert_eq!(d.outer_width(), 480.0);
        assert_eq!(d.outer_height(), 400.0);
        assert_eq!(Dimensions::from_outer_width(2000.0), Dimensions::default());
    }
}
