//! Linear scales for the chart axes.
//!
//! `nice` and `ticks` pick steps of 1, 2 or 5 times a power of ten, so the
//! vertical axis always ends on a round number above the data maximum.

use crate::utils::format_axis_value;

/// Maps a numeric domain linearly onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

/// One axis tick: data value, pixel position along the axis, label.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Tick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Project `value` into the range. A zero-width domain maps everything to
    /// the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        r0 + t * (r1 - r0)
    }

    /// Extend the domain outward to multiples of the tick step for `count`
    /// ticks. Repeats until the step stops changing.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        if !(stop > start) || !start.is_finite() || !stop.is_finite() {
            return self;
        }

        let mut prev_step: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if !(step > 0.0) || prev_step == Some(step) {
                break;
            }
            start = clean(clean(start / step).floor() * step);
            stop = clean(clean(stop / step).ceil() * step);
            prev_step = Some(step);
        }

        self.domain = (start, stop);
        self
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = self.domain;
        if start == stop {
            return vec![start];
        }
        let step = tick_increment(start, stop, count);
        if !(step > 0.0) {
            return Vec::new();
        }
        let first = clean(start / step).ceil() as i64;
        let last = clean(stop / step).floor() as i64;
        (first..=last).map(|i| clean(i as f64 * step)).collect()
    }

    /// `ticks` with positions and formatted labels.
    pub fn tick_marks(&self, count: usize) -> Vec<Tick> {
        self.ticks(count)
            .into_iter()
            .map(|value| Tick {
                value,
                position: self.map(value),
                label: format_axis_value(value),
            })
            .collect()
    }
}

/// Step between ticks when splitting `[start, stop]` into about `count`
/// intervals. Always 1, 2, 5 or 10 times a power of ten.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start) / count.max(1) as f64;
    if !(raw > 0.0) || !raw.is_finite() {
        return 0.0;
    }
    let power = raw.log10().floor();
    let mag = 10f64.powf(power);
    let residual = raw / mag;
    let factor = if residual >= 50f64.sqrt() {
        10.0
    } else if residual >= 10f64.sqrt() {
        5.0
    } else if residual >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * mag
    } else {
        // Divide by the inverse magnitude so 0.1 stays 0.1
        factor / 10f64.powf(-power)
    }
}

/// Drop float noise below 1e-9 so 2.2 / 0.2 counts as 11.
fn clean(v: f64) -> f64 {
    (v * 1e9).round() / 1e9
}

/// Year ticks every `every` calendar years inside `[lo, hi]`. Falls back to
/// the two endpoints when the span holds no multiple of `every`.
pub fn year_ticks(scale: &LinearScale, lo: u16, hi: u16, every: u16) -> Vec<Tick> {
    let every = every.max(1);
    let mut years: Vec<u16> = (lo..=hi).filter(|y| y % every == 0).collect();
    if years.is_empty() {
        years.push(lo);
        if hi != lo {
            years.push(hi);
        }
    }
    years
        .into_iter()
        .map(|y| Tick {
            value: f64::from(y),
            position: scale.map(f64::from(y)),
            label: y.to_string(),
        })
        .collect()
}
