//! Pure Yew view components for the World Cup chart.
//!
//! These render from props only; all state lives in `AppState`.

use crate::hooks::use_range_selector;
use web_sys::HtmlSelectElement;
use worldcup_vis::config::{
    LINE_STROKE, LINE_STROKE_WIDTH, MARGIN_LEFT, MARGIN_TOP, MARKER_FILL, MARKER_HIGHLIGHT_FILL,
    MARKER_RADIUS, MARKER_STROKE, TRANSITION_MS,
};
use worldcup_vis::detail::DisplayFields;
use worldcup_vis::engine::{Marker, RenderPlan};
use worldcup_vis::{Metric, YearRange};
use yew::prelude::*;

fn transition_style() -> String {
    format!("transition-duration: {}ms", TRANSITION_MS)
}

/// Renders the detail panel slots, or a notice when nothing is highlighted.
pub fn render_detail_panel(fields: Option<&DisplayFields>) -> Html {
    let Some(fields) = fields else {
        return html! {
            <div class="detail-panel empty">
                <p class="no-results-message">{ "No tournaments in the selected range" }</p>
            </div>
        };
    };

    let row = |label: &str, value: &str| {
        html! {
            <tr>
                <th>{ label.to_string() }</th>
                <td>{ value.to_string() }</td>
            </tr>
        }
    };

    html! {
        <div class="detail-panel">
            <h3 id="detail-title">{ fields.title.clone() }</h3>
            <table class="detail-table">
                <tbody>
                    { row("Winner", &fields.winner) }
                    { row("Goals", &fields.goals) }
                    { row("Average Goals", &fields.average_goals) }
                    { row("Matches", &fields.matches) }
                    { row("Teams", &fields.teams) }
                    { row("Average Attendance", &fields.average_attendance) }
                </tbody>
            </table>
        </div>
    }
}

/// Single marker, keyed by year so re-renders move it instead of replacing it.
fn render_marker(m: &Marker, on_click: &Callback<u16>) -> Html {
    let year = m.year;
    let onclick = on_click.reform(move |_: MouseEvent| year);
    let fill = if m.highlighted {
        MARKER_HIGHLIGHT_FILL
    } else {
        MARKER_FILL
    };
    html! {
        <circle
            key={year.to_string()}
            class={classes!("marker", m.highlighted.then_some("highlighted"))}
            cx={format!("{:.2}", m.x)}
            cy={format!("{:.2}", m.y)}
            r={MARKER_RADIUS.to_string()}
            fill={fill}
            stroke={MARKER_STROKE}
            style={transition_style()}
            {onclick}
        >
            <title>{ format!("{}: {}", year, m.value) }</title>
        </circle>
    }
}

#[derive(Properties, PartialEq)]
pub struct LineChartProps {
    pub plan: RenderPlan,
    pub on_marker_click: Callback<u16>,
}

#[function_component(LineChart)]
pub fn line_chart(props: &LineChartProps) -> Html {
    let plan = &props.plan;
    let dims = plan.dimensions;

    let body = if plan.is_empty() {
        html! {
            <text class="empty-chart" x={(dims.width / 2.0).to_string()} y={(dims.height / 2.0).to_string()}
                text-anchor="middle">
                { format!("No tournaments between {} and {}", plan.range.lo(), plan.range.hi()) }
            </text>
        }
    } else {
        html! {
            <>
                <g class="x-axis" transform={format!("translate(0,{})", dims.height)}>
                    <line x1="0" x2={dims.width.to_string()} stroke="currentColor" />
                    { plan.x_ticks.iter().map(|t| html! {
                        <g key={t.label.clone()} class="tick" transform={format!("translate({:.2},0)", t.position)}
                            style={transition_style()}>
                            <line y2="6" stroke="currentColor" />
                            <text y="20" text-anchor="middle">{ t.label.clone() }</text>
                        </g>
                    }).collect::<Html>() }
                </g>
                <g class="y-axis">
                    <line y1="0" y2={dims.height.to_string()} stroke="currentColor" />
                    { plan.y_ticks.iter().map(|t| html! {
                        <g key={t.label.clone()} class="tick" transform={format!("translate(0,{:.2})", t.position)}
                            style={transition_style()}>
                            <line x2="-6" stroke="currentColor" />
                            <text x="-9" dy="0.32em" text-anchor="end">{ t.label.clone() }</text>
                        </g>
                    }).collect::<Html>() }
                    <text class="axis-label" transform="rotate(-90)" x={(-dims.height / 2.0).to_string()}
                        y="-48" text-anchor="middle">{ plan.metric.label() }</text>
                </g>
                <path
                    class="line-path"
                    d={plan.line_path().unwrap_or_default()}
                    fill="none"
                    stroke={LINE_STROKE}
                    stroke-width={LINE_STROKE_WIDTH.to_string()}
                    style={transition_style()}
                />
                { plan.markers.iter().map(|m| render_marker(m, &props.on_marker_click)).collect::<Html>() }
            </>
        }
    };

    html! {
        <svg class="chart" width={dims.outer_width().to_string()} height={dims.outer_height().to_string()}>
            <g transform={format!("translate({},{})", MARGIN_LEFT, MARGIN_TOP)}>
                { body }
            </g>
        </svg>
    }
}

/// Dropdown listing every metric.
#[derive(Properties, PartialEq)]
pub struct MetricSelectProps {
    pub selected: Metric,
    pub onchange: Callback<Metric>,
}

#[function_component(MetricSelect)]
pub fn metric_select(props: &MetricSelectProps) -> Html {
    let onchange = props.onchange.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        // Options come from Metric::ALL; anything else is a bug.
        select
            .value()
            .parse::<Metric>()
            .unwrap_or_else(|err| panic!("metric selector out of sync: {}", err))
    });

    html! {
        <div class="form-group">
            <label for="y-axis-select">{ "Metric:" }</label>
            <select id="y-axis-select" {onchange}>
                { Metric::ALL.iter().map(|m| html! {
                    <option value={m.key()} selected={*m == props.selected}>{ m.label() }</option>
                }).collect::<Html>() }
            </select>
        </div>
    }
}

/// Two-handle year slider. Labels track the drag; the chart updates on release.
#[derive(Properties, PartialEq)]
pub struct RangeSliderProps {
    pub bounds: YearRange,
    pub committed: YearRange,
    pub on_commit: Callback<YearRange>,
}

#[function_component(RangeSlider)]
pub fn range_slider(props: &RangeSliderProps) -> Html {
    let selector = use_range_selector(props.committed, props.on_commit.clone());
    let min = props.bounds.lo().to_string();
    let max = props.bounds.hi().to_string();

    html! {
        <div class="form-group range-slider">
            <label>{ "Years:" }</label>
            <div class="slider-with-value">
                <span id="slider-label-left" class="slider-value">{ selector.live.lo() }</span>
                <input type="range"
                    class="slider-lo"
                    min={min.clone()}
                    max={max.clone()}
                    step="1"
                    value={selector.live.lo().to_string()}
                    oninput={selector.on_lo_input.clone()}
                    onchange={selector.on_commit.clone()}
                />
                <input type="range"
                    class="slider-hi"
                    min={min}
                    max={max}
                    step="1"
                    value={selector.live.hi().to_string()}
                    oninput={selector.on_hi_input.clone()}
                    onchange={selector.on_commit.clone()}
                />
                <span id="slider-label-right" class="slider-value">{ selector.live.hi() }</span>
            </div>
        </div>
    }
}

/// Stand-in for the chart when the dataset could not be loaded.
#[derive(Properties, PartialEq)]
pub struct PlaceholderProps {
    pub message: AttrValue,
}

#[function_component(Placeholder)]
pub fn placeholder(props: &PlaceholderProps) -> Html {
    html! {
        <div class="chart-placeholder">
            <p class="no-results-message">{ props.message.clone() }</p>
        </div>
    }
}
