//! Main module for the World Cup statistics chart using Yew.
//! Loads the dataset once, then routes every interaction through `AppState`.

use log::{error, info};
use std::rc::Rc;
use worldcup_vis::{
    config::{DATA_URL, RESIZE_DEBOUNCE_MS},
    engine::Dimensions,
    loader::load_dataset,
    state::{AppState, VisEvent},
    RecordStore,
};
use yew::prelude::*;

mod components;
mod hooks;

use components::{render_detail_panel, LineChart, MetricSelect, Placeholder, RangeSlider};
use hooks::use_debounced_resize;

// ──────────────────────────────────────────────────────────────────────────────

/// Dataset availability. Rendering waits for `Ready`.
#[derive(Clone, PartialEq)]
enum LoadStatus {
    Loading,
    Failed(Rc<str>),
    Ready(RecordStore),
}

#[derive(Properties, PartialEq)]
struct DashboardProps {
    store: RecordStore,
}

/// Chart, selectors and detail panel for a loaded dataset.
#[function_component(Dashboard)]
fn dashboard(props: &DashboardProps) -> Html {
    let state = {
        let store = props.store.clone();
        use_reducer(move || AppState::new(store, Dimensions::default()))
    };
    let chart_ref = use_node_ref();

    let on_range_commit = {
        let dispatcher = state.dispatcher();
        Callback::from(move |range| dispatcher.dispatch(VisEvent::RangeCommitted(range)))
    };
    let on_metric_change = {
        let dispatcher = state.dispatcher();
        Callback::from(move |metric| dispatcher.dispatch(VisEvent::MetricChanged(metric)))
    };
    let on_marker_click = {
        let dispatcher = state.dispatcher();
        Callback::from(move |year| dispatcher.dispatch(VisEvent::MarkerClicked(year)))
    };
    let on_resize = {
        let dispatcher = state.dispatcher();
        Callback::from(move |width: f64| {
            dispatcher.dispatch(VisEvent::Resized(Dimensions::from_outer_width(width)))
        })
    };
    use_debounced_resize(chart_ref.clone(), RESIZE_DEBOUNCE_MS, on_resize);

    let selection = state.selection();
    let detail = state.detail();

    html! {
        <div class="container">
            <h1>{ "FIFA World Cup Statistics" }</h1>

            <div class="top-controls">
                <MetricSelect selected={selection.metric} onchange={on_metric_change} />
                <RangeSlider
                    bounds={state.store().year_bounds()}
                    committed={selection.year_range}
                    on_commit={on_range_commit}
                />
            </div>

            <div class="main-row">
                <div id="chart-area" class="chart-section" ref={chart_ref}>
                    <LineChart plan={state.plan().clone()} {on_marker_click} />
                </div>
                { render_detail_panel(detail.as_ref()) }
            </div>
        </div>
    }
}

/// Root component: fetches the CSV once and gates rendering on it.
#[function_component]
pub fn App() -> Html {
    let status = use_state(|| LoadStatus::Loading);

    {
        let status = status.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match load_dataset(DATA_URL).await {
                    Ok(store) => {
                        info!("Dataset ready: {} tournaments", store.len());
                        status.set(LoadStatus::Ready(store));
                    }
                    Err(err) => {
                        error!("Could not load {}: {}", DATA_URL, err);
                        status.set(LoadStatus::Failed(Rc::from(err.to_string())));
                    }
                }
            });
            || ()
        });
    }

    match &*status {
        LoadStatus::Loading => html! { <Placeholder message="Loading World Cup data…" /> },
        LoadStatus::Failed(msg) => html! {
            <Placeholder message={AttrValue::from(format!("Unable to display the chart. {}", msg))} />
        },
        LoadStatus::Ready(store) => html! { <Dashboard store={store.clone()} /> },
    }
}

/// Entry point: installs the panic hook and mounts the app.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
