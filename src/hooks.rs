use gloo_timers::callback::Timeout;
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};
use worldcup_vis::YearRange;
use yew::prelude::*;

/// State and callbacks for the two-handle year slider.
#[derive(Clone)]
pub struct RangeSelector {
    /// Where the handles are right now. Only the labels follow this; the
    /// chart waits for a commit.
    pub live: YearRange,
    /// `input` on the lower handle (live update).
    pub on_lo_input: Callback<InputEvent>,
    /// `input` on the upper handle (live update).
    pub on_hi_input: Callback<InputEvent>,
    /// `change` on either handle: the drag was released.
    pub on_commit: Callback<Event>,
}

fn input_year(target: &HtmlInputElement) -> Option<u16> {
    target.value().parse::<u16>().ok()
}

/// Custom hook splitting a range slider into live label updates and a
/// committed value.
#[hook]
pub fn use_range_selector(committed: YearRange, on_commit: Callback<YearRange>) -> RangeSelector {
    let live = use_state(|| committed);

    // Follow the committed value when it changes from outside (clamping).
    {
        let live = live.clone();
        use_effect_with(committed, move |committed| {
            live.set(*committed);
            || ()
        });
    }

    let on_lo_input = {
        let live = live.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(year) = input_year(&input) {
                // Handles may meet but not cross.
                let next = live.with_lo(year);
                if next.lo() != year {
                    input.set_value(&next.lo().to_string());
                }
                live.set(next);
            }
        })
    };

    let on_hi_input = {
        let live = live.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(year) = input_year(&input) {
                let next = live.with_hi(year);
                if next.hi() != year {
                    input.set_value(&next.hi().to_string());
                }
                live.set(next);
            }
        })
    };

    let on_commit = {
        let live = live.clone();
        Callback::from(move |_: Event| {
            on_commit.emit(*live);
        })
    };

    RangeSelector {
        live: *live,
        on_lo_input,
        on_hi_input,
        on_commit,
    }
}

/// Report the width of `node` once on mount and again after the window has
/// stopped resizing for `delay_ms`.
#[hook]
pub fn use_debounced_resize(node: NodeRef, delay_ms: u32, on_resize: Callback<f64>) {
    use_effect_with(node, move |node| {
        let measure = {
            let node = node.clone();
            move |on_resize: &Callback<f64>| {
                if let Some(el) = node.cast::<Element>() {
                    on_resize.emit(f64::from(el.client_width()));
                }
            }
        };
        measure(&on_resize);

        let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
        let listener = Closure::<dyn Fn()>::new(move || {
            let measure = measure.clone();
            let on_resize = on_resize.clone();
            // Replacing the handle drops, and so cancels, the pending timer.
            *pending.borrow_mut() = Some(Timeout::new(delay_ms, move || {
                measure(&on_resize);
            }));
        });

        let window = gloo_utils::window();
        if let Err(err) =
            window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
        {
            warn!("Could not watch window resizes: {:?}", err);
        }

        move || {
            if let Err(err) = window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            {
                warn!("Could not remove resize listener: {:?}", err);
            }
        }
    });
}
