use crate::constants::TOUCH_DELTA_SCALE;
use crate::core::scroll::ScrollTracker;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Bind wheel and touch input to the scroll tracker. The tracker only
/// accumulates here; smoothing happens in the frame loop.
pub fn wire_scroll_input(tracker: &Rc<RefCell<ScrollTracker>>) {
    let Some(window) = web::window() else {
        log::warn!("no window; scroll input unavailable");
        return;
    };

    {
        let tracker = tracker.clone();
        let on_wheel = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            tracker.borrow_mut().accumulate(ev.delta_y() as f32);
        }) as Box<dyn FnMut(web::WheelEvent)>);
        _ = window.add_event_listener_with_callback("wheel", on_wheel.as_ref().unchecked_ref());
        on_wheel.forget();
    }

    // Touch drag maps to wheel-style deltas: dragging up scrolls forward.
    let last_touch_y: Rc<RefCell<Option<f32>>> = Rc::new(RefCell::new(None));
    {
        let last_touch_y = last_touch_y.clone();
        let on_start = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            *last_touch_y.borrow_mut() = ev.touches().get(0).map(|t| t.client_y() as f32);
        }) as Box<dyn FnMut(web::TouchEvent)>);
        _ = window
            .add_event_listener_with_callback("touchstart", on_start.as_ref().unchecked_ref());
        on_start.forget();
    }
    {
        let tracker = tracker.clone();
        let last_touch_y = last_touch_y.clone();
        let on_move = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            let Some(touch) = ev.touches().get(0) else {
                return;
            };
            let y = touch.client_y() as f32;
            if let Some(prev) = last_touch_y.borrow_mut().replace(y) {
                tracker.borrow_mut().accumulate((prev - y) * TOUCH_DELTA_SCALE);
            }
        }) as Box<dyn FnMut(web::TouchEvent)>);
        _ = window.add_event_listener_with_callback("touchmove", on_move.as_ref().unchecked_ref());
        on_move.forget();
    }
    {
        let on_end = Closure::wrap(Box::new(move |_ev: web::TouchEvent| {
            *last_touch_y.borrow_mut() = None;
        }) as Box<dyn FnMut(web::TouchEvent)>);
        _ = window.add_event_listener_with_callback("touchend", on_end.as_ref().unchecked_ref());
        on_end.forget();
    }
}
