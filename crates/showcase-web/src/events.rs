use std::cell::RefCell;
use std::rc::Rc;

use showcase_core::camera::OrbitState;
use showcase_core::scroll::{ScrollSample, ScrollState};
use showcase_core::view::ViewDeck;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::{dom, input};

/// A DOM event subscription scoped to its owner.
///
/// Registration happens in `new`; the listener is removed again when the
/// guard drops, so wiring cannot leak callbacks past the lifetime of the
/// component that owns it.
pub struct Listener<E: wasm_bindgen::convert::FromWasmAbi + 'static> {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(E)>,
}

impl<E: wasm_bindgen::convert::FromWasmAbi + 'static> Listener<E> {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(E) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }
}

impl<E: wasm_bindgen::convert::FromWasmAbi + 'static> Drop for Listener<E> {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Every subscription the showcase holds. Dropping this unhooks the page.
pub struct EventWiring {
    _scroll: Listener<web::Event>,
    _resize: Listener<web::Event>,
    _keydown: Listener<web::KeyboardEvent>,
    _pointer_down: Listener<web::PointerEvent>,
    _pointer_move: Listener<web::PointerEvent>,
    _pointer_up: Listener<web::PointerEvent>,
}

pub struct WiringInputs {
    pub canvas: web::HtmlCanvasElement,
    pub deck: Rc<ViewDeck>,
    pub state: Rc<RefCell<ScrollState>>,
    pub pending_scroll: Rc<RefCell<Option<ScrollSample>>>,
    pub orbit: Rc<RefCell<OrbitState>>,
}

pub fn wire(w: WiringInputs) -> anyhow::Result<EventWiring> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let window_target: &web::EventTarget = window.as_ref();

    // scroll: stash the latest measurement; the frame loop folds it into
    // ScrollState through the one designated update path
    let scroll = {
        let win = window.clone();
        let pending = w.pending_scroll.clone();
        Listener::new(window_target, "scroll", move |_: web::Event| {
            *pending.borrow_mut() = Some(ScrollSample {
                offset_px: dom::scroll_offset(&win),
                viewport_px: dom::viewport_height(&win),
            });
        })
    };

    // resize: keep the canvas backing store at CSS size * devicePixelRatio
    // and re-sample the scroll geometry
    let resize = {
        let win = window.clone();
        let canvas = w.canvas.clone();
        let pending = w.pending_scroll.clone();
        Listener::new(window_target, "resize", move |_: web::Event| {
            dom::sync_canvas_backing_size(&canvas);
            *pending.borrow_mut() = Some(ScrollSample {
                offset_px: dom::scroll_offset(&win),
                viewport_px: dom::viewport_height(&win),
            });
        })
    };

    // keyboard navigation: jump whole views with smooth scrolling
    let keydown = {
        let win = window.clone();
        let state = w.state.clone();
        let count = w.deck.len();
        Listener::new(window_target, "keydown", move |ev: web::KeyboardEvent| {
            let current = state.borrow().view_index;
            if let Some(target) = input::nav_target(&ev.key(), current, count) {
                let top = input::offset_for_view(target, dom::viewport_height(&win) as f64);
                let opts = web::ScrollToOptions::new();
                opts.set_top(top);
                opts.set_behavior(web::ScrollBehavior::Smooth);
                win.scroll_to_with_scroll_to_options(&opts);
                ev.prevent_default();
            }
        })
    };

    // pointer drag orbits the model, only on views that allow it
    let pointer_down = {
        let deck = w.deck.clone();
        let state = w.state.clone();
        let orbit = w.orbit.clone();
        let canvas = w.canvas.clone();
        Listener::new(w.canvas.as_ref(), "pointerdown", move |ev: web::PointerEvent| {
            if deck.view(state.borrow().view_index).orbit {
                orbit
                    .borrow_mut()
                    .begin(ev.client_x() as f32, ev.client_y() as f32);
                let _ = canvas.set_pointer_capture(ev.pointer_id());
                ev.prevent_default();
            }
        })
    };
    let pointer_move = {
        let orbit = w.orbit.clone();
        Listener::new(window_target, "pointermove", move |ev: web::PointerEvent| {
            orbit
                .borrow_mut()
                .drag_to(ev.client_x() as f32, ev.client_y() as f32);
        })
    };
    let pointer_up = {
        let orbit = w.orbit.clone();
        Listener::new(window_target, "pointerup", move |ev: web::PointerEvent| {
            if orbit.borrow().is_dragging() {
                orbit.borrow_mut().end();
                ev.prevent_default();
            }
        })
    };

    Ok(EventWiring {
        _scroll: scroll,
        _resize: resize,
        _keydown: keydown,
        _pointer_down: pointer_down,
        _pointer_move: pointer_move,
        _pointer_up: pointer_up,
    })
}
