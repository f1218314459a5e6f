use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use showcase_core::animate::Interpolator;
use showcase_core::camera::OrbitState;
use showcase_core::scroll::{ScrollSample, ScrollState};
use showcase_core::view::ViewDeck;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::events::EventWiring;
use crate::{overlay, render};

pub struct FrameContext<'a> {
    pub deck: Rc<ViewDeck>,
    pub state: Rc<RefCell<ScrollState>>,
    pub pending_scroll: Rc<RefCell<Option<ScrollSample>>>,
    pub orbit: Rc<RefCell<OrbitState>>,
    pub interpolator: Interpolator,

    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    /// Keeps the DOM subscriptions alive for the life of the showcase.
    pub _wiring: EventWiring,

    pub last_instant: Instant,
    pub time_accum: f32,
    pub shown_index: Option<usize>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.time_accum += dt_sec;

        // fold the latest scroll measurement into the state; later events
        // superseded earlier ones while we were off-thread
        if let Some(sample) = self.pending_scroll.borrow_mut().take() {
            self.state.borrow_mut().apply_sample(sample, self.deck.len());
        }
        let state = *self.state.borrow();
        let view = self.deck.view(state.view_index);

        // overlay only changes when the discrete index does
        if self.shown_index != Some(state.view_index) {
            overlay::show_view(&self.document, state.view_index, view);
            self.shown_index = Some(state.view_index);
        }

        // ease the orbit offset home once the view stops allowing it
        {
            let mut orbit = self.orbit.borrow_mut();
            if !view.orbit && !orbit.is_dragging() {
                orbit.settle(dt_sec);
            }
        }

        let params = self.interpolator.sample(&self.deck, state);
        let scene = render::SceneFrame {
            rotation: params.rotation + self.orbit.borrow().rotation_offset(),
            zoom: params.zoom,
            background: params.background,
            shading: view.material.shading(),
            wireframe: view.wireframe,
            post: view.post,
            time: self.time_accum,
        };

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&scene) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
