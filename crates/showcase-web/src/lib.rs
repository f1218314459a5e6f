#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use instant::Instant;
use showcase_core::animate::Interpolator;
use showcase_core::camera::OrbitState;
use showcase_core::scroll::{ScrollSample, ScrollState};
use showcase_core::view::default_deck;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub mod dom;
pub mod events;
pub mod frame;
pub mod input;
pub mod overlay;
pub mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("showcase-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, "app-canvas")?;
    dom::sync_canvas_backing_size(&canvas);

    let deck = Rc::new(default_deck());
    log::info!("view deck loaded: {} views", deck.len());
    dom::set_scroll_extent(&document, deck.len());

    let state = Rc::new(RefCell::new(ScrollState::default()));
    let pending_scroll = Rc::new(RefCell::new(Some(ScrollSample {
        offset_px: dom::scroll_offset(&window),
        viewport_px: dom::viewport_height(&window),
    })));
    let orbit = Rc::new(RefCell::new(OrbitState::default()));

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("running without WebGPU; overlay still tracks scrolling");
    }

    let wiring = events::wire(events::WiringInputs {
        canvas: canvas.clone(),
        deck: deck.clone(),
        state: state.clone(),
        pending_scroll: pending_scroll.clone(),
        orbit: orbit.clone(),
    })?;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        deck,
        state,
        pending_scroll,
        orbit,
        interpolator: Interpolator::new(),
        document,
        canvas,
        gpu,
        _wiring: wiring,
        last_instant: Instant::now(),
        time_accum: 0.0,
        shown_index: None,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
