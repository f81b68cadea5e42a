#![cfg(target_arch = "wasm32")]
use crate::audio::AudioEngine;
use crate::core::scroll::ScrollTracker;
use crate::core::segments::SegmentTable;
use crate::core::visual::SceneState;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ringscroll-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let tracker = Rc::new(RefCell::new(ScrollTracker::new()));
    events::wire_scroll_input(&tracker);

    // Audio is optional: if the context cannot be created the visual path
    // still runs, just silently.
    let engine = AudioEngine::new().ok().map(|e| Rc::new(RefCell::new(e)));
    if let Some(engine) = &engine {
        start_asset_load(&document, engine);
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        tracker,
        segments: SegmentTable::builtin(),
        scene: SceneState::new(),
        audio: engine,
        renderer: None,
        document: Some(document),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}

/// Kick asset loading off the frame loop; the toggle button only becomes
/// usable once everything is decoded and the graph is built.
fn start_asset_load(document: &web::Document, engine: &Rc<RefCell<AudioEngine>>) {
    if !engine.borrow_mut().begin_loading() {
        return;
    }
    let engine = engine.clone();
    let document = document.clone();
    spawn_local(async move {
        let audio_ctx = engine.borrow().context().clone();
        match assets::load_all(&audio_ctx).await {
            Ok(loaded) => {
                engine.borrow_mut().finish_loading(loaded);
                wire_audio_toggle(&document, &engine);
            }
            Err(e) => {
                log::error!("audio asset load failed: {:?}", e);
                engine.borrow_mut().fail_loading();
            }
        }
    });
}

fn wire_audio_toggle(document: &web::Document, engine: &Rc<RefCell<AudioEngine>>) {
    if document
        .get_element_by_id(constants::AUDIO_TOGGLE_ID)
        .is_none()
    {
        log::warn!(
            "#{} not found; audio toggle unavailable",
            constants::AUDIO_TOGGLE_ID
        );
        return;
    }
    dom::set_audio_button(document, true, constants::LABEL_ENABLE);

    let engine = engine.clone();
    dom::add_click_listener(document, constants::AUDIO_TOGGLE_ID, move || {
        audio::toggle(&engine);
    });
}
