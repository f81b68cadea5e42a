use crate::audio::AudioEngine;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::core::scroll::ScrollTracker;
use crate::core::segments::SegmentTable;
use crate::core::visual::SceneState;
use crate::dom;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// External renderer seam: called once per frame with the updated scene.
pub type RenderHook = Box<dyn FnMut(&SceneState)>;

/// Everything one update cycle touches, owned explicitly instead of living
/// in module globals. All mutation happens on the single frame callback.
pub struct FrameContext {
    pub tracker: Rc<RefCell<ScrollTracker>>,
    pub segments: SegmentTable,
    pub scene: SceneState,
    pub audio: Option<Rc<RefCell<AudioEngine>>>,
    pub renderer: Option<RenderHook>,
    pub document: Option<web::Document>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let x = self.tracker.borrow_mut().step(dt_sec);
        let segment = *self.segments.resolve(x);
        self.scene.update(&segment, dt_sec);

        if let Some(document) = &self.document {
            for (i, caption) in self.scene.captions.iter().enumerate() {
                dom::sync_caption(document, i, caption.opacity, caption.attached);
            }
        }

        // Audio automation runs on the same coordinate but clamps its own
        // domain; it no-ops until the graph exists.
        if let Some(audio) = &self.audio {
            audio.borrow().apply_frame(x);
        }

        if let Some(render) = &mut self.renderer {
            render(&self.scene);
        }
    }
}

/// Drive `FrameContext::frame` from requestAnimationFrame.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
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
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
