use crate::constants::{AUDIO_TOGGLE_ID, CAPTION_ID_PREFIX};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Mirror one caption's opacity and attachment onto its overlay element.
/// Missing elements are ignored; the host page may render fewer captions.
pub fn sync_caption(document: &web::Document, index: usize, opacity: f32, attached: bool) {
    let id = format!("{CAPTION_ID_PREFIX}{index}");
    if let Some(el) = document.get_element_by_id(&id) {
        if attached {
            _ = el.set_attribute("style", &format!("opacity:{opacity:.3}"));
        } else {
            _ = el.set_attribute("style", "opacity:0;display:none");
        }
    }
}

/// Drive the audio toggle button's enabled flag and label.
pub fn set_audio_button(document: &web::Document, enabled: bool, label: &str) {
    if let Some(el) = document.get_element_by_id(AUDIO_TOGGLE_ID) {
        if let Ok(button) = el.dyn_into::<web::HtmlButtonElement>() {
            button.set_disabled(!enabled);
            button.set_text_content(Some(label));
        }
    }
}
